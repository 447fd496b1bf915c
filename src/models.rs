use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A customer email to be processed
///
/// Immutable once constructed; pipeline stages read it but never modify it.
/// Missing subject or body fields deserialize to empty strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Email {
    pub id: String,
    pub sender: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Closed set of email categories
///
/// Every category has a matching handler in the dispatcher; the exhaustive
/// match there means adding a variant forces a handler update.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Complaint,
    Inquiry,
    Feedback,
    SupportRequest,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Complaint,
        Category::Inquiry,
        Category::Feedback,
        Category::SupportRequest,
        Category::Other,
    ];

    /// Parse an already-normalized (trimmed, lowercased) category name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "complaint" => Some(Category::Complaint),
            "inquiry" => Some(Category::Inquiry),
            "feedback" => Some(Category::Feedback),
            "support_request" => Some(Category::SupportRequest),
            "other" => Some(Category::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Complaint => "complaint",
            Category::Inquiry => "inquiry",
            Category::Feedback => "feedback",
            Category::SupportRequest => "support_request",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of processing one email through the pipeline
///
/// Created at the start of `process`, mutated through the stages, read-only
/// once returned. Invariant: `success` implies `response_sent` and no error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessingResult {
    pub email_id: String,
    pub classification: Option<Category>,
    pub response_sent: bool,
    pub success: bool,
    pub error: Option<String>,
}

impl ProcessingResult {
    pub fn new(email_id: impl Into<String>) -> Self {
        Self {
            email_id: email_id.into(),
            classification: None,
            response_sent: false,
            success: false,
            error: None,
        }
    }
}

/// Message role in a chat completion request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

/// A role/content pair sent to the LLM backend
///
/// Constructed fresh per gateway call, never retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}
