//! Prompt templates for classification and response generation
//!
//! The system prompts are fixed; the user prompts interpolate email fields.
//! Classification runs at temperature 0 and instructs the model to answer
//! with only the category name, which keeps post-validation simple.

use crate::models::{Category, ChatMessage, Email};

pub const CLASSIFICATION_SYSTEM_PROMPT: &str = "You are a classification engine that assigns customer emails \
     to one of the following categories: complaint, inquiry, \
     feedback, support_request, or other. Provide exactly one \
     category as the output.";

pub const RESPONSE_SYSTEM_PROMPT: &str = "You are a customer support assistant. Generate a concise, \
     professional email response tailored to the customer's needs.";

/// Build the classification request messages for an email
pub fn classification_messages(email: &Email) -> Vec<ChatMessage> {
    let user_content = format!(
        "Email Subject: {}\nEmail Body: {}\n\nPlease classify this email into one of: \
         complaint, inquiry, feedback, support_request, other. \
         Respond with only the category.",
        email.subject, email.body
    );
    vec![
        ChatMessage::system(CLASSIFICATION_SYSTEM_PROMPT),
        ChatMessage::user(user_content),
    ]
}

/// Build the response-generation request messages for a classified email
pub fn response_messages(email: &Email, category: Category) -> Vec<ChatMessage> {
    let user_content = format!(
        "Classification: {}\nEmail Subject: {}\nEmail Body: {}\n\n\
         Write an appropriate response to this email.",
        category, email.subject, email.body
    );
    vec![
        ChatMessage::system(RESPONSE_SYSTEM_PROMPT),
        ChatMessage::user(user_content),
    ]
}
