//! Sample emails for the demo run

use chrono::{DateTime, Utc};

use crate::models::Email;

fn timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Predefined set of sample emails covering every category
pub fn sample_emails() -> Vec<Email> {
    vec![
        Email {
            id: "001".to_string(),
            sender: "angry.customer@example.com".to_string(),
            subject: "Broken product received".to_string(),
            body: "I received my order #12345 yesterday but it arrived completely damaged. \
                   This is unacceptable and I demand a refund immediately. \
                   This is the worst customer service I've experienced."
                .to_string(),
            timestamp: timestamp("2024-03-15T10:30:00Z"),
        },
        Email {
            id: "002".to_string(),
            sender: "curious.shopper@example.com".to_string(),
            subject: "Question about product specifications".to_string(),
            body: "Hi, I'm interested in buying your premium package but I couldn't find \
                   information about whether it's compatible with Mac OS. \
                   Could you please clarify this? Thanks!"
                .to_string(),
            timestamp: timestamp("2024-03-15T11:45:00Z"),
        },
        Email {
            id: "003".to_string(),
            sender: "happy.user@example.com".to_string(),
            subject: "Amazing customer support".to_string(),
            body: "I just wanted to say thank you for the excellent support I received from \
                   Sarah on your team. She went above and beyond to help resolve my issue. \
                   Keep up the great work!"
                .to_string(),
            timestamp: timestamp("2024-03-15T13:15:00Z"),
        },
        Email {
            id: "004".to_string(),
            sender: "tech.user@example.com".to_string(),
            subject: "Need help with installation".to_string(),
            body: "I've been trying to install the software for the past hour but keep \
                   getting error code 5123. I've already tried restarting my computer and \
                   clearing the cache. Please help!"
                .to_string(),
            timestamp: timestamp("2024-03-15T14:20:00Z"),
        },
        Email {
            id: "005".to_string(),
            sender: "business.client@example.com".to_string(),
            subject: "Partnership opportunity".to_string(),
            body: "Our company is interested in exploring potential partnership opportunities \
                   with your organization. Would it be possible to schedule a call next week \
                   to discuss this further?"
                .to_string(),
            timestamp: timestamp("2024-03-15T15:00:00Z"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_emails_have_unique_ids_and_timestamps() {
        let emails = sample_emails();
        assert_eq!(emails.len(), 5);

        let mut ids: Vec<_> = emails.iter().map(|e| e.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);

        for email in &emails {
            assert!(email.timestamp.is_some());
            assert!(!email.subject.is_empty());
            assert!(!email.body.is_empty());
        }
    }
}
