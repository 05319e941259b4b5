// src/models/contact.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

use crate::utils::search::Searchable;

/// Represents the 'contact_messages' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub is_read: bool,
}

impl Searchable for ContactMessage {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.message.as_str()]
    }

    fn age_group(&self) -> Option<&str> {
        None
    }
}

/// Contact form fields as posted by the browser. Any of them may be missing.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl ContactForm {
    /// Returns (name, email, message) when every field is filled in.
    pub fn complete(&self) -> Option<(&str, &str, &str)> {
        fn filled(v: &Option<String>) -> Option<&str> {
            v.as_deref().map(str::trim).filter(|s| !s.is_empty())
        }
        Some((filled(&self.name)?, filled(&self.email)?, filled(&self.message)?))
    }
}

/// DTO for toggling the read flag from the admin inbox.
#[derive(Debug, Deserialize)]
pub struct MarkReadRequest {
    pub is_read: bool,
}

#[cfg(test)]
mod tests {
    use super::ContactForm;

    #[test]
    fn blank_fields_count_as_missing() {
        let form = ContactForm {
            name: Some("Ana".to_string()),
            email: Some("  ".to_string()),
            message: Some("Hi".to_string()),
        };
        assert!(form.complete().is_none());
    }

    #[test]
    fn complete_form_is_trimmed() {
        let form = ContactForm {
            name: Some(" Ana ".to_string()),
            email: Some("ana@example.com".to_string()),
            message: Some("Hello".to_string()),
        };
        assert_eq!(form.complete(), Some(("Ana", "ana@example.com", "Hello")));
    }
}
