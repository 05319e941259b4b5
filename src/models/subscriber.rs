// src/models/subscriber.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

use crate::utils::search::Searchable;

/// Represents the 'subscribers' table: newsletter sign-ups.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subscriber {
    pub id: i64,
    pub email: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Searchable for Subscriber {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.email.as_str()]
    }

    fn age_group(&self) -> Option<&str> {
        None
    }
}

/// DTO for the subscribe API endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct SubscribeRequest {
    #[validate(email(message = "Enter a valid email address."), length(max = 254))]
    pub email: String,
}

/// Subscribe form as posted by the browser.
#[derive(Debug, Default, Deserialize)]
pub struct SubscribeForm {
    pub email: Option<String>,
}
