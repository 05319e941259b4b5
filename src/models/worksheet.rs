// src/models/worksheet.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

use crate::{models::lesson::validate_age_group, utils::search::Searchable};

/// Represents the 'worksheets' table: a downloadable printable.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Worksheet {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub lesson_id: Option<i64>,

    /// Media-relative path of the downloadable file.
    pub file: String,
    pub image: Option<String>,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
    pub age_group: Option<String>,
}

impl Searchable for Worksheet {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }

    fn age_group(&self) -> Option<&str> {
        self.age_group.as_deref()
    }
}

/// DTO for creating a worksheet.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorksheetRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 20000))]
    pub description: String,
    pub lesson_id: Option<i64>,
    #[validate(length(min = 1, max = 255))]
    pub file: String,
    pub image: Option<String>,
    #[validate(custom(function = validate_age_group))]
    pub age_group: Option<String>,
}

/// DTO for updating a worksheet. Fields are optional.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateWorksheetRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 20000))]
    pub description: Option<String>,
    pub lesson_id: Option<i64>,
    #[validate(length(min = 1, max = 255))]
    pub file: Option<String>,
    pub image: Option<String>,
    #[validate(custom(function = validate_age_group))]
    pub age_group: Option<String>,
}
