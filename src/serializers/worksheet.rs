// src/serializers/worksheet.rs

use serde::Serialize;

use crate::{models::worksheet::Worksheet, utils::media::MediaUrls};

#[derive(Debug, Serialize)]
pub struct WorksheetOut {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub file: Option<String>,
    pub image: Option<String>,
    pub lesson: Option<i64>,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
    pub age_group: Option<String>,
}

impl WorksheetOut {
    pub fn new(worksheet: Worksheet, media: &MediaUrls) -> Self {
        Self {
            id: worksheet.id,
            file: media.absolute(Some(&worksheet.file)),
            image: media.absolute(worksheet.image.as_deref()),
            title: worksheet.title,
            description: worksheet.description,
            lesson: worksheet.lesson_id,
            uploaded_at: worksheet.uploaded_at,
            age_group: worksheet.age_group,
        }
    }
}
