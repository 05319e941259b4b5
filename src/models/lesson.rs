// src/models/lesson.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use url::Url;
use validator::Validate;

use crate::{i18n::Lang, utils::search::Searchable};

/// Audience buckets, as stored: ("4-5", "4–5 years"), ("6-7", "6–7 years").
pub const AGE_GROUPS: [(&str, &str); 2] = [("4-5", "4–5 years"), ("6-7", "6–7 years")];

pub const BLOCK_TYPES: [&str; 2] = ["explain", "story"];

/// Represents the 'lesson_categories' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LessonCategory {
    pub id: i64,
    pub name: String,
    #[sqlx(rename = "sort_order")]
    pub order: i64,
}

/// A lesson joined with the name and ordering of its category.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lesson {
    pub id: i64,
    pub category_id: i64,
    pub category_name: String,
    pub category_order: i64,

    pub title: String,
    pub title_sr: Option<String>,
    pub title_de: Option<String>,

    pub description: String,
    pub description_sr: Option<String>,
    pub description_de: Option<String>,

    /// External video link (usually YouTube).
    pub video_url: Option<String>,

    /// Media-relative path of an uploaded video.
    pub video_file: Option<String>,
    pub image: Option<String>,

    pub created_at: chrono::DateTime<chrono::Utc>,

    #[sqlx(rename = "sort_order")]
    pub order: i64,

    pub age_group: String,
}

impl Lesson {
    pub fn title_in(&self, lang: Lang) -> &str {
        lang.pick(&self.title, self.title_sr.as_deref(), self.title_de.as_deref())
    }

    pub fn description_in(&self, lang: Lang) -> &str {
        lang.pick(
            &self.description,
            self.description_sr.as_deref(),
            self.description_de.as_deref(),
        )
    }

    /// Turns a YouTube watch link into its embeddable form; other links pass through.
    pub fn embed_video_url(&self) -> Option<String> {
        self.video_url.as_deref().map(embed_url)
    }
}

impl Searchable for Lesson {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.title_sr.as_deref().unwrap_or_default(),
            self.title_de.as_deref().unwrap_or_default(),
            self.description.as_str(),
            self.description_sr.as_deref().unwrap_or_default(),
            self.description_de.as_deref().unwrap_or_default(),
        ]
    }

    fn age_group(&self) -> Option<&str> {
        Some(&self.age_group)
    }
}

/// `https://www.youtube.com/watch?v=abcd` → `https://www.youtube.com/embed/abcd`.
pub fn embed_url(raw: &str) -> String {
    let Ok(url) = Url::parse(raw) else {
        return raw.to_string();
    };
    let is_youtube = url
        .host_str()
        .is_some_and(|h| h == "youtube.com" || h.ends_with(".youtube.com"));
    if !is_youtube || url.path() != "/watch" {
        return raw.to_string();
    }
    match url.query_pairs().find(|(k, _)| k == "v") {
        Some((_, id)) if !id.is_empty() => format!("https://www.youtube.com/embed/{}", id),
        _ => raw.to_string(),
    }
}

/// Represents the 'lesson_blocks' table: one playable segment of a lesson.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LessonBlock {
    pub id: i64,
    pub lesson_id: i64,
    pub title: String,
    pub title_sr: Option<String>,
    pub title_de: Option<String>,
    pub video: Option<String>,
    /// 'explain' or 'story'.
    pub block_type: String,
    #[sqlx(rename = "sort_order")]
    pub order: i64,
}

impl LessonBlock {
    pub fn title_in(&self, lang: Lang) -> &str {
        lang.pick(&self.title, self.title_sr.as_deref(), self.title_de.as_deref())
    }
}

/// Display label of an age group code, e.g. "4-5" → "4–5 years".
pub fn age_label(code: &str) -> Option<&'static str> {
    AGE_GROUPS.iter().find(|(c, _)| *c == code).map(|(_, label)| *label)
}

/// Validates an age group against the known buckets.
pub fn validate_age_group(value: &str) -> Result<(), validator::ValidationError> {
    if !AGE_GROUPS.iter().any(|(code, _)| *code == value) {
        return Err(validator::ValidationError::new("invalid_age_group"));
    }
    Ok(())
}

fn validate_block_type(value: &str) -> Result<(), validator::ValidationError> {
    if !BLOCK_TYPES.contains(&value) {
        return Err(validator::ValidationError::new("invalid_block_type"));
    }
    Ok(())
}

/// Validates that a string is a correctly formatted URL.
fn validate_url_string(url: &str) -> Result<(), validator::ValidationError> {
    if Url::parse(url).is_err() {
        return Err(validator::ValidationError::new("invalid_url"));
    }
    Ok(())
}

/// DTO for creating or renaming a category.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub order: i64,
}

/// DTO for creating a lesson.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLessonRequest {
    pub category_id: i64,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(max = 255))]
    pub title_sr: Option<String>,
    #[validate(length(max = 255))]
    pub title_de: Option<String>,
    #[validate(length(min = 1, max = 20000))]
    pub description: String,
    pub description_sr: Option<String>,
    pub description_de: Option<String>,
    #[validate(length(max = 500), custom(function = validate_url_string))]
    pub video_url: Option<String>,
    pub video_file: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[validate(custom(function = validate_age_group))]
    pub age_group: Option<String>,
}

/// DTO for updating a lesson. Fields are optional.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLessonRequest {
    pub category_id: Option<i64>,
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 255))]
    pub title_sr: Option<String>,
    #[validate(length(max = 255))]
    pub title_de: Option<String>,
    #[validate(length(min = 1, max = 20000))]
    pub description: Option<String>,
    pub description_sr: Option<String>,
    pub description_de: Option<String>,
    #[validate(length(max = 500), custom(function = validate_url_string))]
    pub video_url: Option<String>,
    pub video_file: Option<String>,
    pub image: Option<String>,
    pub order: Option<i64>,
    #[validate(custom(function = validate_age_group))]
    pub age_group: Option<String>,
}

/// DTO for adding a block to a lesson.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBlockRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 200))]
    pub title_sr: Option<String>,
    #[validate(length(max = 200))]
    pub title_de: Option<String>,
    pub video: Option<String>,
    #[validate(custom(function = validate_block_type))]
    pub block_type: Option<String>,
    #[serde(default)]
    pub order: i64,
}

/// DTO for updating a block. Fields are optional.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBlockRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 200))]
    pub title_sr: Option<String>,
    #[validate(length(max = 200))]
    pub title_de: Option<String>,
    pub video: Option<String>,
    #[validate(custom(function = validate_block_type))]
    pub block_type: Option<String>,
    pub order: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn youtube_watch_links_become_embeds() {
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=abcd&t=10"),
            "https://www.youtube.com/embed/abcd"
        );
    }

    #[test]
    fn other_links_pass_through() {
        assert_eq!(embed_url("https://vimeo.com/12345"), "https://vimeo.com/12345");
        assert_eq!(embed_url("not a url"), "not a url");
    }

    #[test]
    fn only_known_age_groups_validate() {
        assert!(validate_age_group("4-5").is_ok());
        assert!(validate_age_group("6-7").is_ok());
        assert!(validate_age_group("8-9").is_err());
        assert_eq!(age_label("6-7"), Some("6–7 years"));
        assert_eq!(age_label("8-9"), None);
    }
}
