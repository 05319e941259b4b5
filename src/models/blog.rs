// src/models/blog.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

use crate::{
    i18n::Lang,
    utils::{search::Searchable, slug::is_valid_slug},
};

/// Represents the 'blog_posts' table in the database.
/// Serbian and German columns are empty strings when not translated.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlogPost {
    pub id: i64,

    pub title_en: String,
    pub title_sr: String,
    pub title_de: String,

    pub summary_en: String,
    pub summary_sr: String,
    pub summary_de: String,

    /// HTML body, sanitised on render.
    pub content_en: String,
    pub content_sr: String,
    pub content_de: String,

    pub image: Option<String>,

    /// Assigned once on creation, never regenerated.
    pub slug: String,

    pub is_published: bool,
    pub published_at: chrono::DateTime<chrono::Utc>,
}

impl BlogPost {
    pub fn title_in(&self, lang: Lang) -> &str {
        lang.pick(&self.title_en, Some(&self.title_sr), Some(&self.title_de))
    }

    pub fn summary_in(&self, lang: Lang) -> &str {
        lang.pick(&self.summary_en, Some(&self.summary_sr), Some(&self.summary_de))
    }

    pub fn content_in(&self, lang: Lang) -> &str {
        lang.pick(&self.content_en, Some(&self.content_sr), Some(&self.content_de))
    }
}

impl Searchable for BlogPost {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title_en.as_str(), self.title_sr.as_str(), self.title_de.as_str()]
    }

    fn age_group(&self) -> Option<&str> {
        None
    }
}

/// An explicit slug must fit in one path segment. Blank means "derive one".
fn validate_slug(value: &str) -> Result<(), validator::ValidationError> {
    let value = value.trim();
    if !value.is_empty() && !is_valid_slug(value) {
        return Err(validator::ValidationError::new("invalid_slug"));
    }
    Ok(())
}

/// DTO for creating a blog post. An empty or missing slug is derived from `title_en`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBlogPostRequest {
    #[validate(length(min = 1, max = 200))]
    pub title_en: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub title_sr: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub title_de: String,
    #[serde(default)]
    pub summary_en: String,
    #[serde(default)]
    pub summary_sr: String,
    #[serde(default)]
    pub summary_de: String,
    #[validate(length(min = 1))]
    pub content_en: String,
    #[serde(default)]
    pub content_sr: String,
    #[serde(default)]
    pub content_de: String,
    pub image: Option<String>,
    #[validate(length(max = 220), custom(function = validate_slug))]
    pub slug: Option<String>,
    pub is_published: Option<bool>,
}

/// DTO for updating a blog post. The slug cannot be changed.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBlogPostRequest {
    #[validate(length(min = 1, max = 200))]
    pub title_en: Option<String>,
    #[validate(length(max = 200))]
    pub title_sr: Option<String>,
    #[validate(length(max = 200))]
    pub title_de: Option<String>,
    pub summary_en: Option<String>,
    pub summary_sr: Option<String>,
    pub summary_de: Option<String>,
    #[validate(length(min = 1))]
    pub content_en: Option<String>,
    pub content_sr: Option<String>,
    pub content_de: Option<String>,
    pub image: Option<String>,
    pub is_published: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(slug: Option<&str>) -> CreateBlogPostRequest {
        CreateBlogPostRequest {
            title_en: "Hello".to_string(),
            title_sr: String::new(),
            title_de: String::new(),
            summary_en: String::new(),
            summary_sr: String::new(),
            summary_de: String::new(),
            content_en: "Body".to_string(),
            content_sr: String::new(),
            content_de: String::new(),
            image: None,
            slug: slug.map(String::from),
            is_published: None,
        }
    }

    #[test]
    fn explicit_slug_must_be_path_safe() {
        assert!(request(Some("hello-world")).validate().is_ok());
        assert!(request(Some("  ")).validate().is_ok());
        assert!(request(None).validate().is_ok());
        assert!(request(Some("Hello World/part 2")).validate().is_err());
    }
}
