// src/utils/media.rs

use std::convert::Infallible;
use std::path::{Path, PathBuf};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};

use crate::config::Config;

/// Upload destinations, one directory per kind of media.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    LessonImage,
    LessonVideo,
    BlockVideo,
    QuizCover,
    SortingImage,
    MatchingImage,
    VisualQuestionImage,
    VisualOptionImage,
    AudioQuestionImage,
    AudioOption,
    WorksheetFile,
    WorksheetImage,
    BlogImage,
}

impl MediaKind {
    pub const ALL: [MediaKind; 13] = [
        MediaKind::LessonImage,
        MediaKind::LessonVideo,
        MediaKind::BlockVideo,
        MediaKind::QuizCover,
        MediaKind::SortingImage,
        MediaKind::MatchingImage,
        MediaKind::VisualQuestionImage,
        MediaKind::VisualOptionImage,
        MediaKind::AudioQuestionImage,
        MediaKind::AudioOption,
        MediaKind::WorksheetFile,
        MediaKind::WorksheetImage,
        MediaKind::BlogImage,
    ];

    /// Name used in the upload URL.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::LessonImage => "lesson_image",
            MediaKind::LessonVideo => "lesson_video",
            MediaKind::BlockVideo => "block_video",
            MediaKind::QuizCover => "quiz_cover",
            MediaKind::SortingImage => "sorting_image",
            MediaKind::MatchingImage => "matching_image",
            MediaKind::VisualQuestionImage => "visual_question_image",
            MediaKind::VisualOptionImage => "visual_option_image",
            MediaKind::AudioQuestionImage => "audio_question_image",
            MediaKind::AudioOption => "audio_option",
            MediaKind::WorksheetFile => "worksheet_file",
            MediaKind::WorksheetImage => "worksheet_image",
            MediaKind::BlogImage => "blog_image",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == value)
    }

    /// Directory below the media root the files are stored in.
    pub fn upload_dir(&self) -> &'static str {
        match self {
            MediaKind::LessonImage => "lesson_images",
            MediaKind::LessonVideo => "lessons/videos",
            MediaKind::BlockVideo => "lesson_videos",
            MediaKind::QuizCover => "quiz_covers",
            MediaKind::SortingImage => "sorting_images",
            MediaKind::MatchingImage => "matching_game",
            MediaKind::VisualQuestionImage => "visual_quiz_questions",
            MediaKind::VisualOptionImage => "visual_quiz_options",
            MediaKind::AudioQuestionImage => "audio_quiz_images",
            MediaKind::AudioOption => "audio_quiz_options",
            MediaKind::WorksheetFile => "resources",
            MediaKind::WorksheetImage => "resources_images",
            MediaKind::BlogImage => "blog",
        }
    }

    /// Relative storage path for a new upload, keeping a sane extension.
    pub fn storage_path(&self, original_name: Option<&str>) -> String {
        let ext = original_name
            .and_then(|n| Path::new(n).extension())
            .and_then(|e| e.to_str())
            .filter(|e| e.len() <= 8 && e.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|e| format!(".{}", e.to_ascii_lowercase()))
            .unwrap_or_default();
        format!("{}/{}{}", self.upload_dir(), uuid::Uuid::new_v4(), ext)
    }
}

/// Absolute path on disk of a relative media path.
pub fn disk_path(media_root: &str, relative: &str) -> PathBuf {
    Path::new(media_root).join(relative)
}

/// Resolves storage-relative media paths to absolute URLs for one request.
#[derive(Debug, Clone)]
pub struct MediaUrls {
    /// "scheme://host" of the inbound request.
    origin: String,
    /// Public media prefix, e.g. "/media/".
    prefix: String,
}

impl MediaUrls {
    pub fn new(origin: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            origin: origin.into().trim_end_matches('/').to_string(),
            prefix: prefix.into(),
        }
    }

    /// Absolute URL of a stored path. `None` and empty paths stay `None`;
    /// full URLs pass through and site-rooted paths only get the origin.
    pub fn absolute(&self, path: Option<&str>) -> Option<String> {
        let path = path.map(str::trim).filter(|p| !p.is_empty())?;
        if path.starts_with("http://") || path.starts_with("https://") {
            return Some(path.to_string());
        }
        if path.starts_with('/') {
            return Some(format!("{}{}", self.origin, path));
        }
        Some(format!("{}{}{}", self.origin, self.prefix, path))
    }

    /// Site-relative URL, for HTML pages.
    pub fn relative(&self, path: Option<&str>) -> Option<String> {
        let path = path.map(str::trim).filter(|p| !p.is_empty())?;
        if path.starts_with("http://") || path.starts_with("https://") || path.starts_with('/') {
            return Some(path.to_string());
        }
        Some(format!("{}{}", self.prefix, path))
    }
}

/// Builds `MediaUrls` from the request's scheme and Host header.
impl<S> FromRequestParts<S> for MediaUrls
where
    Config: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = Config::from_ref(state);

        let scheme = parts
            .headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .or_else(|| parts.uri.scheme_str().map(String::from))
            .unwrap_or_else(|| "http".to_string());

        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .or_else(|| parts.uri.authority().map(|a| a.to_string()))
            .unwrap_or_else(|| "localhost".to_string());

        Ok(MediaUrls::new(format!("{}://{}", scheme, host), config.media_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls() -> MediaUrls {
        MediaUrls::new("http://kids.example", "/media/")
    }

    #[test]
    fn relative_paths_get_origin_and_prefix() {
        assert_eq!(
            urls().absolute(Some("quiz_covers/a.png")).as_deref(),
            Some("http://kids.example/media/quiz_covers/a.png")
        );
    }

    #[test]
    fn missing_media_is_null() {
        assert_eq!(urls().absolute(None), None);
        assert_eq!(urls().absolute(Some("")), None);
    }

    #[test]
    fn full_urls_pass_through() {
        let u = "https://cdn.example/x.mp3";
        assert_eq!(urls().absolute(Some(u)).as_deref(), Some(u));
    }

    #[test]
    fn upload_paths_live_in_kind_directory() {
        let path = MediaKind::QuizCover.storage_path(Some("Cover.PNG"));
        assert!(path.starts_with("quiz_covers/"));
        assert!(path.ends_with(".png"));
        assert!(!MediaKind::AudioOption.storage_path(None).contains('.'));
    }

    #[test]
    fn kinds_parse_by_name() {
        for kind in MediaKind::ALL {
            assert_eq!(MediaKind::parse(kind.as_str()), Some(kind));
        }
    }
}
