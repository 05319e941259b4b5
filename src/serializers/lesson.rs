// src/serializers/lesson.rs

use serde::Serialize;

use crate::{
    models::lesson::{Lesson, LessonBlock},
    utils::media::MediaUrls,
};

#[derive(Debug, Serialize)]
pub struct BlockOut {
    pub id: i64,
    pub title: String,
    pub block_type: String,
    pub order: i64,
    pub video: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LessonOut {
    pub id: i64,
    pub category: i64,
    pub category_name: String,
    pub title: String,
    pub title_sr: Option<String>,
    pub title_de: Option<String>,
    pub description: String,
    pub description_sr: Option<String>,
    pub description_de: Option<String>,
    pub age_group: String,
    pub order: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub video_url: Option<String>,
    pub video_file: Option<String>,
    pub image: Option<String>,
    pub has_blocks: bool,
    pub blocks: Vec<BlockOut>,
}

impl LessonOut {
    pub fn new(lesson: Lesson, blocks: Vec<LessonBlock>, media: &MediaUrls) -> Self {
        let blocks: Vec<BlockOut> = blocks
            .into_iter()
            .map(|b| BlockOut {
                id: b.id,
                title: b.title,
                block_type: b.block_type,
                order: b.order,
                video: media.absolute(b.video.as_deref()),
            })
            .collect();

        Self {
            id: lesson.id,
            category: lesson.category_id,
            category_name: lesson.category_name,
            title: lesson.title,
            title_sr: lesson.title_sr,
            title_de: lesson.title_de,
            description: lesson.description,
            description_sr: lesson.description_sr,
            description_de: lesson.description_de,
            age_group: lesson.age_group,
            order: lesson.order,
            created_at: lesson.created_at,
            video_url: lesson.video_url,
            video_file: media.absolute(lesson.video_file.as_deref()),
            image: media.absolute(lesson.image.as_deref()),
            has_blocks: !blocks.is_empty(),
            blocks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_and_media_are_resolved() {
        let lesson = Lesson {
            id: 3,
            category_id: 1,
            category_name: "Colors".to_string(),
            category_order: 0,
            title: "Red and blue".to_string(),
            title_sr: None,
            title_de: Some("Rot und Blau".to_string()),
            description: "Learn two colors".to_string(),
            description_sr: None,
            description_de: None,
            video_url: None,
            video_file: None,
            image: Some("lesson_images/red.png".to_string()),
            created_at: chrono::Utc::now(),
            order: 0,
            age_group: "4-5".to_string(),
        };
        let block = LessonBlock {
            id: 9,
            lesson_id: 3,
            title: "Story time".to_string(),
            title_sr: None,
            title_de: None,
            video: Some("lesson_videos/story.mp4".to_string()),
            block_type: "story".to_string(),
            order: 1,
        };
        let media = MediaUrls::new("http://localhost:8000", "/media/");

        let json = serde_json::to_value(LessonOut::new(lesson, vec![block], &media)).unwrap();
        assert_eq!(json["category"], 1);
        assert_eq!(json["has_blocks"], true);
        assert_eq!(json["image"], "http://localhost:8000/media/lesson_images/red.png");
        assert_eq!(json["video_file"], serde_json::Value::Null);
        assert_eq!(json["blocks"][0]["video"], "http://localhost:8000/media/lesson_videos/story.mp4");
    }
}
