// src/models/quiz.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

use crate::utils::search::Searchable;

/// Placeholder shown in place of the hidden letter of a spelling word.
pub const MASK_PLACEHOLDER: char = '_';

pub const DIFFICULTIES: [&str; 2] = ["easy", "hard"];

/// Discriminant of a quiz: selects which content shape it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizKind {
    MultipleChoice,
    FillBlank,
    DragDrop,
    Visual,
    Matching,
    Audio,
}

impl QuizKind {
    pub const ALL: [QuizKind; 6] = [
        QuizKind::MultipleChoice,
        QuizKind::FillBlank,
        QuizKind::DragDrop,
        QuizKind::Visual,
        QuizKind::Matching,
        QuizKind::Audio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuizKind::MultipleChoice => "multiple_choice",
            QuizKind::FillBlank => "fill_blank",
            QuizKind::DragDrop => "drag_drop",
            QuizKind::Visual => "visual",
            QuizKind::Matching => "matching",
            QuizKind::Audio => "audio",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == value)
    }

    /// Human label used by the admin forms.
    pub fn label(&self) -> &'static str {
        match self {
            QuizKind::MultipleChoice => "Multiple Choice",
            QuizKind::FillBlank => "Fill in the Blank",
            QuizKind::DragDrop => "Drag and Drop",
            QuizKind::Visual => "Visual Quiz",
            QuizKind::Matching => "Spelling Quiz",
            QuizKind::Audio => "Audio Quiz",
        }
    }
}

impl fmt::Display for QuizKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quiz content, one variant per quiz kind.
///
/// Stored as a single JSON document, so switching a quiz to another kind
/// replaces its content wholesale and leaves nothing of the old kind behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "quiz_type", content = "items", rename_all = "snake_case")]
pub enum QuizContent {
    MultipleChoice(Vec<Question>),
    FillBlank,
    DragDrop(Vec<SortingPair>),
    Visual(Vec<VisualQuestion>),
    Matching(Vec<MatchingItem>),
    Audio(Vec<AudioQuestion>),
}

impl QuizContent {
    pub fn kind(&self) -> QuizKind {
        match self {
            QuizContent::MultipleChoice(_) => QuizKind::MultipleChoice,
            QuizContent::FillBlank => QuizKind::FillBlank,
            QuizContent::DragDrop(_) => QuizKind::DragDrop,
            QuizContent::Visual(_) => QuizKind::Visual,
            QuizContent::Matching(_) => QuizKind::Matching,
            QuizContent::Audio(_) => QuizKind::Audio,
        }
    }

    /// Empty content of the given kind.
    pub fn empty(kind: QuizKind) -> Self {
        match kind {
            QuizKind::MultipleChoice => QuizContent::MultipleChoice(Vec::new()),
            QuizKind::FillBlank => QuizContent::FillBlank,
            QuizKind::DragDrop => QuizContent::DragDrop(Vec::new()),
            QuizKind::Visual => QuizContent::Visual(Vec::new()),
            QuizKind::Matching => QuizContent::Matching(Vec::new()),
            QuizKind::Audio => QuizContent::Audio(Vec::new()),
        }
    }

    /// Gives every item and nested option a fresh id, unique within the quiz.
    /// Ids sent by clients are discarded.
    pub fn assign_ids(&mut self) {
        let mut next = 0_i64;
        let mut id = || {
            next += 1;
            next
        };
        match self {
            QuizContent::MultipleChoice(questions) => {
                for q in questions {
                    q.id = id();
                    for o in &mut q.options {
                        o.id = id();
                    }
                }
            }
            QuizContent::FillBlank => {}
            QuizContent::DragDrop(pairs) => pairs.iter_mut().for_each(|p| p.id = id()),
            QuizContent::Visual(questions) => {
                for q in questions {
                    q.id = id();
                    for o in &mut q.options {
                        o.id = id();
                    }
                }
            }
            QuizContent::Matching(items) => items.iter_mut().for_each(|m| m.id = id()),
            QuizContent::Audio(questions) => {
                for q in questions {
                    q.id = id();
                    for o in &mut q.options {
                        o.id = id();
                    }
                }
            }
        }
    }

    /// Authoring problems that are tolerated but worth flagging: choice
    /// questions without a correct option and spelling words whose masked
    /// index falls outside the word.
    pub fn warnings(&self) -> Vec<String> {
        let mut out = Vec::new();
        match self {
            QuizContent::MultipleChoice(questions) => {
                for q in questions {
                    if !q.options.iter().any(|o| o.is_correct) {
                        out.push(format!("question '{}' has no correct option", q.text));
                    }
                }
            }
            QuizContent::Visual(questions) => {
                for (i, q) in questions.iter().enumerate() {
                    if !q.options.iter().any(|o| o.is_correct) {
                        out.push(format!("visual question #{} has no correct option", i + 1));
                    }
                }
            }
            QuizContent::Audio(questions) => {
                for (i, q) in questions.iter().enumerate() {
                    if !q.options.iter().any(|o| o.is_correct) {
                        out.push(format!("audio question #{} has no correct option", i + 1));
                    }
                }
            }
            QuizContent::Matching(items) => {
                for m in items {
                    if m.correct_letter().is_empty() {
                        out.push(format!(
                            "spelling word {:?} cannot be masked at index {:?}",
                            m.full_word, m.missing_index
                        ));
                    }
                }
            }
            QuizContent::FillBlank | QuizContent::DragDrop(_) => {}
        }
        out
    }
}

/// Multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub id: i64,
    pub text: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    #[serde(default)]
    pub id: i64,
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// Drag-and-drop row: an item to be sorted under a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortingPair {
    #[serde(default)]
    pub id: i64,
    pub label: String,
    pub item: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Spelling item: a picture and a word with one hidden letter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingItem {
    #[serde(default)]
    pub id: i64,
    pub image: String,
    #[serde(default)]
    pub full_word: Option<String>,
    #[serde(default)]
    pub missing_index: Option<i64>,
    #[serde(default)]
    pub distractor1: Option<String>,
    #[serde(default)]
    pub distractor2: Option<String>,
}

impl MatchingItem {
    fn masked_position(&self) -> Option<usize> {
        let word = self.full_word.as_deref()?;
        let index = usize::try_from(self.missing_index?).ok()?;
        (index < word.chars().count()).then_some(index)
    }

    /// The word with the letter at `missing_index` replaced by the placeholder.
    /// An index outside the word leaves it unmasked.
    pub fn masked_word(&self) -> String {
        let word = self.full_word.clone().unwrap_or_default();
        match self.masked_position() {
            Some(index) => word
                .chars()
                .enumerate()
                .map(|(i, c)| if i == index { MASK_PLACEHOLDER } else { c })
                .collect(),
            None => word,
        }
    }

    /// The hidden letter, or an empty string when nothing can be masked.
    pub fn correct_letter(&self) -> String {
        match (self.masked_position(), self.full_word.as_deref()) {
            (Some(index), Some(word)) => word.chars().nth(index).map(String::from).unwrap_or_default(),
            _ => String::new(),
        }
    }
}

/// Picture question answered by choosing one of several images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualQuestion {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub question_text: Option<String>,
    #[serde(default)]
    pub question_image: Option<String>,
    #[serde(default)]
    pub options: Vec<VisualOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualOption {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_correct: bool,
}

/// Listening question: a picture and spoken answer options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioQuestion {
    #[serde(default)]
    pub id: i64,
    pub image: String,
    pub correct_answer: String,
    #[serde(default)]
    pub options: Vec<AudioOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioOption {
    #[serde(default)]
    pub id: i64,
    pub text: String,
    pub audio_file: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// Represents the 'quizzes' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quiz {
    pub id: i64,
    pub title: String,

    /// Mirrors the tag of `content`; kept as a column for filtering.
    pub quiz_type: String,

    /// 'easy' or 'hard'.
    pub difficulty: String,

    pub cover_image: Option<String>,
    pub lesson_id: Option<i64>,
    pub age_group: Option<String>,
    pub content: Json<QuizContent>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Quiz {
    pub fn kind(&self) -> QuizKind {
        self.content.kind()
    }
}

impl Searchable for Quiz {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str()]
    }

    fn age_group(&self) -> Option<&str> {
        self.age_group.as_deref()
    }
}

/// DTO for creating a quiz together with its content.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(custom(function = validate_difficulty))]
    pub difficulty: String,
    #[validate(length(max = 255))]
    pub cover_image: Option<String>,
    pub lesson_id: Option<i64>,
    #[validate(custom(function = crate::models::lesson::validate_age_group))]
    pub age_group: Option<String>,
    pub content: QuizContent,
}

/// DTO for updating quiz metadata. Content is replaced through its own endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuizRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(custom(function = validate_difficulty))]
    pub difficulty: Option<String>,
    #[validate(length(max = 255))]
    pub cover_image: Option<String>,
    pub lesson_id: Option<i64>,
    #[validate(custom(function = crate::models::lesson::validate_age_group))]
    pub age_group: Option<String>,
}

fn validate_difficulty(value: &str) -> Result<(), validator::ValidationError> {
    if !DIFFICULTIES.contains(&value) {
        return Err(validator::ValidationError::new("invalid_difficulty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(word: Option<&str>, index: Option<i64>) -> MatchingItem {
        MatchingItem {
            id: 1,
            image: "matching_game/cat.png".to_string(),
            full_word: word.map(String::from),
            missing_index: index,
            distractor1: Some("o".to_string()),
            distractor2: Some("e".to_string()),
        }
    }

    #[test]
    fn masks_letter_inside_word() {
        let m = item(Some("cat"), Some(1));
        assert_eq!(m.masked_word(), "c_t");
        assert_eq!(m.correct_letter(), "a");
    }

    #[test]
    fn masks_first_and_last_letter() {
        assert_eq!(item(Some("dog"), Some(0)).masked_word(), "_og");
        assert_eq!(item(Some("dog"), Some(2)).masked_word(), "do_");
    }

    #[test]
    fn out_of_range_index_leaves_word_unmasked() {
        let m = item(Some("cat"), Some(3));
        assert_eq!(m.masked_word(), "cat");
        assert_eq!(m.correct_letter(), "");

        let negative = item(Some("cat"), Some(-1));
        assert_eq!(negative.masked_word(), "cat");
    }

    #[test]
    fn missing_word_or_index_never_panics() {
        assert_eq!(item(None, Some(0)).masked_word(), "");
        assert_eq!(item(Some("sun"), None).masked_word(), "sun");
        assert_eq!(item(Some("sun"), None).correct_letter(), "");
    }

    #[test]
    fn masking_counts_characters_not_bytes() {
        let m = item(Some("Bär"), Some(1));
        assert_eq!(m.masked_word(), "B_r");
        assert_eq!(m.correct_letter(), "ä");
    }

    #[test]
    fn content_tag_matches_kind_name() {
        let json = serde_json::json!({
            "quiz_type": "drag_drop",
            "items": [{ "label": "Bird", "item": "Sparrow" }]
        });
        let content: QuizContent = serde_json::from_value(json).unwrap();
        assert_eq!(content.kind(), QuizKind::DragDrop);

        let fill: QuizContent = serde_json::from_value(serde_json::json!({ "quiz_type": "fill_blank" })).unwrap();
        assert_eq!(fill, QuizContent::FillBlank);
    }

    #[test]
    fn assign_ids_numbers_items_and_options() {
        let mut content = QuizContent::MultipleChoice(vec![Question {
            id: 99,
            text: "2 + 2?".to_string(),
            order: 0,
            options: vec![
                AnswerOption { id: 0, text: "4".to_string(), is_correct: true },
                AnswerOption { id: 0, text: "5".to_string(), is_correct: false },
            ],
        }]);
        content.assign_ids();
        let QuizContent::MultipleChoice(questions) = &content else {
            panic!("kind changed");
        };
        assert_eq!(questions[0].id, 1);
        assert_eq!(questions[0].options[0].id, 2);
        assert_eq!(questions[0].options[1].id, 3);
    }

    #[test]
    fn warns_about_questions_without_correct_option() {
        let content = QuizContent::MultipleChoice(vec![Question {
            id: 0,
            text: "Pick one".to_string(),
            order: 0,
            options: vec![AnswerOption { id: 0, text: "A".to_string(), is_correct: false }],
        }]);
        assert_eq!(content.warnings().len(), 1);
        assert!(QuizContent::FillBlank.warnings().is_empty());
    }

    #[test]
    fn kind_round_trips_through_its_name() {
        for kind in QuizKind::ALL {
            assert_eq!(QuizKind::parse(kind.as_str()), Some(kind));
            assert_eq!(QuizContent::empty(kind).kind(), kind);
        }
        assert_eq!(QuizKind::parse("essay"), None);
    }
}
