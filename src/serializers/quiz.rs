// src/serializers/quiz.rs

use serde::Serialize;

use crate::{
    models::quiz::{
        AudioQuestion, MatchingItem, Question, Quiz, QuizContent, SortingPair, VisualQuestion,
    },
    utils::media::MediaUrls,
};

/// Row of the quiz list.
#[derive(Debug, Serialize)]
pub struct QuizListItem {
    pub id: i64,
    pub title: String,
    pub quiz_type: String,
    pub difficulty: String,
    pub cover_image: Option<String>,
}

impl QuizListItem {
    pub fn new(quiz: Quiz, media: &MediaUrls) -> Self {
        Self {
            id: quiz.id,
            cover_image: media.absolute(quiz.cover_image.as_deref()),
            title: quiz.title,
            quiz_type: quiz.quiz_type,
            difficulty: quiz.difficulty,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OptionOut {
    pub id: i64,
    pub text: String,
    pub is_correct: bool,
}

#[derive(Debug, Serialize)]
pub struct QuestionOut {
    pub id: i64,
    pub text: String,
    pub order: i64,
    pub options: Vec<OptionOut>,
}

#[derive(Debug, Serialize)]
pub struct SortingPairOut {
    pub id: i64,
    pub item: String,
    pub label: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchingItemOut {
    pub id: i64,
    pub image_url: Option<String>,
    pub masked_word: String,
    pub correct_letter: String,
    pub distractor1: Option<String>,
    pub distractor2: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VisualOptionOut {
    pub id: i64,
    pub image_url: Option<String>,
    pub is_correct: bool,
}

#[derive(Debug, Serialize)]
pub struct VisualQuestionOut {
    pub id: i64,
    pub question_text: Option<String>,
    pub question_image_url: Option<String>,
    pub options: Vec<VisualOptionOut>,
}

#[derive(Debug, Serialize)]
pub struct AudioOptionOut {
    pub id: i64,
    pub text: String,
    pub audio_file: Option<String>,
    pub is_correct: bool,
}

#[derive(Debug, Serialize)]
pub struct AudioQuestionOut {
    pub id: i64,
    pub image: Option<String>,
    pub correct_answer: String,
    pub options: Vec<AudioOptionOut>,
}

/// Full quiz. Only the content key matching `quiz_type` is present.
#[derive(Debug, Serialize)]
pub struct QuizDetail {
    pub id: i64,
    pub title: String,
    pub quiz_type: String,
    pub difficulty: String,
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<QuestionOut>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorting_pairs: Option<Vec<SortingPairOut>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_items: Option<Vec<MatchingItemOut>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_questions: Option<Vec<VisualQuestionOut>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_questions: Option<Vec<AudioQuestionOut>>,
}

impl QuizDetail {
    pub fn new(quiz: Quiz, media: &MediaUrls) -> Self {
        let mut detail = QuizDetail {
            id: quiz.id,
            cover_image: media.absolute(quiz.cover_image.as_deref()),
            title: quiz.title,
            quiz_type: quiz.quiz_type,
            difficulty: quiz.difficulty,
            questions: None,
            sorting_pairs: None,
            matching_items: None,
            visual_questions: None,
            audio_questions: None,
        };

        match quiz.content.0 {
            QuizContent::MultipleChoice(questions) => {
                detail.questions = Some(questions.into_iter().map(question_out).collect());
            }
            QuizContent::FillBlank => {}
            QuizContent::DragDrop(pairs) => {
                detail.sorting_pairs = Some(pairs.into_iter().map(|p| sorting_pair_out(p, media)).collect());
            }
            QuizContent::Matching(items) => {
                detail.matching_items = Some(items.into_iter().map(|m| matching_item_out(m, media)).collect());
            }
            QuizContent::Visual(questions) => {
                detail.visual_questions =
                    Some(questions.into_iter().map(|q| visual_question_out(q, media)).collect());
            }
            QuizContent::Audio(questions) => {
                detail.audio_questions =
                    Some(questions.into_iter().map(|q| audio_question_out(q, media)).collect());
            }
        }

        detail
    }
}

/// Visual quiz as served by its dedicated endpoint.
#[derive(Debug, Serialize)]
pub struct VisualQuizDetail {
    pub id: i64,
    pub title: String,
    pub quiz_type: String,
    pub difficulty: String,
    pub cover_image: Option<String>,
    pub questions: Vec<VisualQuestionOut>,
}

impl VisualQuizDetail {
    /// `None` unless the quiz holds visual content.
    pub fn new(quiz: Quiz, media: &MediaUrls) -> Option<Self> {
        let QuizContent::Visual(questions) = quiz.content.0 else {
            return None;
        };
        Some(Self {
            id: quiz.id,
            cover_image: media.absolute(quiz.cover_image.as_deref()),
            title: quiz.title,
            quiz_type: quiz.quiz_type,
            difficulty: quiz.difficulty,
            questions: questions.into_iter().map(|q| visual_question_out(q, media)).collect(),
        })
    }
}

fn question_out(q: Question) -> QuestionOut {
    QuestionOut {
        id: q.id,
        text: q.text,
        order: q.order,
        options: q
            .options
            .into_iter()
            .map(|o| OptionOut { id: o.id, text: o.text, is_correct: o.is_correct })
            .collect(),
    }
}

fn sorting_pair_out(p: SortingPair, media: &MediaUrls) -> SortingPairOut {
    SortingPairOut {
        id: p.id,
        image_url: media.absolute(p.image.as_deref()),
        item: p.item,
        label: p.label,
    }
}

fn matching_item_out(m: MatchingItem, media: &MediaUrls) -> MatchingItemOut {
    MatchingItemOut {
        id: m.id,
        image_url: media.absolute(Some(&m.image)),
        masked_word: m.masked_word(),
        correct_letter: m.correct_letter(),
        distractor1: m.distractor1,
        distractor2: m.distractor2,
    }
}

fn visual_question_out(q: VisualQuestion, media: &MediaUrls) -> VisualQuestionOut {
    VisualQuestionOut {
        id: q.id,
        question_image_url: media.absolute(q.question_image.as_deref()),
        question_text: q.question_text,
        options: q
            .options
            .into_iter()
            .map(|o| VisualOptionOut {
                id: o.id,
                image_url: media.absolute(o.image.as_deref()),
                is_correct: o.is_correct,
            })
            .collect(),
    }
}

fn audio_question_out(q: AudioQuestion, media: &MediaUrls) -> AudioQuestionOut {
    AudioQuestionOut {
        id: q.id,
        image: media.absolute(Some(&q.image)),
        correct_answer: q.correct_answer,
        options: q
            .options
            .into_iter()
            .map(|o| AudioOptionOut {
                id: o.id,
                audio_file: media.absolute(Some(&o.audio_file)),
                text: o.text,
                is_correct: o.is_correct,
            })
            .collect(),
    }
}
