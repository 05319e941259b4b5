// src/admin/forms.rs
//
// Input form descriptors served to the admin front-end. The front-end renders
// the editors; this module only decides which fields and nested inline
// editors a model's form has.

use serde::Serialize;

use crate::{
    models::{
        lesson::{AGE_GROUPS, BLOCK_TYPES},
        quiz::{DIFFICULTIES, QuizKind},
    },
    utils::media::MediaKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    TextArea,
    Html,
    Integer,
    Boolean,
    Choice,
    Url,
    Email,
    Media,
    ForeignKey,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<(String, String)>,
    /// Upload kind for media fields, or the referenced model for foreign keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<&'static str>,
}

impl FieldSpec {
    fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: false, choices: Vec::new(), target: None }
    }

    fn text(name: &'static str) -> Self {
        Self::new(name, FieldKind::Text)
    }

    fn area(name: &'static str) -> Self {
        Self::new(name, FieldKind::TextArea)
    }

    fn media(name: &'static str, kind: MediaKind) -> Self {
        Self { target: Some(kind.as_str()), ..Self::new(name, FieldKind::Media) }
    }

    fn foreign_key(name: &'static str, model: &'static str) -> Self {
        Self { target: Some(model), ..Self::new(name, FieldKind::ForeignKey) }
    }

    fn choice<'a>(name: &'static str, choices: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            choices: choices.into_iter().map(|(v, l)| (v.to_string(), l.to_string())).collect(),
            ..Self::new(name, FieldKind::Choice)
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineLayout {
    /// One fieldset per row.
    Stacked,
    /// One table row per item.
    Tabular,
}

/// Nested editor for child rows of the edited record.
#[derive(Debug, Clone, Serialize)]
pub struct InlineSpec {
    pub name: &'static str,
    pub layout: InlineLayout,
    /// Blank rows offered for new items.
    pub extra: u32,
    pub fields: Vec<FieldSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inlines: Vec<InlineSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormSpec {
    pub model: &'static str,
    pub fields: Vec<FieldSpec>,
    pub inlines: Vec<InlineSpec>,
}

/// Models that have a form descriptor.
pub const MODELS: [&str; 6] = ["category", "lesson", "lesson_block", "worksheet", "blog_post", "quiz"];

/// Form for creating a record of `model`. Quizzes get the form of a quiz
/// that is not persisted yet, i.e. without inline editors.
pub fn form_for(model: &str) -> Option<FormSpec> {
    let form = match model {
        "category" => FormSpec {
            model: "category",
            fields: vec![
                FieldSpec::text("name").required(),
                FieldSpec::new("order", FieldKind::Integer),
            ],
            inlines: Vec::new(),
        },
        "lesson" => FormSpec {
            model: "lesson",
            fields: lesson_fields(),
            inlines: vec![InlineSpec {
                name: "blocks",
                layout: InlineLayout::Tabular,
                extra: 0,
                fields: block_fields(),
                inlines: Vec::new(),
            }],
        },
        "lesson_block" => FormSpec {
            model: "lesson_block",
            fields: std::iter::once(FieldSpec::foreign_key("lesson_id", "lesson").required())
                .chain(block_fields())
                .collect(),
            inlines: Vec::new(),
        },
        "worksheet" => FormSpec {
            model: "worksheet",
            fields: vec![
                FieldSpec::text("title").required(),
                FieldSpec::area("description"),
                FieldSpec::foreign_key("lesson_id", "lesson"),
                FieldSpec::media("file", MediaKind::WorksheetFile).required(),
                FieldSpec::media("image", MediaKind::WorksheetImage),
                FieldSpec::choice("age_group", AGE_GROUPS),
            ],
            inlines: Vec::new(),
        },
        "blog_post" => FormSpec {
            model: "blog_post",
            fields: blog_fields(),
            inlines: Vec::new(),
        },
        "quiz" => quiz_form(None),
        _ => return None,
    };
    Some(form)
}

/// Form for a quiz. A persisted quiz (`Some(kind)`) gets exactly the inline
/// editors of its kind; a new quiz gets none.
pub fn quiz_form(persisted: Option<QuizKind>) -> FormSpec {
    FormSpec {
        model: "quiz",
        fields: vec![
            FieldSpec::text("title").required(),
            FieldSpec::choice("quiz_type", QuizKind::ALL.iter().map(|k| (k.as_str(), k.label())))
                .required(),
            FieldSpec::choice("difficulty", DIFFICULTIES.iter().map(|d| (*d, *d))).required(),
            FieldSpec::media("cover_image", MediaKind::QuizCover),
            FieldSpec::foreign_key("lesson_id", "lesson"),
            FieldSpec::choice("age_group", AGE_GROUPS),
        ],
        inlines: persisted.map(quiz_inlines).unwrap_or_default(),
    }
}

/// Inline editors for the content of one quiz kind.
pub fn quiz_inlines(kind: QuizKind) -> Vec<InlineSpec> {
    match kind {
        QuizKind::MultipleChoice => vec![InlineSpec {
            name: "questions",
            layout: InlineLayout::Stacked,
            extra: 1,
            fields: vec![
                FieldSpec::text("text").required(),
                FieldSpec::new("order", FieldKind::Integer),
            ],
            inlines: vec![InlineSpec {
                name: "options",
                layout: InlineLayout::Tabular,
                extra: 2,
                fields: vec![
                    FieldSpec::text("text").required(),
                    FieldSpec::new("is_correct", FieldKind::Boolean),
                ],
                inlines: Vec::new(),
            }],
        }],
        QuizKind::FillBlank => Vec::new(),
        QuizKind::DragDrop => vec![InlineSpec {
            name: "sorting_pairs",
            layout: InlineLayout::Tabular,
            extra: 1,
            fields: vec![
                FieldSpec::text("label").required(),
                FieldSpec::text("item").required(),
                FieldSpec::media("image", MediaKind::SortingImage),
            ],
            inlines: Vec::new(),
        }],
        QuizKind::Matching => vec![InlineSpec {
            name: "matching_items",
            layout: InlineLayout::Tabular,
            extra: 1,
            fields: vec![
                FieldSpec::media("image", MediaKind::MatchingImage).required(),
                FieldSpec::text("full_word"),
                FieldSpec::new("missing_index", FieldKind::Integer),
                FieldSpec::text("distractor1"),
                FieldSpec::text("distractor2"),
            ],
            inlines: Vec::new(),
        }],
        QuizKind::Visual => vec![InlineSpec {
            name: "visual_questions",
            layout: InlineLayout::Stacked,
            extra: 1,
            fields: vec![
                FieldSpec::text("question_text"),
                FieldSpec::media("question_image", MediaKind::VisualQuestionImage),
            ],
            inlines: vec![InlineSpec {
                name: "options",
                layout: InlineLayout::Tabular,
                extra: 2,
                fields: vec![
                    FieldSpec::media("image", MediaKind::VisualOptionImage),
                    FieldSpec::new("is_correct", FieldKind::Boolean),
                ],
                inlines: Vec::new(),
            }],
        }],
        QuizKind::Audio => vec![InlineSpec {
            name: "audio_questions",
            layout: InlineLayout::Stacked,
            extra: 1,
            fields: vec![
                FieldSpec::media("image", MediaKind::AudioQuestionImage).required(),
                FieldSpec::text("correct_answer").required(),
            ],
            inlines: vec![InlineSpec {
                name: "options",
                layout: InlineLayout::Tabular,
                extra: 2,
                fields: vec![
                    FieldSpec::text("text").required(),
                    FieldSpec::media("audio_file", MediaKind::AudioOption).required(),
                    FieldSpec::new("is_correct", FieldKind::Boolean),
                ],
                inlines: Vec::new(),
            }],
        }],
    }
}

fn lesson_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::foreign_key("category_id", "category").required(),
        FieldSpec::text("title").required(),
        FieldSpec::text("title_sr"),
        FieldSpec::text("title_de"),
        FieldSpec::area("description").required(),
        FieldSpec::area("description_sr"),
        FieldSpec::area("description_de"),
        FieldSpec::new("video_url", FieldKind::Url),
        FieldSpec::media("video_file", MediaKind::LessonVideo),
        FieldSpec::media("image", MediaKind::LessonImage),
        FieldSpec::new("order", FieldKind::Integer),
        FieldSpec::choice("age_group", AGE_GROUPS).required(),
    ]
}

fn block_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("order", FieldKind::Integer),
        FieldSpec::choice("block_type", BLOCK_TYPES.iter().map(|t| (*t, *t))).required(),
        FieldSpec::text("title").required(),
        FieldSpec::text("title_sr"),
        FieldSpec::text("title_de"),
        FieldSpec::media("video", MediaKind::BlockVideo),
    ]
}

fn blog_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("title_en").required(),
        FieldSpec::text("title_sr"),
        FieldSpec::text("title_de"),
        FieldSpec::area("summary_en"),
        FieldSpec::area("summary_sr"),
        FieldSpec::area("summary_de"),
        FieldSpec::new("content_en", FieldKind::Html).required(),
        FieldSpec::new("content_sr", FieldKind::Html),
        FieldSpec::new("content_de", FieldKind::Html),
        FieldSpec::media("image", MediaKind::BlogImage),
        FieldSpec::text("slug"),
        FieldSpec::new("is_published", FieldKind::Boolean),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_quiz_has_no_inline_editors() {
        assert!(quiz_form(None).inlines.is_empty());
        assert!(form_for("quiz").unwrap().inlines.is_empty());
    }

    #[test]
    fn persisted_quiz_gets_only_its_own_inline() {
        let form = quiz_form(Some(QuizKind::Visual));
        assert_eq!(form.inlines.len(), 1);
        assert_eq!(form.inlines[0].name, "visual_questions");
        assert_eq!(form.inlines[0].layout, InlineLayout::Stacked);
        assert_eq!(form.inlines[0].inlines[0].layout, InlineLayout::Tabular);
    }

    #[test]
    fn fill_blank_has_nothing_to_edit_inline() {
        assert!(quiz_form(Some(QuizKind::FillBlank)).inlines.is_empty());
    }

    #[test]
    fn every_listed_model_has_a_form() {
        for model in MODELS {
            assert_eq!(form_for(model).unwrap().model, model);
        }
        assert!(form_for("user").is_none());
    }
}
