use crate::error::{Error, Result};
use alloc::{boxed::Box, string::String, vec::Vec};
use serde::{Deserialize, Deserializer, Serialize};

/// Authored content identifies questions with either text or plain numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum StrOrNum {
    Str(String),
    Num(u64),
}

fn deserialize_id<'de, D>(deserializer: D) -> core::result::Result<Box<str>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StrOrNum::deserialize(deserializer)? {
        StrOrNum::Str(text) => text.into_boxed_str(),
        StrOrNum::Num(num) => alloc::format!("{num}").into_boxed_str(),
    })
}

/// Acceptable schema for authored questions. Pages disagree on whether the
/// answer key is called `correctIndex` or `correctAnswer`, so both are accepted.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    /// Unique within the containing quiz or page.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: Box<str>,
    /// Text of the question itself.
    #[serde(alias = "question")]
    pub prompt: String,
    /// Possible answers to select from, in display order.
    pub options: Vec<String>,
    /// Index of the option with the correct answer.
    #[serde(alias = "correctAnswer", alias = "correct_index")]
    pub correct_index: usize,
    /// Shown once any option has been selected.
    #[serde(default)]
    pub explanation: String,
}

/// A validated multiple-choice question. The answer key always points to one
/// of the options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: Box<str>,
    prompt: Box<str>,
    options: Box<[Box<str>]>,
    correct: usize,
    explanation: Box<str>,
}

impl TryFrom<RawQuestion> for Question {
    type Error = Error;

    fn try_from(raw: RawQuestion) -> Result<Self> {
        let RawQuestion { id, prompt, options, correct_index, explanation } = raw;
        let len = options.len();
        if correct_index >= len {
            return Err(Error::AnswerOutOfRange { index: correct_index, len });
        }

        let options = options.into_iter().map(String::into_boxed_str).collect();
        Ok(Self {
            id,
            prompt: prompt.into_boxed_str(),
            options,
            correct: correct_index,
            explanation: explanation.into_boxed_str(),
        })
    }
}

impl Question {
    pub fn new(id: &str, prompt: &str, options: &[&str], correct_index: usize, explanation: &str) -> Result<Self> {
        use alloc::string::ToString;
        Self::try_from(RawQuestion {
            id: id.into(),
            prompt: prompt.to_string(),
            options: options.iter().map(ToString::to_string).collect(),
            correct_index,
            explanation: explanation.to_string(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[Box<str>] {
        &self.options
    }

    pub const fn correct_index(&self) -> usize {
        self.correct
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub const fn is_correct(&self, index: usize) -> bool {
        index == self.correct
    }

    /// Rejects selections that do not point to any option.
    pub fn check_bounds(&self, index: usize) -> Result<()> {
        let len = self.options.len();
        if index < len {
            Ok(())
        } else {
            Err(Error::OptionOutOfRange { index, len })
        }
    }
}
