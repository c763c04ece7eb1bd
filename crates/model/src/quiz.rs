use crate::{
    error::{Error, Result},
    question::{Question, RawQuestion},
};
use alloc::{boxed::Box, collections::BTreeMap, string::String, vec::Vec};
use serde::{Deserialize, Serialize};

/// Acceptable schema for a closing quiz.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawQuiz {
    #[serde(default)]
    pub title: String,
    pub questions: Vec<RawQuestion>,
}

/// An ordered, non-empty set of questions with unique identifiers.
#[derive(Debug)]
pub struct Quiz {
    title: Box<str>,
    questions: Box<[Question]>,
    /// Position of each question by its identifier.
    index: BTreeMap<Box<str>, usize>,
}

impl TryFrom<RawQuiz> for Quiz {
    type Error = Error;

    fn try_from(RawQuiz { title, questions }: RawQuiz) -> Result<Self> {
        let questions = questions.into_iter().map(Question::try_from).collect::<Result<Vec<_>>>()?;
        Self::new(&title, questions)
    }
}

impl Quiz {
    pub fn new(title: &str, questions: Vec<Question>) -> Result<Self> {
        if questions.is_empty() {
            return Err(Error::EmptyQuiz);
        }

        let mut index = BTreeMap::new();
        for (pos, question) in questions.iter().enumerate() {
            if index.insert(Box::from(question.id()), pos).is_some() {
                return Err(Error::DuplicateQuestion(question.id().into()));
            }
        }

        Ok(Self { title: title.into(), questions: questions.into_boxed_slice(), index })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        let &pos = self.index.get(id)?;
        self.questions.get(pos)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_quiz() {
        assert_eq!(Quiz::new("Empty", Vec::new()).unwrap_err(), Error::EmptyQuiz);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let questions = Vec::from([
            Question::new("q1", "First?", &["a", "b"], 0, "").unwrap(),
            Question::new("q1", "Second?", &["a", "b"], 1, "").unwrap(),
        ]);
        assert_eq!(Quiz::new("Dupes", questions).unwrap_err(), Error::DuplicateQuestion("q1".into()));
    }

    #[test]
    fn looks_up_questions_by_id() {
        let raw: RawQuiz = serde_json::from_str(
            r#"{
                "title": "Fibre basics",
                "questions": [
                    { "id": 1, "question": "Core material?", "options": ["Glass", "Copper"], "correctAnswer": 0 },
                    { "id": 2, "question": "Light source?", "options": ["LED", "Bulb", "Laser"], "correctAnswer": 2 }
                ]
            }"#,
        )
        .unwrap();
        let quiz = Quiz::try_from(raw).unwrap();
        assert_eq!(quiz.title(), "Fibre basics");
        assert_eq!(quiz.len(), 2);
        assert_eq!(quiz.get("2").unwrap().correct_index(), 2);
        assert!(quiz.get("3").is_none());
    }

    #[test]
    fn propagates_invalid_questions() {
        let raw: RawQuiz = serde_json::from_str(
            r#"{ "questions": [ { "id": "x", "prompt": "?", "options": ["a"], "correctIndex": 1 } ] }"#,
        )
        .unwrap();
        assert_eq!(Quiz::try_from(raw).unwrap_err(), Error::AnswerOutOfRange { index: 1, len: 1 });
    }
}
