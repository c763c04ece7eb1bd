use crate::{error::Result, quiz::Quiz};
use alloc::{boxed::Box, collections::BTreeMap, sync::Arc};

/// Invoked with `(score, total)` once every question has an answer.
pub type Completion = Box<dyn FnOnce(usize, usize) + Send + Sync>;

/// Result of submitting an answer to a [`QuizSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The answer was recorded. More questions remain.
    Recorded { correct: bool },
    /// The question already had an answer, so nothing changed.
    Ignored,
    /// The answer was recorded and it was the last one missing.
    Completed { correct: bool, score: usize, total: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    InProgress { answered: usize, total: usize },
    Complete { score: usize, total: usize },
}

impl State {
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }

    pub const fn as_score(&self) -> Option<(usize, usize)> {
        if let Self::Complete { score, total } = *self {
            Some((score, total))
        } else {
            None
        }
    }
}

/// Answer state for a single mounted quiz. Each question accepts exactly one
/// answer; later answers to the same question are ignored.
pub struct QuizSession {
    quiz: Arc<Quiz>,
    /// Selected option of every answered question.
    answers: BTreeMap<Box<str>, usize>,
    /// Number of recorded answers that match the answer key.
    score: usize,
    /// Taken on completion so that it can only ever fire once.
    on_complete: Option<Completion>,
}

impl From<Arc<Quiz>> for QuizSession {
    fn from(quiz: Arc<Quiz>) -> Self {
        Self { quiz, answers: BTreeMap::new(), score: 0, on_complete: None }
    }
}

impl QuizSession {
    pub fn new<F>(quiz: Arc<Quiz>, on_complete: F) -> Self
    where
        F: FnOnce(usize, usize) + Send + Sync + 'static,
    {
        let mut session = Self::from(quiz);
        session.on_complete = Some(Box::new(on_complete));
        session
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn answer(&mut self, id: &str, choice: usize) -> Result<Outcome> {
        use crate::error::Error;
        let question = self.quiz.get(id).ok_or_else(|| Error::UnknownQuestion(id.into()))?;
        question.check_bounds(choice)?;

        if self.answers.contains_key(id) {
            return Ok(Outcome::Ignored);
        }

        self.answers.insert(id.into(), choice);
        let correct = question.is_correct(choice);
        if correct {
            self.score += 1;
        }

        let total = self.quiz.len();
        if self.answers.len() < total {
            return Ok(Outcome::Recorded { correct });
        }

        if let Some(callback) = self.on_complete.take() {
            callback(self.score, total);
        }

        Ok(Outcome::Completed { correct, score: self.score, total })
    }

    pub fn selection(&self, id: &str) -> Option<usize> {
        self.answers.get(id).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() == self.quiz.len()
    }

    pub const fn score(&self) -> usize {
        self.score
    }

    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    pub fn total(&self) -> usize {
        self.quiz.len()
    }

    pub fn state(&self) -> State {
        let total = self.total();
        if self.is_complete() {
            State::Complete { score: self.score, total }
        } else {
            State::InProgress { answered: self.answered(), total }
        }
    }
}
