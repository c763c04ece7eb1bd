use crate::{error::Result, question::Question};
use serde::Serialize;

/// Feedback shown once an option of an inline check is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reveal<'q> {
    pub selected: usize,
    pub correct: bool,
    pub explanation: &'q str,
}

/// A single question embedded in reading content. Starts unanswered and stays
/// revealed after the first selection. Selecting again only updates the
/// comparison against the answer key.
pub struct InlineCheck<'q> {
    question: &'q Question,
    selected: Option<usize>,
}

impl<'q> From<&'q Question> for InlineCheck<'q> {
    fn from(question: &'q Question) -> Self {
        Self { question, selected: None }
    }
}

impl<'q> InlineCheck<'q> {
    pub const fn question(&self) -> &'q Question {
        self.question
    }

    pub fn select_option(&mut self, index: usize) -> Result<Reveal<'q>> {
        self.question.check_bounds(index)?;
        self.selected = Some(index);
        Ok(self.reveal_for(index))
    }

    pub const fn is_revealed(&self) -> bool {
        self.selected.is_some()
    }

    pub fn reveal(&self) -> Option<Reveal<'q>> {
        self.selected.map(|index| self.reveal_for(index))
    }

    fn reveal_for(&self, selected: usize) -> Reveal<'q> {
        Reveal { selected, correct: self.question.is_correct(selected), explanation: self.question.explanation() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn question() -> Question {
        Question::new(
            "rcd",
            "What does an RCD detect?",
            &["Overcurrent", "Overvoltage", "Earth leakage"],
            2,
            "An RCD trips on an imbalance between line and neutral current.",
        )
        .unwrap()
    }

    #[test]
    fn starts_unanswered() {
        let question = question();
        let check = InlineCheck::from(&question);
        assert!(!check.is_revealed());
        assert!(check.reveal().is_none());
    }

    #[test]
    fn reveals_incorrect_choice_with_explanation() {
        let question = question();
        let mut check = InlineCheck::from(&question);
        let reveal = check.select_option(0).unwrap();
        assert!(!reveal.correct);
        assert_eq!(reveal.selected, 0);
        assert_eq!(reveal.explanation, "An RCD trips on an imbalance between line and neutral current.");
        assert!(check.is_revealed());
    }

    #[test]
    fn reselecting_updates_comparison() {
        let question = question();
        let mut check = InlineCheck::from(&question);
        assert!(!check.select_option(1).unwrap().correct);
        assert!(check.select_option(2).unwrap().correct);
        assert_eq!(check.reveal().map(|r| r.selected), Some(2));
    }

    #[test]
    fn out_of_range_keeps_state() {
        let question = question();
        let mut check = InlineCheck::from(&question);
        assert_eq!(check.select_option(3).unwrap_err(), Error::OptionOutOfRange { index: 3, len: 3 });
        assert!(!check.is_revealed());

        check.select_option(0).unwrap();
        assert!(check.select_option(7).is_err());
        assert_eq!(check.reveal().map(|r| r.selected), Some(0));
    }
}
