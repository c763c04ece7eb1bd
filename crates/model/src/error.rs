use alloc::boxed::Box;
use core::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The designated correct answer does not point to any of the options.
    AnswerOutOfRange { index: usize, len: usize },
    /// A selection does not point to any of the options.
    OptionOutOfRange { index: usize, len: usize },
    /// A quiz must contain at least one question.
    EmptyQuiz,
    /// Two questions in the same quiz share an identifier.
    DuplicateQuestion(Box<str>),
    /// Two inline checks on the same page share an identifier.
    DuplicateCheck(Box<str>),
    /// No question with this identifier exists in the quiz.
    UnknownQuestion(Box<str>),
    /// Two headings on the same page resolve to the same anchor.
    DuplicateAnchor(Box<str>),
    /// The heading with this text has no usable anchor.
    EmptyAnchor(Box<str>),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnswerOutOfRange { index, len } => {
                write!(f, "correct answer {index} is out of range for {len} options")
            }
            Self::OptionOutOfRange { index, len } => write!(f, "selection {index} is out of range for {len} options"),
            Self::EmptyQuiz => f.write_str("quiz has no questions"),
            Self::DuplicateQuestion(id) => write!(f, "duplicate question `{id}` in quiz"),
            Self::DuplicateCheck(id) => write!(f, "duplicate inline check `{id}` on page"),
            Self::UnknownQuestion(id) => write!(f, "unknown question `{id}`"),
            Self::DuplicateAnchor(anchor) => write!(f, "duplicate heading anchor `{anchor}` on page"),
            Self::EmptyAnchor(text) => write!(f, "heading `{text}` has an empty anchor"),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
