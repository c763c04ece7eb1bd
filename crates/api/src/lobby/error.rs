use core::fmt::{self, Display};
use hyper::StatusCode;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// The session never existed, was unmounted, or has expired.
    UnknownSession,
    /// The session rejected the answer.
    Session(model::Error),
}

impl From<model::Error> for Error {
    fn from(err: model::Error) -> Self {
        Self::Session(err)
    }
}

impl Error {
    pub const fn status(&self) -> StatusCode {
        use model::Error::*;
        match self {
            Self::UnknownSession | Self::Session(UnknownQuestion(_)) => StatusCode::NOT_FOUND,
            Self::Session(OptionOutOfRange { .. }) => StatusCode::BAD_REQUEST,
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSession => f.write_str("Session not found. It may have already expired."),
            Self::Session(err) => Display::fmt(err, f),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
