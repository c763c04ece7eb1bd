use serde_json::error::Category;
use std::{
    fmt::{self, Display},
    io,
    path::PathBuf,
};

#[derive(Debug)]
pub enum Error {
    /// The content directory or one of its files could not be read.
    Io(PathBuf, io::Error),
    /// JSON syntax error detected.
    Syntax(PathBuf, serde_json::Error),
    /// Unexpected JSON data types encountered.
    Data(PathBuf, serde_json::Error),
    /// The page parsed but its content is inconsistent.
    Invalid { slug: Box<str>, error: model::Error },
    /// Two pages claim the same slug.
    DuplicateSlug(Box<str>),
    /// A navigation link points outside of the catalogue.
    BrokenLink { slug: Box<str>, target: Box<str> },
}

impl Error {
    pub(crate) fn json(path: PathBuf, err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Syntax | Category::Eof => Self::Syntax(path, err),
            Category::Data => Self::Data(path, err),
            Category::Io => Self::Io(path, err.into()),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(path, err) => write!(f, "cannot read {}: {err}", path.display()),
            Self::Syntax(path, err) => write!(f, "syntax error in {}: {err}", path.display()),
            Self::Data(path, err) => write!(f, "unexpected page schema in {}: {err}", path.display()),
            Self::Invalid { slug, error } => write!(f, "invalid page `{slug}`: {error}"),
            Self::DuplicateSlug(slug) => write!(f, "more than one page uses the slug `{slug}`"),
            Self::BrokenLink { slug, target } => write!(f, "page `{slug}` links to unknown page `{target}`"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(_, err) => Some(err),
            Self::Syntax(_, err) | Self::Data(_, err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
