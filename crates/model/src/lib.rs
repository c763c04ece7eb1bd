#![cfg_attr(not(test), no_std)]
extern crate alloc;

pub mod check;
pub mod error;
pub mod outline;
pub mod page;
pub mod question;
pub mod quiz;
pub mod session;

pub use check::{InlineCheck, Reveal};
pub use error::{Error, Result};
pub use outline::{ScrollSpy, Subscription, Tracker, Viewport};
pub use page::{Block, Page, RawBlock, RawPage};
pub use question::{Question, RawQuestion};
pub use quiz::{Quiz, RawQuiz};
pub use session::{Outcome, QuizSession, State};
