pub mod error;

use core::{
    num::NonZeroU64,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};
use dashmap::DashMap;
use model::{Outcome, Quiz, QuizSession, State};
use serde::Serialize;
use std::sync::Arc;
use tokio::{task::AbortHandle, time};

pub type SessionId = NonZeroU64;
type Registry = DashMap<SessionId, Entry>;

struct Entry {
    session: QuizSession,
    /// Last time the client read or answered the session.
    touched: time::Instant,
    /// Expiry timer of this session.
    reaper: AbortHandle,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    InProgress,
    Complete,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub state: Status,
    pub answered: usize,
    pub score: usize,
    pub total: usize,
}

impl From<&QuizSession> for Progress {
    fn from(session: &QuizSession) -> Self {
        let state = match session.state() {
            State::InProgress { .. } => Status::InProgress,
            State::Complete { .. } => Status::Complete,
        };
        Self { state, answered: session.answered(), score: session.score(), total: session.total() }
    }
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Recorded,
    Ignored,
    Completed,
}

#[derive(Debug, Serialize)]
pub struct Answered {
    pub status: Verdict,
    /// Absent when the answer was ignored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Box<str>>,
    #[serde(flatten)]
    pub progress: Progress,
}

/// Registry of every mounted quiz session. Sessions are owned by exactly one
/// client and are discarded on unmount or once idle for too long.
pub struct Lobby {
    sessions: Arc<Registry>,
    counter: AtomicU64,
    ttl: Duration,
}

impl Lobby {
    pub fn new(ttl: Duration) -> Self {
        Self { sessions: Arc::default(), counter: AtomicU64::new(1), ttl }
    }

    /// Starts a new session for the quiz of the given page. Must be called from
    /// within a Tokio runtime.
    pub fn mount(&self, slug: &str, quiz: Arc<Quiz>) -> SessionId {
        let id = self.next_id();
        let slug = Box::<str>::from(slug);
        let session = QuizSession::new(quiz, move |score, total| {
            log::info!("session {id} on page `{slug}` completed with {score}/{total}");
        });

        use dashmap::mapref::entry::Entry::Vacant;
        let Vacant(vacant) = self.sessions.entry(id) else {
            unreachable!("session identifiers are never reused");
        };

        // Clients that navigate away never unmount explicitly. The shard stays
        // locked until the entry is inserted, so the timer always finds it.
        let sessions = Arc::clone(&self.sessions);
        let ttl = self.ttl;
        let touched = time::Instant::now();
        let reaper = tokio::spawn(async move {
            let mut deadline = touched + ttl;
            loop {
                time::sleep_until(deadline).await;
                let now = time::Instant::now();
                if sessions.remove_if(&id, |_, entry| entry.touched + ttl <= now).is_some() {
                    log::debug!("session {id} expired");
                    return;
                }

                // Still active, so wait until it has been idle for long enough.
                let Some(entry) = sessions.get(&id) else { return };
                deadline = entry.touched + ttl;
            }
        })
        .abort_handle();
        vacant.insert(Entry { session, touched, reaper });

        log::debug!("mounted session {id}");
        id
    }

    fn next_id(&self) -> SessionId {
        loop {
            // Zero is only ever observed after wrapping around.
            if let Some(id) = NonZeroU64::new(self.counter.fetch_add(1, Ordering::Relaxed)) {
                return id;
            }
        }
    }

    pub fn answer(&self, id: SessionId, question: &str, choice: usize) -> error::Result<Answered> {
        let mut entry = self.sessions.get_mut(&id).ok_or(error::Error::UnknownSession)?;
        entry.touched = time::Instant::now();
        let session = &mut entry.session;
        let outcome = session.answer(question, choice)?;
        let (status, correct) = match outcome {
            Outcome::Ignored => (Verdict::Ignored, None),
            Outcome::Recorded { correct } => (Verdict::Recorded, Some(correct)),
            Outcome::Completed { correct, .. } => (Verdict::Completed, Some(correct)),
        };

        let explanation =
            correct.and_then(|_| session.quiz().get(question)).map(|question| Box::from(question.explanation()));
        Ok(Answered { status, correct, explanation, progress: Progress::from(&*session) })
    }

    pub fn progress(&self, id: SessionId) -> error::Result<Progress> {
        let mut entry = self.sessions.get_mut(&id).ok_or(error::Error::UnknownSession)?;
        entry.touched = time::Instant::now();
        Ok(Progress::from(&entry.session))
    }

    pub fn unmount(&self, id: SessionId) -> error::Result<()> {
        let (_, entry) = self.sessions.remove(&id).ok_or(error::Error::UnknownSession)?;
        entry.reaper.abort();
        log::debug!("unmounted session {id}");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
