use crate::{
    error::{Error, Result},
    question::{Question, RawQuestion},
    quiz::{Quiz, RawQuiz},
};
use alloc::{boxed::Box, collections::BTreeSet, string::String, sync::Arc, vec::Vec};
use serde::{Deserialize, Serialize};

/// Acceptable schema for a piece of page content.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RawBlock {
    Heading {
        text: String,
        /// Derived from the text when omitted.
        #[serde(default)]
        anchor: Option<String>,
    },
    Prose {
        text: String,
    },
    Check(RawQuestion),
}

/// Acceptable schema for an authored page.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawPage {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub blocks: Vec<RawBlock>,
    #[serde(default)]
    pub quiz: Option<RawQuiz>,
    /// Slug of the preceding section.
    #[serde(default)]
    pub previous: Option<String>,
    /// Slug of the following section.
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug)]
pub enum Block {
    Heading { text: Box<str>, anchor: Box<str> },
    Prose(Box<str>),
    Check(Question),
}

impl TryFrom<RawBlock> for Block {
    type Error = Error;

    fn try_from(raw: RawBlock) -> Result<Self> {
        Ok(match raw {
            RawBlock::Heading { text, anchor } => {
                let anchor = anchor.unwrap_or_else(|| slugify(&text));
                Self::Heading { text: text.into_boxed_str(), anchor: anchor.into_boxed_str() }
            }
            RawBlock::Prose { text } => Self::Prose(text.into_boxed_str()),
            RawBlock::Check(question) => Self::Check(question.try_into()?),
        })
    }
}

/// Lowercase ASCII alphanumerics separated by single dashes.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for word in text.split(|c: char| !c.is_ascii_alphanumeric()).filter(|word| !word.is_empty()) {
        if !slug.is_empty() {
            slug.push('-');
        }
        slug.extend(word.chars().map(|c| c.to_ascii_lowercase()));
    }
    slug
}

/// A course section: reading content with inline checks, an optional closing
/// quiz, and links to its neighbouring sections.
#[derive(Debug)]
pub struct Page {
    slug: Box<str>,
    title: Box<str>,
    course: Option<Box<str>>,
    blocks: Box<[Block]>,
    quiz: Option<Arc<Quiz>>,
    previous: Option<Box<str>>,
    next: Option<Box<str>>,
}

impl TryFrom<RawPage> for Page {
    type Error = Error;

    fn try_from(raw: RawPage) -> Result<Self> {
        let RawPage { slug, title, course, blocks, quiz, previous, next } = raw;
        let blocks: Box<[Block]> = blocks.into_iter().map(Block::try_from).collect::<Result<_>>()?;

        // Inline checks are addressed by identifier and sections by anchor.
        let mut checks = BTreeSet::new();
        let mut anchors = BTreeSet::new();
        for block in blocks.iter() {
            match block {
                Block::Check(question) if !checks.insert(question.id()) => {
                    return Err(Error::DuplicateCheck(question.id().into()));
                }
                Block::Heading { text, anchor } if anchor.is_empty() => {
                    return Err(Error::EmptyAnchor(text.clone()));
                }
                Block::Heading { anchor, .. } if !anchors.insert(&**anchor) => {
                    return Err(Error::DuplicateAnchor(anchor.clone()));
                }
                _ => (),
            }
        }
        drop(checks);
        drop(anchors);

        let quiz = quiz.map(Quiz::try_from).transpose()?.map(Arc::new);
        Ok(Self {
            slug: slug.into_boxed_str(),
            title: title.into_boxed_str(),
            course: course.map(String::into_boxed_str),
            blocks,
            quiz,
            previous: previous.map(String::into_boxed_str),
            next: next.map(String::into_boxed_str),
        })
    }
}

impl Page {
    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn course(&self) -> Option<&str> {
        self.course.as_deref()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub const fn quiz(&self) -> Option<&Arc<Quiz>> {
        self.quiz.as_ref()
    }

    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    /// Questions embedded inline with the reading content, in page order.
    pub fn checks(&self) -> impl Iterator<Item = &Question> + '_ {
        self.blocks.iter().filter_map(|block| match block {
            Block::Check(question) => Some(question),
            _ => None,
        })
    }

    pub fn check(&self, id: &str) -> Option<&Question> {
        self.checks().find(|question| question.id() == id)
    }

    /// Heading anchors and texts in page order.
    pub fn outline(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.blocks.iter().filter_map(|block| match block {
            Block::Heading { text, anchor } => Some((&**anchor, &**text)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "slug": "fibre-1-2",
        "title": "Light Propagation",
        "course": "fibre-optics",
        "previous": "fibre-1-1",
        "next": "fibre-1-3",
        "blocks": [
            { "kind": "heading", "text": "Total Internal Reflection" },
            { "kind": "prose", "text": "Light stays inside the core." },
            { "kind": "check", "id": "tir", "question": "Which index is higher?", "options": ["Core", "Cladding"], "correctIndex": 0, "explanation": "The core." },
            { "kind": "heading", "text": "Modes", "anchor": "modes" }
        ],
        "quiz": {
            "title": "Section quiz",
            "questions": [
                { "id": 1, "prompt": "Single-mode core size?", "options": ["9 um", "50 um"], "correctAnswer": 0 }
            ]
        }
    }"#;

    #[test]
    fn parses_authored_page() {
        let raw: RawPage = serde_json::from_str(PAGE).unwrap();
        let page = Page::try_from(raw).unwrap();
        assert_eq!(page.slug(), "fibre-1-2");
        assert_eq!(page.course(), Some("fibre-optics"));
        assert_eq!(page.previous(), Some("fibre-1-1"));
        assert_eq!(page.next(), Some("fibre-1-3"));
        assert_eq!(page.blocks().len(), 4);
        assert_eq!(page.check("tir").unwrap().correct_index(), 0);
        assert!(page.check("missing").is_none());
        assert_eq!(page.quiz().unwrap().len(), 1);

        let outline: Vec<_> = page.outline().collect();
        assert_eq!(outline, [("total-internal-reflection", "Total Internal Reflection"), ("modes", "Modes")]);
    }

    #[test]
    fn outline_drives_scroll_spy() {
        use crate::{ScrollSpy, Viewport};
        let raw: RawPage = serde_json::from_str(PAGE).unwrap();
        let page = Page::try_from(raw).unwrap();
        let sections = page.outline().zip([0, 900]).map(|((anchor, _), offset)| (anchor, offset));

        let viewport = Viewport::new();
        let tracker = ScrollSpy::new(sections, 80).attach(&viewport);
        assert_eq!(tracker.active(), Some("total-internal-reflection"));
        viewport.scroll_to(820);
        assert_eq!(tracker.active(), Some("modes"));
    }

    #[test]
    fn rejects_duplicate_checks() {
        let raw: RawPage = serde_json::from_str(
            r#"{
                "slug": "dupes",
                "title": "Dupes",
                "blocks": [
                    { "kind": "check", "id": "a", "prompt": "?", "options": ["x", "y"], "correctIndex": 0 },
                    { "kind": "check", "id": "a", "prompt": "!", "options": ["x", "y"], "correctIndex": 1 }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(Page::try_from(raw).unwrap_err(), Error::DuplicateCheck("a".into()));
    }

    #[test]
    fn rejects_invalid_inline_check() {
        let raw: RawPage = serde_json::from_str(
            r#"{
                "slug": "bad",
                "title": "Bad",
                "blocks": [ { "kind": "check", "id": "a", "prompt": "?", "options": ["x"], "correctIndex": 4 } ]
            }"#,
        )
        .unwrap();
        assert_eq!(Page::try_from(raw).unwrap_err(), Error::AnswerOutOfRange { index: 4, len: 1 });
    }

    #[test]
    fn rejects_unaddressable_headings() {
        let raw: RawPage = serde_json::from_str(
            r#"{
                "slug": "omega",
                "title": "Omega",
                "blocks": [ { "kind": "heading", "text": "Ω" } ]
            }"#,
        )
        .unwrap();
        assert_eq!(Page::try_from(raw).unwrap_err(), Error::EmptyAnchor("Ω".into()));

        let raw: RawPage = serde_json::from_str(
            r#"{
                "slug": "modes",
                "title": "Modes",
                "blocks": [
                    { "kind": "heading", "text": "Modes" },
                    { "kind": "prose", "text": "Single-mode and multimode." },
                    { "kind": "heading", "text": "Other", "anchor": "modes" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(Page::try_from(raw).unwrap_err(), Error::DuplicateAnchor("modes".into()));
    }

    #[test]
    fn slugifies_headings() {
        assert_eq!(slugify("Ohm's Law & Power"), "ohm-s-law-power");
        assert_eq!(slugify("  BS 7671: 18th Edition "), "bs-7671-18th-edition");
        assert_eq!(slugify("---"), "");
    }
}
