//! Public views of catalogue pages. Answer keys and explanations never leave
//! the server until an option has been selected.

use content::Catalogue;
use model::{Block, InlineCheck, Page, Question, Quiz, Reveal};
use serde::Serialize;

#[derive(Serialize)]
pub struct Summary<'a> {
    slug: &'a str,
    title: &'a str,
    course: Option<&'a str>,
}

impl<'a> From<&'a Page> for Summary<'a> {
    fn from(page: &'a Page) -> Self {
        Self { slug: page.slug(), title: page.title(), course: page.course() }
    }
}

#[derive(Serialize)]
pub struct QuestionView<'a> {
    id: &'a str,
    prompt: &'a str,
    options: &'a [Box<str>],
}

impl<'a> From<&'a Question> for QuestionView<'a> {
    fn from(question: &'a Question) -> Self {
        Self { id: question.id(), prompt: question.prompt(), options: question.options() }
    }
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BlockView<'a> {
    Heading { text: &'a str, anchor: &'a str },
    Prose { text: &'a str },
    Check(QuestionView<'a>),
}

impl<'a> From<&'a Block> for BlockView<'a> {
    fn from(block: &'a Block) -> Self {
        match block {
            Block::Heading { text, anchor } => Self::Heading { text, anchor },
            Block::Prose(text) => Self::Prose { text },
            Block::Check(question) => Self::Check(question.into()),
        }
    }
}

#[derive(Serialize)]
pub struct QuizView<'a> {
    title: &'a str,
    questions: Vec<QuestionView<'a>>,
}

impl<'a> From<&'a Quiz> for QuizView<'a> {
    fn from(quiz: &'a Quiz) -> Self {
        Self { title: quiz.title(), questions: quiz.questions().iter().map(QuestionView::from).collect() }
    }
}

#[derive(Serialize)]
pub struct Anchor<'a> {
    anchor: &'a str,
    text: &'a str,
}

#[derive(Serialize)]
pub struct PageView<'a> {
    #[serde(flatten)]
    summary: Summary<'a>,
    blocks: Vec<BlockView<'a>>,
    outline: Vec<Anchor<'a>>,
    quiz: Option<QuizView<'a>>,
    previous: Option<&'a str>,
    next: Option<&'a str>,
}

impl<'a> From<&'a Page> for PageView<'a> {
    fn from(page: &'a Page) -> Self {
        Self {
            summary: page.into(),
            blocks: page.blocks().iter().map(BlockView::from).collect(),
            outline: page.outline().map(|(anchor, text)| Anchor { anchor, text }).collect(),
            quiz: page.quiz().map(|quiz| QuizView::from(&**quiz)),
            previous: page.previous(),
            next: page.next(),
        }
    }
}

pub fn list(catalogue: &Catalogue) -> Vec<Summary<'_>> {
    catalogue.pages().iter().map(Summary::from).collect()
}

/// Selects an option of an inline check on the page. `None` if the page has no
/// such check.
pub fn check<'p>(page: &'p Page, id: &str, choice: usize) -> Option<model::Result<Reveal<'p>>> {
    let question = page.check(id)?;
    let mut check = InlineCheck::from(question);
    Some(check.select_option(choice))
}
