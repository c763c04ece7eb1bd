pub mod error;

use error::{Error, Result};
use std::{collections::HashMap, fs, path::Path};

pub use model::{Page, RawPage};

/// Every page of the site, validated once at startup.
pub struct Catalogue {
    /// Pages in load order.
    pages: Box<[Page]>,
    index: HashMap<Box<str>, usize>,
}

impl Catalogue {
    /// Loads every `*.json` page in the directory, ordered by file name.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(|err| Error::Io(dir.into(), err))? {
            let path = entry.map_err(|err| Error::Io(dir.into(), err))?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort_unstable();

        let mut raws = Vec::with_capacity(paths.len());
        for path in paths {
            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(err) => return Err(Error::Io(path, err)),
            };
            let raw: RawPage = match serde_json::from_slice(&bytes) {
                Ok(raw) => raw,
                Err(err) => return Err(Error::json(path, err)),
            };
            log::debug!("parsed page `{}` from {}", raw.slug, path.display());
            raws.push(raw);
        }

        let catalogue = Self::from_pages(raws)?;
        log::info!("loaded {} pages from {}", catalogue.len(), dir.display());
        Ok(catalogue)
    }

    pub fn from_pages<I>(raws: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawPage>,
    {
        let mut pages = Vec::new();
        let mut index = HashMap::new();
        for raw in raws {
            let slug = Box::<str>::from(raw.slug.as_str());
            let page = Page::try_from(raw).map_err(|error| Error::Invalid { slug: slug.clone(), error })?;
            if index.insert(slug.clone(), pages.len()).is_some() {
                return Err(Error::DuplicateSlug(slug));
            }
            pages.push(page);
        }

        // Navigation must stay within the site.
        for page in &pages {
            for target in page.previous().into_iter().chain(page.next()) {
                if !index.contains_key(target) {
                    return Err(Error::BrokenLink { slug: page.slug().into(), target: target.into() });
                }
            }
        }

        Ok(Self { pages: pages.into_boxed_slice(), index })
    }

    pub fn get(&self, slug: &str) -> Option<&Page> {
        let &pos = self.index.get(slug)?;
        self.pages.get(pos)
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalogue, Error, RawPage};
    use std::{env, fs, path::PathBuf};

    fn page(slug: &str, previous: Option<&str>, next: Option<&str>) -> RawPage {
        RawPage {
            slug: slug.into(),
            title: slug.to_uppercase(),
            course: Some("level-2".into()),
            blocks: Vec::new(),
            quiz: None,
            previous: previous.map(Into::into),
            next: next.map(Into::into),
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("coursework-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn links_neighbouring_sections() {
        let catalogue = Catalogue::from_pages([
            page("unit-1", None, Some("unit-2")),
            page("unit-2", Some("unit-1"), Some("unit-3")),
            page("unit-3", Some("unit-2"), None),
        ])
        .unwrap();
        assert_eq!(catalogue.len(), 3);
        assert_eq!(catalogue.get("unit-2").unwrap().next(), Some("unit-3"));
        assert!(catalogue.get("unit-4").is_none());
        let slugs: Vec<_> = catalogue.pages().iter().map(|page| page.slug()).collect();
        assert_eq!(slugs, ["unit-1", "unit-2", "unit-3"]);
    }

    #[test]
    fn rejects_duplicate_slugs() {
        let err = Catalogue::from_pages([page("unit-1", None, None), page("unit-1", None, None)]).err().unwrap();
        assert!(matches!(err, Error::DuplicateSlug(slug) if &*slug == "unit-1"));
    }

    #[test]
    fn rejects_broken_links() {
        let err = Catalogue::from_pages([page("unit-1", None, Some("unit-9"))]).err().unwrap();
        assert!(matches!(err, Error::BrokenLink { ref slug, ref target } if &**slug == "unit-1" && &**target == "unit-9"));
        assert_eq!(err.to_string(), "page `unit-1` links to unknown page `unit-9`");
    }

    #[test]
    fn reports_slug_of_invalid_page() {
        let mut bad = page("unit-1", None, None);
        bad.quiz = Some(model::RawQuiz { title: "Empty".into(), questions: Vec::new() });
        let err = Catalogue::from_pages([bad]).err().unwrap();
        assert!(matches!(err, Error::Invalid { ref slug, error: model::Error::EmptyQuiz } if &**slug == "unit-1"));
    }

    #[test]
    fn loads_directory_in_file_order() {
        let dir = scratch_dir("order");
        fs::write(dir.join("02-b.json"), r#"{ "slug": "b", "title": "B", "previous": "a" }"#).unwrap();
        fs::write(dir.join("01-a.json"), r#"{ "slug": "a", "title": "A", "next": "b" }"#).unwrap();
        fs::write(dir.join("notes.txt"), "not a page").unwrap();

        let catalogue = Catalogue::load_dir(&dir).unwrap();
        let slugs: Vec<_> = catalogue.pages().iter().map(|page| page.slug()).collect();
        assert_eq!(slugs, ["a", "b"]);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn classifies_json_errors() {
        let dir = scratch_dir("syntax");
        fs::write(dir.join("broken.json"), r#"{ "slug": "a", "#).unwrap();
        assert!(matches!(Catalogue::load_dir(&dir), Err(Error::Syntax(..))));

        fs::write(dir.join("broken.json"), r#"{ "slug": 5, "title": "A" }"#).unwrap();
        assert!(matches!(Catalogue::load_dir(&dir), Err(Error::Data(..))));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = env::temp_dir().join("coursework-does-not-exist");
        assert!(matches!(Catalogue::load_dir(dir), Err(Error::Io(..))));
    }

    #[test]
    fn shipped_content_is_valid() {
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../../content");
        let catalogue = Catalogue::load_dir(dir).unwrap();
        assert!(!catalogue.is_empty());
        assert!(catalogue.pages().iter().any(|page| page.quiz().is_some()));
    }
}
