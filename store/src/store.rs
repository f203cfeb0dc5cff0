use std::collections::HashMap;
use std::thread::{self, ScopedJoinHandle};

use log::{debug, info, warn};
use serde_derive::Serialize;

use crate::loader;
use crate::models::{fold_case, Book, StrongsDefinition, Translation, Verse, VerseKey};
use crate::{DataPaths, StoreError};

/// Translations a verse search looks at.
pub(crate) const SEARCHED_TRANSLATIONS: [Translation; 2] = [Translation::Kjv, Translation::Web];

/// Counts of what the store holds, plus what was skipped while loading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub books: usize,
    pub verses: usize,
    pub strongs: usize,
    pub dropped_strongs: usize,
    pub duplicate_verses: usize,
    pub orphan_verses: usize,
}

/// In-memory store of books, verses and Strong's definitions.
///
/// Verses live in one ordered vector. The key, book and chapter indexes
/// only hold positions into it and are filled in the same pass, so they
/// always describe the same records, as does the case-folded search text
/// kept alongside each verse. Nothing is mutated once loaded.
#[derive(Debug, Default)]
pub struct Store {
    loaded: bool,
    pub(crate) books: Vec<Book>,
    pub(crate) book_ids: HashMap<i32, usize>,
    pub(crate) verses: Vec<Verse>,
    pub(crate) search_text: Vec<[String; 2]>,
    pub(crate) verse_keys: HashMap<VerseKey, usize>,
    pub(crate) book_verses: HashMap<i32, Vec<usize>>,
    pub(crate) chapter_verses: HashMap<(i32, i32), Vec<usize>>,
    pub(crate) strongs: Vec<StrongsDefinition>,
    pub(crate) strongs_numbers: HashMap<String, usize>,
    pub(crate) stats: StoreStats,
}

fn search_text(verse: &Verse) -> [String; 2] {
    SEARCHED_TRANSLATIONS.map(|t| fold_case(verse.text(t)))
}

/// Waits for a loader thread, turning a panic into an error.
fn joined<T>(handle: ScopedJoinHandle<'_, T>, source: &str) -> Result<T, StoreError> {
    handle.join().map_err(|_| StoreError::Loader {
        cause: format!("the {} loader panicked", source),
    })
}

impl Store {
    /// Creates an empty, unloaded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store and loads it from the given files.
    pub fn open(paths: &DataPaths) -> Result<Self, StoreError> {
        let mut store = Self::new();
        store.load(paths)?;
        Ok(store)
    }

    /// Builds a loaded store directly from records, in the order given.
    pub fn from_records(
        books: Vec<Book>,
        verses: Vec<Verse>,
        strongs: Vec<StrongsDefinition>,
    ) -> Self {
        let mut store = Self::new();
        store.index(books, verses, strongs);
        store
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Reads the three source files concurrently and builds every index.
    ///
    /// Failing to read the books or verses aborts the load and leaves the
    /// store empty. Calling this on a loaded store does nothing.
    pub fn load(&mut self, paths: &DataPaths) -> Result<(), StoreError> {
        if self.loaded {
            debug!("Store already loaded; skipping");
            return Ok(());
        }

        let (books, verses, strongs) = thread::scope(|s| {
            let books = s.spawn(|| loader::load_books(&paths.books));
            let verses = s.spawn(|| loader::load_verses(&paths.verses));
            let strongs = s.spawn(|| loader::load_strongs(&paths.strongs));
            (
                joined(books, "books"),
                joined(verses, "verses"),
                joined(strongs, "Strong's"),
            )
        });
        let books = books??;
        let verses = verses??;
        let (strongs, dropped_strongs) = strongs?;

        self.index(books, verses, strongs);
        self.stats.dropped_strongs = dropped_strongs;
        info!(
            "Loaded {} books, {} verses and {} Strong's definitions",
            self.stats.books, self.stats.verses, self.stats.strongs
        );

        Ok(())
    }

    pub fn stats(&self) -> StoreStats {
        self.stats
    }

    fn index(&mut self, books: Vec<Book>, verses: Vec<Verse>, strongs: Vec<StrongsDefinition>) {
        for book in books {
            match self.book_ids.get(&book.id) {
                Some(&pos) => {
                    warn!("Duplicate book id {}; keeping the later row", book.id);
                    self.books[pos] = book;
                }
                None => {
                    self.book_ids.insert(book.id, self.books.len());
                    self.books.push(book);
                }
            }
        }

        for verse in verses {
            let key = verse.key();
            if !self.book_ids.contains_key(&key.book) {
                warn!("Verse {} belongs to no known book; skipping", key);
                self.stats.orphan_verses += 1;
                continue;
            }
            // Replacing in place keeps every index pointing at the one
            // surviving record.
            if let Some(&pos) = self.verse_keys.get(&key) {
                warn!("Duplicate verse {}; keeping the later row", key);
                self.search_text[pos] = search_text(&verse);
                self.verses[pos] = verse;
                self.stats.duplicate_verses += 1;
                continue;
            }

            let pos = self.verses.len();
            self.verse_keys.insert(key, pos);
            self.book_verses.entry(key.book).or_default().push(pos);
            self.chapter_verses
                .entry((key.book, key.chapter))
                .or_default()
                .push(pos);
            self.search_text.push(search_text(&verse));
            self.verses.push(verse);
        }

        for definition in strongs {
            match self.strongs_numbers.get(&definition.number) {
                Some(&pos) => {
                    warn!(
                        "Duplicate Strong's number {}; keeping the later record",
                        definition.number
                    );
                    self.strongs[pos] = definition;
                }
                None => {
                    self.strongs_numbers
                        .insert(definition.number.clone(), self.strongs.len());
                    self.strongs.push(definition);
                }
            }
        }

        self.stats.books = self.books.len();
        self.stats.verses = self.verses.len();
        self.stats.strongs = self.strongs.len();
        self.loaded = true;
    }

    /// Resolves a list of positions into verses.
    pub(crate) fn verses_at(&self, positions: Option<&Vec<usize>>) -> Vec<&Verse> {
        positions
            .map(|positions| positions.iter().map(|&pos| &self.verses[pos]).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SwordDrillable;

    fn book(id: i32, name: &str) -> Book {
        Book {
            id,
            name: name.to_string(),
            chapter_count: 1,
            ..Book::default()
        }
    }

    fn verse(book: i32, chapter: i32, verse: i32, kjv: &str) -> Verse {
        Verse {
            book,
            chapter,
            verse,
            kjv: kjv.to_string(),
            ..Verse::default()
        }
    }

    #[test]
    fn load_fixtures() {
        let store = Store::open(&DataPaths::in_dir("./tests/fixtures")).unwrap();
        let stats = store.stats();

        assert!(store.is_loaded());
        assert_eq!(stats.books, 66);
        assert_eq!(stats.verses, 12);
        assert_eq!(stats.strongs, 5);
        assert_eq!(stats.dropped_strongs, 2);
    }

    #[test]
    fn load_is_idempotent() {
        let mut store = Store::open(&DataPaths::in_dir("./tests/fixtures")).unwrap();
        let before = store.stats();

        // A second load doesn't touch the files at all.
        store.load(&DataPaths::in_dir("./does/not/exist")).unwrap();
        assert_eq!(store.stats(), before);
    }

    #[test]
    fn missing_verses_abort_the_load() {
        let mut paths = DataPaths::in_dir("./tests/fixtures");
        paths.verses = "./tests/fixtures/missing.csv".into();

        let mut store = Store::new();
        assert!(matches!(store.load(&paths), Err(StoreError::Read { .. })));
        assert!(!store.is_loaded());
        assert!(store.all_books().is_empty());
    }

    #[test]
    fn missing_lexicon_is_tolerated() {
        let mut paths = DataPaths::in_dir("./tests/fixtures");
        paths.strongs = "./tests/fixtures/missing.csv".into();

        let store = Store::open(&paths).unwrap();
        assert_eq!(store.stats().strongs, 0);
        assert_eq!(store.stats().verses, 12);
    }

    #[test]
    fn duplicate_verses_keep_indexes_consistent() {
        let store = Store::from_records(
            vec![book(1, "Genesis")],
            vec![
                verse(1, 1, 1, "first"),
                verse(1, 1, 2, "second"),
                verse(1, 1, 1, "replacement"),
            ],
            vec![],
        );

        let by_key = store.verse(1, 1, 1).unwrap();
        let chapter = store.chapter(1, 1);

        assert_eq!(by_key.kjv, "replacement");
        assert_eq!(chapter.len(), 2);
        assert!(std::ptr::eq(by_key, chapter[0]));
        assert_eq!(store.book_verses(1).len(), 2);
        assert_eq!(store.stats().duplicate_verses, 1);

        // Search sees the surviving text only
        let found = store.search_verses("REPLACEMENT", 10);
        assert_eq!(found.len(), 1);
        assert!(std::ptr::eq(found[0], by_key));
        assert!(store.search_verses("first", 10).is_empty());
    }

    #[test]
    fn orphan_verses_are_skipped() {
        let store = Store::from_records(
            vec![book(1, "Genesis")],
            vec![verse(1, 1, 1, "kept"), verse(70, 1, 1, "orphan")],
            vec![],
        );

        assert_eq!(store.stats().verses, 1);
        assert_eq!(store.stats().orphan_verses, 1);
        assert!(store.verse(70, 1, 1).is_none());
    }
}
