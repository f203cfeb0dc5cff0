use crate::models::*;
use crate::store::{Store, StoreStats};
use crate::StoreError;

/// Shortest search query, in characters, worth running.
pub const MIN_QUERY_LENGTH: usize = 2;

/// Max number of results returned from a Strong's search.
pub const STRONGS_SEARCH_LIMIT: usize = 50;

/// Trims raw user input into a search query, rejecting one shorter than
/// [MIN_QUERY_LENGTH].
pub fn search_query(raw: &str) -> Result<&str, StoreError> {
    let query = raw.trim();
    if query.chars().count() < MIN_QUERY_LENGTH {
        Err(StoreError::QueryTooShort {
            min: MIN_QUERY_LENGTH,
        })
    } else {
        Ok(query)
    }
}

/// Trait implemented by types that can query for and return types of Bible structures.
///
/// Lookups that find nothing return `None` or an empty list; that is an
/// expected outcome and never an error.
pub trait SwordDrillable {
    /// Looks up a book by its canonical id (1-66).
    fn book(&self, id: i32) -> Option<&Book>;

    /// Looks up the Bible book with the given book name.
    ///
    /// The name can be the canonical name, the short name or the USX code
    /// and is compared case-insensitively. The first book in source order
    /// that matches wins.
    fn book_by_name(&self, name: &str) -> Option<&Book>;

    /// Gets all books in the Bible.
    fn all_books(&self) -> &[Book];

    /// Looks up a single verse by its book id, chapter and verse.
    fn verse(&self, book: i32, chapter: i32, verse: i32) -> Option<&Verse>;

    /// Gets every verse of a chapter in source order.
    ///
    /// An unknown chapter gives an empty list. Callers that need to tell an
    /// invalid chapter from an empty one check the book's chapter count.
    fn chapter(&self, book: i32, chapter: i32) -> Vec<&Verse>;

    /// Gets every verse of a book in source order.
    fn book_verses(&self, book: i32) -> Vec<&Verse>;

    /// Looks up a Strong's definition. Input is case-insensitive and a bare
    /// number is taken as Hebrew, so `430`, `h430` and `H430` are the same.
    fn strongs(&self, number: &str) -> Option<&StrongsDefinition>;

    /// Searches the headword, gloss and root word of every Strong's entry.
    ///
    /// Matching is a case-insensitive substring test of the query as given;
    /// trimming it is up to the caller. An empty query matches nothing. At
    /// most [STRONGS_SEARCH_LIMIT] entries are returned, in lexicon order.
    fn search_strongs(&self, query: &str) -> Vec<&StrongsDefinition>;

    /// Searches the King James and World English text of every verse.
    ///
    /// Matching is a case-insensitive substring test of the query as given,
    /// and an empty query matches nothing. Verses are scanned in
    /// storage order and the scan stops at the `limit`th match, so the
    /// result is the first matches found rather than the best ones.
    fn search_verses(&self, query: &str, limit: usize) -> Vec<&Verse>;

    /// Counts of the loaded records.
    fn stats(&self) -> StoreStats;

    /// Looks up a book by id when given a number, otherwise by name.
    fn find_book(&self, book: &str) -> Option<&Book> {
        match book.trim().parse::<i32>() {
            Ok(id) => self.book(id),
            Err(_) => self.book_by_name(book.trim()),
        }
    }

    /// Looks up Bible verses for the given reference.
    ///
    /// Returns `None` when the book is unknown. A chapter or range without
    /// verses gives an empty list.
    fn verses(&self, reference: &Reference) -> Option<(&Book, Vec<&Verse>)> {
        let book = self.book_by_name(&reference.book)?;
        let verses = self
            .chapter(book.id, reference.chapter)
            .into_iter()
            .filter(|v| match &reference.verses {
                Some(range) => range.contains(&v.verse),
                None => true,
            })
            .collect();

        Some((book, verses))
    }
}

impl SwordDrillable for Store {
    fn book(&self, id: i32) -> Option<&Book> {
        self.book_ids.get(&id).map(|&pos| &self.books[pos])
    }

    fn book_by_name(&self, name: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.answers_to(name))
    }

    fn all_books(&self) -> &[Book] {
        &self.books
    }

    fn verse(&self, book: i32, chapter: i32, verse: i32) -> Option<&Verse> {
        let key = VerseKey {
            book,
            chapter,
            verse,
        };
        self.verse_keys.get(&key).map(|&pos| &self.verses[pos])
    }

    fn chapter(&self, book: i32, chapter: i32) -> Vec<&Verse> {
        self.verses_at(self.chapter_verses.get(&(book, chapter)))
    }

    fn book_verses(&self, book: i32) -> Vec<&Verse> {
        self.verses_at(self.book_verses.get(&book))
    }

    fn strongs(&self, number: &str) -> Option<&StrongsDefinition> {
        self.strongs_numbers
            .get(&normalize_strongs_number(number))
            .map(|&pos| &self.strongs[pos])
    }

    fn search_strongs(&self, query: &str) -> Vec<&StrongsDefinition> {
        if query.is_empty() {
            return vec![];
        }
        let query = fold_case(query);

        self.strongs
            .iter()
            .filter(|d| {
                [&d.headword, &d.gloss, &d.root_word]
                    .iter()
                    .any(|field| fold_case(field).contains(&query))
            })
            .take(STRONGS_SEARCH_LIMIT)
            .collect()
    }

    fn search_verses(&self, query: &str, limit: usize) -> Vec<&Verse> {
        if query.is_empty() {
            return vec![];
        }
        let query = fold_case(query);

        self.verses
            .iter()
            .zip(&self.search_text)
            .filter(|(_, texts)| texts.iter().any(|text| text.contains(&query)))
            .map(|(verse, _)| verse)
            .take(limit)
            .collect()
    }

    fn stats(&self) -> StoreStats {
        Store::stats(self)
    }
}
