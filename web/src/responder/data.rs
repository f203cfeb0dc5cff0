use actix_web::HttpRequest;
use serde_derive::Serialize;

use store::models::{Book, Reference, StrongsDefinition, Testament, Verse};
use store::{StoreStats, SwordDrillable};

use crate::error::Error;
use crate::responder::link::{book_url, verse_url, BookLinks, ChapterLinks, Link};

/// Error data for a JSON response.
#[derive(Clone, Serialize, Debug)]
pub struct ErrorData {
    message: String,
}

impl ErrorData {
    /// Creates new error data from an [Error](crate::error::Error).
    pub fn from_error(e: &Error) -> Self {
        Self {
            message: e.to_string(),
        }
    }
}

/// A book together with its derived testament.
#[derive(Clone, Serialize, Debug)]
pub struct BookSummary {
    #[serde(flatten)]
    pub book: Book,
    pub testament: Testament,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            book: book.clone(),
            testament: book.testament(),
        }
    }
}

/// Data for the "all books" endpoint.
#[derive(Clone, Serialize, Debug)]
pub struct AllBooksData {
    pub books: Vec<BookSummary>,
    pub links: Vec<Link>,
}

impl AllBooksData {
    pub fn new(books: &[Book], req: &HttpRequest) -> Self {
        Self {
            books: books.iter().map(BookSummary::from).collect(),
            links: books.iter().map(|b| book_url(b, req)).collect(),
        }
    }
}

/// Represents data for the book endpoint.
#[derive(Clone, Serialize, Debug)]
pub struct BookData {
    pub book: BookSummary,
    pub chapters: Vec<i32>,
    pub links: BookLinks,
}

impl BookData {
    /// Creates new book data.
    pub fn new<SD: SwordDrillable>(book: &Book, store: &SD, req: &HttpRequest) -> Self {
        Self {
            book: book.into(),
            chapters: (1..=book.chapter_count).collect(),
            links: BookLinks::new(book, store, req),
        }
    }
}

/// Every verse of a book.
#[derive(Clone, Serialize, Debug)]
pub struct BookVersesData {
    pub book: BookSummary,
    pub verses: Vec<Verse>,
}

impl BookVersesData {
    pub fn new(book: &Book, verses: Vec<&Verse>) -> Self {
        Self {
            book: book.into(),
            verses: verses.into_iter().cloned().collect(),
        }
    }
}

/// Represents data of a chapter's verses.
#[derive(Clone, Serialize, Debug)]
pub struct ChapterData {
    pub book: BookSummary,
    pub chapter: i32,
    pub verses: Vec<Verse>,
    pub links: ChapterLinks,
}

impl ChapterData {
    pub fn new<SD: SwordDrillable>(
        book: &Book,
        chapter: i32,
        verses: Vec<&Verse>,
        store: &SD,
        req: &HttpRequest,
    ) -> Self {
        Self {
            book: book.into(),
            chapter,
            verses: verses.into_iter().cloned().collect(),
            links: ChapterLinks::new(book, chapter, store, req),
        }
    }
}

/// Represents data of a single verse.
#[derive(Clone, Serialize, Debug)]
pub struct VerseData {
    pub verse: Verse,
    pub link: Link,
}

impl VerseData {
    pub fn new(verse: &Verse, req: &HttpRequest) -> Self {
        Self {
            verse: verse.clone(),
            link: verse_url(verse, req),
        }
    }
}

/// Represents data of the verses matched by a reference.
#[derive(Clone, Serialize, Debug)]
pub struct VersesData {
    pub book: BookSummary,
    pub reference: Reference,
    pub reference_string: String,
    pub verses: Vec<Verse>,
    pub links: ChapterLinks,
}

impl VersesData {
    /// Creates new data for the verses of a reference, naming the book the
    /// way the store does rather than the way it was typed.
    pub fn new<SD: SwordDrillable>(
        (book, verses): (&Book, Vec<&Verse>),
        mut reference: Reference,
        store: &SD,
        req: &HttpRequest,
    ) -> Self {
        reference.book = book.name.to_owned();
        let reference_string = reference.to_string();
        let links = ChapterLinks::new(book, reference.chapter, store, req);

        Self {
            book: book.into(),
            reference,
            reference_string,
            verses: verses.into_iter().cloned().collect(),
            links,
        }
    }
}

/// A verse search result.
#[derive(Clone, Serialize, Debug)]
pub struct SearchResult {
    pub link: Link,
    pub kjv: String,
    pub web: String,
}

/// Data for the verse search endpoint.
#[derive(Clone, Serialize, Debug)]
pub struct SearchResultData {
    pub matches: Vec<SearchResult>,
}

impl SearchResultData {
    /// Creates new search result data from matching verses.
    pub fn from_verses(verses: Vec<&Verse>, req: &HttpRequest) -> Self {
        let matches = verses.into_iter().map(|v| SearchResult {
            link: verse_url(v, req),
            kjv: v.kjv.to_owned(),
            web: v.web.to_owned(),
        });

        Self {
            matches: matches.collect(),
        }
    }
}

/// Data for the Strong's search endpoint.
#[derive(Clone, Serialize, Debug)]
pub struct StrongsSearchData {
    pub matches: Vec<StrongsDefinition>,
}

impl StrongsSearchData {
    pub fn new(definitions: Vec<&StrongsDefinition>) -> Self {
        Self {
            matches: definitions.into_iter().cloned().collect(),
        }
    }
}

/// Data for the health endpoint.
#[derive(Clone, Serialize, Debug)]
pub struct HealthData {
    pub status: &'static str,
    pub stats: StoreStats,
}

impl HealthData {
    pub fn new(stats: StoreStats) -> Self {
        Self {
            status: "ok",
            stats,
        }
    }
}
