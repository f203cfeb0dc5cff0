use actix_web::HttpRequest;
use log::error;
use serde_derive::Serialize;
use url::Url;

use store::models::{Book, Verse};
use store::SwordDrillable;

/// Link representing a URL and label
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    fn new(url: &Url, label: String) -> Self {
        let url_string = if let Some(fragment) = url.fragment() {
            format!("{}#{}", url.path(), fragment)
        } else {
            url.path().to_string()
        };

        Self {
            label,
            url: url_string,
        }
    }

    /// Builds a link to a named resource. A resource that can't be
    /// generated is logged and links to the root.
    fn for_resource(req: &HttpRequest, name: &str, elements: &[String], label: String) -> Self {
        match req.url_for(name, elements) {
            Ok(url) => Self::new(&url, label),
            Err(e) => {
                error!("Could not generate a URL for '{}': {:?}", name, e);
                Self {
                    label,
                    url: "/".to_string(),
                }
            }
        }
    }
}

/// Generates a link to the list of all books.
pub(super) fn books_url(req: &HttpRequest) -> Link {
    Link::for_resource(req, "books", &[], "Books".to_string())
}

/// Generates a book URL for the given book.
pub(super) fn book_url(book: &Book, req: &HttpRequest) -> Link {
    Link::for_resource(req, "book", &[book.id.to_string()], book.name.to_string())
}

/// Generates a chapter URL for the given book and chapter.
pub(super) fn chapter_url(book: &Book, chapter: i32, req: &HttpRequest) -> Link {
    Link::for_resource(
        req,
        "chapter",
        &[book.id.to_string(), chapter.to_string()],
        format!("{} {}", book.name, chapter),
    )
}

/// Generates a verse URL for the given verse.
pub(super) fn verse_url(verse: &Verse, req: &HttpRequest) -> Link {
    Link::for_resource(
        req,
        "verse",
        &[
            verse.book.to_string(),
            verse.chapter.to_string(),
            verse.verse.to_string(),
        ],
        format!("{} {}:{}", verse.book_name, verse.chapter, verse.verse),
    )
}

/// Links for the book endpoint.
#[derive(Clone, Serialize, Debug)]
pub struct BookLinks {
    pub books: Link,
    pub chapters: Vec<Link>,
    pub previous: Option<Link>,
    pub next: Option<Link>,
    pub current: Link,
}

impl BookLinks {
    /// Creates a new structure of book links.
    pub(super) fn new<SD: SwordDrillable>(book: &Book, store: &SD, req: &HttpRequest) -> Self {
        Self {
            books: books_url(req),
            chapters: (1..=book.chapter_count)
                .map(|c| chapter_url(book, c, req))
                .collect(),
            previous: store.book(book.id - 1).map(|b| book_url(b, req)),
            next: store.book(book.id + 1).map(|b| book_url(b, req)),
            current: book_url(book, req),
        }
    }
}

/// Links for the chapter and reference endpoints.
#[derive(Clone, Serialize, Debug)]
pub struct ChapterLinks {
    pub books: Link,
    pub book: Link,
    pub previous: Option<Link>,
    pub next: Option<Link>,
    pub current: Link,
}

impl ChapterLinks {
    /// Creates a new structure of chapter links.
    ///
    /// Previous and next cross book boundaries: the chapter before a book's
    /// first is the last chapter of the book before it, and the chapter after
    /// a book's last is the first chapter of the next book.
    pub(super) fn new<SD: SwordDrillable>(
        book: &Book,
        chapter: i32,
        store: &SD,
        req: &HttpRequest,
    ) -> Self {
        let previous = if chapter > 1 {
            Some(chapter_url(book, chapter - 1, req))
        } else {
            store
                .book(book.id - 1)
                .map(|prev| chapter_url(prev, prev.chapter_count, req))
        };
        let next = if chapter < book.chapter_count {
            Some(chapter_url(book, chapter + 1, req))
        } else {
            store.book(book.id + 1).map(|next| chapter_url(next, 1, req))
        };

        Self {
            books: books_url(req),
            book: book_url(book, req),
            previous,
            next,
            current: chapter_url(book, chapter, req),
        }
    }
}
