use actix_web::{web, HttpRequest};

use store::models::{Book, Reference, StrongsDefinition};
use store::{search_query, SwordDrillable};

use crate::controllers::{SearchParams, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
use crate::error::{Error, JsonError};
use crate::responder::*;

/// Result for JSON response handlers
type JsonResult<T> = Result<web::Json<T>, JsonError>;

/// Finds a book by id or name, or fails with a not found error.
fn find_book<'a, SD: SwordDrillable>(store: &'a SD, book: &str) -> Result<&'a Book, Error> {
    store.find_book(book).ok_or_else(|| Error::BookNotFound {
        book: book.to_string(),
    })
}

/// Checks a search query is long enough to run.
fn checked_query(params: &SearchParams) -> Result<&str, JsonError> {
    Ok(search_query(&params.q)?)
}

/// Handles HTTP requests for the load statistics of the store.
pub async fn health<SD>(data: web::Data<SD>) -> JsonResult<HealthData>
where
    SD: SwordDrillable + 'static,
{
    Ok(web::Json(HealthData::new(data.stats())))
}

/// Handles HTTP requests for a list of all books.
pub async fn all_books<SD>(data: web::Data<SD>, req: HttpRequest) -> JsonResult<AllBooksData>
where
    SD: SwordDrillable + 'static,
{
    Ok(web::Json(AllBooksData::new(data.all_books(), &req)))
}

/// Handles HTTP requests for a book (e.g. /api/books/John or /api/books/43).
///
/// Returns the book's metadata and a list of its chapters.
pub async fn book<SD>(
    data: web::Data<SD>,
    params: web::Path<(String,)>,
    req: HttpRequest,
) -> JsonResult<BookData>
where
    SD: SwordDrillable + 'static,
{
    let (book_name,) = params.into_inner();
    let book = find_book(data.get_ref(), &book_name)?;

    Ok(web::Json(BookData::new(book, data.get_ref(), &req)))
}

/// Handles HTTP requests for every verse of a book.
pub async fn book_verses<SD>(
    data: web::Data<SD>,
    params: web::Path<(String,)>,
) -> JsonResult<BookVersesData>
where
    SD: SwordDrillable + 'static,
{
    let (book_name,) = params.into_inner();
    let book = find_book(data.get_ref(), &book_name)?;

    Ok(web::Json(BookVersesData::new(book, data.book_verses(book.id))))
}

/// Handles HTTP requests for a chapter (e.g. /api/verses/John/3).
///
/// The store answers an unknown chapter with no verses, so the chapter is
/// checked against the book's chapter count here.
pub async fn chapter<SD>(
    data: web::Data<SD>,
    params: web::Path<(String, i32)>,
    req: HttpRequest,
) -> JsonResult<ChapterData>
where
    SD: SwordDrillable + 'static,
{
    let (book_name, chapter) = params.into_inner();
    let book = find_book(data.get_ref(), &book_name)?;
    if chapter < 1 || chapter > book.chapter_count {
        return Err(Error::ChapterNotFound {
            book: book.name.to_owned(),
            chapter,
        }
        .into());
    }
    let verses = data.chapter(book.id, chapter);

    Ok(web::Json(ChapterData::new(
        book, chapter, verses, data.get_ref(), &req,
    )))
}

/// Handles HTTP requests for a single verse (e.g. /api/verses/John/3/16).
pub async fn verse<SD>(
    data: web::Data<SD>,
    params: web::Path<(String, i32, i32)>,
    req: HttpRequest,
) -> JsonResult<VerseData>
where
    SD: SwordDrillable + 'static,
{
    let (book_name, chapter, verse) = params.into_inner();
    let book = find_book(data.get_ref(), &book_name)?;
    let verse = data
        .verse(book.id, chapter, verse)
        .ok_or_else(|| Error::VerseNotFound {
            reference: format!("{} {}:{}", book.name, chapter, verse),
        })?;

    Ok(web::Json(VerseData::new(verse, &req)))
}

/// Handles HTTP requests for references (e.g. /api/John 3:16-18.json).
///
/// Parse the path for a string that would indicate a reference, and
/// return the verses it covers.
pub async fn reference<SD>(
    data: web::Data<SD>,
    params: web::Path<(String,)>,
    req: HttpRequest,
) -> JsonResult<VersesData>
where
    SD: SwordDrillable + 'static,
{
    let (path_reference,) = params.into_inner();
    let reference: Reference = path_reference.parse()?;
    let (book, verses) = data.verses(&reference).ok_or_else(|| Error::BookNotFound {
        book: reference.book.to_owned(),
    })?;

    if verses.is_empty() {
        return Err(Error::VerseNotFound {
            reference: reference.to_string(),
        }
        .into());
    }

    Ok(web::Json(VersesData::new(
        (book, verses),
        reference,
        data.get_ref(),
        &req,
    )))
}

/// Handles HTTP requests for a verse search.
///
/// A query that reads as a reference to a known book returns that passage;
/// anything else is matched against the King James and World English text.
pub async fn search<SD>(
    data: web::Data<SD>,
    query: web::Query<SearchParams>,
    req: HttpRequest,
) -> JsonResult<SearchResultData>
where
    SD: SwordDrillable + 'static,
{
    let q = checked_query(&query)?;
    let limit = query
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .min(MAX_SEARCH_LIMIT);

    // Check if query can be parsed as a reference
    if let Some((_, verses)) = q.parse::<Reference>().ok().and_then(|r| data.verses(&r)) {
        let verses = verses.into_iter().take(limit).collect();
        return Ok(web::Json(SearchResultData::from_verses(verses, &req)));
    }

    Ok(web::Json(SearchResultData::from_verses(
        data.search_verses(q, limit),
        &req,
    )))
}

/// Handles HTTP requests for a Strong's definition (e.g. /api/strongs/H430).
pub async fn strongs<SD>(
    data: web::Data<SD>,
    params: web::Path<(String,)>,
) -> JsonResult<StrongsDefinition>
where
    SD: SwordDrillable + 'static,
{
    let (number,) = params.into_inner();
    let definition = data
        .strongs(&number)
        .ok_or_else(|| Error::StrongsNotFound {
            number: number.to_owned(),
        })?;

    Ok(web::Json(definition.clone()))
}

/// Handles HTTP requests for a Strong's search.
pub async fn search_strongs<SD>(
    data: web::Data<SD>,
    query: web::Query<SearchParams>,
) -> JsonResult<StrongsSearchData>
where
    SD: SwordDrillable + 'static,
{
    let q = checked_query(&query)?;

    Ok(web::Json(StrongsSearchData::new(data.search_strongs(q))))
}

/// Handles HTTP requests that match no route.
pub async fn not_found(req: HttpRequest) -> JsonResult<()> {
    Err(Error::RouteNotFound {
        path: req.path().to_string(),
    }
    .into())
}
