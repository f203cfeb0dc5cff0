use actix_web::web;
use serde_derive::Deserialize;

use store::SwordDrillable;

/// Number of verse search results returned when no limit is asked for.
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Largest verse search limit honored.
pub const MAX_SEARCH_LIMIT: usize = 200;

/// Represents the query string parameters of the search endpoints.
#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

/// Registers every API route against the given store type.
pub fn routes<SD>(cfg: &mut web::ServiceConfig)
where
    SD: SwordDrillable + 'static,
{
    cfg.service(web::resource("/health").route(web::get().to(api::health::<SD>)))
        .service(
            web::resource("/api/books")
                .name("books")
                .route(web::get().to(api::all_books::<SD>)),
        )
        .service(
            web::resource("/api/books/{book}")
                .name("book")
                .route(web::get().to(api::book::<SD>)),
        )
        .service(
            web::resource("/api/books/{book}/verses")
                .route(web::get().to(api::book_verses::<SD>)),
        )
        .service(
            web::resource("/api/verses/{book}/{chapter}")
                .name("chapter")
                .route(web::get().to(api::chapter::<SD>)),
        )
        .service(
            web::resource("/api/verses/{book}/{chapter}/{verse}")
                .name("verse")
                .route(web::get().to(api::verse::<SD>)),
        )
        .service(web::resource("/api/search").route(web::get().to(api::search::<SD>)))
        .service(web::resource("/api/strongs").route(web::get().to(api::search_strongs::<SD>)))
        .service(
            web::resource("/api/strongs/{number}").route(web::get().to(api::strongs::<SD>)),
        )
        .service(
            web::resource("/api/{reference}.json").route(web::get().to(api::reference::<SD>)),
        );
}

pub mod api;
