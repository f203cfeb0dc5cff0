use std::convert::From;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use thiserror::Error;

use store::StoreError;

use crate::responder::ErrorData;

/// Error type for the API.
#[derive(Error, Debug)]
pub enum Error {
    #[error("'{}' was not found.", book)]
    BookNotFound { book: String },

    #[error("{} has no chapter {}.", book, chapter)]
    ChapterNotFound { book: String, chapter: i32 },

    #[error("'{}' was not found.", reference)]
    VerseNotFound { reference: String },

    #[error("Strong's number '{}' was not found.", number)]
    StrongsNotFound { number: String },

    #[error("'{}' is not a valid Bible reference.", reference)]
    InvalidReference { reference: String },

    #[error("Search queries need at least {} characters.", min)]
    QueryTooShort { min: usize },

    #[error("'{}' is not an API route.", path)]
    RouteNotFound { path: String },

    #[error("There was a store error.")]
    Store,
}

#[derive(Error, Debug)]
#[error("Error: {0}")]
/// Error to display as JSON
pub struct JsonError(pub Error);

impl From<Error> for JsonError {
    fn from(e: Error) -> Self {
        JsonError(e)
    }
}

impl From<StoreError> for JsonError {
    fn from(e: StoreError) -> Self {
        JsonError(match e {
            StoreError::InvalidReference { reference } => Error::InvalidReference { reference },
            StoreError::QueryTooShort { min } => Error::QueryTooShort { min },
            e => {
                error!("{}", e);
                Error::Store
            }
        })
    }
}

impl ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            Error::BookNotFound { .. }
            | Error::ChapterNotFound { .. }
            | Error::VerseNotFound { .. }
            | Error::StrongsNotFound { .. }
            | Error::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            Error::InvalidReference { .. } | Error::QueryTooShort { .. } => {
                StatusCode::BAD_REQUEST
            }
            Error::Store => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let Error::Store = self.0 {
            error!("Unhandled: {}", &self.0);
        }
        HttpResponse::build(self.status_code()).json(ErrorData::from_error(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        let not_found = JsonError::from(Error::BookNotFound {
            book: "Hezekiah".to_string(),
        });
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.to_string(), "Error: 'Hezekiah' was not found.");

        let too_short = JsonError::from(Error::QueryTooShort { min: 2 });
        assert_eq!(too_short.status_code(), StatusCode::BAD_REQUEST);

        let too_short = JsonError::from(StoreError::QueryTooShort { min: 2 });
        assert_eq!(too_short.status_code(), StatusCode::BAD_REQUEST);

        let invalid = JsonError::from(StoreError::InvalidReference {
            reference: "John three".to_string(),
        });
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);

        let internal = JsonError::from(StoreError::Loader {
            cause: "boom".to_string(),
        });
        assert_eq!(internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
