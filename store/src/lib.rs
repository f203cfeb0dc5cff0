use std::path::{Path, PathBuf};

use thiserror::Error;

/// File name of the books table inside the data directory.
pub const BOOKS_FILE: &str = "books.csv";

/// File name of the interlinear verse table inside the data directory.
pub const VERSES_FILE: &str = "interlinear.csv";

/// File name of the Strong's lexicon inside the data directory.
pub const STRONGS_FILE: &str = "strongs.csv";

#[derive(Clone, Error, Debug)]
pub enum StoreError {
    #[error("Could not read '{}'. Root cause: {}.", path, cause)]
    Read { path: String, cause: String },

    #[error("'{}' is not valid CSV. Root cause: {}.", path, cause)]
    Csv { path: String, cause: String },

    #[error("A loader thread failed. Root cause: {}.", cause)]
    Loader { cause: String },

    #[error("'{}' is not a valid Bible reference.", reference)]
    InvalidReference { reference: String },

    #[error("Search queries need at least {} characters.", min)]
    QueryTooShort { min: usize },
}

/// Locations of the three source files the store is built from.
#[derive(Clone, Debug)]
pub struct DataPaths {
    pub books: PathBuf,
    pub verses: PathBuf,
    pub strongs: PathBuf,
}

impl DataPaths {
    /// Uses the fixed file names inside the given data directory.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            books: dir.join(BOOKS_FILE),
            verses: dir.join(VERSES_FILE),
            strongs: dir.join(STRONGS_FILE),
        }
    }
}

mod loader;
pub mod models;
mod store;
pub mod strongs_csv;
mod sword_drill;

pub use crate::store::{Store, StoreStats};
pub use sword_drill::{search_query, SwordDrillable, MIN_QUERY_LENGTH, STRONGS_SEARCH_LIMIT};
