mod data;
mod link;

pub use self::data::*;
pub use self::link::{BookLinks, ChapterLinks, Link};
