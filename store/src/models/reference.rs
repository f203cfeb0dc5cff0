use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::{Match, Regex};
use serde_derive::Serialize;

use crate::StoreError;

/// Model representing a Bible reference used to look up a
/// passage in the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub book: String,
    pub chapter: i32,
    pub verses: Option<RangeInclusive<i32>>,
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.verses {
            None => write!(f, "{} {}", self.book, self.chapter),
            Some(verses) if verses.start() == verses.end() => {
                write!(f, "{} {}:{}", self.book, self.chapter, verses.start())
            }
            Some(verses) => write!(
                f,
                "{} {}:{}-{}",
                self.book,
                self.chapter,
                verses.start(),
                verses.end()
            ),
        }
    }
}

impl FromStr for Reference {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Reference, Self::Err> {
        lazy_static! {
            static ref REF_RE: Regex =
                Regex::new(r"^(\w+(?: [a-zA-Z]+(?: [a-zA-Z]+)?)?)(?:\.| )((?:[0-9\-:\.])+)$")
                    .unwrap();
            static ref CV_RE: Regex =
                Regex::new(r"^(\d{1,3})(?:[:\.](\d{1,3})?(?:-(\d{1,3}))?)?$").unwrap();
        }

        let s = s.trim();
        let ref_caps = REF_RE.captures(s).ok_or_else(|| invalid_reference(s))?;
        let (book, cv) = match (ref_caps.get(1), ref_caps.get(2)) {
            (Some(book), Some(cv)) => (book.as_str().to_string(), cv),
            _ => return Err(invalid_reference(s)),
        };
        let cv_caps = CV_RE
            .captures(cv.as_str())
            .ok_or_else(|| invalid_reference(s))?;

        let chapter = match cv_caps.get(1) {
            Some(chapter) => parse_num_match(chapter)?,
            None => return Err(invalid_reference(s)),
        };
        let verses = match (cv_caps.get(2), cv_caps.get(3)) {
            // Chapter only
            (None, None) => None,
            // Chapter and one verse
            (Some(verse), None) => {
                let verse = parse_num_match(verse)?;
                Some(verse..=verse)
            }
            // Chapter with more than one verse
            (Some(start), Some(end)) => {
                let start = parse_num_match(start)?;
                let end = parse_num_match(end)?;
                if start > end {
                    return Err(invalid_reference(s));
                }
                Some(start..=end)
            }
            (None, Some(_)) => return Err(invalid_reference(s)),
        };

        Ok(Reference {
            book,
            chapter,
            verses,
        })
    }
}

/// Parse a [Match](regex::Match) into an i32.
fn parse_num_match(m: Match) -> Result<i32, StoreError> {
    m.as_str().parse().map_err(|_| invalid_reference(m.as_str()))
}

/// Create an invalid reference error from the input.
fn invalid_reference(s: &str) -> StoreError {
    StoreError::InvalidReference {
        reference: s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str() {
        vec![
            ("Genesis 50", "Genesis", 50, None),
            ("Joel 2:", "Joel", 2, None),
            ("Song of Solomon 1", "Song of Solomon", 1, None),
            ("Exodus 20", "Exodus", 20, None),
            ("1cor 4", "1cor", 4, None),
            ("John 1:1", "John", 1, Some(1..=1)),
            ("jhn.1.1", "jhn", 1, Some(1..=1)),
            ("I Timothy 3:16", "I Timothy", 3, Some(16..=16)),
            ("1 Timothy 3:16-18", "1 Timothy", 3, Some(16..=18)),
            ("1tim 3.16", "1tim", 3, Some(16..=16)),
        ]
        .into_iter()
        .for_each(|(raw, book, chapter, verses)| {
            assert_eq!(
                raw.parse::<Reference>().unwrap(),
                Reference {
                    book: book.to_string(),
                    chapter,
                    verses,
                }
            );
        });
    }

    #[test]
    fn invalid() {
        for raw in &["", "John", "John three", "Psalms 119:10-5", "John 3:16:1"] {
            assert!(
                raw.parse::<Reference>().is_err(),
                "'{}' should not parse",
                raw
            );
        }
    }

    #[test]
    fn fmt() {
        vec![
            ("Genesis 50", "Genesis", 50, None),
            ("Song of Solomon 1", "Song of Solomon", 1, None),
            ("3 John 1", "3 John", 1, None),
            ("John 1:1", "John", 1, Some(1..=1)),
            ("1 Timothy 3:16-18", "1 Timothy", 3, Some(16..=18)),
        ]
        .into_iter()
        .for_each(|(expected, book, chapter, verses)| {
            assert_eq!(
                Reference {
                    book: book.to_string(),
                    chapter,
                    verses,
                }
                .to_string(),
                expected
            );
        });
    }
}
