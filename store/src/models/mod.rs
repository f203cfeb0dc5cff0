use std::fmt;

use serde_derive::Serialize;

/// Highest book id that belongs to the Old Testament.
pub const LAST_OLD_TESTAMENT_BOOK: i32 = 39;

/// Enum for the testaments in the Bible (Old or New). Never stored; it is
/// always derived from a book's id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Testament {
    Old,
    New,
}

impl Testament {
    /// Testament of the book with the given canonical id.
    pub fn of_book(book_id: i32) -> Self {
        if book_id <= LAST_OLD_TESTAMENT_BOOK {
            Testament::Old
        } else {
            Testament::New
        }
    }
}

/// Case folding shared by every name match and text search.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Model representing a book in the Bible.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub short_name: String,
    pub usx_code: String,
    pub chapter_count: i32,
    pub verse_count: i32,
    pub hebrew_name: String,
    pub hebrew_transliteration: String,
    pub hebrew_meaning: String,
    pub greek_name: String,
    pub greek_transliteration: String,
    pub greek_meaning: String,
}

impl Book {
    pub fn testament(&self) -> Testament {
        Testament::of_book(self.id)
    }

    /// Whether the name matches the canonical name, short name or USX code,
    /// ignoring case.
    pub fn answers_to(&self, name: &str) -> bool {
        let name = fold_case(name);
        [&self.name, &self.short_name, &self.usx_code]
            .iter()
            .any(|candidate| !candidate.is_empty() && fold_case(candidate) == name)
    }
}

/// Natural key of a verse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VerseKey {
    pub book: i32,
    pub chapter: i32,
    pub verse: i32,
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}-{}", self.book, self.chapter, self.verse)
    }
}

/// Model representing a Bible verse with its parallel translations.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Verse {
    pub id: i32,
    pub book: i32,
    pub book_name: String,
    pub chapter: i32,
    pub verse: i32,
    pub kjv: String,
    pub web: String,
    pub leningrad: String,
    pub jps: String,
    pub alexandrinus: String,
    pub brenton: String,
    pub samaritan: String,
    pub samaritan_english: String,
    pub onkelos: String,
    pub onkelos_english: String,
}

impl Verse {
    pub fn key(&self) -> VerseKey {
        VerseKey {
            book: self.book,
            chapter: self.chapter,
            verse: self.verse,
        }
    }

    /// Text of the verse in the given translation. Empty when the
    /// translation doesn't cover this verse.
    pub fn text(&self, translation: Translation) -> &str {
        match translation {
            Translation::Kjv => &self.kjv,
            Translation::Web => &self.web,
            Translation::Leningrad => &self.leningrad,
            Translation::Jps => &self.jps,
            Translation::Alexandrinus => &self.alexandrinus,
            Translation::Brenton => &self.brenton,
            Translation::Samaritan => &self.samaritan,
            Translation::SamaritanEnglish => &self.samaritan_english,
            Translation::Onkelos => &self.onkelos,
            Translation::OnkelosEnglish => &self.onkelos_english,
        }
    }
}

/// Parallel translations carried by the interlinear verse table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Translation {
    Kjv,
    Web,
    Leningrad,
    Jps,
    Alexandrinus,
    Brenton,
    Samaritan,
    SamaritanEnglish,
    Onkelos,
    OnkelosEnglish,
}

/// Original language of a Strong's entry, which decides its number prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Language {
    Hebrew,
    Greek,
}

impl Language {
    /// Reads the lexicon's language column. Anything not naming Greek is
    /// taken as Hebrew, which also covers the Aramaic entries.
    pub fn from_marker(marker: &str) -> Self {
        match marker.trim().chars().next() {
            Some('G') | Some('g') => Language::Greek,
            _ => Language::Hebrew,
        }
    }

    pub fn prefix(self) -> char {
        match self {
            Language::Hebrew => 'H',
            Language::Greek => 'G',
        }
    }
}

/// Model representing one entry of Strong's concordance.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StrongsDefinition {
    pub number: String,
    pub headword: String,
    pub gloss: String,
    pub language: String,
    pub part_of_speech: String,
    pub gender: String,
    pub occurrences: i32,
    pub first_occurrence: String,
    pub root_word: String,
}

/// Normalizes user input into a lexicon key: trimmed, upper case and
/// prefixed with `H` when no language prefix is given.
pub fn normalize_strongs_number(number: &str) -> String {
    let number = number.trim().to_uppercase();
    if number.starts_with('H') || number.starts_with('G') {
        number
    } else {
        format!("H{}", number)
    }
}

mod reference;
pub use self::reference::Reference;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn testament_follows_book_id() {
        for id in 1..=66 {
            let expected = if id <= 39 {
                Testament::Old
            } else {
                Testament::New
            };
            assert_eq!(Testament::of_book(id), expected);
        }
    }

    #[test]
    fn answers_to_any_name() {
        let book = Book {
            id: 43,
            name: "John".to_string(),
            short_name: "Jn".to_string(),
            usx_code: "JHN".to_string(),
            ..Book::default()
        };
        assert!(book.answers_to("john"));
        assert!(book.answers_to("JN"));
        assert!(book.answers_to("jhn"));
        assert!(!book.answers_to("1 john"));
        assert!(!book.answers_to(""));
    }

    #[test]
    fn answers_to_non_ascii_names() {
        let book = Book {
            id: 23,
            name: "Ésaïe".to_string(),
            ..Book::default()
        };
        assert!(book.answers_to("ÉSAÏE"));
        assert!(book.answers_to("ésaïe"));
        assert!(!book.answers_to("Esaie"));
    }

    #[test]
    fn strongs_numbers() {
        assert_eq!(normalize_strongs_number("430"), "H430");
        assert_eq!(normalize_strongs_number(" h430 "), "H430");
        assert_eq!(normalize_strongs_number("H430"), "H430");
        assert_eq!(normalize_strongs_number("g3056"), "G3056");
    }

    #[test]
    fn language_markers() {
        assert_eq!(Language::from_marker("Hebrew"), Language::Hebrew);
        assert_eq!(Language::from_marker("Aramaic"), Language::Hebrew);
        assert_eq!(Language::from_marker(""), Language::Hebrew);
        assert_eq!(Language::from_marker("greek"), Language::Greek);
        assert_eq!(Language::Greek.prefix(), 'G');
    }
}
