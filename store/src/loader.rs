use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::Path;

use log::{debug, info, warn};
use serde::de::{Deserialize, Deserializer};
use serde_derive::Deserialize;

use crate::models::{Book, Language, StrongsDefinition, Verse};
use crate::strongs_csv::{self, Records};
use crate::StoreError;

/// Reads an integer column, falling back to 0 when it is empty, missing
/// or not a number.
fn lenient_int<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0))
}

/// One row of the books table.
#[derive(Debug, Deserialize)]
struct BookRow {
    #[serde(default, deserialize_with = "lenient_int")]
    book_id: i32,
    #[serde(default)]
    book_name: String,
    #[serde(default)]
    hebrew_name: String,
    #[serde(default)]
    hebrew_transliteration: String,
    #[serde(default)]
    hebrew_meaning: String,
    #[serde(default)]
    greek_name: String,
    #[serde(default)]
    greek_transliteration: String,
    #[serde(default)]
    greek_meaning: String,
    #[serde(default, deserialize_with = "lenient_int")]
    chapter_count: i32,
    #[serde(default, deserialize_with = "lenient_int")]
    verse_count: i32,
    #[serde(default)]
    short_name: String,
    #[serde(default)]
    usx_code: String,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            id: row.book_id,
            name: row.book_name,
            short_name: row.short_name,
            usx_code: row.usx_code,
            chapter_count: row.chapter_count,
            verse_count: row.verse_count,
            hebrew_name: row.hebrew_name,
            hebrew_transliteration: row.hebrew_transliteration,
            hebrew_meaning: row.hebrew_meaning,
            greek_name: row.greek_name,
            greek_transliteration: row.greek_transliteration,
            greek_meaning: row.greek_meaning,
        }
    }
}

/// One row of the interlinear verse table.
#[derive(Debug, Deserialize)]
struct VerseRow {
    #[serde(default, deserialize_with = "lenient_int")]
    id: i32,
    #[serde(default, deserialize_with = "lenient_int")]
    book_id: i32,
    #[serde(default)]
    book_name: String,
    #[serde(default, deserialize_with = "lenient_int")]
    chapter: i32,
    #[serde(default, deserialize_with = "lenient_int")]
    verse: i32,
    #[serde(default)]
    king_james_bible_kjv: String,
    #[serde(default)]
    world_english_bible_web: String,
    #[serde(default)]
    leningrad_codex: String,
    #[serde(default)]
    jewish_publication_society_jps: String,
    #[serde(default)]
    codex_alexandrinus: String,
    #[serde(default)]
    brenton_septuagint_english: String,
    #[serde(default)]
    samaritan_pentateuch: String,
    #[serde(default)]
    samaritan_pentateuch_english: String,
    #[serde(default)]
    targum_onkelos: String,
    #[serde(default)]
    targum_onkelos_english: String,
}

impl From<VerseRow> for Verse {
    fn from(row: VerseRow) -> Self {
        Verse {
            id: row.id,
            book: row.book_id,
            book_name: row.book_name,
            chapter: row.chapter,
            verse: row.verse,
            kjv: row.king_james_bible_kjv,
            web: row.world_english_bible_web,
            leningrad: row.leningrad_codex,
            jps: row.jewish_publication_society_jps,
            alexandrinus: row.codex_alexandrinus,
            brenton: row.brenton_septuagint_english,
            samaritan: row.samaritan_pentateuch,
            samaritan_english: row.samaritan_pentateuch_english,
            onkelos: row.targum_onkelos,
            onkelos_english: row.targum_onkelos_english,
        }
    }
}

/// Decodes every row of a headed CSV table. Any read or decode error fails
/// the whole table.
fn read_table<R, T, M>(reader: R, source: &str) -> Result<Vec<M>, StoreError>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
    M: From<T>,
{
    csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader)
        .deserialize::<T>()
        .map(|row| {
            row.map(M::from).map_err(|e| StoreError::Csv {
                path: source.to_string(),
                cause: e.to_string(),
            })
        })
        .collect()
}

fn open(path: &Path) -> Result<File, StoreError> {
    File::open(path).map_err(|e| StoreError::Read {
        path: path.display().to_string(),
        cause: e.to_string(),
    })
}

pub(crate) fn read_books<R: Read>(reader: R, source: &str) -> Result<Vec<Book>, StoreError> {
    read_table::<_, BookRow, _>(reader, source)
}

pub(crate) fn read_verses<R: Read>(reader: R, source: &str) -> Result<Vec<Verse>, StoreError> {
    read_table::<_, VerseRow, _>(reader, source)
}

pub(crate) fn load_books(path: &Path) -> Result<Vec<Book>, StoreError> {
    let books = read_books(BufReader::new(open(path)?), &path.display().to_string())?;
    debug!("Read {} books from {}", books.len(), path.display());
    Ok(books)
}

pub(crate) fn load_verses(path: &Path) -> Result<Vec<Verse>, StoreError> {
    let verses = read_verses(BufReader::new(open(path)?), &path.display().to_string())?;
    debug!("Read {} verses from {}", verses.len(), path.display());
    Ok(verses)
}

/// Builds a definition from the fields of a lexicon record.
fn strongs_definition(fields: Vec<String>) -> StrongsDefinition {
    let mut fields = fields.into_iter().map(|f| f.trim().to_string());
    let mut next = || fields.next().unwrap_or_default();

    let digits = next();
    let headword = next();
    let gloss = next();
    let language = next();
    let prefix = Language::from_marker(&language).prefix();

    StrongsDefinition {
        number: format!("{}{}", prefix, digits),
        headword,
        gloss,
        language,
        part_of_speech: next(),
        gender: next(),
        occurrences: next().parse().unwrap_or(0),
        first_occurrence: next(),
        root_word: next(),
    }
}

/// Reads the lexicon, dropping records that are too short, have no number
/// or don't decode. Returns the definitions and the number of dropped
/// records.
pub(crate) fn read_strongs<R: BufRead>(reader: R) -> (Vec<StrongsDefinition>, usize) {
    let mut definitions = Vec::new();
    let mut dropped = 0;

    for record in Records::new(reader) {
        let record = match record {
            Ok(record) => record,
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                warn!("Dropped undecodable Strong's record: {}", e);
                dropped += 1;
                continue;
            }
            Err(e) => {
                warn!("Stopped reading the Strong's lexicon early: {}", e);
                break;
            }
        };
        match strongs_csv::usable_fields(&record) {
            Some(fields) => definitions.push(strongs_definition(fields)),
            None => {
                debug!("Dropped malformed Strong's record: {:?}", record);
                dropped += 1;
            }
        }
    }

    (definitions, dropped)
}

/// Loads the lexicon. Being supplementary, an unreadable file leaves the
/// lexicon empty instead of failing the load.
pub(crate) fn load_strongs(path: &Path) -> (Vec<StrongsDefinition>, usize) {
    let file = match open(path) {
        Ok(file) => file,
        Err(e) => {
            warn!("{} The Strong's lexicon will be empty.", e);
            return (vec![], 0);
        }
    };
    let (definitions, dropped) = read_strongs(BufReader::new(file));
    if dropped > 0 {
        info!(
            "Dropped {} malformed Strong's records from {}",
            dropped,
            path.display()
        );
    }

    (definitions, dropped)
}
