//! Reader for the Strong's lexicon dialect of CSV.
//!
//! The lexicon's gloss column holds numbered senses on separate lines, so a
//! quoted field may contain raw newlines. Records are read in two stages:
//! physical lines are first reassembled into logical records by tracking
//! quote parity, then each record is split into fields.

use std::io::{self, BufRead};
use std::mem;

/// Number of positional fields in a lexicon record.
pub const FIELD_COUNT: usize = 9;

/// Iterator over the logical records of a lexicon file, header excluded.
///
/// A line that can't be read ends the record being gathered with an error.
/// Reading resumes with a fresh record on the following line.
pub struct Records<R> {
    lines: io::Lines<R>,
    header_skipped: bool,
}

impl<R: BufRead> Records<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            header_skipped: false,
        }
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.header_skipped {
            self.header_skipped = true;
            if let Err(e) = self.lines.next()? {
                return Some(Err(e));
            }
        }

        let mut pending: Option<String> = None;
        loop {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => return Some(Err(e)),
                // An unterminated quote still yields what was gathered.
                None => return pending.map(Ok),
            };
            let line = line.strip_suffix('\r').unwrap_or(&line);
            let odd_quotes = line.matches('"').count() % 2 == 1;

            match pending.take() {
                None if odd_quotes => pending = Some(line.to_string()),
                None => return Some(Ok(line.to_string())),
                Some(mut record) => {
                    record.push('\n');
                    record.push_str(line);
                    if odd_quotes {
                        return Some(Ok(record));
                    }
                    pending = Some(record);
                }
            }
        }
    }
}

/// Splits one logical record into its fields.
///
/// Commas inside quotes are kept, and a doubled quote inside a quoted span
/// stands for a single literal quote.
pub fn split_fields(record: &str) -> Vec<String> {
    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = record.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);

    fields
}

/// Fields of a record worth keeping, or `None` for a short or keyless
/// record.
pub fn usable_fields(record: &str) -> Option<Vec<String>> {
    let fields = split_fields(record);
    if fields.len() < FIELD_COUNT || fields[0].trim().is_empty() {
        None
    } else {
        Some(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "number,headword,gloss,language,pos,gender,count,first,root\n";

    fn records(body: &str) -> Vec<String> {
        let text = format!("{}{}", HEADER, body);
        Records::new(text.as_bytes())
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn single_line_records() {
        let result = records(
            "1,אָב,father,Hebrew,noun,masc,1215,Gen 2:24,\n2,אַב,father,Aramaic,noun,masc,9,Dan 5:2,\n",
        );
        assert_eq!(result.len(), 2);
        assert!(result[0].starts_with("1,"));
        assert!(result[1].starts_with("2,"));
    }

    #[test]
    fn header_only() {
        assert!(records("").is_empty());
    }

    #[test]
    fn multi_line_quoted_field() {
        let result = records(
            "430,אֱלֹהִים,\"1) (plural) rulers, judges\n2) God\nKJV: God, god, judge\",Hebrew,noun,masc,2602,Gen 1:1,אֱלוֹהַּ\n",
        );
        assert_eq!(result.len(), 1);

        let fields = split_fields(&result[0]);
        assert_eq!(fields.len(), 9);
        assert_eq!(fields[0], "430");
        assert_eq!(
            fields[2],
            "1) (plural) rulers, judges\n2) God\nKJV: God, god, judge"
        );
        assert_eq!(fields[8], "אֱלוֹהַּ");
    }

    #[test]
    fn carriage_returns_are_stripped() {
        let result = records("1,a,\"one\r\ntwo\",Hebrew,noun,,1,Gen 1:1,\r\n");
        assert_eq!(result, vec!["1,a,\"one\ntwo\",Hebrew,noun,,1,Gen 1:1,"]);
    }

    #[test]
    fn doubled_quotes() {
        let fields = split_fields("7,x,\"the \"\"word\"\", spoken\",Hebrew,noun,,3,Gen 1:3,");
        assert_eq!(fields[2], "the \"word\", spoken");
        assert_eq!(fields.len(), 9);
    }

    #[test]
    fn doubled_quotes_keep_parity() {
        let result = records("8,x,\"a \"\"b\"\"\nc\",Hebrew,noun,,1,Gen 1:1,\n");
        assert_eq!(result.len(), 1);
        assert_eq!(split_fields(&result[0])[2], "a \"b\"\nc");
    }

    #[test]
    fn unterminated_record_is_emitted() {
        let result = records("9,x,\"never closed\nstill open\n");
        assert_eq!(result, vec!["9,x,\"never closed\nstill open"]);
        assert!(usable_fields(&result[0]).is_none());
    }

    #[test]
    fn undecodable_line_ends_the_pending_record() {
        let mut text = format!("{}1,a,\"open\n", HEADER).into_bytes();
        text.extend_from_slice(&[0xff, 0xfe, b'"', b'\n']);
        text.extend_from_slice("2,b,two,Hebrew,noun,,1,Gen 1:1,\n".as_bytes());
        let mut result = Records::new(text.as_slice());

        let err = result.next().unwrap().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert_eq!(
            result.next().unwrap().unwrap(),
            "2,b,two,Hebrew,noun,,1,Gen 1:1,"
        );
        assert!(result.next().is_none());
    }

    #[test]
    fn short_and_keyless_records() {
        assert!(usable_fields("1,a,b").is_none());
        assert!(usable_fields(",a,b,c,d,e,f,g,h").is_none());
        assert!(usable_fields("  ,a,b,c,d,e,f,g,h").is_none());
        assert_eq!(usable_fields("1,a,b,c,d,e,f,g,h").map(|f| f.len()), Some(9));
    }
}
