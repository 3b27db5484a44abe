//! Delimited record parsing
//!
//! Datasets are comma separated with optional double-quote quoting. A double
//! quote toggles quoted mode; inside it commas and line breaks are content,
//! so one record can span several physical lines. Whitespace around a
//! delimiter is not part of any field, which lets `a, "b, c"` read as two
//! fields. Parsing is best effort: a record that does not carry the fields
//! its schema needs yields a [`ParseError`] and the caller moves on.

use csv::{ByteRecord, ReaderBuilder, Trim};
use thiserror::Error;
use tracing::warn;

/// Fields required for a gallery record: thumbnail, title, year, full image
pub const GALLERY_MIN_FIELDS: usize = 4;

/// Fields required for a video record: title, video URL
pub const VIDEO_MIN_FIELDS: usize = 2;

/// Why a record could not be turned into an entry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("record is empty")]
    Empty,

    #[error("expected at least {expected} fields, found {found}")]
    TooFewFields { expected: usize, found: usize },

    #[error("unreadable record: {0}")]
    Malformed(String),
}

/// One unparsed record of a dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    index: usize,
    text: String,
}

impl RawRecord {
    /// Wrap a record's text; blank text is not a record
    pub fn new(index: usize, text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        Some(Self { index, text })
    }

    /// 1-based position of the record in its dataset
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Build records from plain lines, numbering them in order and dropping blanks
pub fn records_from_lines<I, S>(lines: I) -> Vec<RawRecord>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            let line = line.into();
            (!line.trim().is_empty()).then_some(line)
        })
        .enumerate()
        .filter_map(|(i, line)| RawRecord::new(i + 1, line))
        .collect()
}

/// Split a dataset document into records
///
/// Record boundaries are line breaks outside quotes. Blank lines are skipped.
pub fn split_records(document: &str) -> Vec<RawRecord> {
    let document = tighten_delimiters(document);
    let document = document.as_str();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(document.as_bytes());
    let mut scratch = ByteRecord::new();
    let mut bounds = Vec::new();

    loop {
        let start = reader.position().byte() as usize;
        match reader.read_byte_record(&mut scratch) {
            Ok(true) => bounds.push(start),
            Ok(false) => break,
            Err(e) => {
                warn!(offset = start, error = %e, "Stopped splitting dataset at unreadable record");
                break;
            },
        }
    }
    bounds.push(document.len());

    bounds
        .windows(2)
        .filter_map(|w| document.get(w[0]..w[1]))
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .enumerate()
        .filter_map(|(i, text)| RawRecord::new(i + 1, text))
        .collect()
}

/// Split one record into trimmed, unquoted fields
pub fn parse_fields(text: &str) -> Result<Vec<String>, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let text = tighten_delimiters(text);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let record = match reader.records().next() {
        Some(record) => record.map_err(|e| ParseError::Malformed(e.to_string()))?,
        None => return Err(ParseError::Empty),
    };

    Ok(record.iter().map(str::to_string).collect())
}

/// Rewrite a record so every quoted span is read as quoting
///
/// Spaces and tabs next to delimiters and line breaks outside quotes are
/// dropped, so a quote after `, ` opens its field. A field whose quoting
/// starts mid-text is re-quoted whole. The reader then keeps commas and line
/// breaks inside quotes and unescapes `""` itself.
pub fn tighten_delimiters(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut field = String::new();
    let mut held = String::new();
    let mut quoted = false;

    for c in text.chars() {
        if quoted {
            field.push(c);
            if c == '"' {
                quoted = false;
            }
            continue;
        }

        match c {
            ',' | '\n' | '\r' => {
                held.clear();
                flush_field(&mut out, &mut field);
                out.push(c);
            },
            ' ' | '\t' => {
                if !field.is_empty() {
                    held.push(c);
                }
            },
            _ => {
                field.push_str(&held);
                held.clear();
                if c == '"' {
                    quoted = true;
                }
                field.push(c);
            },
        }
    }
    flush_field(&mut out, &mut field);

    out
}

fn flush_field(out: &mut String, field: &mut String) {
    if !field.starts_with('"') && field.contains('"') {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
    field.clear();
}

fn require_fields(text: &str, expected: usize) -> Result<Vec<String>, ParseError> {
    let fields = parse_fields(text)?;
    if fields.len() < expected {
        return Err(ParseError::TooFewFields {
            expected,
            found: fields.len(),
        });
    }
    Ok(fields)
}

/// Collapse every whitespace run (line breaks and tabs included) to one space
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Read a year label; anything that is not a plain number is "unspecified"
pub fn parse_year(label: &str) -> Option<i32> {
    label.trim().parse().ok()
}

/// A parsed gallery record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    pub thumbnail_url: String,
    pub title: String,
    pub year_label: String,
    pub image_url: String,
}

impl GalleryEntry {
    pub fn parse(record: &RawRecord) -> Result<Self, ParseError> {
        let mut fields = require_fields(record.text(), GALLERY_MIN_FIELDS)?.into_iter();
        let mut next = || fields.next().unwrap_or_default();

        Ok(Self {
            thumbnail_url: next(),
            title: collapse_whitespace(&next()),
            year_label: next(),
            image_url: next(),
        })
    }

    pub fn year(&self) -> Option<i32> {
        parse_year(&self.year_label)
    }
}

/// A parsed video record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoEntry {
    pub title: String,
    pub video_url: String,
}

impl VideoEntry {
    pub fn parse(record: &RawRecord) -> Result<Self, ParseError> {
        let mut fields = require_fields(record.text(), VIDEO_MIN_FIELDS)?.into_iter();
        let mut next = || fields.next().unwrap_or_default();

        Ok(Self {
            title: collapse_whitespace(&next()),
            video_url: next(),
        })
    }
}
