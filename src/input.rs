//! Raw allowlist records.
//!
//! The input is one record per line: an account, optionally followed by a comma
//! and a weight. Records are only split here; validation happens when a record
//! is turned into an [`Entry`].

use crate::{
    identifier::parse_identifier,
    leaf::{parse_weight, Entry, Weight},
    AllowlistError,
};

/// One unvalidated input record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line (or position) the record came from
    pub line: usize,
    pub identifier: String,
    pub weight: Option<String>,
}

impl RawRecord {
    pub fn new(line: usize, identifier: impl Into<String>, weight: Option<String>) -> Self {
        Self {
            line,
            identifier: identifier.into(),
            weight,
        }
    }

    /// The record as it appeared in the list, `identifier[,weight]`.
    pub fn text(&self) -> String {
        match &self.weight {
            Some(weight) => format!("{},{}", self.identifier, weight),
            None => self.identifier.clone(),
        }
    }

    /// Validates the record. `default_weight` applies when the record has no
    /// weight column.
    pub fn to_entry(&self, default_weight: Weight) -> Result<Entry, AllowlistError> {
        let identifier = parse_identifier(&self.identifier)?;
        let weight = match &self.weight {
            Some(weight) => parse_weight(weight)?,
            None => default_weight,
        };
        Ok(Entry::new(identifier, weight))
    }
}

/// Splits a list file into records.
///
/// Handles `\n` and `\r\n` line endings and a leading UTF-8 byte order mark.
/// Blank lines are not records and are dropped; anything else is kept, even if
/// malformed, so it can be reported as skipped.
pub fn parse_records(text: &str) -> Vec<RawRecord> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| match line.split_once(',') {
            Some((identifier, weight)) => {
                let weight = weight.trim();
                RawRecord::new(
                    i + 1,
                    identifier.trim(),
                    (!weight.is_empty()).then(|| weight.to_string()),
                )
            }
            None => RawRecord::new(i + 1, line.trim(), None),
        })
        .collect()
}

/// Wraps in-memory identifiers as records, numbered from 1.
pub fn records_from_identifiers<I, S>(identifiers: I) -> Vec<RawRecord>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    identifiers
        .into_iter()
        .enumerate()
        .map(|(i, identifier)| RawRecord::new(i + 1, identifier, None))
        .collect()
}
