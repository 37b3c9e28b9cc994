//! Literal pattern extraction of covenant terms from agreement text.
//!
//! Every clause key has exactly one pattern with one capture group. Patterns are
//! case-insensitive and let `.`/`\s` run across line breaks, because agreement
//! text is usually hard-wrapped between the clause label and its number. The gap
//! between label and number is capped at `MAX_GAP` characters so a label never
//! pairs with a number from a later clause.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::errors::ClauseError;
use crate::models::common::ClauseKey;
use crate::models::extraction::{ CovenantExtraction, ParsedDocument };

/// Longest run of text allowed between a clause label and its value
pub const MAX_GAP: usize = 400;

lazy_static! {
    /// "Leverage Ratio ... shall not exceed 4.75:1"
    static ref LEVERAGE_PATTERN: Regex =
        Regex::new(&format!(r"(?is)leverage\s+ratio.{{0,{}}}?not\s+exceed\s+(\d+(?:\.\d+)?)\s*:\s*1", MAX_GAP)).unwrap();

    /// "Interest Cover ... shall not be less than 3.00:1"
    static ref INTEREST_COVER_PATTERN: Regex =
        Regex::new(&format!(r"(?is)interest\s+cover.{{0,{}}}?not\s+be\s+less\s+than\s+(\d+(?:\.\d+)?)\s*:\s*1", MAX_GAP)).unwrap();

    /// "unless payment is made within 7 Business Days"
    static ref GRACE_PERIOD_PATTERN: Regex =
        Regex::new(r"(?i)payment\s+is\s+made\s+within\s+(\d+)\s+business\s+days").unwrap();

    /// "... in aggregate amount ... exceeds EUR 10,000,000"
    static ref CROSS_DEFAULT_PATTERN: Regex =
        Regex::new(&format!(r"(?is)aggregate\s+amount.{{0,{}}}?exceeds\s+EUR\s*([\d,]+)", MAX_GAP)).unwrap();

    /// Paragraph introduced by a "Negative Pledge" heading
    static ref NEGATIVE_PLEDGE_PATTERN: Regex =
        Regex::new(r"(?is)(negative\s+pledge.*?)(?:\r?\n[ \t]*\r?\n|\z)").unwrap();

    /// Paragraph introduced by a "Disposals" heading
    static ref DISPOSALS_PATTERN: Regex =
        Regex::new(r"(?is)(disposals?\b.*?)(?:\r?\n[ \t]*\r?\n|\z)").unwrap();
}

fn pattern_for(key: ClauseKey) -> &'static Regex {
    match key {
        ClauseKey::LeverageRatio => &LEVERAGE_PATTERN,
        ClauseKey::InterestCover => &INTEREST_COVER_PATTERN,
        ClauseKey::GracePeriod => &GRACE_PERIOD_PATTERN,
        ClauseKey::CrossDefault => &CROSS_DEFAULT_PATTERN,
        ClauseKey::NegativePledge => &NEGATIVE_PLEDGE_PATTERN,
        ClauseKey::Disposals => &DISPOSALS_PATTERN,
    }
}

/// Extracts raw covenant values from free text
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentParser;

impl DocumentParser {
    pub fn new() -> Self {
        Self
    }

    /// Run every clause pattern over `text`. Each key is matched on its own, so
    /// a missing clause never hides another one.
    pub fn parse_document(&self, text: &str) -> ParsedDocument {
        ClauseKey::ALL.iter()
            .map(|key| (*key, self.extract(text, *key)))
            .collect()
    }

    /// First match of the pattern for `key`, or `None`.
    pub fn extract(&self, text: &str, key: ClauseKey) -> Option<CovenantExtraction> {
        let captures = pattern_for(key).captures(text)?;
        let whole = captures.get(0)?;
        let raw_value = captures
            .get(1)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        debug!("Matched {} at offset {}: {:?}", key.label(), whole.start(), raw_value);

        Some(CovenantExtraction {
            clause_key: key,
            found: true,
            raw_value,
            matched_text: whole.as_str().to_string(),
            offset: whole.start(),
        })
    }
}

/// Convert a captured value into the number the scoring tables expect.
///
/// Grace periods must be whole days but may be arbitrarily large;
/// cross-default amounts may carry thousands separators.
pub fn numeric_value(extraction: &CovenantExtraction) -> Result<f64, ClauseError> {
    let parse_error = || ClauseError::ValueParse {
        clause: extraction.clause_key.label().to_string(),
        raw: extraction.raw_value.clone(),
    };

    match extraction.clause_key {
        ClauseKey::GracePeriod => whole_days(&extraction.raw_value).ok_or_else(parse_error),
        ClauseKey::CrossDefault => extraction.raw_value
            .replace(',', "")
            .parse::<f64>()
            .map_err(|_| parse_error()),
        ClauseKey::LeverageRatio | ClauseKey::InterestCover => extraction.raw_value
            .parse::<f64>()
            .map_err(|_| parse_error()),
        ClauseKey::NegativePledge | ClauseKey::Disposals => Err(parse_error()),
    }
}

fn whole_days(raw: &str) -> Option<f64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<f64>().ok()
}
