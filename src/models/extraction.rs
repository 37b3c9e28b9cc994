use serde::{ Deserialize, Serialize };
use std::collections::BTreeMap;

use crate::models::common::ClauseKey;

/// Raw result of matching one clause pattern against a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CovenantExtraction {
    pub clause_key: ClauseKey,
    pub found: bool,
    /// Text of the capture group, e.g. "4.75" or "10,000,000"
    pub raw_value: String,
    /// The whole matched span, label included
    pub matched_text: String,
    /// Byte offset of the match within the parsed text
    pub offset: usize,
}

/// One entry per known clause key; `None` when the pattern did not match
pub type ParsedDocument = BTreeMap<ClauseKey, Option<CovenantExtraction>>;
