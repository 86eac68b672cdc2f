//! Collapse nested JSON objects into a single level of dot-joined keys.
//!
//! ```text
//! {"headline": {"main": "Title", "kicker": null}, "word_count": 812}
//!   -> {"headline.main": "Title", "headline.kicker": null, "word_count": 812}
//! ```
//!
//! Only objects are descended into. Arrays, including arrays of objects such
//! as `keywords` or `multimedia`, are kept whole under their own key.

use crate::models::FlatRecord;
use serde_json::{Map, Value};

/// Separator used for article records.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Flatten `map`, joining nested keys with `sep` under an optional `parent_key`.
///
/// An empty `parent_key` means "no prefix". If two paths produce the same
/// flat key (a raw key that itself contains `sep`), the value seen last
/// wins and the key keeps the position where it first appeared.
pub fn flatten(map: &Map<String, Value>, sep: &str, parent_key: &str) -> FlatRecord {
    let mut out = FlatRecord::new();
    flatten_into(&mut out, map, sep, parent_key);
    out
}

/// Flatten a raw article with the default separator and no prefix.
pub fn flatten_record(map: &Map<String, Value>) -> FlatRecord {
    flatten(map, DEFAULT_SEPARATOR, "")
}

fn flatten_into(out: &mut FlatRecord, map: &Map<String, Value>, sep: &str, parent_key: &str) {
    for (key, value) in map {
        let new_key = if parent_key.is_empty() {
            key.clone()
        } else {
            format!("{parent_key}{sep}{key}")
        };

        match value {
            Value::Object(nested) => flatten_into(out, nested, sep, &new_key),
            leaf => {
                out.insert(new_key, leaf.clone());
            }
        }
    }
}
