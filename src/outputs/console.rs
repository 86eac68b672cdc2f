//! Plain-text batch report for the terminal.
//!
//! ```text
//! 0 Batch of 2 items
//!   - nyt://article/1 - First Headline
//!   - nyt://article/2 - Second Headline
//! ```

use crate::models::Batch;
use crate::utils::display_value;
use std::fmt::Write;

/// Field identifying an article.
pub const ID_FIELD: &str = "_id";
/// Field holding the article's main headline.
pub const HEADLINE_FIELD: &str = "headline.main";

/// Render one batch: a header line, then one line per record.
pub fn render_batch(index: usize, batch: &Batch) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{index} Batch of {} items", batch.len());
    for item in batch {
        let _ = writeln!(
            out,
            "  - {} - {}",
            display_value(item.get(ID_FIELD)),
            display_value(item.get(HEADLINE_FIELD))
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FlatRecord;
    use serde_json::{Value, json};

    fn record(v: Value) -> FlatRecord {
        match v {
            Value::Object(m) => m,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_render_batch() {
        let batch = vec![
            record(json!({"_id": "nyt://article/1", "headline.main": "First Headline"})),
            record(json!({"_id": "nyt://article/2", "headline.main": "Second Headline", "word_count": 5})),
        ];
        assert_eq!(
            render_batch(0, &batch),
            "0 Batch of 2 items\n  - nyt://article/1 - First Headline\n  - nyt://article/2 - Second Headline\n"
        );
    }

    #[test]
    fn test_render_empty_batch() {
        assert_eq!(render_batch(4, &Vec::new()), "4 Batch of 0 items\n");
    }

    #[test]
    fn test_render_missing_fields() {
        let batch = vec![record(json!({"_id": "nyt://article/9", "headline.main": null}))];
        assert_eq!(
            render_batch(1, &batch),
            "1 Batch of 1 items\n  - nyt://article/9 - -\n"
        );
    }
}
