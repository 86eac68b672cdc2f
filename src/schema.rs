//! The fixed set of article fields and projection onto it.

use crate::models::{FlatRecord, ProjectedRecord};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Flat field names every projected article may carry.
pub const ARTICLE_FIELDS: [&str; 13] = [
    "abstract",
    "web_url",
    "lead_paragraph",
    "headline.main",
    "pub_date",
    "document_type",
    "news_desk",
    "section_name",
    "subsection_name",
    "byline.original",
    "type_of_material",
    "word_count",
    "_id",
];

static ARTICLE_SCHEMA: Lazy<Schema> = Lazy::new(|| Schema::new(ARTICLE_FIELDS));

/// An immutable set of flat field names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: HashSet<String>,
}

impl Schema {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// The schema used for Article Search records.
    pub fn articles() -> &'static Schema {
        &ARTICLE_SCHEMA
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Restrict `record` to the keys it shares with this schema.
    ///
    /// Schema fields absent from the record are skipped rather than filled
    /// with nulls. Key order follows the record.
    pub fn project(&self, record: &FlatRecord) -> ProjectedRecord {
        record
            .iter()
            .filter(|(key, _)| self.contains(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}
