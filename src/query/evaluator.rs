//! Query evaluation against record fields.

use unicode_segmentation::UnicodeSegmentation;

use crate::query::ast::QueryNode;
use crate::record::PatternRecord;
use crate::util::levenshtein;

impl QueryNode {
    /// Evaluate the query against a record's flattened fields.
    ///
    /// Fields are expected lower-cased, as produced by
    /// [`PatternRecord::flattened_fields`]. A term or phrase matches the
    /// record if it matches any single field; `NOT` negates its operand
    /// for the whole record. Pure predicate — no score is computed.
    pub fn matches(&self, fields: &[String]) -> bool {
        match self {
            QueryNode::Term { text, fuzzy: None } => {
                fields.iter().any(|field| field.contains(text.as_str()))
            }
            QueryNode::Term {
                text,
                fuzzy: Some(max_edits),
            } => fields.iter().any(|field| {
                field
                    .unicode_words()
                    .any(|token| levenshtein::within_distance(token, text, *max_edits))
            }),
            QueryNode::Phrase(text) => {
                fields.iter().any(|field| field.contains(text.as_str()))
            }
            QueryNode::And(a, b) => a.matches(fields) && b.matches(fields),
            QueryNode::Or(a, b) => a.matches(fields) || b.matches(fields),
            QueryNode::Not(inner) => !inner.matches(fields),
        }
    }

    /// Evaluate the query against one record.
    pub fn matches_record(&self, record: &PatternRecord) -> bool {
        self.matches(&record.flattened_fields())
    }
}
