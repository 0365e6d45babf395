//! Query expression tree.

use std::fmt;

/// A parsed query expression.
///
/// Built once per query string; stateless and immutable after construction.
/// All text is stored lower-cased so evaluation can compare directly
/// against a record's lower-cased fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryNode {
    /// A single word, matched as a substring — or against word tokens
    /// within an edit-distance budget when `fuzzy` is set.
    Term {
        /// Lower-cased term text.
        text: String,
        /// Maximum edit distance for a token match; `None` means exact
        /// substring matching.
        fuzzy: Option<u32>,
    },
    /// A quoted phrase, matched as a literal contiguous substring.
    Phrase(String),
    /// Both operands must match.
    And(Box<QueryNode>, Box<QueryNode>),
    /// Either operand must match.
    Or(Box<QueryNode>, Box<QueryNode>),
    /// The operand must not match.
    Not(Box<QueryNode>),
}

impl QueryNode {
    /// Create an exact term node.
    pub fn term(text: impl Into<String>) -> Self {
        QueryNode::Term {
            text: text.into().to_lowercase(),
            fuzzy: None,
        }
    }

    /// Create a fuzzy term node.
    pub fn fuzzy_term(text: impl Into<String>, distance: u32) -> Self {
        QueryNode::Term {
            text: text.into().to_lowercase(),
            fuzzy: Some(distance),
        }
    }

    /// Create a phrase node.
    pub fn phrase(text: impl Into<String>) -> Self {
        QueryNode::Phrase(text.into().to_lowercase())
    }
}

impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryNode::Term { text, fuzzy: None } => write!(f, "{text}"),
            QueryNode::Term {
                text,
                fuzzy: Some(n),
            } => write!(f, "{text}~{n}"),
            QueryNode::Phrase(text) => write!(f, "\"{text}\""),
            QueryNode::And(a, b) => write!(f, "({a} AND {b})"),
            QueryNode::Or(a, b) => write!(f, "({a} OR {b})"),
            QueryNode::Not(inner) => write!(f, "(NOT {inner})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_lowercase() {
        assert_eq!(
            QueryNode::term("Prompt"),
            QueryNode::Term {
                text: "prompt".to_string(),
                fuzzy: None
            }
        );
        assert_eq!(
            QueryNode::phrase("Few Shot"),
            QueryNode::Phrase("few shot".to_string())
        );
    }

    #[test]
    fn test_display() {
        let node = QueryNode::Or(
            Box::new(QueryNode::And(
                Box::new(QueryNode::term("a")),
                Box::new(QueryNode::Not(Box::new(QueryNode::fuzzy_term("b", 1)))),
            )),
            Box::new(QueryNode::phrase("few shot")),
        );
        assert_eq!(node.to_string(), "((a AND (NOT b~1)) OR \"few shot\")");
    }
}
