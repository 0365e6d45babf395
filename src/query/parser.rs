//! Parser for the boolean/fuzzy query language.

use log::debug;
use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::query::ast::QueryNode;
use crate::record::PatternRecord;

/// Upper bound on fuzzy edit distance, explicit or default.
pub const MAX_FUZZY_DISTANCE: u32 = 3;

/// Pest grammar parser for the query language.
#[derive(Parser)]
#[grammar = "query/grammar.pest"]
struct QueryStringParser;

/// Parses query strings into [`QueryNode`] trees.
///
/// Grammar: terms and quoted phrases combined with `AND`, `OR`, `NOT`
/// (case-insensitive), implicit `AND` between adjacent terms, and `~N`
/// fuzzy suffixes. Precedence, highest to lowest: `NOT`, `AND`, `OR`.
///
/// Parsing never fails: input the grammar rejects degrades to a single
/// literal phrase over the whole string.
///
/// # Example
///
/// ```
/// use protea::query::QueryParser;
///
/// let parser = QueryParser::new();
/// let query = parser.parse(r#"persona AND NOT "chain of thought""#);
/// assert_eq!(query.to_string(), "(persona AND (NOT \"chain of thought\"))");
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryParser {
    default_fuzzy: Option<u32>,
}

impl QueryParser {
    /// Create a parser with exact matching for bare terms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable fuzzy matching for bare terms at the given edit distance.
    ///
    /// An explicit `~N` suffix always overrides this default. The distance
    /// is clamped to [`MAX_FUZZY_DISTANCE`].
    pub fn with_default_fuzzy(mut self, distance: u32) -> Self {
        self.default_fuzzy = Some(distance.min(MAX_FUZZY_DISTANCE));
        self
    }

    /// Parse a query string.
    pub fn parse(&self, input: &str) -> QueryNode {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return QueryNode::Phrase(String::new());
        }

        match QueryStringParser::parse(Rule::query, trimmed) {
            Ok(mut pairs) => pairs
                .next()
                .and_then(|query| self.build_query(query))
                .unwrap_or_else(|| self.literal_phrase(trimmed)),
            Err(err) => {
                debug!("query '{trimmed}' did not parse ({err}); treating as literal phrase");
                self.literal_phrase(trimmed)
            }
        }
    }

    /// Parse once and filter a record slice with the resulting predicate.
    pub fn filter<'a>(&self, input: &str, records: &'a [PatternRecord]) -> Vec<&'a PatternRecord> {
        let query = self.parse(input);
        records
            .iter()
            .filter(|record| query.matches_record(record))
            .collect()
    }

    fn literal_phrase(&self, raw: &str) -> QueryNode {
        QueryNode::Phrase(raw.to_lowercase())
    }

    fn build_query(&self, pair: Pair<'_, Rule>) -> Option<QueryNode> {
        pair.into_inner()
            .find(|inner| inner.as_rule() == Rule::or_expr)
            .and_then(|or| self.build_or(or))
    }

    fn build_or(&self, pair: Pair<'_, Rule>) -> Option<QueryNode> {
        let mut result: Option<QueryNode> = None;
        for inner in pair.into_inner() {
            if inner.as_rule() != Rule::and_expr {
                continue;
            }
            let node = self.build_and(inner)?;
            result = Some(match result {
                None => node,
                Some(acc) => QueryNode::Or(Box::new(acc), Box::new(node)),
            });
        }
        result
    }

    fn build_and(&self, pair: Pair<'_, Rule>) -> Option<QueryNode> {
        let mut result: Option<QueryNode> = None;
        for inner in pair.into_inner() {
            if inner.as_rule() != Rule::not_expr {
                continue;
            }
            let node = self.build_not(inner)?;
            result = Some(match result {
                None => node,
                Some(acc) => QueryNode::And(Box::new(acc), Box::new(node)),
            });
        }
        result
    }

    fn build_not(&self, pair: Pair<'_, Rule>) -> Option<QueryNode> {
        let mut negated = false;
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::not_op => negated = !negated,
                Rule::not_expr => {
                    let node = self.build_not(inner)?;
                    return Some(if negated {
                        QueryNode::Not(Box::new(node))
                    } else {
                        node
                    });
                }
                Rule::term => {
                    let node = self.build_term(inner)?;
                    return Some(if negated {
                        QueryNode::Not(Box::new(node))
                    } else {
                        node
                    });
                }
                Rule::phrase => {
                    let node = self.build_phrase(inner);
                    return Some(if negated {
                        QueryNode::Not(Box::new(node))
                    } else {
                        node
                    });
                }
                _ => {}
            }
        }
        None
    }

    fn build_term(&self, pair: Pair<'_, Rule>) -> Option<QueryNode> {
        let mut text: Option<String> = None;
        let mut fuzzy: Option<u32> = None;
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::word => text = Some(inner.as_str().to_lowercase()),
                Rule::fuzzy => {
                    let digits = &inner.as_str()[1..];
                    fuzzy = Some(
                        digits
                            .parse::<u32>()
                            .unwrap_or(MAX_FUZZY_DISTANCE)
                            .min(MAX_FUZZY_DISTANCE),
                    );
                }
                _ => {}
            }
        }
        Some(QueryNode::Term {
            text: text?,
            fuzzy: fuzzy.or(self.default_fuzzy),
        })
    }

    fn build_phrase(&self, pair: Pair<'_, Rule>) -> QueryNode {
        let text = pair
            .into_inner()
            .find(|inner| inner.as_rule() == Rule::phrase_text)
            .map(|inner| inner.as_str().to_lowercase())
            .unwrap_or_default();
        QueryNode::Phrase(text)
    }
}
