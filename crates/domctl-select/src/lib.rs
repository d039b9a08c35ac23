//! domctl selector engine
//!
//! Hand-written parser and matcher for a practical subset of CSS
//! selectors: type/id/class/attribute simple selectors, compound
//! selectors, and descendant/child combinators. Queries are scoped to a
//! context node and return matches in document order.

mod matcher;
mod parser;

pub use matcher::{matches, query_all};
pub use parser::{
    AttrMatcher, AttrSelector, Combinator, ComplexSelector, CompoundSelector, SelectorList,
    SimpleSelector,
};

/// Selector parse error
///
/// Anything outside the supported grammar (pseudo-selectors included) is
/// rejected eagerly; an invalid expression never half-matches.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid selector '{selector}' at byte {position}: {message}")]
pub struct SelectorError {
    /// Full source text of the offending selector
    pub selector: String,
    /// Byte offset the parser stopped at
    pub position: usize,
    pub message: String,
}

/// Parse a selector list from source text
pub fn parse(source: &str) -> Result<SelectorList, SelectorError> {
    parser::Parser::new(source).parse_list()
}
