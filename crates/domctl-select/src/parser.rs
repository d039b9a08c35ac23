//! Selector parser
//!
//! Grammar:
//!   list     := complex ("," complex)*
//!   complex  := compound ((ws | ws? ">" ws?) compound)*
//!   compound := simple+
//!   simple   := "*" | type | "#" name | "." name | "[" name (op value)? "]"

use crate::SelectorError;

/// Comma-separated selector alternatives
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

/// Compound selectors joined by combinators
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    /// Compound selectors, left to right
    pub compounds: Vec<CompoundSelector>,
    /// Combinator between compounds[i] and compounds[i+1]
    pub combinators: Vec<Combinator>,
}

/// Combinator between two compound selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Whitespace: any ancestor
    Descendant,
    /// `>`: direct parent
    Child,
}

/// One or more simple selectors applying to a single element
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundSelector {
    pub simples: Vec<SimpleSelector>,
}

/// A simple selector
#[derive(Debug, Clone, PartialEq)]
pub enum SimpleSelector {
    /// Universal selector *
    Universal,
    /// Type selector (tag name)
    Type(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr], [attr=value], etc.
    Attr(AttrSelector),
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq)]
pub struct AttrSelector {
    pub name: String,
    /// None means bare existence check: [attr]
    pub matcher: Option<AttrMatcher>,
}

/// Attribute value matchers
#[derive(Debug, Clone, PartialEq)]
pub enum AttrMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr~=value] - whitespace-separated list contains
    Includes(String),
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch(String),
    /// [attr^=value] - starts with
    Prefix(String),
    /// [attr$=value] - ends with
    Suffix(String),
    /// [attr*=value] - contains substring
    Substring(String),
}

pub(crate) struct Parser<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    pub(crate) fn parse_list(mut self) -> Result<SelectorList, SelectorError> {
        let mut selectors = Vec::new();
        loop {
            self.skip_ws();
            selectors.push(self.parse_complex()?);
            self.skip_ws();
            match self.peek() {
                None => break,
                Some(b',') => self.pos += 1,
                Some(c) => return Err(self.unexpected(c)),
            }
        }
        Ok(SelectorList { selectors })
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();
        loop {
            let had_ws = self.skip_ws();
            match self.peek() {
                None | Some(b',') => break,
                Some(b'>') => {
                    self.pos += 1;
                    self.skip_ws();
                    combinators.push(Combinator::Child);
                    compounds.push(self.parse_compound()?);
                }
                Some(_) if had_ws => {
                    combinators.push(Combinator::Descendant);
                    compounds.push(self.parse_compound()?);
                }
                Some(c) => return Err(self.unexpected(c)),
            }
        }
        Ok(ComplexSelector {
            compounds,
            combinators,
        })
    }

    fn parse_compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut simples = Vec::new();
        loop {
            match self.peek() {
                Some(b'*') => {
                    self.pos += 1;
                    simples.push(SimpleSelector::Universal);
                }
                Some(b'#') => {
                    self.pos += 1;
                    simples.push(SimpleSelector::Id(self.parse_ident("id")?));
                }
                Some(b'.') => {
                    self.pos += 1;
                    simples.push(SimpleSelector::Class(self.parse_ident("class")?));
                }
                Some(b'[') => simples.push(SimpleSelector::Attr(self.parse_attr()?)),
                Some(c) if ident_start(c) => {
                    simples.push(SimpleSelector::Type(self.parse_ident("type")?));
                }
                _ => break,
            }
        }
        if simples.is_empty() {
            return Err(match self.peek() {
                Some(c) => self.unexpected(c),
                None => self.err("expected selector"),
            });
        }
        Ok(CompoundSelector { simples })
    }

    fn parse_attr(&mut self) -> Result<AttrSelector, SelectorError> {
        self.pos += 1; // consume '['
        self.skip_ws();
        let name = self.parse_ident("attribute")?;
        self.skip_ws();

        let matcher = match self.peek() {
            Some(b']') => None,
            Some(op) => {
                let build: fn(String) -> AttrMatcher = match op {
                    b'=' => AttrMatcher::Exact,
                    b'~' => AttrMatcher::Includes,
                    b'|' => AttrMatcher::DashMatch,
                    b'^' => AttrMatcher::Prefix,
                    b'$' => AttrMatcher::Suffix,
                    b'*' => AttrMatcher::Substring,
                    c => return Err(self.unexpected(c)),
                };
                self.pos += 1;
                if op != b'=' {
                    if self.peek() != Some(b'=') {
                        return Err(self.err("expected '=' in attribute matcher"));
                    }
                    self.pos += 1;
                }
                self.skip_ws();
                let value = self.parse_attr_value()?;
                self.skip_ws();
                Some(build(value))
            }
            None => return Err(self.err("unclosed attribute selector")),
        };

        if self.peek() != Some(b']') {
            return Err(self.err("unclosed attribute selector"));
        }
        self.pos += 1;
        Ok(AttrSelector { name, matcher })
    }

    fn parse_attr_value(&mut self) -> Result<String, SelectorError> {
        match self.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let start = self.pos;
                while let Some(c) = self.peek() {
                    if c == quote {
                        break;
                    }
                    self.pos += 1;
                }
                if self.peek() != Some(quote) {
                    return Err(self.err("unterminated attribute value"));
                }
                let value = self.source[start..self.pos].to_string();
                self.pos += 1;
                Ok(value)
            }
            _ => {
                let start = self.pos;
                while let Some(c) = self.peek() {
                    if c == b']' || c.is_ascii_whitespace() {
                        break;
                    }
                    self.pos += 1;
                }
                if self.pos == start {
                    return Err(self.err("expected attribute value"));
                }
                Ok(self.source[start..self.pos].to_string())
            }
        }
    }

    fn parse_ident(&mut self, what: &str) -> Result<String, SelectorError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if ident_char(c) {
                self.pos += 1;
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(self.err(format!("expected {what} name")));
        }
        Ok(self.source[start..self.pos].to_string())
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
        self.pos > start
    }

    fn unexpected(&self, c: u8) -> SelectorError {
        self.err(format!("unexpected character '{}'", c as char))
    }

    fn err(&self, message: impl Into<String>) -> SelectorError {
        SelectorError {
            selector: self.source.to_string(),
            position: self.pos,
            message: message.into(),
        }
    }
}

fn ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'-'
}

fn ident_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'-'
}
