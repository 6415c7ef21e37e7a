//! A small CSS selector subset for locating elements inside layout items
//!
//! Supported: type (`img`), universal (`*`), class (`.thumb`), id (`#hero`),
//! attribute presence/equality (`[data-src]`, `[data-kind=photo]`), the
//! descendant and child (`>`) combinators, and comma separated lists.

use std::fmt;

use cssparser::{
    BasicParseErrorKind, ParseError, ParseErrorKind, Parser, ParserInput, SourceLocation, Token,
};
use thiserror::Error;

use crate::NodeId;
use crate::tree::GridTree;

/// Selector parse failure
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectorError {
    #[error("Selector is empty")]
    Empty,

    #[error("Invalid selector `{selector}` at {line}:{column}: {reason}")]
    Invalid {
        selector: String,
        line: u32,
        column: u32,
        reason: String,
    },
}

impl SelectorError {
    fn invalid(selector: &str, err: ParseError<'_, SelectorParseErrorKind>) -> Self {
        let reason = match err.kind {
            ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
                format!("unexpected token {token:?}")
            }
            ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
                "unexpected end of input".to_string()
            }
            ParseErrorKind::Basic(other) => format!("{other:?}"),
            ParseErrorKind::Custom(kind) => kind.to_string(),
        };
        Self::Invalid {
            selector: selector.to_string(),
            line: err.location.line,
            column: err.location.column,
            reason,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectorParseErrorKind {
    MisplacedTypeSelector,
    DanglingCombinator,
    EmptySelector,
}

impl fmt::Display for SelectorParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SelectorParseErrorKind::MisplacedTypeSelector => {
                "type selector must come first in a compound selector"
            }
            SelectorParseErrorKind::DanglingCombinator => "combinator without a selector",
            SelectorParseErrorKind::EmptySelector => "empty selector in list",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq)]
struct AttributeSelector {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct CompoundSelector {
    universal: bool,
    local_name: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeSelector>,
}

impl CompoundSelector {
    fn is_empty(&self) -> bool {
        !self.universal
            && self.local_name.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attributes.is_empty()
    }

    fn matches<T: GridTree + ?Sized>(&self, tree: &T, node_id: NodeId) -> bool {
        let Some(local_name) = tree.local_name(node_id) else {
            return false;
        };
        if self.local_name.as_deref().is_some_and(|name| name != local_name) {
            return false;
        }
        if let Some(id) = &self.id {
            if tree.attr(node_id, "id") != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|class| tree.has_class(node_id, class))
            && self.attributes.iter().all(|attr| {
                match (tree.attr(node_id, &attr.name), &attr.value) {
                    (Some(actual), Some(expected)) => actual == expected,
                    (Some(_), None) => true,
                    (None, _) => false,
                }
            })
    }
}

/// Compound selectors joined by combinators. `combinators[i]` sits between
/// `compounds[i]` and `compounds[i + 1]`.
#[derive(Debug, Clone, PartialEq, Default)]
struct ComplexSelector {
    compounds: Vec<CompoundSelector>,
    combinators: Vec<Combinator>,
}

impl ComplexSelector {
    fn matches<T: GridTree + ?Sized>(&self, tree: &T, node_id: NodeId) -> bool {
        match self.compounds.len() {
            0 => false,
            len => self.matches_from(tree, len - 1, node_id),
        }
    }

    // Right-to-left with backtracking over descendant combinators
    fn matches_from<T: GridTree + ?Sized>(&self, tree: &T, index: usize, node_id: NodeId) -> bool {
        if !self.compounds[index].matches(tree, node_id) {
            return false;
        }
        if index == 0 {
            return true;
        }
        match self.combinators[index - 1] {
            Combinator::Child => tree
                .parent_node(node_id)
                .is_some_and(|parent| self.matches_from(tree, index - 1, parent)),
            Combinator::Descendant => {
                let mut ancestor = tree.parent_node(node_id);
                while let Some(candidate) = ancestor {
                    if self.matches_from(tree, index - 1, candidate) {
                        return true;
                    }
                    ancestor = tree.parent_node(candidate);
                }
                false
            }
        }
    }
}

/// A parsed selector list
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    source: String,
    alternatives: Vec<ComplexSelector>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        if source.trim().is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut input = ParserInput::new(source);
        let mut parser = Parser::new(&mut input);
        let alternatives = parser
            .parse_entirely(|parser| parser.parse_comma_separated(parse_complex_selector))
            .map_err(|err| SelectorError::invalid(source, err))?;

        Ok(Self {
            source: source.to_string(),
            alternatives,
        })
    }

    /// Selector matching elements carrying `class`, built without parsing
    pub fn class(class: &str) -> Self {
        Self {
            source: format!(".{class}"),
            alternatives: vec![ComplexSelector {
                compounds: vec![CompoundSelector {
                    classes: vec![class.to_string()],
                    ..Default::default()
                }],
                combinators: Vec::new(),
            }],
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn matches<T: GridTree + ?Sized>(&self, tree: &T, node_id: NodeId) -> bool {
        self.alternatives
            .iter()
            .any(|complex| complex.matches(tree, node_id))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

type SelectorParseResult<'i, T> = Result<T, ParseError<'i, SelectorParseErrorKind>>;

fn parse_complex_selector<'i, 't>(
    parser: &mut Parser<'i, 't>,
) -> SelectorParseResult<'i, ComplexSelector> {
    let mut complex = ComplexSelector::default();
    let mut current = CompoundSelector::default();
    let mut pending: Option<Combinator> = None;

    loop {
        let location = parser.current_source_location();
        let token = match parser.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        match token {
            Token::WhiteSpace(_) => {
                if !current.is_empty() {
                    complex.compounds.push(std::mem::take(&mut current));
                    pending = Some(Combinator::Descendant);
                }
            }
            Token::Delim('>') => {
                if !current.is_empty() {
                    complex.compounds.push(std::mem::take(&mut current));
                }
                if complex.compounds.is_empty() {
                    return Err(
                        location.new_custom_error(SelectorParseErrorKind::DanglingCombinator)
                    );
                }
                pending = Some(Combinator::Child);
            }
            token => {
                if current.is_empty() {
                    if let Some(combinator) = pending.take() {
                        complex.combinators.push(combinator);
                    }
                }
                parse_simple_selector(parser, location, token, &mut current)?;
            }
        }
    }

    if !current.is_empty() {
        complex.compounds.push(current);
    } else if pending == Some(Combinator::Child) {
        return Err(parser.new_custom_error(SelectorParseErrorKind::DanglingCombinator));
    }

    if complex.compounds.is_empty() {
        return Err(parser.new_custom_error(SelectorParseErrorKind::EmptySelector));
    }

    Ok(complex)
}

fn parse_simple_selector<'i, 't>(
    parser: &mut Parser<'i, 't>,
    location: SourceLocation,
    token: Token<'i>,
    current: &mut CompoundSelector,
) -> SelectorParseResult<'i, ()> {
    match token {
        Token::Ident(name) => {
            if !current.is_empty() {
                return Err(
                    location.new_custom_error(SelectorParseErrorKind::MisplacedTypeSelector)
                );
            }
            current.local_name = Some(name.to_ascii_lowercase());
        }
        Token::Delim('*') => {
            if !current.is_empty() {
                return Err(
                    location.new_custom_error(SelectorParseErrorKind::MisplacedTypeSelector)
                );
            }
            current.universal = true;
        }
        Token::Delim('.') => {
            let class_location = parser.current_source_location();
            match parser.next_including_whitespace() {
                Ok(Token::Ident(class)) => current.classes.push(class.to_string()),
                Ok(other) => {
                    let other = other.clone();
                    return Err(class_location.new_unexpected_token_error(other));
                }
                Err(err) => return Err(err.into()),
            }
        }
        Token::IDHash(id) => current.id = Some(id.to_string()),
        Token::SquareBracketBlock => {
            let attribute = parser.parse_nested_block(parse_attribute_selector)?;
            current.attributes.push(attribute);
        }
        other => return Err(location.new_unexpected_token_error(other)),
    }
    Ok(())
}

fn parse_attribute_selector<'i, 't>(
    parser: &mut Parser<'i, 't>,
) -> SelectorParseResult<'i, AttributeSelector> {
    let name = parser.expect_ident()?.to_ascii_lowercase();
    if parser.is_exhausted() {
        return Ok(AttributeSelector { name, value: None });
    }
    parser.expect_delim('=')?;
    let value = parser.expect_ident_or_string()?.to_string();
    Ok(AttributeSelector {
        name,
        value: Some(value),
    })
}
