//! CSS selector parsing and matching for the in-memory tree.
//!
//! Supports type, universal, id, class and attribute selectors
//! (`[a]`, `=`, `*=`, `^=`, `$=`, `~=`), the `:root`, `:disabled` and
//! `:first-child` pseudo-classes, descendant and child combinators and
//! comma lists. Interaction pseudo-classes and pseudo-elements parse but
//! never match a static node.

use chatskin_common::DomError;
use chatskin_config::selectors::split_selector_list;

use super::{MemoryDocument, NodeId};

/// `(ids, classes + attributes + pseudo-classes, types + pseudo-elements)`
pub type Specificity = (u32, u32, u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<ComplexSelector>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ComplexSelector {
    compounds: Vec<Compound>,
    /// `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`.
    combinators: Vec<Combinator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    ids: Vec<String>,
    classes: Vec<String>,
    attrs: Vec<AttrSelector>,
    pseudos: Vec<Pseudo>,
    pseudo_element: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrSelector {
    name: String,
    op: AttrOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals(String),
    Contains(String),
    Prefix(String),
    Suffix(String),
    Includes(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pseudo {
    Root,
    Disabled,
    FirstChild,
    /// State that a static tree is never in (`:hover`, `:focus`, ...).
    Never,
}

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, DomError> {
        let invalid = |reason: &str| DomError::InvalidSelector {
            selector: input.to_string(),
            reason: reason.to_string(),
        };

        let parts = split_selector_list(input);
        if parts.is_empty() {
            return Err(invalid("empty selector"));
        }

        let selectors = parts
            .into_iter()
            .map(|part| parse_complex(part).map_err(|reason| invalid(&reason)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { selectors })
    }

    /// Whether any alternative matches `node`.
    pub fn matches(&self, doc: &MemoryDocument, node: NodeId) -> bool {
        self.matching_specificity(doc, node).is_some()
    }

    /// Highest specificity among the alternatives that match `node`.
    pub fn matching_specificity(&self, doc: &MemoryDocument, node: NodeId) -> Option<Specificity> {
        self.selectors
            .iter()
            .filter(|s| s.matches(doc, node))
            .map(ComplexSelector::specificity)
            .max()
    }
}

impl ComplexSelector {
    fn specificity(&self) -> Specificity {
        self.compounds.iter().fold((0, 0, 0), |(a, b, c), compound| {
            let (x, y, z) = compound.specificity();
            (a + x, b + y, c + z)
        })
    }

    fn matches(&self, doc: &MemoryDocument, node: NodeId) -> bool {
        self.matches_at(doc, node, self.compounds.len() - 1)
    }

    fn matches_at(&self, doc: &MemoryDocument, node: NodeId, index: usize) -> bool {
        if !self.compounds[index].matches(doc, node) {
            return false;
        }
        if index == 0 {
            return true;
        }

        match self.combinators[index - 1] {
            Combinator::Child => doc
                .parent(node)
                .is_some_and(|parent| self.matches_at(doc, parent, index - 1)),
            Combinator::Descendant => {
                let mut ancestor = doc.parent(node);
                while let Some(current) = ancestor {
                    if self.matches_at(doc, current, index - 1) {
                        return true;
                    }
                    ancestor = doc.parent(current);
                }
                false
            }
        }
    }
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none()
            && self.ids.is_empty()
            && self.classes.is_empty()
            && self.attrs.is_empty()
            && self.pseudos.is_empty()
            && !self.pseudo_element
    }

    fn specificity(&self) -> Specificity {
        let a = self.ids.len() as u32;
        let b = (self.classes.len() + self.attrs.len() + self.pseudos.len()) as u32;
        let c = u32::from(self.tag.as_deref().is_some_and(|t| t != "*"))
            + u32::from(self.pseudo_element);
        (a, b, c)
    }

    fn matches(&self, doc: &MemoryDocument, node: NodeId) -> bool {
        let Some(tag) = doc.tag(node) else {
            return false;
        };

        if self.pseudo_element {
            return false;
        }
        if let Some(want) = &self.tag {
            if want != "*" && !want.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if !self.ids.iter().all(|id| doc.attribute(node, "id") == Some(id.as_str())) {
            return false;
        }
        if !self.classes.iter().all(|class| doc.has_class(node, class)) {
            return false;
        }
        if !self.attrs.iter().all(|attr| attr.matches(doc.attribute(node, &attr.name))) {
            return false;
        }
        self.pseudos.iter().all(|pseudo| match pseudo {
            Pseudo::Root => node == doc.root(),
            Pseudo::Disabled => doc.attribute(node, "disabled").is_some(),
            Pseudo::FirstChild => doc.is_first_element_child(node),
            Pseudo::Never => false,
        })
    }
}

impl AttrSelector {
    fn matches(&self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return false;
        };
        match &self.op {
            AttrOp::Exists => true,
            AttrOp::Equals(want) => value == want,
            AttrOp::Contains(want) => !want.is_empty() && value.contains(want.as_str()),
            AttrOp::Prefix(want) => !want.is_empty() && value.starts_with(want.as_str()),
            AttrOp::Suffix(want) => !want.is_empty() && value.ends_with(want.as_str()),
            AttrOp::Includes(want) => value.split_whitespace().any(|word| word == want),
        }
    }
}

// =============================================================================
// PARSING
// =============================================================================

struct Cursor<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        self.chars.next()
    }

    fn skip_whitespace(&mut self) -> bool {
        let mut skipped = false;
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
            skipped = true;
        }
        skipped
    }

    fn ident(&mut self) -> String {
        let mut out = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '-' || ch == '_' {
                out.push(ch);
                self.bump();
            } else {
                break;
            }
        }
        out
    }

    fn expect_ident(&mut self, what: &str) -> Result<String, String> {
        let ident = self.ident();
        if ident.is_empty() {
            Err(format!("expected {what}"))
        } else {
            Ok(ident)
        }
    }
}

fn parse_complex(input: &str) -> Result<ComplexSelector, String> {
    let mut cursor = Cursor::new(input.trim());
    let mut compounds = Vec::new();
    let mut combinators = Vec::new();

    loop {
        let compound = parse_compound(&mut cursor)?;
        if compound.is_empty() {
            return Err("expected a simple selector".into());
        }
        compounds.push(compound);

        let had_space = cursor.skip_whitespace();
        match cursor.peek() {
            None => break,
            Some('>') => {
                cursor.bump();
                cursor.skip_whitespace();
                combinators.push(Combinator::Child);
            }
            Some('+') | Some('~') => return Err("sibling combinators are not supported".into()),
            Some(_) if had_space => combinators.push(Combinator::Descendant),
            Some(ch) => return Err(format!("unexpected '{ch}'")),
        }
    }

    Ok(ComplexSelector {
        compounds,
        combinators,
    })
}

fn parse_compound(cursor: &mut Cursor<'_>) -> Result<Compound, String> {
    let mut compound = Compound::default();

    match cursor.peek() {
        Some('*') => {
            cursor.bump();
            compound.tag = Some("*".into());
        }
        Some(ch) if ch.is_alphabetic() => {
            compound.tag = Some(cursor.ident().to_ascii_lowercase());
        }
        _ => {}
    }

    while let Some(ch) = cursor.peek() {
        match ch {
            '#' => {
                cursor.bump();
                compound.ids.push(cursor.expect_ident("an id")?);
            }
            '.' => {
                cursor.bump();
                compound.classes.push(cursor.expect_ident("a class name")?);
            }
            '[' => {
                cursor.bump();
                compound.attrs.push(parse_attribute(cursor)?);
            }
            ':' => {
                cursor.bump();
                if cursor.peek() == Some(':') {
                    cursor.bump();
                    cursor.expect_ident("a pseudo-element")?;
                    compound.pseudo_element = true;
                } else {
                    let name = cursor.expect_ident("a pseudo-class")?.to_ascii_lowercase();
                    if cursor.peek() == Some('(') {
                        return Err(format!("functional pseudo-class :{name}() is not supported"));
                    }
                    compound.pseudos.push(match name.as_str() {
                        "root" => Pseudo::Root,
                        "disabled" => Pseudo::Disabled,
                        "first-child" => Pseudo::FirstChild,
                        _ => Pseudo::Never,
                    });
                }
            }
            _ => break,
        }
    }

    Ok(compound)
}

fn parse_attribute(cursor: &mut Cursor<'_>) -> Result<AttrSelector, String> {
    cursor.skip_whitespace();
    let name = cursor.expect_ident("an attribute name")?.to_ascii_lowercase();
    cursor.skip_whitespace();

    let op = match cursor.bump() {
        Some(']') => return Ok(AttrSelector { name, op: AttrOp::Exists }),
        Some('=') => "=",
        Some(c @ ('*' | '^' | '$' | '~')) => {
            if cursor.bump() != Some('=') {
                return Err(format!("expected '=' after '{c}'"));
            }
            match c {
                '*' => "*=",
                '^' => "^=",
                '$' => "$=",
                _ => "~=",
            }
        }
        Some(ch) => return Err(format!("unexpected '{ch}' in attribute selector")),
        None => return Err("unterminated attribute selector".into()),
    };

    cursor.skip_whitespace();
    let value = match cursor.peek() {
        Some(q @ ('"' | '\'')) => {
            cursor.bump();
            let mut value = String::new();
            loop {
                match cursor.bump() {
                    Some(ch) if ch == q => break,
                    Some(ch) => value.push(ch),
                    None => return Err("unterminated string".into()),
                }
            }
            value
        }
        _ => cursor.expect_ident("an attribute value")?,
    };

    cursor.skip_whitespace();
    if cursor.bump() != Some(']') {
        return Err("expected ']'".into());
    }

    let op = match op {
        "=" => AttrOp::Equals(value),
        "*=" => AttrOp::Contains(value),
        "^=" => AttrOp::Prefix(value),
        "$=" => AttrOp::Suffix(value),
        _ => AttrOp::Includes(value),
    };
    Ok(AttrSelector { name, op })
}
