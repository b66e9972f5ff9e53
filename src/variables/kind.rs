//! Variable Kind Module
//!
//! The six primitive variable kinds the host understands, and the tagged keys
//! derived from them.

use std::fmt;

use serde::{Serialize, Serializer};

// == Variable Kind ==
/// A primitive host variable kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VariableKind {
    Short,
    Int,
    Decimal,
    Text,
    Boolean,
    Date,
}

impl VariableKind {
    /// All kinds, in tag order.
    pub const ALL: [VariableKind; 6] = [
        VariableKind::Short,
        VariableKind::Int,
        VariableKind::Decimal,
        VariableKind::Text,
        VariableKind::Boolean,
        VariableKind::Date,
    ];

    // == Tag ==
    /// Returns the tag used inside tagged keys.
    pub fn tag(self) -> &'static str {
        match self {
            VariableKind::Short => "SHORT",
            VariableKind::Int => "INT",
            VariableKind::Decimal => "DEC",
            VariableKind::Text => "TXT",
            VariableKind::Boolean => "BOOL",
            VariableKind::Date => "DATE",
        }
    }

    /// Looks a kind up by its tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// == Tagged Key ==
/// A logical variable name qualified by its kind, rendered as `{TAG:name}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaggedKey {
    kind: VariableKind,
    name: String,
}

impl TaggedKey {
    pub fn new(kind: VariableKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    /// The caller-supplied logical name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parses a rendered `{TAG:name}` key.
    ///
    /// Only the first `:` separates the tag, so names may contain colons.
    pub fn parse(raw: &str) -> Option<Self> {
        let inner = raw.strip_prefix('{')?.strip_suffix('}')?;
        let (tag, name) = inner.split_once(':')?;
        Some(Self::new(VariableKind::from_tag(tag)?, name))
    }
}

impl fmt::Display for TaggedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}:{}}}", self.kind.tag(), self.name)
    }
}

impl Serialize for TaggedKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
