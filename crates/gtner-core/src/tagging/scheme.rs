//! # BILOU and BIO Tags
//!
//! Token-level tags for sequence labeling. A chunk tag is a one-letter prefix
//! and an entity label joined by `-` (`B-PER`, `L-ORG`); tokens outside any
//! entity carry `O`.
//!
//! BIO is derived from BILOU by the prefix table `L → I`, `U → B`.

use std::fmt;
use std::str::FromStr;

use crate::error::GtnerError;

/// Position of a token within an entity chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    Begin,
    Inside,
    Last,
    Unit,
}

impl Prefix {
    /// Get all prefixes in BILOU order.
    pub fn all() -> &'static [Prefix] {
        &[Prefix::Begin, Prefix::Inside, Prefix::Last, Prefix::Unit]
    }

    pub fn as_char(self) -> char {
        match self {
            Prefix::Begin => 'B',
            Prefix::Inside => 'I',
            Prefix::Last => 'L',
            Prefix::Unit => 'U',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'B' => Some(Prefix::Begin),
            'I' => Some(Prefix::Inside),
            'L' => Some(Prefix::Last),
            'U' => Some(Prefix::Unit),
            _ => None,
        }
    }

    /// Map a BILOU prefix onto the BIO prefix set.
    pub fn to_bio(self) -> Self {
        match self {
            Prefix::Last => Prefix::Inside,
            Prefix::Unit => Prefix::Begin,
            Prefix::Begin | Prefix::Inside => self,
        }
    }
}

/// Apply the BIO prefix table to a raw tag character. Characters that are not
/// a chunk prefix (`O`, anything else) are returned unchanged.
pub fn bio_char(c: char) -> char {
    Prefix::from_char(c).map_or(c, |p| p.to_bio().as_char())
}

/// A token tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Outside,
    Chunk(Prefix, String),
}

impl Tag {
    pub fn chunk(prefix: Prefix, label: impl Into<String>) -> Self {
        Tag::Chunk(prefix, label.into())
    }

    pub fn prefix(&self) -> Option<Prefix> {
        match self {
            Tag::Outside => None,
            Tag::Chunk(prefix, _) => Some(*prefix),
        }
    }

    /// Convert a BILOU tag to BIO. Already-BIO tags are unchanged.
    pub fn to_bio(&self) -> Tag {
        match self {
            Tag::Outside => Tag::Outside,
            Tag::Chunk(prefix, label) => Tag::Chunk(prefix.to_bio(), label.clone()),
        }
    }

    /// Render this tag under `scheme`.
    pub fn encode(&self, scheme: TagScheme) -> Tag {
        match scheme {
            TagScheme::Bilou => self.clone(),
            TagScheme::Bio => self.to_bio(),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Outside => write!(f, "O"),
            Tag::Chunk(prefix, label) => write!(f, "{}-{}", prefix.as_char(), label),
        }
    }
}

/// Tagging scheme of the emitted tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TagScheme {
    #[default]
    Bilou,
    Bio,
}

impl TagScheme {
    /// Canonical form of a codec name: lower-cased, letters sorted. This makes
    /// `BILOU`, `biluo` and `IOB`, `bio` equivalent.
    pub fn normalize(codec: &str) -> String {
        let mut letters: Vec<char> = codec.to_lowercase().chars().collect();
        letters.sort_unstable();
        letters.into_iter().collect()
    }
}

impl FromStr for TagScheme {
    type Err = GtnerError;

    fn from_str(codec: &str) -> Result<Self, Self::Err> {
        match Self::normalize(codec).as_str() {
            "bilou" => Ok(TagScheme::Bilou),
            "bio" => Ok(TagScheme::Bio),
            _ => Err(GtnerError::UnsupportedCodec(codec.to_string())),
        }
    }
}

impl fmt::Display for TagScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagScheme::Bilou => write!(f, "bilou"),
            TagScheme::Bio => write!(f, "bio"),
        }
    }
}
