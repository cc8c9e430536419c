//! Brick entities: the content units of an argument tree

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Primary key of a brick.
pub type BrickId = u64;

/// Closed set of brick types.
///
/// The declaration order is the `type` key used by both child orderings,
/// so a thesis sorts before pro, pro before contra and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrickType {
    Thesis,
    Pro,
    Contra,
    Question,
    Comment,
}

impl BrickType {
    pub const ALL: [BrickType; 5] = [
        BrickType::Thesis,
        BrickType::Pro,
        BrickType::Contra,
        BrickType::Question,
        BrickType::Comment,
    ];

    /// Glyph used in title tags.
    pub fn symbol(self) -> char {
        match self {
            BrickType::Thesis => '!',
            BrickType::Pro => '✓',
            BrickType::Contra => '⚡',
            BrickType::Question => '?',
            BrickType::Comment => '"',
        }
    }

    /// Rendering-template identifier.
    pub fn template(self) -> &'static str {
        match self {
            BrickType::Thesis => "sober/brick_thesis.html",
            BrickType::Pro => "sober/brick_pro.html",
            BrickType::Contra => "sober/brick_contra.html",
            BrickType::Question => "sober/brick_question.html",
            BrickType::Comment => "sober/brick_comment.html",
        }
    }

    /// Short code used when creating a brick of this type.
    pub fn code(self) -> &'static str {
        match self {
            BrickType::Thesis => "th",
            BrickType::Pro => "pa",
            BrickType::Contra => "ca",
            BrickType::Question => "qu",
            BrickType::Comment => "is",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or_else(|| DomainError::UnknownBrickType(code.to_string()))
    }

    pub fn name(self) -> &'static str {
        match self {
            BrickType::Thesis => "Thesis",
            BrickType::Pro => "Pro",
            BrickType::Contra => "Contra",
            BrickType::Question => "Question",
            BrickType::Comment => "Comment",
        }
    }

    /// Human readable type name for the given UI language ("en" or "de").
    ///
    /// Unknown languages fall back to English.
    pub fn long_name(self, language: &str) -> &'static str {
        match (language, self) {
            ("de", BrickType::Thesis) => "These",
            ("de", BrickType::Pro) => "Pro-Argument",
            ("de", BrickType::Contra) => "Contra-Argument",
            ("de", BrickType::Question) => "Frage",
            ("de", BrickType::Comment) => "Kommentar",
            (_, BrickType::Thesis) => "Thesis",
            (_, BrickType::Pro) => "Pro-Argument",
            (_, BrickType::Contra) => "Contra-Argument",
            (_, BrickType::Question) => "Question",
            (_, BrickType::Comment) => "Comment",
        }
    }
}

impl fmt::Display for BrickType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BrickType {
    type Err = DomainError;

    /// Accepts the lowercase type name or the short type code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.name().to_lowercase() == lowered)
            .map(Ok)
            .unwrap_or_else(|| Self::from_code(&lowered))
    }
}

/// A thesis or a reaction to another brick.
#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    pub id: BrickId,
    pub brick_type: BrickType,
    /// Tree-structural back reference; `None` only for theses.
    pub parent: Option<BrickId>,
    pub title: String,
    pub content: String,
    pub cached_avg_vote: f64,
    pub creation_datetime: DateTime<Utc>,
    pub update_datetime: DateTime<Utc>,
}

impl Brick {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl fmt::Display for Brick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}#{}: {}>", self.brick_type.name(), self.id, self.title)
    }
}

/// The two independent orderings over a set of sibling bricks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOrdering {
    /// type, creation time: fixes the typed sibling index
    Chronological,
    /// type, cached vote, update time: order of recursion and output
    Display,
}

impl ChildOrdering {
    pub fn compare(self, a: &Brick, b: &Brick) -> Ordering {
        let primary = match self {
            ChildOrdering::Chronological => a
                .brick_type
                .cmp(&b.brick_type)
                .then_with(|| a.creation_datetime.cmp(&b.creation_datetime)),
            ChildOrdering::Display => a
                .brick_type
                .cmp(&b.brick_type)
                .then_with(|| a.cached_avg_vote.total_cmp(&b.cached_avg_vote))
                .then_with(|| a.update_datetime.cmp(&b.update_datetime)),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}
