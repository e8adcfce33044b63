use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A reference into the table: what is picked up, or where it should go.
///
/// The serialized form doubles as the drag payload:
/// `{"type":"tableau","index":3,"cardIndex":2}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Selection {
    Waste,
    Foundation {
        index: usize,
        #[serde(rename = "cardIndex", default, skip_serializing_if = "Option::is_none")]
        card_index: Option<usize>,
    },
    Tableau {
        index: usize,
        #[serde(rename = "cardIndex", default, skip_serializing_if = "Option::is_none")]
        card_index: Option<usize>,
    },
}

impl Selection {
    pub const fn foundation(index: usize) -> Self {
        Selection::Foundation {
            index,
            card_index: None,
        }
    }

    pub const fn tableau(index: usize) -> Self {
        Selection::Tableau {
            index,
            card_index: None,
        }
    }

    pub const fn tableau_card(index: usize, card_index: usize) -> Self {
        Selection::Tableau {
            index,
            card_index: Some(card_index),
        }
    }

    /// Same pile, ignoring the card position.
    pub fn same_pile(&self, other: &Selection) -> bool {
        match (self, other) {
            (Selection::Waste, Selection::Waste) => true,
            (Selection::Foundation { index: a, .. }, Selection::Foundation { index: b, .. }) => {
                a == b
            }
            (Selection::Tableau { index: a, .. }, Selection::Tableau { index: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Waste => write!(f, "w"),
            Selection::Foundation { index, card_index }
            | Selection::Tableau { index, card_index } => {
                let prefix = if matches!(self, Selection::Foundation { .. }) {
                    'f'
                } else {
                    't'
                };
                write!(f, "{prefix}{index}")?;
                if let Some(card) = card_index {
                    write!(f, ":{card}")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSelectionError {
    #[error("empty selection")]
    Empty,
    #[error("unknown pile kind '{0}' (expected w, f or t)")]
    UnknownKind(char),
    #[error("missing pile index after '{0}'")]
    MissingIndex(char),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("the waste takes no index")]
    WasteIndex,
}

/// Terminal notation: `w`, `f0`..`f3`, `t0`..`t6`, optionally `t3:2` for a card position.
impl FromStr for Selection {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let kind = chars
            .next()
            .ok_or(ParseSelectionError::Empty)?
            .to_ascii_lowercase();
        let rest = chars.as_str();
        match kind {
            'w' if rest.is_empty() => Ok(Selection::Waste),
            'w' => Err(ParseSelectionError::WasteIndex),
            'f' | 't' => {
                if rest.is_empty() {
                    return Err(ParseSelectionError::MissingIndex(kind));
                }
                let (pile, card) = match rest.split_once(':') {
                    Some((pile, card)) => (pile, Some(parse_number(card)?)),
                    None => (rest, None),
                };
                let index = parse_number(pile)?;
                Ok(if kind == 'f' {
                    Selection::Foundation {
                        index,
                        card_index: card,
                    }
                } else {
                    Selection::Tableau {
                        index,
                        card_index: card,
                    }
                })
            }
            other => Err(ParseSelectionError::UnknownKind(other)),
        }
    }
}

fn parse_number(s: &str) -> Result<usize, ParseSelectionError> {
    s.parse()
        .map_err(|_| ParseSelectionError::InvalidNumber(s.to_string()))
}
