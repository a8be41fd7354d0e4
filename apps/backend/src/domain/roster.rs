//! Registered cards of a round.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

/// Ordered, duplicate-free set of card ids registered for a round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardRoster(BTreeSet<String>);

/// Change between two rosters. `player_delta` drives the incremental
/// economics of a live round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterDelta {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub player_delta: i64,
}

impl CardRoster {
    /// Validated roster from caller input. Blank ids and duplicates are rejected.
    pub fn new<I, S>(ids: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for id in ids {
            let id = id.into().trim().to_string();
            if id.is_empty() {
                return Err(DomainError::validation(
                    ValidationKind::InvalidCardId,
                    "card id cannot be blank",
                ));
            }
            if !set.insert(id.clone()) {
                return Err(DomainError::validation(
                    ValidationKind::DuplicateCard,
                    format!("card {id} listed twice"),
                ));
            }
        }
        Ok(Self(set))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, card_id: &str) -> bool {
        self.0.contains(card_id)
    }

    pub fn insert(&mut self, card_id: impl Into<String>) -> bool {
        self.0.insert(card_id.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn delta_to(&self, next: &CardRoster) -> RosterDelta {
        RosterDelta {
            added: next.0.difference(&self.0).cloned().collect(),
            removed: self.0.difference(&next.0).cloned().collect(),
            player_delta: next.len() as i64 - self.len() as i64,
        }
    }
}
