//! Recipient addressing for outbound kmails and gifts.

use std::str::FromStr;

use super::PlayerId;
use crate::error::{Error, Result};

/// Target of an outbound message.
///
/// The `towho` field accepts either a player name or a player number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Recipient {
    /// Player name, as typed in game.
    Name(String),
    /// Player number.
    Id(PlayerId),
}

impl Recipient {
    /// Parses a recipient, treating all-digit strings as player numbers.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or whitespace only.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidRecipient("recipient cannot be empty".into()));
        }
        if trimmed.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = trimmed.parse::<PlayerId>() {
                return Ok(Self::Id(id));
            }
        }
        Ok(Self::Name(trimmed.to_string()))
    }

    /// Value sent in the `towho` form field.
    #[must_use]
    pub fn to_field(&self) -> String {
        match self {
            Self::Name(name) => name.clone(),
            Self::Id(id) => id.to_string(),
        }
    }
}

impl std::fmt::Display for Recipient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Id(id) => write!(f, "#{id}"),
        }
    }
}

impl FromStr for Recipient {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<&str> for Recipient {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Recipient {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<PlayerId> for Recipient {
    fn from(id: PlayerId) -> Self {
        Self::Id(id)
    }
}
