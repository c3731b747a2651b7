//! Occupant addresses.
//!
//! Participants of a multi-user room are identified by addresses of the form
//! `room@service/nickname`. Parsing and normalisation are delegated to the
//! [`jid`] crate; this module only wraps the result so the rest of the
//! workspace does not depend on a particular JID library version.

use std::fmt;
use std::str::FromStr;

use jid::Jid;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors produced while resolving an address.
#[derive(Debug, Error)]
pub enum AddressError {
    /// The text is not a valid JID.
    #[error("invalid address {value:?}: {source}")]
    Invalid {
        value: String,
        #[source]
        source: jid::Error,
    },
}

/// An XMPP address, usually a MUC occupant (`room@service/nickname`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address(Jid);

impl Address {
    /// Parses an address from its textual form.
    ///
    /// # Example
    ///
    /// ```rust
    /// use veazzy_core::Address;
    ///
    /// let alice = Address::parse("room1@conf.example/alice").unwrap();
    /// assert_eq!(alice.to_string(), "room1@conf.example/alice");
    /// ```
    pub fn parse(value: &str) -> Result<Self, AddressError> {
        value
            .parse::<Jid>()
            .map(Self)
            .map_err(|source| AddressError::Invalid {
                value: value.to_string(),
                source,
            })
    }

    /// Returns the underlying JID.
    pub fn as_jid(&self) -> &Jid {
        &self.0
    }

    /// Unwraps the underlying JID.
    pub fn into_jid(self) -> Jid {
        self.0
    }
}

impl From<Jid> for Address {
    fn from(jid: Jid) -> Self {
        Self(jid)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}
