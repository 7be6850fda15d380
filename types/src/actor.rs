//! Actor identity — a 20-byte address rendered as `0x`-prefixed hex.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SuretyError;

/// An opaque, globally unique identity for any principal that can invoke
/// operations (the administrator, airlines, candidates).
///
/// Serialized as its `0x`-prefixed lowercase hex form so that TOML configs and
/// JSON scripts stay human-editable.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActorId([u8; 20]);

impl ActorId {
    /// The standard prefix for rendered identities.
    pub const PREFIX: &'static str = "0x";

    /// Length of an identity in bytes.
    pub const LEN: usize = 20;

    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Parse an identity from `0x`-prefixed (or bare) hex.
    pub fn from_hex(s: &str) -> Result<Self, SuretyError> {
        let digits = s.strip_prefix(Self::PREFIX).unwrap_or(s);
        let bytes =
            hex::decode(digits).map_err(|e| SuretyError::InvalidActor(format!("{s}: {e}")))?;
        let bytes: [u8; 20] = bytes.try_into().map_err(|v: Vec<u8>| {
            SuretyError::InvalidActor(format!(
                "{s}: expected {} bytes, got {}",
                Self::LEN,
                v.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    /// Render as `0x`-prefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        format!("{}{}", Self::PREFIX, hex::encode(self.0))
    }
}

impl fmt::Debug for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActorId({}..)", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ActorId {
    type Err = SuretyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for ActorId {
    type Error = SuretyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<ActorId> for String {
    fn from(id: ActorId) -> Self {
        id.to_hex()
    }
}
