use serde::{Deserialize, Serialize};
use std::fmt;
use crate::CoreError;

pub const DEFAULT_PROFILE: &str = "default";
const MAX_PROFILE_LEN: usize = 64;

/// Identifier of the profile that owns tickets, notifications and membership.
///
/// There is no authentication; the id only scopes persisted keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfileId(String);

impl ProfileId {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if raw.is_empty() || raw.len() > MAX_PROFILE_LEN {
            return Err(CoreError::ValidationError(format!(
                "profile id must be 1-{} characters",
                MAX_PROFILE_LEN
            )));
        }

        if !raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(CoreError::ValidationError(format!(
                "profile id '{}' contains invalid characters",
                raw
            )));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ProfileId {
    fn default() -> Self {
        Self(DEFAULT_PROFILE.to_string())
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProfileId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProfileId> for String {
    fn from(id: ProfileId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_id_validation() {
        assert!(ProfileId::parse("driver-42_a").is_ok());
        assert!(ProfileId::parse("").is_err());
        assert!(ProfileId::parse("has space").is_err());
        assert!(ProfileId::parse("profile:injection").is_err());
        assert!(ProfileId::parse(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_profile_id_serde() {
        let id: ProfileId = serde_json::from_str("\"alice\"").unwrap();
        assert_eq!(id.as_str(), "alice");

        let bad: Result<ProfileId, _> = serde_json::from_str("\"a b\"");
        assert!(bad.is_err());
    }
}
