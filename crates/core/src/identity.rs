//! The actor behind a mutation.

use serde::{Deserialize, Serialize};

/// Identity recorded as `owner_id` / `changed_by` when nobody is signed in.
pub const ANONYMOUS: &str = "anonymous";

/// Opaque identifier of whoever performs a mutation.
///
/// Every mutating operation takes one explicitly; nothing reads an ambient
/// request user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Wrap an actor id. Blank ids collapse to [`Identity::anonymous`].
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        if id.trim().is_empty() {
            Self::anonymous()
        } else {
            Self(id)
        }
    }

    pub fn anonymous() -> Self {
        Self(ANONYMOUS.to_string())
    }

    pub fn is_anonymous(&self) -> bool {
        self.0 == ANONYMOUS
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_id_is_anonymous() {
        assert!(Identity::new("  ").is_anonymous());
        assert_eq!(Identity::new("").as_str(), "anonymous");
    }

    #[test]
    fn real_id_is_kept() {
        let who = Identity::new("42");
        assert!(!who.is_anonymous());
        assert_eq!(who.to_string(), "42");
    }
}
