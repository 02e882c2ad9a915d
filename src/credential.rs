//! The secret that authorises calls to the image API.

use std::fmt;

/// An API key held in memory for the session.
///
/// `Debug` is redacted so the key never ends up in logs.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw key. Surrounding whitespace is dropped.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into().trim().to_string())
    }

    /// True when no key was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw key, for building the authorization header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("Credential(<empty>)")
        } else {
            f.write_str("Credential(<redacted>)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_never_shows_key() {
        let key = Credential::new("sk-super-secret");
        assert_eq!(format!("{key:?}"), "Credential(<redacted>)");
        assert_eq!(key.expose(), "sk-super-secret");
    }

    #[test]
    fn blank_key_is_empty() {
        assert!(Credential::new("  ").is_empty());
        assert!(Credential::default().is_empty());
        assert_eq!(format!("{:?}", Credential::default()), "Credential(<empty>)");
    }
}
