//! Credential wrapper
//!
//! Application keys and session tokens travel through logs, `Debug` output of
//! config structs and error chains. Wrapping them in `Secret` keeps them out of
//! all three and wipes the backing memory on drop.

use std::fmt;

use serde::{Deserialize, Deserializer};
use zeroize::Zeroize;

/// Sensitive value, redacted in Debug/Display and zeroized on drop.
pub struct Secret<T: Zeroize>(T);

impl<T: Zeroize> Secret<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the inner value. Callers must not log it.
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl<T: Zeroize> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([REDACTED])")
    }
}

impl<T: Zeroize> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<T: Zeroize> Drop for Secret<T> {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl<T: Zeroize + Clone> Clone for Secret<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

/// Lets config structs hold credentials directly.
impl<'de, T: Zeroize + Deserialize<'de>> Deserialize<'de> for Secret<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_and_display_hide_the_token() {
        let token = Secret::new(String::from("session-abc123"));
        let debug = format!("{token:?}");
        let display = format!("{token}");
        assert_eq!(debug, "Secret([REDACTED])");
        assert_eq!(display, "[REDACTED]");
        assert!(!debug.contains("abc123"));
    }

    #[test]
    fn expose_returns_inner_value() {
        let app_key = Secret::new(String::from("app-key-1"));
        assert_eq!(app_key.expose(), "app-key-1");
        assert_eq!(app_key.clone().expose(), "app-key-1");
    }

    #[test]
    fn deserializes_from_toml_and_stays_redacted() {
        #[derive(Debug, Deserialize)]
        struct Session {
            app_key: Secret<String>,
        }
        let session: Session = toml::from_str(r#"app_key = "key-from-file""#).unwrap();
        assert_eq!(session.app_key.expose(), "key-from-file");
        assert!(!format!("{session:?}").contains("key-from-file"));
    }
}
