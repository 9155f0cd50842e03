//! Identity service endpoints and session constants

use std::time::Duration;

/// Identity host template; the top-level domain depends on the account's
/// jurisdiction.
const IDENTITY_HOST: &str = "https://identitysso.betfair";

/// Idle time after which a session is treated as stale.
///
/// The exchange drops idle sessions after 4 hours. 12000 seconds leaves a
/// margin of roughly 40 minutes for one more keep-alive.
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(12_000);

/// Default request timeout for the shared connection pool.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Top-level domain for a locale. Unknown or absent locales use `.com`.
pub fn locale_tld(locale: Option<&str>) -> &'static str {
    match locale.map(str::to_ascii_lowercase).as_deref() {
        Some("australia") => ".com.au",
        Some("spain") => ".es",
        Some("italy") => ".it",
        Some("romania") => ".ro",
        Some("sweden") => ".se",
        _ => ".com",
    }
}

/// Identity base URI for a locale, always ending in `/`.
pub fn identity_uri_for_locale(locale: Option<&str>) -> String {
    format!("{IDENTITY_HOST}{}/api/", locale_tld(locale))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_locale_uses_dot_com() {
        assert_eq!(
            identity_uri_for_locale(None),
            "https://identitysso.betfair.com/api/"
        );
    }

    #[test]
    fn known_locales_map_to_their_tld() {
        assert_eq!(
            identity_uri_for_locale(Some("italy")),
            "https://identitysso.betfair.it/api/"
        );
        assert_eq!(locale_tld(Some("spain")), ".es");
        assert_eq!(locale_tld(Some("australia")), ".com.au");
        assert_eq!(locale_tld(Some("romania")), ".ro");
        assert_eq!(locale_tld(Some("Sweden")), ".se");
    }

    #[test]
    fn unknown_locale_falls_back() {
        assert_eq!(locale_tld(Some("atlantis")), ".com");
    }
}
