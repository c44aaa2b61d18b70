//! Identifier namespaces for remote catalogs.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{AnifetchError, Result};

/// Name of an external identifier scheme (e.g. `anilist`, `mal`).
///
/// Namespaces are interpolated into request URIs as `<namespace>_id=<id>`,
/// so only `[a-z0-9_]+` is accepted. The restricted alphabet also excludes
/// `:`, which keeps [`CacheKey`](super::CacheKey) rendering injective.
///
/// ```rust
/// # use anifetch::Namespace;
/// let ns: Namespace = "anilist".parse().unwrap();
/// assert_eq!(ns, Namespace::ANILIST);
/// assert!("ani list".parse::<Namespace>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Namespace(Cow<'static, str>);

impl Namespace {
    pub const ANILIST: Namespace = Namespace(Cow::Borrowed("anilist"));
    pub const MAL: Namespace = Namespace(Cow::Borrowed("mal"));
    pub const KITSU: Namespace = Namespace(Cow::Borrowed("kitsu"));
    pub const ANIDB: Namespace = Namespace(Cow::Borrowed("anidb"));
    pub const ANISEARCH: Namespace = Namespace(Cow::Borrowed("anisearch"));
    pub const ANIMEPLANET: Namespace = Namespace(Cow::Borrowed("animeplanet"));
    pub const NOTIFYMOE: Namespace = Namespace(Cow::Borrowed("notifymoe"));
    pub const LIVECHART: Namespace = Namespace(Cow::Borrowed("livechart"));
    pub const THETVDB: Namespace = Namespace(Cow::Borrowed("thetvdb"));
    pub const THEMOVIEDB: Namespace = Namespace(Cow::Borrowed("themoviedb"));
    pub const IMDB: Namespace = Namespace(Cow::Borrowed("imdb"));

    /// Validate and wrap a namespace string.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(AnifetchError::InvalidInput(
                "namespace must not be empty".to_string(),
            ));
        }
        if let Some(c) = name
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_'))
        {
            return Err(AnifetchError::InvalidInput(format!(
                "namespace '{name}' contains invalid character {c:?}"
            )));
        }
        Ok(Self(Cow::Owned(name)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Namespace {
    type Err = AnifetchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Namespace {
    type Error = AnifetchError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Namespace> for String {
    fn from(ns: Namespace) -> Self {
        ns.0.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_namespaces() {
        for name in ["anilist", "mal", "thetvdb", "anime_planet2"] {
            assert!(Namespace::new(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_empty() {
        assert!(Namespace::new("").is_err());
    }

    #[test]
    fn rejects_uri_metacharacters() {
        for name in ["mal&x=1", "a/b", "a:b", "a b", "AniList", "a=b", "a?"] {
            assert!(Namespace::new(name).is_err(), "{name} should be rejected");
        }
    }

    #[test]
    fn constant_equals_parsed() {
        assert_eq!(Namespace::new("mal").unwrap(), Namespace::MAL);
    }

    #[test]
    fn serde_validates() {
        let ns: Namespace = serde_json::from_str("\"kitsu\"").unwrap();
        assert_eq!(ns, Namespace::KITSU);
        assert!(serde_json::from_str::<Namespace>("\"k:itsu\"").is_err());
        assert_eq!(serde_json::to_string(&Namespace::ANIDB).unwrap(), "\"anidb\"");
    }
}
