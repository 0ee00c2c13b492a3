//! Platform identification.

use std::fmt;

/// The platform a share request is dispatched on.
///
/// Only iOS and Android have a native share sheet; every other identifier is
/// carried through so the error can name it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Platform {
    /// iOS (`UIActivityViewController`).
    Ios,
    /// Android (`ACTION_SEND` chooser).
    Android,
    /// Any other platform, by its lowercase identifier.
    Other(String),
}

impl Platform {
    /// The platform this crate was compiled for.
    #[must_use]
    pub fn current() -> Self {
        Self::from(std::env::consts::OS)
    }

    /// The lowercase platform identifier (`"ios"`, `"android"`, ...).
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
            Self::Other(os) => os,
        }
    }
}

impl From<&str> for Platform {
    fn from(os: &str) -> Self {
        match os {
            "ios" => Self::Ios,
            "android" => Self::Android,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_round_trip() {
        assert_eq!(Platform::from("ios"), Platform::Ios);
        assert_eq!(Platform::from("android"), Platform::Android);
        assert_eq!(Platform::from("windows"), Platform::Other("windows".into()));
        assert_eq!(Platform::Other("linux".into()).to_string(), "linux");
    }

    #[test]
    fn current_matches_compile_target() {
        assert_eq!(Platform::current().as_str(), std::env::consts::OS);
    }
}
