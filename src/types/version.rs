use crate::types::error::BumpError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PRERELEASE_LABEL: &str = "alpha";

/// A parsed semantic version. Increments never mutate a value in place,
/// they build a successor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
    pub build: Option<String>,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    #[cfg(test)]
    pub fn with_prerelease(mut self, prerelease: impl Into<String>) -> Self {
        self.prerelease = Some(prerelease.into());
        self
    }

    #[cfg(test)]
    pub fn with_build(mut self, build: impl Into<String>) -> Self {
        self.build = Some(build.into());
        self
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre)?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

/// Which part of a version a bump advances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncrementKind {
    Major,
    Minor,
    Patch,
    Prerelease(String),
}

impl IncrementKind {
    pub fn prerelease() -> Self {
        IncrementKind::Prerelease(DEFAULT_PRERELEASE_LABEL.to_string())
    }
}

impl FromStr for IncrementKind {
    type Err = BumpError;

    /// Accepts `major`, `minor`, `patch` and `pre<label>` (bare `pre` means `prealpha`).
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let lowered = token.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "major" => Ok(IncrementKind::Major),
            "minor" => Ok(IncrementKind::Minor),
            "patch" => Ok(IncrementKind::Patch),
            other => match other.strip_prefix("pre") {
                Some("") => Ok(IncrementKind::prerelease()),
                Some(label)
                    if label
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.') =>
                {
                    Ok(IncrementKind::Prerelease(label.to_string()))
                }
                _ => Err(BumpError::UnsupportedKind(token.to_string())),
            },
        }
    }
}

impl fmt::Display for IncrementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncrementKind::Major => f.write_str("major"),
            IncrementKind::Minor => f.write_str("minor"),
            IncrementKind::Patch => f.write_str("patch"),
            IncrementKind::Prerelease(label) => write!(f, "pre{}", label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_appends_qualifiers_in_order() {
        let v = Version::new(1, 0, 0)
            .with_prerelease("rc.2")
            .with_build("sha.abc");
        assert_eq!(v.to_string(), "1.0.0-rc.2+sha.abc");
        assert_eq!(Version::new(0, 1, 0).to_string(), "0.1.0");
        assert_eq!(Version::new(3, 2, 1).with_build("b7").to_string(), "3.2.1+b7");
    }

    #[test]
    fn kind_tokens() {
        assert_eq!("major".parse::<IncrementKind>(), Ok(IncrementKind::Major));
        assert_eq!("Minor".parse::<IncrementKind>(), Ok(IncrementKind::Minor));
        assert_eq!("patch".parse::<IncrementKind>(), Ok(IncrementKind::Patch));
        assert_eq!(
            "prebeta".parse::<IncrementKind>(),
            Ok(IncrementKind::Prerelease("beta".into()))
        );
        assert_eq!(
            "prerc".parse::<IncrementKind>(),
            Ok(IncrementKind::Prerelease("rc".into()))
        );
        assert_eq!("pre".parse::<IncrementKind>(), Ok(IncrementKind::prerelease()));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert_eq!(
            "build".parse::<IncrementKind>(),
            Err(BumpError::UnsupportedKind("build".into()))
        );
        assert!(matches!(
            "pre beta".parse::<IncrementKind>(),
            Err(BumpError::UnsupportedKind(_))
        ));
        assert!("".parse::<IncrementKind>().is_err());
    }

    #[test]
    fn kind_display_round_trips_through_parse() {
        for kind in [
            IncrementKind::Major,
            IncrementKind::Minor,
            IncrementKind::Patch,
            IncrementKind::Prerelease("beta".into()),
        ] {
            assert_eq!(kind.to_string().parse::<IncrementKind>(), Ok(kind));
        }
    }
}
