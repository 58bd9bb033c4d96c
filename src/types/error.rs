use thiserror::Error;

/// Failures of the version core. Both carry the offending input for display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BumpError {
    #[error("Invalid version format: {0}. Expected format: X.Y.Z[-prerelease][+build]")]
    InvalidFormat(String),

    #[error("Invalid increment type: {0}. Expected 'major', 'minor', 'patch', or 'pre[type]'")]
    UnsupportedKind(String),
}
