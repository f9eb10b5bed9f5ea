use std::fmt;

use crate::error::{AutoscanError, Result};

/// Leading `major.minor` components of a server version string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ServerVersion {
    pub major: u64,
    pub minor: u64,
}

impl ServerVersion {
    /// Reads the first two dot-separated components. Non-numeric components
    /// count as zero; fewer than two components yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split('.');
        let major = parts.next()?;
        let minor = parts.next()?;

        Some(Self {
            major: major.trim().parse().unwrap_or(0),
            minor: minor.trim().parse().unwrap_or(0),
        })
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Oldest server version a target will talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimumVersion(pub ServerVersion);

impl MinimumVersion {
    pub const fn new(major: u64, minor: u64) -> Self {
        Self(ServerVersion { major, minor })
    }

    pub fn supports(&self, raw: &str) -> bool {
        ServerVersion::parse(raw).is_some_and(|version| version >= self.0)
    }

    /// Rejects unsupported versions with a fatal error so callers stop
    /// retrying against the server.
    pub fn ensure_supported(&self, service: &str, raw: &str) -> Result<()> {
        if self.supports(raw) {
            return Ok(());
        }
        Err(AutoscanError::Fatal(format!(
            "{service} running unsupported version {raw} (requires {} or newer)",
            self.0
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLOOR: MinimumVersion = MinimumVersion::new(1, 20);

    #[test]
    fn versions_at_or_above_floor_are_supported() {
        for raw in ["2.0.0", "1.20.0", "1.32.5.7349-8f4248874", "10.0", "2.abc"] {
            assert!(FLOOR.supports(raw), "{raw} should be supported");
        }
    }

    #[test]
    fn versions_below_floor_are_rejected() {
        for raw in ["1.19.9", "1", "", "abc.def", "0.99.0", "1.x.0"] {
            assert!(!FLOOR.supports(raw), "{raw} should be rejected");
        }
    }

    #[test]
    fn non_numeric_components_parse_as_zero() {
        assert_eq!(
            ServerVersion::parse("abc.def"),
            Some(ServerVersion { major: 0, minor: 0 })
        );
        assert_eq!(
            ServerVersion::parse("3.beta"),
            Some(ServerVersion { major: 3, minor: 0 })
        );
        assert_eq!(ServerVersion::parse("1"), None);
    }

    #[test]
    fn rejection_is_fatal() {
        let err = FLOOR.ensure_supported("plex", "1.19.9").expect_err("rejected");
        assert!(err.is_fatal());
        assert!(!err.is_transport());
        assert!(err.to_string().contains("1.19.9"));

        FLOOR.ensure_supported("plex", "1.20.0").expect("supported");
    }
}
