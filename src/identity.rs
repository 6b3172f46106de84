//! Process identity for lock file stamping.
//!
//! [`Identity`] is the acquiring side: pid and hostname captured at
//! acquisition time, never cached across acquisitions (both can change
//! between process restarts sharing the same lock path).
//!
//! [`HolderIdentity`] is the diagnostic side: a best-effort parse of
//! whatever a current holder stamped into an existing lock file. Parsing
//! fails open to empty fields so that partial or garbled reads from a
//! mid-write file never abort the diagnostics path.

use regex::Regex;
use std::sync::LazyLock;

/// Recognized shapes of stamped content: an optional decimal pid,
/// optionally followed by `/` and a hostname, e.g. `123`, `myhostname`,
/// or `123/myhostname`.
static HOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\d+))?/?([A-Za-z0-9][A-Za-z0-9._-]*)?$").expect("invalid holder regex")
});

/// The identity of the process attempting an acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// OS process identifier.
    pub pid: u32,

    /// Network hostname of the acquiring machine.
    pub hostname: String,
}

impl Identity {
    /// Capture the current process identity.
    ///
    /// Hostname lookup failures degrade to `"unknown"` rather than failing
    /// the acquisition.
    pub fn current() -> Self {
        Self {
            pid: std::process::id(),
            hostname: hostname::get()
                .map(|h| h.to_string_lossy().into_owned())
                .unwrap_or_else(|_| "unknown".to_string()),
        }
    }
}

/// Identity fields recovered from an existing lock file's content.
///
/// All fields are optional: a holder may have stamped nothing (empty
/// template), only a pid, only a hostname, or content this crate does not
/// recognize.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolderIdentity {
    /// Decimal pid stamped by the holder, if present and parseable.
    pub pid: Option<u32>,

    /// Hostname stamped by the holder, if present.
    pub hostname: Option<String>,
}

impl HolderIdentity {
    /// Parse stamped content into identity fields, best-effort.
    ///
    /// Unrecognized or garbled content yields empty fields, never an error.
    pub fn parse(content: &str) -> Self {
        let Some(captures) = HOLDER_REGEX.captures(content.trim()) else {
            return Self::default();
        };

        Self {
            pid: captures.get(1).and_then(|m| m.as_str().parse().ok()),
            hostname: captures.get(2).map(|m| m.as_str().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_identity_reports_own_pid() {
        let identity = Identity::current();
        assert_eq!(identity.pid, std::process::id());
        assert!(!identity.hostname.is_empty());
    }

    #[test]
    fn parses_pid_only() {
        let holder = HolderIdentity::parse("123");
        assert_eq!(holder.pid, Some(123));
        assert_eq!(holder.hostname, None);
    }

    #[test]
    fn parses_hostname_only() {
        let holder = HolderIdentity::parse("myhostname");
        assert_eq!(holder.pid, None);
        assert_eq!(holder.hostname.as_deref(), Some("myhostname"));
    }

    #[test]
    fn parses_pid_and_hostname() {
        let holder = HolderIdentity::parse("123/myhostname");
        assert_eq!(holder.pid, Some(123));
        assert_eq!(holder.hostname.as_deref(), Some("myhostname"));
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let holder = HolderIdentity::parse(" 42/db-host.example.com \n");
        assert_eq!(holder.pid, Some(42));
        assert_eq!(holder.hostname.as_deref(), Some("db-host.example.com"));
    }

    #[test]
    fn empty_content_yields_empty_fields() {
        assert_eq!(HolderIdentity::parse(""), HolderIdentity::default());
        assert_eq!(HolderIdentity::parse("   "), HolderIdentity::default());
    }

    #[test]
    fn garbled_content_fails_open() {
        let holder = HolderIdentity::parse("%%\u{fffd}not a lock stamp%%");
        assert_eq!(holder, HolderIdentity::default());
    }

    #[test]
    fn overlong_pid_degrades_to_none() {
        // Digits that overflow u32 are dropped rather than erroring.
        let holder = HolderIdentity::parse("99999999999999999999/host");
        assert_eq!(holder.pid, None);
        assert_eq!(holder.hostname.as_deref(), Some("host"));
    }
}
