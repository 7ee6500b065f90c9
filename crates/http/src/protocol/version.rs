//! HTTP version comparison.
//!
//! Versions are kept as the raw token parsed off the wire (e.g. `"1.1"`)
//! rather than converted into `http::Version`. The wire format never carries
//! anything other than `"1.0"` or `"1.1"` in practice, and the keep-alive and
//! body-framing decisions in this crate only ever need to ask "is this at
//! least 1.1", which a plain string compare answers exactly the way the
//! original implementation did it.

/// Returns true if `version` is lexically `>= floor` (e.g. `at_least("1.1", "1.1")`).
pub fn at_least(version: &str, floor: &str) -> bool {
    version >= floor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compares_lexically() {
        assert!(at_least("1.1", "1.1"));
        assert!(!at_least("1.0", "1.1"));
        assert!(at_least("1.2", "1.1"));
    }
}
