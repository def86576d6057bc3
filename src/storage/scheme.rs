//! Path scheme detection
//!
//! Port that tells virtual, stream-based paths (`scheme://target`) apart
//! from plain file system paths, so storage knows when a path must be
//! resolved to a real location first.

/// Detects a virtual-path scheme prefix.
pub trait SchemeDetector {
    /// The scheme of the path, when it carries one.
    fn scheme(&self, path: &str) -> Option<String>;
}

/// Recognizes `scheme://` prefixes by syntax alone.
#[derive(Debug, Default)]
pub struct LocalSchemeDetector;

impl SchemeDetector for LocalSchemeDetector {
    fn scheme(&self, path: &str) -> Option<String> {
        let (scheme, _) = path.split_once("://")?;
        if !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        {
            Some(scheme.to_string())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_stream_schemes() {
        let detector = LocalSchemeDetector;
        assert_eq!(detector.scheme("public://config.yml"), Some("public".into()));
        assert_eq!(detector.scheme("s3://bucket/key.yml"), Some("s3".into()));
    }

    #[test]
    fn test_plain_paths_have_no_scheme() {
        let detector = LocalSchemeDetector;
        assert_eq!(detector.scheme("/etc/app/config.yml"), None);
        assert_eq!(detector.scheme("relative/path.yml"), None);
        assert_eq!(detector.scheme("://missing.yml"), None);
    }
}
