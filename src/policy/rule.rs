//! Version threshold rule used by the policy resolver.

use std::cmp::Ordering;

/// Enables caching for client versions strictly greater than a threshold.
///
/// Dotted numeric versions (`1.10`, `2.0.1`) compare component-wise with
/// missing components treated as zero. Anything else compares as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRule {
    min_version: String,
}

impl VersionRule {
    pub fn new(min_version: impl Into<String>) -> Self {
        Self {
            min_version: min_version.into(),
        }
    }

    pub fn min_version(&self) -> &str {
        &self.min_version
    }

    pub fn use_cache(&self, version: &str) -> bool {
        compare_versions(version.trim(), self.min_version.trim()) == Ordering::Greater
    }
}

impl Default for VersionRule {
    fn default() -> Self {
        Self::new("1.0")
    }
}

fn numeric_parts(version: &str) -> Option<Vec<u64>> {
    version.split('.').map(|part| part.parse().ok()).collect()
}

/// Component-wise for dotted numbers, lexicographic otherwise.
fn compare_versions(a: &str, b: &str) -> Ordering {
    match (numeric_parts(a), numeric_parts(b)) {
        (Some(left), Some(right)) => {
            let len = left.len().max(right.len());
            (0..len)
                .map(|i| {
                    let l = left.get(i).copied().unwrap_or(0);
                    let r = right.get(i).copied().unwrap_or(0);
                    l.cmp(&r)
                })
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        }
        _ => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive() {
        let rule = VersionRule::default();
        assert!(!rule.use_cache("1.0"));
        assert!(!rule.use_cache("1"));
        assert!(!rule.use_cache("0.9"));
        assert!(rule.use_cache("1.1"));
        assert!(rule.use_cache("2"));
    }

    #[test]
    fn test_numeric_components_compare_as_numbers() {
        let rule = VersionRule::new("1.9");
        assert!(rule.use_cache("1.10"));
        assert!(!rule.use_cache("1.8.99"));
    }

    #[test]
    fn test_non_numeric_tokens_compare_as_text() {
        let rule = VersionRule::default();
        assert!(rule.use_cache("beta"));
        assert!(!rule.use_cache(""));
    }
}
