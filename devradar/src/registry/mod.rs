//! Displayed developer list.
//!
//! [`DevRegistry`] is the ordered list behind the map markers. A search
//! replaces it wholesale; each realtime push appends one entry. Entries are
//! keyed by their position in the list.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::developer::Developer;

/// How [`DevRegistry::append`] treats a developer that is already listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppendPolicy {
    /// Always append, even if the same id is already present.
    #[default]
    Literal,
    /// Ignore appends whose id is already present.
    DedupById,
}

impl FromStr for AppendPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "literal" => Ok(Self::Literal),
            "dedup" => Ok(Self::DedupById),
            other => Err(format!(
                "unknown append policy '{}': must be 'literal' or 'dedup'",
                other
            )),
        }
    }
}

impl fmt::Display for AppendPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal => write!(f, "literal"),
            Self::DedupById => write!(f, "dedup"),
        }
    }
}

/// Ordered list of displayed developers.
#[derive(Debug, Clone, Default)]
pub struct DevRegistry {
    devs: Vec<Developer>,
    /// Ids currently listed (maintained for `DedupById`).
    ids: HashSet<String>,
    policy: AppendPolicy,
    /// Bumped on every mutation; a change means the markers must be redrawn.
    revision: u64,
}

impl DevRegistry {
    /// Creates an empty registry with the literal append policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with the given append policy.
    pub fn with_policy(policy: AppendPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> AppendPolicy {
        self.policy
    }

    /// Replaces the whole list with search results.
    ///
    /// Results are taken as-is, including any duplicates the backend returned.
    pub fn replace_all(&mut self, devs: Vec<Developer>) {
        self.ids = devs.iter().map(|d| d.id.clone()).collect();
        self.devs = devs;
        self.revision += 1;
    }

    /// Appends one developer to the end of the list.
    ///
    /// Returns false if the policy rejected the entry.
    pub fn append(&mut self, dev: Developer) -> bool {
        if self.policy == AppendPolicy::DedupById && self.ids.contains(&dev.id) {
            tracing::trace!(id = %dev.id, "Skipping duplicate developer");
            return false;
        }
        self.ids.insert(dev.id.clone());
        self.devs.push(dev);
        self.revision += 1;
        true
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.devs.clear();
        self.ids.clear();
        self.revision += 1;
    }

    pub fn len(&self) -> usize {
        self.devs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Developer> {
        self.devs.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Developer> {
        self.devs.iter()
    }

    pub fn as_slice(&self) -> &[Developer] {
        &self.devs
    }

    /// Mutation counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::developer::GeoPoint;

    fn dev(id: &str) -> Developer {
        Developer {
            id: id.to_string(),
            name: format!("Dev {}", id),
            bio: None,
            avatar_url: String::new(),
            github_username: format!("user-{}", id),
            techs: vec!["rust".to_string()],
            location: GeoPoint::new(0.0, 0.0),
        }
    }

    fn ids(registry: &DevRegistry) -> Vec<&str> {
        registry.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_starts_empty() {
        let registry = DevRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.revision(), 0);
        assert_eq!(registry.policy(), AppendPolicy::Literal);
    }

    #[test]
    fn test_replace_then_append_preserves_call_order() {
        let mut registry = DevRegistry::new();
        registry.replace_all(vec![dev("a"), dev("b")]);
        registry.append(dev("c"));
        registry.append(dev("d"));

        assert_eq!(ids(&registry), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_replace_discards_previous_entries() {
        let mut registry = DevRegistry::new();
        registry.replace_all(vec![dev("a")]);
        registry.append(dev("b"));
        registry.replace_all(vec![dev("x"), dev("y")]);

        assert_eq!(ids(&registry), vec!["x", "y"]);
    }

    #[test]
    fn test_literal_policy_keeps_duplicates() {
        let mut registry = DevRegistry::new();
        registry.replace_all(vec![dev("a")]);

        assert!(registry.append(dev("a")));
        assert!(registry.append(dev("a")));
        assert_eq!(ids(&registry), vec!["a", "a", "a"]);
    }

    #[test]
    fn test_dedup_policy_ignores_known_ids() {
        let mut registry = DevRegistry::with_policy(AppendPolicy::DedupById);
        registry.replace_all(vec![dev("a")]);

        assert!(!registry.append(dev("a")));
        assert!(registry.append(dev("b")));
        assert!(!registry.append(dev("b")));
        assert_eq!(ids(&registry), vec!["a", "b"]);
    }

    #[test]
    fn test_dedup_forgets_ids_after_replace() {
        let mut registry = DevRegistry::with_policy(AppendPolicy::DedupById);
        registry.replace_all(vec![dev("a")]);
        registry.replace_all(vec![dev("b")]);

        assert!(registry.append(dev("a")));
        assert_eq!(ids(&registry), vec!["b", "a"]);
    }

    #[test]
    fn test_revision_bumps_on_every_mutation() {
        let mut registry = DevRegistry::with_policy(AppendPolicy::DedupById);
        registry.replace_all(vec![dev("a")]);
        assert_eq!(registry.revision(), 1);

        registry.append(dev("b"));
        assert_eq!(registry.revision(), 2);

        // Rejected append is not a mutation
        registry.append(dev("b"));
        assert_eq!(registry.revision(), 2);

        registry.clear();
        assert_eq!(registry.revision(), 3);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("literal".parse::<AppendPolicy>(), Ok(AppendPolicy::Literal));
        assert_eq!(" Dedup ".parse::<AppendPolicy>(), Ok(AppendPolicy::DedupById));
        assert!("merge".parse::<AppendPolicy>().is_err());
        assert_eq!(AppendPolicy::DedupById.to_string(), "dedup");
    }
}
