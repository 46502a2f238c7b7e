//! Query keys

use std::fmt;

/// Hierarchical cache key such as `["dashboard", "recent-patients", "5"]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, P>(parts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: ToString,
    {
        Self(parts.into_iter().map(|p| p.to_string()).collect())
    }

    /// Append one more segment
    pub fn with(mut self, part: impl ToString) -> Self {
        self.0.push(part.to_string());
        self
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// Whether `prefix` names this key or one of its ancestors
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", part)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matching() {
        let root = QueryKey::new(["dashboard"]);
        let stats = root.clone().with("stats");
        let patients = QueryKey::new(["dashboard", "recent-patients"]).with(5);

        assert!(stats.starts_with(&root));
        assert!(patients.starts_with(&root));
        assert!(root.starts_with(&root));
        assert!(!root.starts_with(&stats));
        assert!(!patients.starts_with(&stats));
    }

    #[test]
    fn test_display() {
        let key = QueryKey::new(["dashboard", "recent-patients"]).with(10);
        assert_eq!(key.to_string(), r#"["dashboard", "recent-patients", "10"]"#);
    }
}
