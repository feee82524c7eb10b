//! Go import collection.

use gosail_core::go_quote;
use indexmap::IndexSet;

/// Tracks Go import paths and deduplicates them.
///
/// Maintains insertion order for deterministic output; the first occurrence
/// of a path wins.
///
/// # Example
///
/// ```
/// use gosail_codegen::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add("gorm.io/driver/postgres");
/// imports.add("gorm.io/gorm");
/// imports.add("gorm.io/gorm");
///
/// assert_eq!(imports.quoted(), ["\"gorm.io/driver/postgres\"", "\"gorm.io/gorm\""]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    paths: IndexSet<String>,
}

impl ImportCollector {
    /// Create a new empty import collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an import path. Adding a path twice is a no-op.
    pub fn add(&mut self, path: &str) {
        if !self.paths.contains(path) {
            self.paths.insert(path.to_string());
        }
    }

    /// Add several import paths in order.
    pub fn extend<'a>(&mut self, paths: impl IntoIterator<Item = &'a str>) {
        for path in paths {
            self.add(path);
        }
    }

    /// Paths as Go string literals, ready to embed in an import block.
    pub fn quoted(&self) -> Vec<String> {
        self.paths.iter().map(|p| go_quote(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_position() {
        let mut imports = ImportCollector::new();
        imports.extend(["b", "a", "b", "c", "a"]);

        assert_eq!(imports.quoted(), ["\"b\"", "\"a\"", "\"c\""]);
    }

    #[test]
    fn test_quoted_escapes() {
        let mut imports = ImportCollector::new();
        imports.add("weird\"path");

        assert_eq!(imports.quoted(), ["\"weird\\\"path\""]);
    }
}
