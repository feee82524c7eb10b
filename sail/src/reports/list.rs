//! List command report data structures.

use gosail_config::Registry;

use super::output::{Output, Report};

/// What the registry supports.
#[derive(Debug)]
pub struct ListReport {
    /// Framework name and template repository.
    pub frameworks: Vec<(String, String)>,
    /// Database name and driver package.
    pub databases: Vec<(String, String)>,
    /// ORM name and import path.
    pub orms: Vec<(String, String)>,
    /// Supported (database, ORM) pairs.
    pub combinations: Vec<(String, String)>,
}

impl ListReport {
    pub fn from_registry(registry: &Registry) -> Self {
        Self {
            frameworks: owned(registry.repositories()),
            databases: owned(
                registry
                    .databases()
                    .map(|(name, db)| (name, db.driver_pkg.as_str())),
            ),
            orms: owned(
                registry
                    .orms()
                    .map(|(name, orm)| (name, orm.import_path.as_str())),
            ),
            combinations: owned(registry.combinations().map(|(db, orm, _)| (db, orm))),
        }
    }
}

fn owned<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> Vec<(String, String)> {
    pairs.map(|(a, b)| (a.to_string(), b.to_string())).collect()
}

impl Report for ListReport {
    fn render(&self, out: &mut dyn Output) {
        let groups = [
            ("Frameworks", &self.frameworks),
            ("Databases", &self.databases),
            ("ORMs", &self.orms),
        ];
        for (i, (name, items)) in groups.into_iter().enumerate() {
            if i > 0 {
                out.newline();
            }
            out.section(name);
            if items.is_empty() {
                out.list_item("(none)");
            }
            for (key, value) in items {
                out.key_value_indented(key, value);
            }
        }

        out.newline();
        out.section("Combinations");
        if self.combinations.is_empty() {
            out.list_item("(none)");
        }
        for (database, orm) in &self.combinations {
            out.list_item(&format!("{database} + {orm}"));
        }
    }
}
