//! Create command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from creating a project.
#[derive(Debug)]
pub struct CreateReport {
    pub name: String,
    /// Absolute or cwd-relative project directory.
    pub dir: PathBuf,
    pub framework: String,
    pub database: String,
    pub orm: String,
    /// Generated files, relative to `dir`.
    pub generated: Vec<PathBuf>,
    /// Whether the Go toolchain pass ran.
    pub tidied: bool,
}

fn or_none(value: &str) -> &str {
    if value.is_empty() { "none" } else { value }
}

impl Report for CreateReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!(
            "Created project '{}' in {}",
            self.name,
            self.dir.display()
        ));
        out.newline();

        out.section("Options");
        out.key_value_indented("Framework", &self.framework);
        out.key_value_indented("Database", or_none(&self.database));
        out.key_value_indented("ORM", or_none(&self.orm));

        if !self.generated.is_empty() {
            out.newline();
            out.section("Generated");
            for path in &self.generated {
                out.added_item(&path.display().to_string());
            }
        }

        out.newline();
        out.section("Next steps");
        out.list_item(&format!("cd {}", self.name));
        if !self.tidied {
            out.list_item("go mod tidy");
        }
        out.list_item("go run .");
    }
}
