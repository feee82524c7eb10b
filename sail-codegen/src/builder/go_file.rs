//! GoFile abstraction for structured Go file generation.
//!
//! Organizes a Go source file into a package clause, a grouped import
//! block and body declarations.

use super::{CodeBuilder, Indent};

/// A structured representation of a Go source file.
///
/// Standard-library imports are listed first, then third-party imports,
/// separated by a blank line the way gofmt groups them. Imports are passed
/// already quoted.
///
/// # Example
///
/// ```
/// use gosail_codegen::builder::GoFile;
///
/// let src = GoFile::new("main")
///     .std_import("\"fmt\"")
///     .decl("func main() {\n\tfmt.Println(\"hi\")\n}\n")
///     .render();
///
/// assert!(src.starts_with("package main\n\nimport (\n\t\"fmt\"\n)\n"));
/// ```
#[derive(Debug, Clone)]
pub struct GoFile {
    package: String,
    std_imports: Vec<String>,
    imports: Vec<String>,
    body: Vec<String>,
}

impl GoFile {
    /// Create an empty file in `package`.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            std_imports: Vec::new(),
            imports: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Add a quoted standard-library import.
    pub fn std_import(mut self, quoted: impl Into<String>) -> Self {
        self.std_imports.push(quoted.into());
        self
    }

    /// Add quoted third-party imports.
    pub fn imports(mut self, quoted: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.imports.extend(quoted.into_iter().map(Into::into));
        self
    }

    /// Add a top-level declaration. Declarations are separated by blank lines.
    pub fn decl(mut self, code: impl Into<String>) -> Self {
        self.body.push(code.into());
        self
    }

    /// Render the file with gofmt indentation.
    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::new(Indent::GO)
            .line(&format!("package {}", self.package))
            .blank();

        let has_std = !self.std_imports.is_empty();
        let has_third_party = !self.imports.is_empty();
        if has_std || has_third_party {
            builder = builder
                .block_with_close("import (", ")", |b| {
                    b.each(&self.std_imports, |b, import| b.line(import))
                        .when(has_std && has_third_party, CodeBuilder::blank)
                        .each(&self.imports, |b, import| b.line(import))
                })
                .blank();
        }

        let mut out = builder.build();
        for (i, decl) in self.body.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(decl);
            if !decl.ends_with('\n') {
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_only() {
        assert_eq!(GoFile::new("initializers").render(), "package initializers\n\n");
    }

    #[test]
    fn test_import_groups() {
        let src = GoFile::new("initializers")
            .std_import("\"fmt\"")
            .imports(["\"gorm.io/gorm\"", "\"gorm.io/driver/postgres\""])
            .render();

        assert_eq!(
            src,
            "package initializers\n\nimport (\n\t\"fmt\"\n\n\t\"gorm.io/gorm\"\n\t\"gorm.io/driver/postgres\"\n)\n\n"
        );
    }

    #[test]
    fn test_third_party_only_has_no_group_gap() {
        let src = GoFile::new("p").imports(["\"a.io/b\""]).render();
        assert_eq!(src, "package p\n\nimport (\n\t\"a.io/b\"\n)\n\n");
    }

    #[test]
    fn test_declarations_separated_by_blank_lines() {
        let src = GoFile::new("p")
            .decl("var A int")
            .decl("func F() {\n}\n")
            .render();

        assert_eq!(src, "package p\n\nvar A int\n\nfunc F() {\n}\n");
    }
}
