use std::path::{Path, PathBuf};

use gosail_core::{FileRules, GeneratedFile, RenderError};

use super::{FMT_IMPORT, MIGRATIONS_FILE, PACKAGE, check_imports};
use crate::{
    Provider,
    builder::{CodeBuilder, GoFile, Indent},
};

/// Name of the generated migration routine.
pub const MIGRATE_FN: &str = "DBMigrate";

/// The migrations.go file holding the ORM's migration routine.
pub struct MigrationsGo<'a> {
    provider: &'a dyn Provider,
}

impl<'a> MigrationsGo<'a> {
    pub fn new(provider: &'a dyn Provider) -> Self {
        Self { provider }
    }
}

impl GeneratedFile for MigrationsGo<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(MIGRATIONS_FILE)
    }

    fn rules(&self) -> FileRules {
        FileRules::existing_dir()
    }

    fn render(&self) -> Result<String, RenderError> {
        let imports = self.provider.imports();
        check_imports(&imports)?;

        let migrate = CodeBuilder::go()
            .block_with_close(&format!("func {MIGRATE_FN}() error {{"), "}", |b| {
                b.lines(&retab(self.provider.migration_code()))
                    .line("return nil")
            })
            .build();

        Ok(GoFile::new(PACKAGE)
            .std_import(FMT_IMPORT)
            .imports(imports)
            .decl(migrate)
            .render())
    }
}

/// Replace leading runs of spaces with tabs, one per tab stop. YAML cannot
/// indent with tabs, so configured snippets arrive space-indented.
fn retab(code: &str) -> String {
    let stop = Indent::GO.width();
    code.lines()
        .map(|line| {
            let trimmed = line.trim_start_matches(' ');
            let spaces = line.len() - trimmed.len();
            let mut out = String::with_capacity(line.len());
            Indent::GO.write(&mut out, spaces / stop);
            out.extend(std::iter::repeat_n(' ', spaces % stop));
            out.push_str(trimmed);
            out
        })
        .collect::<Vec<_>>()
        .join("\n")
}
