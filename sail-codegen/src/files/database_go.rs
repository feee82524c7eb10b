use std::path::{Path, PathBuf};

use gosail_core::{FileRules, GeneratedFile, RenderError};

use super::{DATABASE_FILE, FMT_IMPORT, PACKAGE, check_imports};
use crate::{
    Provider,
    builder::{CodeBuilder, GoFile},
    provider::DB_VARIABLE,
};

/// Name of the generated connection routine.
pub const CONNECT_FN: &str = "ConnectDB";

/// The database.go file declaring the shared handle and the routine that
/// opens the connection.
pub struct DatabaseGo<'a> {
    provider: &'a dyn Provider,
}

impl<'a> DatabaseGo<'a> {
    pub fn new(provider: &'a dyn Provider) -> Self {
        Self { provider }
    }
}

impl GeneratedFile for DatabaseGo<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(DATABASE_FILE)
    }

    fn rules(&self) -> FileRules {
        FileRules::existing_dir()
    }

    fn render(&self) -> Result<String, RenderError> {
        let imports = self.provider.imports();
        check_imports(&imports)?;
        let connection_code = self.provider.connection_code()?;

        let connect = CodeBuilder::go()
            .block_with_close(&format!("func {CONNECT_FN}() {{"), "}", |b| {
                b.lines(&connection_code)
            })
            .build();

        Ok(GoFile::new(PACKAGE)
            .std_import(FMT_IMPORT)
            .imports(imports)
            .decl(format!(
                "var {DB_VARIABLE} {}",
                self.provider.db_variable()
            ))
            .decl(connect)
            .render())
    }
}
