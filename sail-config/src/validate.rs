//! Registry validation.

use gosail_core::count_format_verbs;
use miette::SourceSpan;

use crate::{Registry, Result, SourceContext};

/// Number of placeholder credentials passed to every DSN template.
pub const DSN_PLACEHOLDERS: usize = 3;

/// Validate a freshly parsed registry.
///
/// Checks that every combination refers to declared entries, that DSN
/// templates take exactly the three placeholder credentials, and that the
/// strings spliced into generated code are present.
pub(crate) fn validate(registry: &Registry, ctx: &SourceContext) -> Result<()> {
    for (key, db) in registry.databases() {
        if db.driver_pkg.trim().is_empty() {
            return Err(ctx.validation_error(
                format!("database '{key}' has an empty driver_pkg"),
                find_key_span(ctx.src(), key, 0),
            ));
        }
    }

    for (key, orm) in registry.orms() {
        if orm.import_path.trim().is_empty() {
            return Err(ctx.validation_error(
                format!("ORM '{key}' has an empty import_path"),
                find_key_span(ctx.src(), key, 0),
            ));
        }
    }

    for (database, orm, combo) in registry.combinations() {
        let span = combination_span(ctx.src(), database, orm);

        if registry.database(database).is_none() {
            return Err(ctx.unknown_reference_error(
                "database",
                database,
                combination_span(ctx.src(), database, ""),
            ));
        }
        if registry.orm(orm).is_none() {
            return Err(ctx.unknown_reference_error("orm", orm, span));
        }

        let found = count_format_verbs(&combo.dsn_template);
        if found != DSN_PLACEHOLDERS {
            return Err(ctx.dsn_verbs_error(database, orm, found, span));
        }

        if combo.init_func.trim().is_empty() {
            return Err(ctx.validation_error(
                format!("combination '{database}' + '{orm}' has an empty init_func"),
                span,
            ));
        }
    }

    Ok(())
}

/// Span of a combination entry: the ORM key nested under the database key
/// inside the `combinations` section. An empty `orm` points at the database key.
fn combination_span(src: &str, database: &str, orm: &str) -> Option<SourceSpan> {
    let section = src.find("combinations:")?;
    let db_span = find_key_span(src, database, section)?;
    if orm.is_empty() {
        return Some(db_span);
    }
    find_key_span(src, orm, db_span.offset()).or(Some(db_span))
}

/// Find `key:` at the start of a line (after indentation), searching from `from`.
pub(crate) fn find_key_span(src: &str, key: &str, from: usize) -> Option<SourceSpan> {
    let pattern = format!("{key}:");
    let mut offset = from;
    while let Some(pos) = src.get(offset..)?.find(&pattern) {
        let start = offset + pos;
        let line_start = src[..start].rfind('\n').map_or(0, |i| i + 1);
        if src[line_start..start].chars().all(|c| c == ' ') {
            return Some(SourceSpan::from((start, key.len())));
        }
        offset = start + pattern.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use crate::{Error, Registry};

    fn parse_err(yaml: &str) -> Error {
        *Registry::from_yaml_str(yaml).unwrap_err()
    }

    #[test]
    fn test_unknown_database_in_combination() {
        let err = parse_err(
            r#"
databases: {}
orms:
  gorm:
    import_path: gorm.io/gorm
combinations:
  oracle:
    gorm:
      dsn_template: "%s %s %s"
      init_func: "open(dsn)"
"#,
        );

        match err {
            Error::UnknownReference { kind, name, span, .. } => {
                assert_eq!(kind, "database");
                assert_eq!(name, "oracle");
                assert!(span.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_orm_in_combination() {
        let err = parse_err(
            r#"
databases:
  postgres:
    driver_pkg: gorm.io/driver/postgres
combinations:
  postgres:
    ent:
      dsn_template: "%s %s %s"
      init_func: "open(dsn)"
"#,
        );

        assert!(matches!(err, Error::UnknownReference { kind: "orm", .. }));
        assert_eq!(
            err.to_string(),
            "combination refers to unknown orm 'ent'"
        );
    }

    #[test]
    fn test_dsn_template_needs_three_verbs() {
        let err = parse_err(
            r#"
databases:
  postgres:
    driver_pkg: gorm.io/driver/postgres
orms:
  gorm:
    import_path: gorm.io/gorm
combinations:
  postgres:
    gorm:
      dsn_template: "user=%s dbname=%s"
      init_func: "gorm.Open(postgres.Open(dsn), &gorm.Config{})"
"#,
        );

        match err {
            Error::DsnVerbs { found, database, orm, .. } => {
                assert_eq!(found, 2);
                assert_eq!(database, "postgres");
                assert_eq!(orm, "gorm");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_init_func_rejected() {
        let err = parse_err(
            r#"
databases:
  postgres:
    driver_pkg: gorm.io/driver/postgres
orms:
  gorm:
    import_path: gorm.io/gorm
combinations:
  postgres:
    gorm:
      dsn_template: "%s %s %s"
      init_func: "  "
"#,
        );

        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("empty init_func"));
    }

    #[test]
    fn test_empty_driver_rejected() {
        let err = parse_err(
            r#"
databases:
  postgres:
    driver_pkg: ""
"#,
        );

        assert!(err.to_string().contains("empty driver_pkg"));
    }

    #[test]
    fn test_find_key_span_skips_values() {
        let src = "a: gorm:\n  gorm: x\n";
        let span = super::find_key_span(src, "gorm", 0).unwrap();
        assert_eq!(span.offset(), 11);
        assert_eq!(span.len(), 4);
    }
}
