//! Interactive selection of framework, database and ORM.

use std::io;

use dialoguer::{Select, theme::ColorfulTheme};
use eyre::{Context, Result};
use gosail_config::Registry;

/// Label of the option that opts out of a database or ORM.
const NONE: &str = "None";

/// The user's choices. Empty `database`/`orm` mean none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub framework: String,
    pub database: String,
    pub orm: String,
}

/// Values already given on the command line.
#[derive(Debug, Default)]
pub struct Preset<'a> {
    pub framework: Option<&'a str>,
    pub database: Option<&'a str>,
    pub orm: Option<&'a str>,
}

/// Prompt for every value not in `preset`.
///
/// Returns `None` when the user aborts a prompt. The ORM is only asked for
/// once a database is chosen.
pub fn select(registry: &Registry, preset: Preset<'_>) -> Result<Option<Selection>> {
    let framework = match preset.framework {
        Some(framework) => framework.to_string(),
        None => {
            let frameworks: Vec<&str> = registry.frameworks().collect();
            match choose("Choose a Go framework", &frameworks, 0)? {
                Some(framework) => framework,
                None => return Ok(None),
            }
        }
    };

    let database = match preset.database {
        Some(database) => from_option(database),
        None => {
            let databases: Vec<&str> = registry.databases().map(|(name, _)| name).collect();
            match choose_optional("Choose a database (or None)", databases)? {
                Some(database) => database,
                None => return Ok(None),
            }
        }
    };

    let orm = match (database.is_empty(), preset.orm) {
        (true, _) => String::new(),
        (false, Some(orm)) => from_option(orm),
        (false, None) => {
            let orms: Vec<&str> = registry.orms_for(&database).collect();
            match choose_optional("Choose an ORM (or None)", orms)? {
                Some(orm) => orm,
                None => return Ok(None),
            }
        }
    };

    Ok(Some(Selection {
        framework,
        database,
        orm,
    }))
}

/// Map the "None" label to the empty string.
fn from_option(value: &str) -> String {
    if value.eq_ignore_ascii_case(NONE) {
        String::new()
    } else {
        value.to_string()
    }
}

/// Select from `items` plus a trailing "None", which is the default.
fn choose_optional(prompt: &str, mut items: Vec<&str>) -> Result<Option<String>> {
    items.push(NONE);
    let default = items.len() - 1;
    Ok(choose(prompt, &items, default)?.map(|choice| from_option(&choice)))
}

fn choose(prompt: &str, items: &[&str], default: usize) -> Result<Option<String>> {
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact_opt();
    let selection = aborted_as_none(selection).wrap_err("Failed to get selection")?;

    Ok(selection.map(|i| items[i].to_string()))
}

/// Ctrl-C in raw mode reaches us as an `Interrupted` I/O error rather than a
/// signal. Treat it like Esc.
fn aborted_as_none<T>(result: dialoguer::Result<Option<T>>) -> dialoguer::Result<Option<T>> {
    match result {
        Err(dialoguer::Error::IO(err)) if err.kind() == io::ErrorKind::Interrupted => Ok(None),
        other => other,
    }
}
