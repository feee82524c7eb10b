//! Output trait for rendering reports to different targets.

use std::{
    fmt,
    io::{self, Write},
};

/// Target output for reports.
///
/// Reports describe *what* to output using these semantic methods.
/// Implementations decide *how* to render it.
pub trait Output {
    /// Start a new section with a heading.
    fn section(&mut self, name: &str);

    /// Render an indented key-value pair.
    fn key_value_indented(&mut self, key: &str, value: &str);

    /// Render a bullet list item.
    fn list_item(&mut self, text: &str);

    /// Render an added item (e.g., new file).
    fn added_item(&mut self, text: &str);

    /// Render a block of preformatted text.
    fn preformatted(&mut self, text: &str);

    /// Render a blank line.
    fn newline(&mut self);
}

/// A report that can render itself to an output.
pub trait Report {
    /// Render this report to the given output.
    fn render(&self, out: &mut dyn Output);
}

/// Plain-text output, to stdout unless another writer is given.
pub struct TerminalOutput<W = io::Stdout> {
    out: W,
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalOutput<W> {
    fn emit(&mut self, args: fmt::Arguments<'_>) {
        // A closed stdout must not turn a finished run into a failure.
        let _ = writeln!(self.out, "{args}");
    }
}

impl<W: Write> Output for TerminalOutput<W> {
    fn section(&mut self, name: &str) {
        self.emit(format_args!("{name}:"));
    }

    fn key_value_indented(&mut self, key: &str, value: &str) {
        self.emit(format_args!("  {key}: {value}"));
    }

    fn list_item(&mut self, text: &str) {
        self.emit(format_args!("  - {text}"));
    }

    fn added_item(&mut self, text: &str) {
        self.emit(format_args!("  + {text}"));
    }

    fn preformatted(&mut self, text: &str) {
        self.emit(format_args!("{text}"));
    }

    fn newline(&mut self) {
        self.emit(format_args!(""));
    }
}

/// Render `report` to a string, as it would appear on the terminal.
#[cfg(test)]
pub fn render_to_string(report: &dyn Report) -> String {
    let mut out = TerminalOutput { out: Vec::new() };
    report.render(&mut out);
    String::from_utf8(out.out).expect("reports render UTF-8")
}
