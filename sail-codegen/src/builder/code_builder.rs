//! Line-oriented builder for indented source text.

use super::Indent;

/// Accumulates lines of source at a tracked nesting level.
///
/// Every method takes and returns the builder by value, so a whole
/// declaration reads as one chain.
///
/// # Example
///
/// ```
/// use gosail_codegen::builder::CodeBuilder;
///
/// let code = CodeBuilder::go()
///     .block_with_close("func main() {", "}", |b| b.line("fmt.Println(\"hi\")"))
///     .build();
///
/// assert_eq!(code, "func main() {\n\tfmt.Println(\"hi\")\n}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    indent: Indent,
    level: usize,
    out: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            indent,
            level: 0,
            out: String::new(),
        }
    }

    /// Builder using gofmt indentation.
    pub fn go() -> Self {
        Self::new(Indent::GO)
    }

    /// Append `text` as one line at the current level.
    pub fn line(mut self, text: &str) -> Self {
        self.indent.write(&mut self.out, self.level);
        self.out.push_str(text);
        self.out.push('\n');
        self
    }

    /// Append a multi-line snippet, shifting each line to the current level.
    ///
    /// Whitespace-only lines become empty lines and a trailing newline in
    /// `text` adds nothing.
    pub fn lines(self, text: &str) -> Self {
        text.lines().fold(self, |b, line| {
            if line.trim().is_empty() {
                b.blank()
            } else {
                b.line(line)
            }
        })
    }

    /// Append an empty line.
    pub fn blank(mut self) -> Self {
        self.out.push('\n');
        self
    }

    pub fn indent(mut self) -> Self {
        self.level += 1;
        self
    }

    /// Step one level out; stays at zero.
    pub fn dedent(mut self) -> Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    /// `header`, then the body one level deeper, then `close`.
    pub fn block_with_close<F>(self, header: &str, close: &str, body: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        body(self.line(header).indent()).dedent().line(close)
    }

    /// Apply `f` only if `condition` holds.
    pub fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition { f(self) } else { self }
    }

    /// Apply `f` once per item, in order.
    pub fn each<T, I, F>(self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        items.into_iter().fold(self, f)
    }

    pub fn build(self) -> String {
        self.out
    }
}
