//! Indentation units.

/// One level of indentation in generated source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indent {
    /// gofmt style.
    #[default]
    Tab,
    /// A fixed number of spaces per level.
    Spaces(u8),
}

impl Indent {
    pub const GO: Self = Self::Tab;

    /// Append `level` units of indentation to `buf`.
    pub fn write(self, buf: &mut String, level: usize) {
        match self {
            Indent::Tab => buf.extend(std::iter::repeat_n('\t', level)),
            Indent::Spaces(n) => buf.extend(std::iter::repeat_n(' ', level * usize::from(n))),
        }
    }

    /// Columns one level occupies; a tab counts as a four-column stop.
    pub fn width(self) -> usize {
        match self {
            Indent::Tab => 4,
            Indent::Spaces(n) => usize::from(n),
        }
    }
}
