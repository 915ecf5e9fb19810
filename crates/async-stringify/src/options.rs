/// Indentation directive for the rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Space {
    /// Indent with this many spaces, capped at 10. `0` renders compact text.
    Count(usize),
    /// Indent with this string, truncated to its first 10 UTF-16 code units.
    /// A character that would straddle the limit is dropped whole. An empty
    /// string renders compact text.
    Indent(String),
}

const MAX_INDENT: usize = 10;

impl Space {
    /// The per-level indent unit, or `None` for compact output.
    pub fn indent_unit(&self) -> Option<String> {
        let unit: String = match self {
            Space::Count(n) => " ".repeat((*n).min(MAX_INDENT)),
            Space::Indent(s) => {
                let mut units = 0;
                s.chars()
                    .take_while(|c| {
                        units += c.len_utf16();
                        units <= MAX_INDENT
                    })
                    .collect()
            }
        };
        if unit.is_empty() { None } else { Some(unit) }
    }
}

impl From<usize> for Space {
    fn from(n: usize) -> Self {
        Space::Count(n)
    }
}

impl From<&str> for Space {
    fn from(s: &str) -> Self {
        Space::Indent(s.to_string())
    }
}

impl From<String> for Space {
    fn from(s: String) -> Self {
        Space::Indent(s)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Indentation passed through to the renderer (default: compact)
    pub space: Option<Space>,
    /// Maximum container nesting depth (None = unlimited)
    pub max_depth: Option<usize>,
}

impl Options {
    pub fn with_space(space: impl Into<Space>) -> Self {
        Self {
            space: Some(space.into()),
            ..Self::default()
        }
    }
}
