//! Extraction of hand-written content from a previously generated model.
//!
//! Everything after the sentinel comment is carried into the next
//! generation verbatim, and `use` imports added anywhere at column 0 are
//! merged into the regenerated import list. Detection is purely textual.

/// Marker line separating generated code from preserved code.
pub const SENTINEL: &str = "/* ---- Everything after this line will be preserved. ---- */";

/// Structural terminator of a generated class.
const TERMINATOR: &str = "}";

/// Content recovered from a prior artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreservedContent {
    /// Lines after the sentinel, in order, blank lines included.
    pub lines: Vec<String>,

    /// Distinct import targets in first-seen order, without `use` and `;`.
    pub uses: Vec<String>,
}

impl PreservedContent {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.uses.is_empty()
    }
}

/// Recognizes the sentinel line and splits prior artifacts around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentinel {
    marker: String,
    left: String,
    right: String,
}

impl Default for Sentinel {
    fn default() -> Self {
        Self::new(SENTINEL, "/* ----", "---- */")
    }
}

impl Sentinel {
    /// A sentinel rendered as `marker` and detected by a line containing
    /// both `left` and `right`.
    pub fn new(marker: impl Into<String>, left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            left: left.into(),
            right: right.into(),
        }
    }

    /// Text emitted into generated artifacts.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Whether a line is a sentinel line.
    pub fn matches(&self, line: &str) -> bool {
        line.contains(&self.left) && line.contains(&self.right)
    }

    /// Extract preserved lines and imports from a prior artifact.
    ///
    /// Only the last line consisting of exactly `}` is treated as the
    /// class terminator and dropped; any other `}` line is kept.
    pub fn parse(&self, prior: Option<&str>) -> PreservedContent {
        let Some(text) = prior else {
            return PreservedContent::default();
        };

        let lines: Vec<&str> = text.lines().collect();
        let terminator = lines.iter().rposition(|line| *line == TERMINATOR);

        let mut content = PreservedContent::default();
        let mut found = false;

        for (idx, line) in lines.iter().enumerate() {
            if Some(idx) == terminator {
                continue;
            }
            if let Some(target) = import_target(line) {
                if !content.uses.iter().any(|u| u == target) {
                    content.uses.push(target.to_string());
                }
            }
            if found {
                content.lines.push((*line).to_string());
            }
            if self.matches(line) {
                found = true;
            }
        }

        content
    }
}

/// Parse a prior artifact with the standard sentinel.
pub fn parse(prior: Option<&str>) -> PreservedContent {
    Sentinel::default().parse(prior)
}

/// `use App\Foo;` → `App\Foo`. Indented (trait) uses are not imports.
fn import_target(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("use")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let target = import_name(line);
    (!target.is_empty()).then_some(target)
}

/// Bare import target of `App\Foo`, `App\Foo;` or `use App\Foo;`.
pub fn import_name(s: &str) -> &str {
    let s = s.trim();
    let s = match s.strip_prefix("use") {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => s,
    };
    s.trim_end_matches(';').trim_end()
}
