//! Core diagnostic model for Glint.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. The linter bridge normalizes raw build output into these
//! types; the display layer serializes them into the host contracts.

use serde::Serialize;
use std::path::{Path, PathBuf};

// ============================================================================
// Severity
// ============================================================================

/// Severity level for a diagnostic.
///
/// Serializes to the lowercase tokens the host display contract expects
/// (`"error"`, `"warning"`, `"info"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Classify a free-text build severity token, case-insensitively.
    ///
    /// Returns `None` for unrecognized (or absent) tokens.
    /// Callers (boundary code) decide the fallback policy.
    #[must_use]
    pub fn from_token(token: Option<&str>) -> Option<Self> {
        match token?.to_ascii_lowercase().as_str() {
            "err" | "error" => Some(Self::Error),
            "warn" | "warning" => Some(Self::Warning),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_error(self) -> bool {
        self == Self::Error
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

// ============================================================================
// Source positions
// ============================================================================

/// A zero-based line/column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    line: u32,
    col: u32,
}

impl Position {
    #[must_use]
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    #[must_use]
    pub fn line(self) -> u32 {
        self.line
    }

    #[must_use]
    pub fn col(self) -> u32 {
        self.col
    }
}

/// A zero-based half-open source range.
///
/// Build tools report one-based coordinates; [`SourceRange::from_one_based`]
/// is the single conversion point. The range collapses to a point when the
/// end fields are absent. Serializes as
/// `[[startLine, startCol], [endLine, endCol]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "[[u32; 2]; 2]")]
pub struct SourceRange {
    start: Position,
    end: Position,
}

impl SourceRange {
    #[must_use]
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Convert one-based build coordinates into a zero-based range.
    ///
    /// Absent fields default to 1 before conversion; the end falls back to
    /// the start field-by-field. A raw 0 is treated like an absent field
    /// (build convention is one-based).
    #[must_use]
    pub fn from_one_based(
        line: Option<u32>,
        col: Option<u32>,
        line_end: Option<u32>,
        col_end: Option<u32>,
    ) -> Self {
        fn coord(n: Option<u32>) -> Option<u32> {
            n.filter(|&n| n != 0)
        }
        fn zero_base(n: Option<u32>) -> u32 {
            n.map_or(0, |n| n - 1)
        }
        let line = coord(line);
        let col = coord(col);
        Self {
            start: Position::new(zero_base(line), zero_base(col)),
            end: Position::new(
                zero_base(coord(line_end).or(line)),
                zero_base(coord(col_end).or(col)),
            ),
        }
    }

    #[must_use]
    pub fn start(self) -> Position {
        self.start
    }

    #[must_use]
    pub fn end(self) -> Position {
        self.end
    }
}

impl From<SourceRange> for [[u32; 2]; 2] {
    fn from(range: SourceRange) -> Self {
        [
            [range.start.line, range.start.col],
            [range.end.line, range.end.col],
        ]
    }
}

// ============================================================================
// Message body
// ============================================================================

/// The displayable text of a diagnostic: plain text or HTML markup.
///
/// Exactly one representation is ever populated. Records carrying both a
/// plain and a markup message keep only the plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    Plain(String),
    Markup(String),
}

impl MessageBody {
    /// Select the body from raw build fields.
    ///
    /// Neither field present yields `Plain(fallback)`; a plain message wins
    /// over markup; markup is used only when no plain message exists.
    #[must_use]
    pub fn resolve(message: Option<&str>, markup: Option<&str>, fallback: &str) -> Self {
        match (message, markup) {
            (Some(text), _) => Self::Plain(text.to_string()),
            (None, Some(html)) => Self::Markup(html.to_string()),
            (None, None) => Self::Plain(fallback.to_string()),
        }
    }

    /// The plain text, if this body is plain.
    #[must_use]
    pub fn plain(&self) -> Option<&str> {
        match self {
            Self::Plain(text) => Some(text),
            Self::Markup(_) => None,
        }
    }

    /// The HTML markup, if this body is markup.
    #[must_use]
    pub fn markup(&self) -> Option<&str> {
        match self {
            Self::Plain(_) => None,
            Self::Markup(html) => Some(html),
        }
    }
}

// ============================================================================
// Diagnostic
// ============================================================================

/// A single normalized build diagnostic.
///
/// Fields are private; construction goes through [`Diagnostic::new`] and
/// consumers read via accessors. `file` is absent when the raw record
/// carried no path (trace entries may omit it). Trace entries are one
/// level deep and carry an empty trace list themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// The raw `type` token, defaulted at the boundary.
    kind: String,
    severity: Severity,
    body: MessageBody,
    /// Absolute path after resolution against the build directory.
    file: Option<PathBuf>,
    range: SourceRange,
    trace: Vec<Diagnostic>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(
        kind: String,
        severity: Severity,
        body: MessageBody,
        file: Option<PathBuf>,
        range: SourceRange,
        trace: Vec<Diagnostic>,
    ) -> Self {
        Self {
            kind,
            severity,
            body,
            file,
            range,
            trace,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn body(&self) -> &MessageBody {
        &self.body
    }

    #[must_use]
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    #[must_use]
    pub fn range(&self) -> SourceRange {
        self.range
    }

    #[must_use]
    pub fn trace(&self) -> &[Diagnostic] {
        &self.trace
    }

    /// Format as `path:line:col: severity: message` (one-based for display).
    #[must_use]
    pub fn summary(&self) -> String {
        let text = match &self.body {
            MessageBody::Plain(text) | MessageBody::Markup(text) => text,
        };
        match &self.file {
            Some(path) => format!(
                "{}:{}:{}: {}: {}",
                path.display(),
                self.range.start.line + 1,
                self.range.start.col + 1,
                self.severity.label(),
                text,
            ),
            None => format!("{}: {}", self.severity.label(), text),
        }
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Immutable snapshot of last-published diagnostics, suitable for status
/// display.
///
/// Counts are computed from the canonical per-file list; there is no cached
/// state to fall out of sync.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsSnapshot {
    /// Per-file diagnostics, sorted with error-containing files first.
    files: Vec<(PathBuf, Vec<Diagnostic>)>,
}

impl DiagnosticsSnapshot {
    /// Construct a snapshot from sorted per-file diagnostics.
    #[must_use]
    pub fn new(files: Vec<(PathBuf, Vec<Diagnostic>)>) -> Self {
        Self { files }
    }

    /// Per-file diagnostics, sorted with error-containing files first.
    #[must_use]
    pub fn files(&self) -> &[(PathBuf, Vec<Diagnostic>)] {
        &self.files
    }

    /// Whether there are any diagnostics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn count_by_severity(&self, severity: Severity) -> usize {
        self.files
            .iter()
            .flat_map(|(_, items)| items)
            .filter(|d| d.severity() == severity)
            .count()
    }

    /// Number of error-level diagnostics.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count_by_severity(Severity::Error)
    }

    /// Number of warning-level diagnostics.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count_by_severity(Severity::Warning)
    }

    /// Number of info-level diagnostics.
    #[must_use]
    pub fn info_count(&self) -> usize {
        self.count_by_severity(Severity::Info)
    }

    /// Total diagnostic count across all files.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.files.iter().map(|(_, items)| items.len()).sum()
    }

    /// Format a compact status string like "E:3 W:5".
    #[must_use]
    pub fn status_string(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        format!("E:{} W:{}", self.error_count(), self.warning_count())
    }
}
