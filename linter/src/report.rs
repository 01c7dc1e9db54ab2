//! Build report wire format and normalization.
//!
//! [`RawDiagnostic`] mirrors the JSON records the build pipeline emits,
//! field for field. Normalization is infallible: missing or malformed
//! fields degrade to defaults rather than rejecting the record. The only
//! fallible operation is [`parse_report`] on malformed JSON text.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use glint_types::{Diagnostic, MessageBody, Severity, SourceRange};

/// Placeholder text for a top-level record with no message at all.
const FALLBACK_TEXT: &str = "Error from build";

/// Placeholder text for a trace entry with no message at all.
const FALLBACK_TRACE_TEXT: &str = "Trace in build";

const DEFAULT_KIND: &str = "Error";

const DEFAULT_TRACE_KIND: &str = "Trace";

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("malformed build report: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One build-tool-reported issue, prior to normalization.
///
/// Line/column numbers are one-based per build convention. `file` is
/// expected on top-level records; trace entries may omit it. Unknown
/// fields are ignored so newer build tools can add their own.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawDiagnostic {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: Option<String>,
    pub html_message: Option<String>,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub col: Option<u32>,
    pub line_end: Option<u32>,
    pub col_end: Option<u32>,
    /// Related-location entries (e.g. call-stack context).
    #[serde(default)]
    pub trace: Vec<RawDiagnostic>,
}

/// Parse a JSON build report into raw diagnostic records.
pub fn parse_report(text: &str) -> Result<Vec<RawDiagnostic>, ReportError> {
    Ok(serde_json::from_str(text)?)
}

#[derive(Clone, Copy)]
enum Layer {
    Top,
    Trace,
}

impl Layer {
    fn fallback_text(self) -> &'static str {
        match self {
            Self::Top => FALLBACK_TEXT,
            Self::Trace => FALLBACK_TRACE_TEXT,
        }
    }

    fn default_kind(self) -> &'static str {
        match self {
            Self::Top => DEFAULT_KIND,
            Self::Trace => DEFAULT_TRACE_KIND,
        }
    }
}

/// Normalize one raw record and its trace entries.
///
/// Relative file paths are resolved against `cwd`, one-based coordinates
/// become zero-based ranges, the severity token is classified (defaulting
/// to info), and missing messages get placeholder text.
#[must_use]
pub fn normalize(raw: &RawDiagnostic, cwd: &Path) -> Diagnostic {
    // Trace nesting is one level deep in the display contract; traces of
    // trace entries are dropped.
    let trace = raw
        .trace
        .iter()
        .map(|entry| normalize_entry(entry, cwd, Layer::Trace, Vec::new()))
        .collect();
    normalize_entry(raw, cwd, Layer::Top, trace)
}

fn normalize_entry(
    raw: &RawDiagnostic,
    cwd: &Path,
    layer: Layer,
    trace: Vec<Diagnostic>,
) -> Diagnostic {
    let severity = Severity::from_token(raw.kind.as_deref()).unwrap_or(Severity::Info);
    let kind = non_empty(raw.kind.as_deref())
        .map_or_else(|| layer.default_kind().to_string(), str::to_string);
    let body = MessageBody::resolve(
        non_empty(raw.message.as_deref()),
        non_empty(raw.html_message.as_deref()),
        layer.fallback_text(),
    );
    let file = non_empty(raw.file.as_deref()).map(|file| resolve_path(file, cwd));
    let range = SourceRange::from_one_based(raw.line, raw.col, raw.line_end, raw.col_end);
    Diagnostic::new(kind, severity, body, file, range, trace)
}

/// Empty strings count as absent, matching how the build pipeline treats
/// unset fields.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Resolve a reported path against the build working directory.
fn resolve_path(file: &str, cwd: &Path) -> PathBuf {
    let path = Path::new(file);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
