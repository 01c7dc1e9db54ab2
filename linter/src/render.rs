//! Display contract rendering.
//!
//! The host linter panel supports two versions of its message contract at
//! once. One canonical [`Diagnostic`] renders through a serializer per
//! contract version; the published record flattens both field sets
//! together, so either consumer version can read it. Absent optional
//! fields are omitted from the serialized record, never emitted as null.

use std::path::PathBuf;

use serde::Serialize;

use glint_types::{Diagnostic, Severity, SourceRange};

/// The published message record, carrying both display contracts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinterMessage {
    #[serde(flatten)]
    legacy: LegacyFields,
    #[serde(flatten)]
    modern: ModernFields,
}

/// Original display contract field set.
///
/// Trace entries carry these fields only: no nested trace, no modern
/// fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct LegacyFields {
    #[serde(rename = "type")]
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<String>,
    #[serde(rename = "filePath", skip_serializing_if = "Option::is_none")]
    file_path: Option<PathBuf>,
    severity: Severity,
    range: SourceRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<Vec<LinterMessage>>,
}

/// Newer display contract field set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
struct ModernFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Location {
    file: PathBuf,
    position: SourceRange,
}

impl LinterMessage {
    /// Render a canonical diagnostic into the published dual-contract
    /// record.
    #[must_use]
    pub fn from_diagnostic(diagnostic: &Diagnostic) -> Self {
        Self {
            legacy: legacy_fields(diagnostic),
            modern: modern_fields(diagnostic),
        }
    }
}

/// Render a full collection for publishing.
#[must_use]
pub fn render_all(diagnostics: &[Diagnostic]) -> Vec<LinterMessage> {
    diagnostics.iter().map(LinterMessage::from_diagnostic).collect()
}

fn legacy_fields(diagnostic: &Diagnostic) -> LegacyFields {
    let trace = if diagnostic.trace().is_empty() {
        None
    } else {
        Some(
            diagnostic
                .trace()
                .iter()
                .map(|entry| LinterMessage {
                    legacy: legacy_fields(entry),
                    modern: ModernFields::default(),
                })
                .collect(),
        )
    };
    LegacyFields {
        kind: diagnostic.kind().to_string(),
        text: diagnostic.body().plain().map(str::to_string),
        html: diagnostic.body().markup().map(str::to_string),
        file_path: diagnostic.file().map(|file| file.to_path_buf()),
        severity: diagnostic.severity(),
        range: diagnostic.range(),
        trace,
    }
}

fn modern_fields(diagnostic: &Diagnostic) -> ModernFields {
    ModernFields {
        location: diagnostic.file().map(|file| Location {
            file: file.to_path_buf(),
            position: diagnostic.range(),
        }),
        excerpt: diagnostic.body().plain().map(str::to_string),
        description: diagnostic.body().markup().map(str::to_string),
    }
}
