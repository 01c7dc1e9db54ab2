//! Host integration seam.
//!
//! The embedding editor supplies the display provider through a
//! registration closure and feeds editor lifecycle notifications into the
//! adapter's event channel. Both directions of host traffic go through
//! the types here; nothing else in the crate touches the host.

use std::path::{Path, PathBuf};

use crate::render::LinterMessage;

/// Registration request handed to the host's provider registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRegistration {
    /// Display name shown by the host linter panel.
    pub name: String,
}

/// Host-side display handle for published diagnostics.
///
/// `set_messages` replaces the displayed set for one file path; an empty
/// collection clears that path. `clear_messages` removes everything this
/// provider ever displayed.
pub trait LinterProvider {
    fn set_messages(&mut self, path: &Path, messages: Vec<LinterMessage>);
    fn clear_messages(&mut self);
}

/// An editor lifecycle notification from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// An editor was opened or focused.
    ///
    /// `path` is `None` for editors with no backing file.
    Opened { path: Option<PathBuf> },
    /// An editor was destroyed.
    Closed { path: PathBuf },
}
