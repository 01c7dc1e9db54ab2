//! Linter facade — public API consumed by the build pipeline.
//!
//! The embedding host registers one [`Linter`] per build provider, feeds
//! editor lifecycle events into its channel, and hands it build reports
//! to publish. Everything runs on the host's event thread;
//! [`Linter::poll_events`] never blocks.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tokio::sync::mpsc;

use glint_types::DiagnosticsSnapshot;

use crate::config::LinterConfig;
use crate::diagnostics::DiagnosticsStore;
use crate::host::{EditorEvent, LinterProvider, ProviderRegistration};
use crate::render;
use crate::report::{self, RawDiagnostic};

/// Channel capacity for editor lifecycle events from the host.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Bridge between build reports and the host linter display.
///
/// Lifecycle: `[registered] → [destroyed]`, irreversible. After
/// [`destroy`](Self::destroy), every operation is a no-op.
pub struct Linter {
    provider: Box<dyn LinterProvider>,
    diagnostics: DiagnosticsStore,
    event_rx: mpsc::Receiver<EditorEvent>,
    event_tx: mpsc::Sender<EditorEvent>,
    /// Paths of editors currently open, tracked for close-time cleanup.
    open_editors: HashSet<PathBuf>,
    /// Last-observed opened editor path; the publish target when the
    /// caller does not name one.
    active_path: Option<PathBuf>,
    destroyed: bool,
}

impl Linter {
    /// Acquire a named provider from the host registry and construct the
    /// bridge around it.
    ///
    /// Construction IS registration — there is no two-phase init, and the
    /// host display API is assumed available once the closure returns.
    pub fn register<R>(config: &LinterConfig, registry: R) -> Self
    where
        R: FnOnce(ProviderRegistration) -> Box<dyn LinterProvider>,
    {
        let provider = registry(ProviderRegistration {
            name: config.name.clone(),
        });
        tracing::info!(name = %config.name, "Registered linter provider");
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            provider,
            diagnostics: DiagnosticsStore::new(),
            event_rx,
            event_tx,
            open_editors: HashSet::new(),
            active_path: None,
            destroyed: false,
        }
    }

    /// Sender half of the lifecycle channel, for the host to deliver
    /// [`EditorEvent`]s.
    #[must_use]
    pub fn event_sender(&self) -> mpsc::Sender<EditorEvent> {
        self.event_tx.clone()
    }

    /// Drain pending lifecycle events, up to `budget`.
    ///
    /// Non-blocking — returns immediately when no events are queued, and
    /// returns the number handled. After [`destroy`](Self::destroy) this
    /// handles nothing, even for events queued before teardown.
    pub fn poll_events(&mut self, budget: usize) -> usize {
        if self.destroyed {
            return 0;
        }
        let mut count = 0;
        while count < budget {
            match self.event_rx.try_recv() {
                Ok(event) => {
                    self.handle_event(event);
                    count += 1;
                }
                Err(mpsc::error::TryRecvError::Empty | mpsc::error::TryRecvError::Disconnected) => {
                    break;
                }
            }
        }
        count
    }

    fn handle_event(&mut self, event: EditorEvent) {
        match event {
            EditorEvent::Opened { path: None } => {
                // Editors with no backing file have no path to key
                // diagnostics by.
            }
            EditorEvent::Opened { path: Some(path) } => {
                self.active_path = Some(path.clone());
                self.open_editors.insert(path);
            }
            EditorEvent::Closed { path } => {
                if self.open_editors.remove(&path) {
                    tracing::debug!(
                        path = %path.display(),
                        "Editor closed; clearing its diagnostics"
                    );
                    self.diagnostics.update(path.clone(), Vec::new());
                    self.provider.set_messages(&path, Vec::new());
                }
            }
        }
    }

    /// Normalize a build report and publish it under `target`.
    ///
    /// An empty report clears the display for `target`. Malformed or
    /// missing fields degrade to defaults; publishing never fails.
    pub fn publish(&mut self, target: &Path, report: &[RawDiagnostic], cwd: &Path) {
        if self.destroyed {
            tracing::debug!("Ignoring publish on destroyed linter");
            return;
        }
        let items: Vec<_> = report
            .iter()
            .map(|raw| report::normalize(raw, cwd))
            .collect();
        tracing::debug!(
            path = %target.display(),
            count = items.len(),
            "Publishing build diagnostics"
        );
        self.provider.set_messages(target, render::render_all(&items));
        self.diagnostics.update(target.to_path_buf(), items);
    }

    /// Publish under the last-observed opened editor's path.
    ///
    /// Callers that know which file the build ran against should prefer
    /// [`publish`](Self::publish); this keys by whatever editor was
    /// opened most recently. The report is dropped when no editor with a
    /// backing file has been observed.
    pub fn publish_active(&mut self, report: &[RawDiagnostic], cwd: &Path) {
        let Some(target) = self.active_path.clone() else {
            tracing::debug!("No active editor path; dropping build report");
            return;
        };
        self.publish(&target, report, cwd);
    }

    /// Remove every diagnostic this provider has displayed.
    pub fn clear(&mut self) {
        if self.destroyed {
            return;
        }
        self.provider.clear_messages();
        self.diagnostics.clear();
    }

    /// Immutable snapshot of last-published diagnostics.
    #[must_use]
    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        self.diagnostics.snapshot()
    }

    /// Last-observed opened editor path.
    #[must_use]
    pub fn active_path(&self) -> Option<&Path> {
        self.active_path.as_deref()
    }

    /// Tear down the bridge: close the lifecycle channel and drop all
    /// editor tracking.
    ///
    /// Idempotent; every operation afterwards is a no-op with no display
    /// effects.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.event_rx.close();
        // Discard anything the host queued before teardown.
        while self.event_rx.try_recv().is_ok() {}
        self.open_editors.clear();
        self.active_path = None;
        tracing::debug!("Linter destroyed");
    }
}
