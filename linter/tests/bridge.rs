//! End-to-end: JSON build report in, dual-contract linter messages out.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_json::json;

use glint_linter::{
    EditorEvent, Linter, LinterConfig, LinterMessage, LinterProvider, parse_report,
};

#[derive(Default)]
struct Panel {
    messages: HashMap<PathBuf, Vec<LinterMessage>>,
}

struct PanelProvider(Arc<Mutex<Panel>>);

impl LinterProvider for PanelProvider {
    fn set_messages(&mut self, path: &Path, messages: Vec<LinterMessage>) {
        self.0
            .lock()
            .unwrap()
            .messages
            .insert(path.to_path_buf(), messages);
    }

    fn clear_messages(&mut self) {
        self.0.lock().unwrap().messages.clear();
    }
}

fn panel_linter() -> (Linter, Arc<Mutex<Panel>>) {
    let panel = Arc::new(Mutex::new(Panel::default()));
    let shared = Arc::clone(&panel);
    let linter = Linter::register(&LinterConfig::default(), move |_registration| {
        Box::new(PanelProvider(shared))
    });
    (linter, panel)
}

const REPORT: &str = r#"[
    {
        "type": "Error",
        "message": "undefined reference to `frob`",
        "file": "src/main.c",
        "line": 5,
        "col": 3,
        "trace": [
            { "file": "src/frob.h", "line": 2 }
        ]
    },
    {
        "type": "warning",
        "html_message": "<b>unused variable</b>",
        "file": "/abs/util.c",
        "line": 9,
        "col": 1,
        "line_end": 9,
        "col_end": 14
    }
]"#;

#[test]
fn report_renders_both_display_contracts() {
    let (mut linter, panel) = panel_linter();
    let report = parse_report(REPORT).unwrap();
    let target = PathBuf::from("/proj/src/main.c");

    linter.publish(&target, &report, Path::new("/proj"));

    let panel = panel.lock().unwrap();
    let published = serde_json::to_value(&panel.messages[&target]).unwrap();
    assert_eq!(
        published,
        json!([
            {
                "type": "Error",
                "text": "undefined reference to `frob`",
                "filePath": "/proj/src/main.c",
                "severity": "error",
                "range": [[4, 2], [4, 2]],
                "trace": [
                    {
                        "type": "Trace",
                        "text": "Trace in build",
                        "filePath": "/proj/src/frob.h",
                        "severity": "info",
                        "range": [[1, 0], [1, 0]],
                    }
                ],
                "location": {
                    "file": "/proj/src/main.c",
                    "position": [[4, 2], [4, 2]],
                },
                "excerpt": "undefined reference to `frob`",
            },
            {
                "type": "warning",
                "html": "<b>unused variable</b>",
                "filePath": "/abs/util.c",
                "severity": "warning",
                "range": [[8, 0], [8, 13]],
                "location": {
                    "file": "/abs/util.c",
                    "position": [[8, 0], [8, 13]],
                },
                "description": "<b>unused variable</b>",
            },
        ])
    );

    assert_eq!(linter.snapshot().status_string(), "E:1 W:1");
}

#[tokio::test]
async fn editor_lifecycle_drives_display_cleanup() {
    let (mut linter, panel) = panel_linter();
    let tx = linter.event_sender();
    let target = PathBuf::from("/proj/src/main.c");

    tx.send(EditorEvent::Opened {
        path: Some(target.clone()),
    })
    .await
    .unwrap();
    linter.poll_events(10);

    let report = parse_report(REPORT).unwrap();
    linter.publish_active(&report, Path::new("/proj"));
    assert_eq!(panel.lock().unwrap().messages[&target].len(), 2);

    tx.send(EditorEvent::Closed {
        path: target.clone(),
    })
    .await
    .unwrap();
    linter.poll_events(10);

    assert!(panel.lock().unwrap().messages[&target].is_empty());
    assert!(linter.snapshot().is_empty());
}
