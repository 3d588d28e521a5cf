use crate::pipeline::SharedView;
use std::sync::{Arc, Mutex};
use zbus::interface;

/// D-Bus interface for the Rollcall attendance daemon.
///
/// Bus name: org.rollcall.Rollcall1
/// Object path: /org/rollcall/Rollcall1
///
/// Payloads are JSON strings; the pipeline loop is the only writer of
/// the shared view, so every reply is an atomic snapshot.
pub struct RollcallService {
    view: Arc<Mutex<SharedView>>,
    gallery_size: usize,
}

impl RollcallService {
    pub fn new(view: Arc<Mutex<SharedView>>, gallery_size: usize) -> Self {
        Self { view, gallery_size }
    }

    fn locked(&self) -> zbus::fdo::Result<std::sync::MutexGuard<'_, SharedView>> {
        self.view
            .lock()
            .map_err(|_| zbus::fdo::Error::Failed("shared state lock poisoned".into()))
    }
}

#[interface(name = "org.rollcall.Rollcall1")]
impl RollcallService {
    /// Latest per-frame classification (name, roll number, status).
    async fn current_status(&self) -> zbus::fdo::Result<String> {
        let view = self.locked()?;
        serde_json::to_string(&view.current)
            .map_err(|e| zbus::fdo::Error::Failed(e.to_string()))
    }

    /// Everyone checked in so far, ordered by roll number.
    async fn attendance(&self) -> zbus::fdo::Result<String> {
        let view = self.locked()?;
        serde_json::to_string(&view.attendance)
            .map_err(|e| zbus::fdo::Error::Failed(e.to_string()))
    }

    /// Daemon health information.
    async fn status(&self) -> zbus::fdo::Result<String> {
        let checked_in = self.locked()?.attendance.len();
        Ok(serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "gallery_identities": self.gallery_size,
            "checked_in": checked_in,
        })
        .to_string())
    }
}
