use anyhow::{Context, Result};
use rollcall_core::gallery::Gallery;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

mod attendance_log;
mod config;
mod dbus_interface;
mod pipeline;
mod replay;
mod stream;

use attendance_log::CsvAttendanceLog;
use config::Config;
use dbus_interface::RollcallService;
use pipeline::SharedView;
use stream::{DisplaySink, MultipartStream, NullDisplay};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("rollcalld starting");

    let config = Config::from_env();

    // Missing or unreadable gallery is fatal: the daemon never starts
    // without its reference identities.
    let gallery = Gallery::load(&config.gallery_path)
        .with_context(|| format!("failed to load gallery from {}", config.gallery_path.display()))?;
    let gallery_size = gallery.len();

    if let Some(parent) = config.log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let sink = CsvAttendanceLog::create(&config.log_path)
        .with_context(|| format!("failed to open attendance log {}", config.log_path.display()))?;

    let view = Arc::new(Mutex::new(SharedView::default()));

    let _pipeline = match &config.replay_path {
        Some(path) => {
            let (source, detector) =
                replay::load(path).with_context(|| format!("failed to load replay {}", path.display()))?;

            let display: Box<dyn DisplaySink + Send> = match &config.stream_path {
                Some(stream_path) => {
                    let file = std::fs::File::create(stream_path).with_context(|| {
                        format!("failed to open display stream {}", stream_path.display())
                    })?;
                    tracing::info!(path = %stream_path.display(), "display stream open");
                    Box::new(MultipartStream::new(file))
                }
                None => Box::new(NullDisplay),
            };

            Some(pipeline::spawn_pipeline(
                Box::new(source),
                Box::new(detector),
                gallery,
                config.pipeline_params(),
                Box::new(sink),
                display,
                view.clone(),
            ))
        }
        None => {
            tracing::warn!(
                "no frame source configured (set ROLLCALL_REPLAY_PATH); serving queries only"
            );
            None
        }
    };

    let service = RollcallService::new(view.clone(), gallery_size);
    let _conn = zbus::connection::Builder::session()?
        .name("org.rollcall.Rollcall1")?
        .serve_at("/org/rollcall/Rollcall1", service)?
        .build()
        .await?;

    tracing::info!("rollcalld ready");

    tokio::signal::ctrl_c().await?;
    tracing::info!("rollcalld shutting down");

    Ok(())
}
