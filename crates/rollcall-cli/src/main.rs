use anyhow::Result;
use clap::{Parser, Subcommand};
use rollcall_core::gallery::{Gallery, Identity};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rollcall", about = "Rollcall attendance CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the latest per-frame classification
    Current,
    /// List everyone checked in so far
    Attendance,
    /// Show daemon status
    Status,
    /// Inspect a gallery file
    Gallery {
        /// Path to the gallery JSON file
        path: PathBuf,
    },
}

#[zbus::proxy(
    interface = "org.rollcall.Rollcall1",
    default_service = "org.rollcall.Rollcall1",
    default_path = "/org/rollcall/Rollcall1"
)]
trait Rollcall {
    async fn current_status(&self) -> zbus::Result<String>;
    async fn attendance(&self) -> zbus::Result<String>;
    async fn status(&self) -> zbus::Result<String>;
}

async fn connect() -> Result<RollcallProxy<'static>> {
    let conn = zbus::Connection::session().await?;
    Ok(RollcallProxy::new(&conn).await?)
}

fn show_gallery(path: &Path) -> Result<()> {
    let gallery = Gallery::load(path)?;
    println!("{} identities", gallery.len());
    for entry in gallery.entries() {
        let id = Identity::parse(&entry.key);
        println!(
            "{:<10} {:<28} dim={}",
            id.roll_number,
            id.name,
            entry.embedding.values.len()
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Current => {
            println!("{}", connect().await?.current_status().await?);
        }
        Commands::Attendance => {
            println!("{}", connect().await?.attendance().await?);
        }
        Commands::Status => {
            println!("{}", connect().await?.status().await?);
        }
        Commands::Gallery { path } => {
            show_gallery(&path)?;
        }
    }

    Ok(())
}
