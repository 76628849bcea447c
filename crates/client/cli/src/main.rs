//! Headless skirmish runner.
//!
//! Loads the content pack, runs one encounter on the wall-clock scheduler
//! with a fixed player rotation, streams the combat log to stdout and
//! prints a JSON summary when the combat ends.
mod config;
mod logging;
mod session;

use anyhow::Result;
use config::SkirmishConfig;
use session::Session;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SkirmishConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    let session = Session::prepare(&config).await?;
    let summary = session.run().await?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
