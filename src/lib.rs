pub mod config;
pub mod deck;
pub mod error;
pub mod store;
pub mod timer;
pub mod trial;

use anyhow::Context;
use anyhow::Result;
use std::fs::create_dir_all;
use std::path::PathBuf;

pub fn log_dir() -> Result<PathBuf> {
    let path = dirs::cache_dir()
        .context("no cache directory on this platform")?
        .join("flashcard-trainer");
    create_dir_all(&path).with_context(|| format!("Failed to create directory {:?}", path))?;
    Ok(path)
}
