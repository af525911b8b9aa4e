//! File/code adapted from https://github.com/jamjamjon/usls
//!
//! Represents the directories the crate reads configuration from.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "vb_detect";

#[derive(Debug)]
pub enum FsAccess {
    Config,
}

impl FsAccess {
    /// Base path for the directory type with the app subdirectory appended.
    fn get_path(&self) -> anyhow::Result<PathBuf> {
        let base_path = match self {
            FsAccess::Config => dirs::config_dir(),
        };

        let mut path = base_path.ok_or_else(|| {
            anyhow::anyhow!("Unsupported operating system. Supported OS: Linux, MacOS, Windows.")
        })?;
        path.push(APP_DIR);
        Ok(path)
    }

    /// Returns the default path for the app directory, creating it automatically if it does not exist.
    ///
    /// Example: `~/.config/vb_detect`.
    pub fn path(&self) -> anyhow::Result<PathBuf> {
        let d = self.get_path()?;
        Self::create_directory(&d)?;
        Ok(d)
    }

    fn create_directory(path: &Path) -> anyhow::Result<()> {
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        Ok(())
    }
}
