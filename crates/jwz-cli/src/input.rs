//! Reading tokens and key material from files or stdin.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

/// Where to read a token from.
#[derive(Args, Debug, Clone, Default)]
pub struct TokenSource {
    /// Token file. Omit or pass `-` to read stdin.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

impl TokenSource {
    /// Read the whole token text.
    pub fn read(&self) -> Result<String> {
        match &self.file {
            Some(path) if path.as_os_str() != "-" => read_text(path),
            _ => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("failed to read token from stdin")?;
                Ok(buf)
            }
        }
    }
}

/// Read a UTF-8 file.
pub fn read_text(path: &Path) -> Result<String> {
    if !path.exists() {
        bail!("file not found: {}", path.display());
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Read an opaque payload file. Empty files are allowed.
pub fn read_payload(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        bail!("file not found: {}", path.display());
    }
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Read key material as raw bytes.
pub fn read_key(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        bail!("key file not found: {}", path.display());
    }
    let key = std::fs::read(path)
        .with_context(|| format!("failed to read key: {}", path.display()))?;
    if key.is_empty() {
        bail!("key file is empty: {}", path.display());
    }
    Ok(key)
}
