//! Node-info sidecar file
//!
//! Diagnostic lines are appended to `<data_dir>/<file_name>` from a
//! background task. Failures are logged and dropped; callers never wait on
//! or retry a save.

use crate::config::Config;
use crate::Result;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Append-only diagnostic file under the data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfoFile {
    path: PathBuf,
}

impl NodeInfoFile {
    pub fn new(data_dir: impl AsRef<Path>, file_name: &str) -> Self {
        Self {
            path: data_dir.as_ref().join(file_name),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            path: config.node_info_path(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `info` and a newline in the background.
    ///
    /// Returns the task handle, or `None` when called outside a Tokio
    /// runtime, in which case the line is dropped and an error is logged.
    pub fn save(&self, info: impl Into<String>) -> Option<JoinHandle<()>> {
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "no runtime to save node info");
                return None;
            }
        };

        let path = self.path.clone();
        let line = info.into();
        Some(handle.spawn(async move {
            if let Err(e) = append_line(&path, &line).await {
                error!(
                    path = %path.display(),
                    error = %e,
                    category = e.category(),
                    "failed to save node info"
                );
            }
        }))
    }

    /// Append `info` and a newline, reporting failures to the caller
    pub async fn append(&self, info: &str) -> Result<()> {
        append_line(&self.path, info).await
    }

    /// Remove the file; a missing file is not an error
    pub async fn delete(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "deleted node info file");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

async fn append_line(path: &Path, line: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let file = OpenOptions::new().create(true).append(true).open(path).await?;
    let mut writer = BufWriter::new(file);
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
