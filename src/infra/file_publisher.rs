use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::{error, info};

use crate::app::ports::PublisherPort;

/// Publishes messages as content-addressed files, one directory per destination.
///
/// Publishing the same text twice to a destination is a no-op the second time.
pub struct FileQueuePublisher {
    root: PathBuf,
}

impl FileQueuePublisher {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    async fn write(&self, text: &str, destination: &str) -> anyhow::Result<PathBuf> {
        if destination.is_empty()
            || destination.contains(['/', '\\'])
            || destination == "."
            || destination == ".."
        {
            anyhow::bail!("invalid destination name {:?}", destination);
        }
        let digest = Sha256::digest(text.as_bytes());
        let hex = hex::encode(digest);
        let dir = self.root.join(destination);
        tokio::fs::create_dir_all(&dir).await?;
        let path = dir.join(format!("{}.xml", hex));
        if !tokio::fs::try_exists(&path).await? {
            tokio::fs::write(&path, text.as_bytes()).await?;
        }
        Ok(path)
    }
}

#[async_trait]
impl PublisherPort for FileQueuePublisher {
    async fn publish(&self, text: &str, destination: &str, label: &str) -> Result<(), String> {
        match self.write(text, destination).await {
            Ok(path) => {
                info!(
                    "{} Message published successfully to {} ({})",
                    label,
                    destination,
                    path.display()
                );
                Ok(())
            }
            Err(e) => {
                error!("{} Message publishing failed to {}: {}", label, destination, e);
                Err(e.to_string())
            }
        }
    }
}
