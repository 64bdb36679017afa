use std::path::{Path, PathBuf};

use crate::error::ProvisionerError;
use crate::state::StackState;

/// Local-disk state persistence.
pub struct StatePersistence {
    pub local_path: PathBuf,
}

impl StatePersistence {
    pub fn new(local_path: impl Into<PathBuf>) -> Self {
        Self {
            local_path: local_path.into(),
        }
    }

    /// `<state_dir>/<project>/<stack>.json`
    pub fn for_stack(state_dir: &Path, project: &str, stack: &str) -> Self {
        Self::new(state_dir.join(project).join(format!("{stack}.json")))
    }

    /// Write state atomically: tmp file, then rename over the old one.
    pub async fn flush(&self, state: &StackState) -> Result<(), ProvisionerError> {
        let json = serde_json::to_vec_pretty(state)?;
        if let Some(parent) = self.local_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp_path = self.local_path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &json)?;
        std::fs::rename(&tmp_path, &self.local_path)?;

        tracing::debug!(path = %self.local_path.display(), "state flushed to local disk");
        Ok(())
    }

    /// Load state; a missing file means a fresh stack.
    pub async fn load(&self) -> Result<StackState, ProvisionerError> {
        if self.local_path.exists() {
            let json = std::fs::read(&self.local_path)?;
            let state: StackState = serde_json::from_slice(&json)?;
            tracing::debug!(
                path = %self.local_path.display(),
                resources = state.resources.len(),
                "state loaded from local disk"
            );
            return Ok(state);
        }

        tracing::debug!(path = %self.local_path.display(), "no existing state found, starting fresh");
        Ok(StackState::default())
    }
}
