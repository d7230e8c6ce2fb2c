//! Durable record of the last observed status and notification thread

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AlerterError, Result};

/// State persisted between ticks and across restarts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PersistedState {
    /// Status observed on the previous tick
    #[serde(rename = "postgresIsUp")]
    pub was_up: bool,
    /// Root identifier of the last notification thread, empty if none
    #[serde(rename = "lastThreadTimestamp")]
    pub last_thread_id: String,
}

/// Read and parse the state file
pub fn load(path: &Path) -> Result<PersistedState> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        AlerterError::StateUnavailable {
            path: path.to_path_buf(),
            source,
        }
    })?;
    serde_yaml::from_str(&content).map_err(|source| AlerterError::StateCorrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Overwrite the state file in full
pub fn save(path: &Path, state: &PersistedState) -> Result<()> {
    let content = serde_yaml::to_string(state).map_err(|e| AlerterError::Persist {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    std::fs::write(path, content).map_err(|e| AlerterError::Persist {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    tracing::debug!("Stored state {:?} to {:?}", state, path);
    Ok(())
}

/// Fail unless the state file exists.
///
/// The file must be provisioned before the service starts.
pub fn ensure_present(path: &Path) -> Result<()> {
    std::fs::metadata(path)
        .map(|_| ())
        .map_err(|source| AlerterError::StateUnavailable {
            path: path.to_path_buf(),
            source,
        })
}
