use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing::debug;

use crate::error::{CoreError, Result};
use crate::models::{ThemeState, WorkspaceState};

/// One persisted JSON document on disk.
///
/// Each concern (workspace tree, theme) gets its own `StateFile` with its
/// own path; the contract is identical for both. Writes are atomic
/// (temp-file-then-rename, never a partially written document). Loads are
/// strict: a missing or malformed file is an error, and the caller decides
/// what the fallback is.
#[derive(Debug, Clone)]
pub struct StateFile<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl StateFile<WorkspaceState> {
    /// The workspace tree document under the app support directory.
    pub fn workspaces() -> Self {
        Self::at(super::paths::support_dir().join("workspaces.json"))
    }
}

impl StateFile<ThemeState> {
    /// The theme document under the app support directory.
    pub fn theme() -> Self {
        Self::at(super::paths::support_dir().join("theme.json"))
    }
}

impl<T: Serialize + DeserializeOwned> StateFile<T> {
    /// A document at an explicit path (used by tests).
    pub fn at(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Save the value, creating intermediate directories as needed.
    ///
    /// The document is written to a sibling `.tmp` file and renamed into
    /// place, so a crash mid-write leaves the previous document intact.
    pub fn save(&self, value: &T) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.exists() {
                std::fs::create_dir_all(dir)?;
            }
        }

        let content = serde_json::to_string_pretty(value).map_err(|e| {
            CoreError::Serialization(format!(
                "Failed to serialize {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!("Saved state to {}", self.path.display());

        Ok(())
    }

    /// Load the value. Missing file surfaces as an IO error, malformed
    /// content as a serialization error; no implicit defaulting here.
    pub fn load(&self) -> Result<T> {
        let content = std::fs::read_to_string(&self.path)?;
        let value = serde_json::from_str(&content).map_err(|e| {
            CoreError::Serialization(format!(
                "Failed to parse {}: {}",
                self.path.display(),
                e
            ))
        })?;
        debug!("Loaded state from {}", self.path.display());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Workspace, WorkspaceState, WorkspaceTab};
    use uuid::Uuid;

    fn sample_state() -> WorkspaceState {
        let tab_a = WorkspaceTab::new(Uuid::from_u128(1), "Shell");
        let tab_b = WorkspaceTab::new(Uuid::from_u128(2), "Build");
        let mut workspace = Workspace::new(Uuid::from_u128(10), "Work");
        workspace.tabs = vec![tab_a, tab_b];
        workspace.active_tab_id = Some(Uuid::from_u128(2));
        WorkspaceState {
            version: 1,
            active_workspace_id: Some(Uuid::from_u128(10)),
            workspaces: vec![workspace],
        }
    }

    #[test]
    fn test_round_trip_preserves_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let file = StateFile::at(dir.path().join("workspaces.json"));

        let state = sample_state();
        file.save(&state).unwrap();
        let loaded = file.load().unwrap();

        assert_eq!(loaded, state);
    }

    #[test]
    fn test_save_creates_intermediate_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file: StateFile<WorkspaceState> =
            StateFile::at(dir.path().join("nested").join("deeper").join("workspaces.json"));

        file.save(&sample_state()).unwrap();
        assert!(file.path().exists());
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file: StateFile<WorkspaceState> = StateFile::at(dir.path().join("absent.json"));

        assert!(matches!(file.load(), Err(CoreError::Io(_))));
    }

    #[test]
    fn test_load_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workspaces.json");
        std::fs::write(&path, "{ not json").unwrap();

        let file: StateFile<WorkspaceState> = StateFile::at(path);
        assert!(matches!(file.load(), Err(CoreError::Serialization(_))));
    }

    #[test]
    fn test_save_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let file = StateFile::at(dir.path().join("workspaces.json"));
        file.save(&sample_state()).unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec!["workspaces.json"]);
    }

    #[test]
    fn test_version_field_defaults_when_absent() {
        // Files written before the version field existed must still load.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workspaces.json");
        std::fs::write(
            &path,
            r#"{ "activeWorkspaceID": null, "workspaces": [] }"#,
        )
        .unwrap();

        let file: StateFile<WorkspaceState> = StateFile::at(path);
        let state = file.load().unwrap();
        assert_eq!(state.version, 1);
        assert!(state.workspaces.is_empty());
    }
}
