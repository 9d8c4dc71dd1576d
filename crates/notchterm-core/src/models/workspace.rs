use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current schema version written to persisted workspace documents.
pub const WORKSPACE_SCHEMA_VERSION: u32 = 1;

fn schema_version() -> u32 {
    WORKSPACE_SCHEMA_VERSION
}

/// One terminal slot inside a workspace: title and identity only.
/// The live session lives in the session registry, keyed by this id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkspaceTab {
    pub id: Uuid,
    pub title: String,
}

impl WorkspaceTab {
    pub fn new(id: Uuid, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// A named, independently switchable collection of terminal tabs.
///
/// `active_tab_id` is either `None` or the id of one of `tabs`; the store
/// repairs any drift after every mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Workspace {
    pub id: Uuid,
    pub name: String,
    pub tabs: Vec<WorkspaceTab>,
    #[serde(rename = "activeTabID")]
    pub active_tab_id: Option<Uuid>,
}

impl Workspace {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tabs: Vec::new(),
            active_tab_id: None,
        }
    }

    pub fn tab(&self, id: Uuid) -> Option<&WorkspaceTab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn contains_tab(&self, id: Uuid) -> bool {
        self.tab(id).is_some()
    }
}

/// Persisted root: the workspace list plus which workspace is displayed.
///
/// Field names match the original on-disk documents; `version` was added
/// later and defaults on read so older files still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkspaceState {
    #[serde(default = "schema_version")]
    pub version: u32,
    #[serde(rename = "activeWorkspaceID")]
    pub active_workspace_id: Option<Uuid>,
    pub workspaces: Vec<Workspace>,
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self {
            version: WORKSPACE_SCHEMA_VERSION,
            active_workspace_id: None,
            workspaces: Vec::new(),
        }
    }
}
