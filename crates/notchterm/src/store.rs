use notchterm_core::config::StateFile;
use notchterm_core::ids::IdGenerator;
use notchterm_core::models::workspace::WORKSPACE_SCHEMA_VERSION;
use notchterm_core::models::{Workspace, WorkspaceState, WorkspaceTab};
use notchterm_core::ChangeNotifier;
use notchterm_terminal::{SessionRegistry, TerminalSession};
use tracing::{debug, warn};
use uuid::Uuid;

const DEFAULT_WORKSPACE_NAME: &str = "Default";
const DEFAULT_TAB_TITLE: &str = "Shell";

/// The workspace orchestrator.
///
/// Owns the workspace list and activation state, and drives the session
/// registry in lockstep with tab lifecycle. All mutations happen on the
/// caller's thread (user-driven UI events are already serialized); every
/// mutating operation persists the full state and notifies subscribers.
pub struct WorkspaceStore {
    workspaces: Vec<Workspace>,
    active_workspace_id: Option<Uuid>,
    persistence: StateFile<WorkspaceState>,
    registry: SessionRegistry,
    ids: Box<dyn IdGenerator>,
    notifier: ChangeNotifier,
}

impl WorkspaceStore {
    /// Load persisted state (or start fresh), synthesize a default
    /// workspace if the list is empty, hydrate sessions for every
    /// workspace, and persist the result.
    pub fn new(
        persistence: StateFile<WorkspaceState>,
        registry: SessionRegistry,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        let mut store = Self {
            workspaces: Vec::new(),
            active_workspace_id: None,
            persistence,
            registry,
            ids,
            notifier: ChangeNotifier::new(),
        };

        match store.persistence.load() {
            Ok(state) => {
                store.workspaces = state.workspaces;
                store.active_workspace_id = state.active_workspace_id;
                debug!("Loaded {} workspaces", store.workspaces.len());
            }
            Err(e) => {
                debug!("No usable workspace state ({}), starting fresh", e);
            }
        }

        if store.workspaces.is_empty() {
            let id = store.ids.next_id();
            store
                .workspaces
                .push(Workspace::new(id, DEFAULT_WORKSPACE_NAME));
            store.active_workspace_id = Some(id);
            debug!("Synthesized default workspace {}", id);
        }

        let active_is_valid = store
            .active_workspace_id
            .is_some_and(|id| store.workspaces.iter().any(|w| w.id == id));
        if !active_is_valid {
            store.active_workspace_id = store.workspaces.first().map(|w| w.id);
        }

        for workspace in &store.workspaces {
            store.registry.hydrate(workspace.id, &workspace.tabs);
        }

        store.save();
        store.ensure_initial_tabs();
        store
    }

    // --- Mutations (each persists and notifies) ---

    /// Append a new empty workspace and make it active.
    pub fn create_workspace(&mut self, name: impl Into<String>) {
        let id = self.ids.next_id();
        self.workspaces.push(Workspace::new(id, name));
        self.active_workspace_id = Some(id);
        self.save();
        self.notifier.notify();
    }

    /// Switch the active workspace, then make sure it has a usable tab.
    pub fn set_active_workspace(&mut self, id: Uuid) {
        if !self.workspaces.iter().any(|w| w.id == id) {
            warn!("Ignoring activation of unknown workspace {}", id);
            return;
        }
        self.active_workspace_id = Some(id);
        self.ensure_initial_tabs();
        self.save();
        self.notifier.notify();
    }

    /// Open a new tab on the active workspace and spawn its session.
    ///
    /// If the spawn fails the tab is kept without a backing session; the
    /// surface shows a placeholder for it.
    pub fn create_tab(&mut self) {
        let Some(workspace_id) = self.active_workspace_id else {
            // Unreachable after initialization, but defended.
            warn!("create_tab with no active workspace");
            return;
        };
        let tab_id = self.ids.next_id();
        let Some(workspace) = self.workspace_mut(workspace_id) else {
            return;
        };
        workspace
            .tabs
            .push(WorkspaceTab::new(tab_id, DEFAULT_TAB_TITLE));
        workspace.active_tab_id = Some(tab_id);

        if let Err(e) = self
            .registry
            .create_session(workspace_id, tab_id, DEFAULT_TAB_TITLE)
        {
            warn!("Failed to spawn session for tab {}: {}", tab_id, e);
        }
        self.save();
        self.notifier.notify();
    }

    /// Close a tab on the active workspace and terminate its session.
    /// When the closed tab was active, the first remaining tab becomes
    /// active (deliberate tie-break, not most-recently-used).
    pub fn close_tab(&mut self, tab_id: Uuid) {
        let Some(workspace_id) = self.active_workspace_id else {
            return;
        };
        let Some(workspace) = self.workspace_mut(workspace_id) else {
            return;
        };
        let before = workspace.tabs.len();
        workspace.tabs.retain(|t| t.id != tab_id);
        if workspace.tabs.len() == before {
            return;
        }
        if workspace.active_tab_id == Some(tab_id) {
            workspace.active_tab_id = workspace.tabs.first().map(|t| t.id);
        }
        self.registry.remove_session(workspace_id, tab_id);
        self.save();
        self.notifier.notify();
    }

    /// Switch the active tab. Ids not belonging to the active workspace
    /// are rejected.
    pub fn set_active_tab(&mut self, tab_id: Uuid) {
        let Some(workspace_id) = self.active_workspace_id else {
            return;
        };
        let Some(workspace) = self.workspace_mut(workspace_id) else {
            return;
        };
        if !workspace.contains_tab(tab_id) {
            warn!(
                "Ignoring activation of tab {} not in workspace {}",
                tab_id, workspace_id
            );
            return;
        }
        workspace.active_tab_id = Some(tab_id);
        self.save();
        self.notifier.notify();
    }

    /// Rename the active workspace. The name is trimmed; a blank result
    /// is rejected.
    pub fn rename_active_workspace(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let Some(workspace) = self.active_workspace_mut() else {
            return;
        };
        workspace.name = name.to_string();
        self.save();
        self.notifier.notify();
    }

    /// Delete the active workspace and all its sessions. The list is never
    /// left empty: a fresh default workspace is synthesized if needed.
    pub fn delete_active_workspace(&mut self) {
        let Some(workspace_id) = self.active_workspace_id else {
            return;
        };
        self.registry.remove_workspace(workspace_id);
        self.workspaces.retain(|w| w.id != workspace_id);

        if self.workspaces.is_empty() {
            let id = self.ids.next_id();
            self.workspaces
                .push(Workspace::new(id, DEFAULT_WORKSPACE_NAME));
            self.active_workspace_id = Some(id);
        } else {
            self.active_workspace_id = self.workspaces.first().map(|w| w.id);
        }

        self.ensure_initial_tabs();
        self.save();
        self.notifier.notify();
    }

    /// Self-healing step: the active workspace always ends up with at
    /// least one tab and a selected tab.
    pub fn ensure_initial_tabs(&mut self) {
        let Some(workspace) = self.active_workspace() else {
            return;
        };
        let needs_tab = workspace.tabs.is_empty();
        let first_tab = workspace.tabs.first().map(|t| t.id);
        let missing_selection = workspace.active_tab_id.is_none();

        if needs_tab {
            self.create_tab();
        } else if missing_selection {
            if let Some(workspace) = self.active_workspace_mut() {
                workspace.active_tab_id = first_tab;
            }
            self.save();
            self.notifier.notify();
        }
    }

    /// Suggested name for the next workspace; not enforced unique.
    pub fn next_workspace_name(&self) -> String {
        format!("Workspace {}", self.workspaces.len() + 1)
    }

    // --- Derived read-only views ---

    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    pub fn active_workspace_id(&self) -> Option<Uuid> {
        self.active_workspace_id
    }

    pub fn active_workspace(&self) -> Option<&Workspace> {
        let id = self.active_workspace_id?;
        self.workspaces.iter().find(|w| w.id == id)
    }

    pub fn active_workspace_name(&self) -> Option<&str> {
        self.active_workspace().map(|w| w.name.as_str())
    }

    pub fn active_tabs(&self) -> &[WorkspaceTab] {
        self.active_workspace()
            .map(|w| w.tabs.as_slice())
            .unwrap_or(&[])
    }

    pub fn active_tab_id(&self) -> Option<Uuid> {
        self.active_workspace()?.active_tab_id
    }

    /// The session behind the active tab, if one is alive.
    pub fn active_session(&self) -> Option<&TerminalSession> {
        let workspace = self.active_workspace()?;
        self.registry.session(workspace.id, workspace.active_tab_id)
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SessionRegistry {
        &mut self.registry
    }

    /// Register a callback invoked after every mutation.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: Fn() + Send + 'static,
    {
        self.notifier.subscribe(callback);
    }

    /// Terminate every session; called on app shutdown.
    pub fn shutdown(&mut self) {
        self.registry.shutdown();
    }

    // --- Internal ---

    fn workspace_mut(&mut self, id: Uuid) -> Option<&mut Workspace> {
        self.workspaces.iter_mut().find(|w| w.id == id)
    }

    fn active_workspace_mut(&mut self) -> Option<&mut Workspace> {
        let id = self.active_workspace_id?;
        self.workspace_mut(id)
    }

    /// Persist the full state. Failures never surface to the caller, but
    /// they are visible in the logs.
    fn save(&self) {
        let state = WorkspaceState {
            version: WORKSPACE_SCHEMA_VERSION,
            active_workspace_id: self.active_workspace_id,
            workspaces: self.workspaces.clone(),
        };
        if let Err(e) = self.persistence.save(&state) {
            warn!(
                "Failed to persist workspace state to {}: {}",
                self.persistence.path().display(),
                e
            );
        }
    }
}
