use crate::factory::SessionFactory;
use crate::session::TerminalSession;
use notchterm_core::models::WorkspaceTab;
use std::collections::HashMap;
use tracing::{debug, warn};
use uuid::Uuid;

/// Owns every live terminal session, grouped per workspace in tab order.
///
/// The registry is deliberately ignorant of *why* a session exists; the
/// workspace store drives it in lockstep with tab lifecycle.
pub struct SessionRegistry {
    factory: Box<dyn SessionFactory>,
    sessions: HashMap<Uuid, Vec<TerminalSession>>,
}

impl SessionRegistry {
    pub fn new(factory: Box<dyn SessionFactory>) -> Self {
        Self {
            factory,
            sessions: HashMap::new(),
        }
    }

    /// Replace the session list for a workspace with one freshly spawned
    /// session per persisted tab, preserving tab order.
    ///
    /// Any live sessions the workspace already had are terminated first, so
    /// re-hydration cannot leak processes. A tab whose spawn fails is left
    /// without a session (the surface shows its placeholder) rather than
    /// aborting the rest of the workspace.
    pub fn hydrate(&mut self, workspace_id: Uuid, tabs: &[WorkspaceTab]) {
        if let Some(mut old) = self.sessions.remove(&workspace_id) {
            for session in &mut old {
                session.terminate();
            }
        }

        let mut fresh = Vec::with_capacity(tabs.len());
        for tab in tabs {
            match self.factory.create(tab.id, &tab.title) {
                Ok(session) => fresh.push(session),
                Err(e) => {
                    warn!(
                        "Failed to hydrate session for tab {} in workspace {}: {}",
                        tab.id, workspace_id, e
                    );
                }
            }
        }
        debug!(
            "Hydrated workspace {} with {} sessions",
            workspace_id,
            fresh.len()
        );
        self.sessions.insert(workspace_id, fresh);
    }

    /// Spawn one new session and append it to the workspace's list.
    pub fn create_session(
        &mut self,
        workspace_id: Uuid,
        tab_id: Uuid,
        title: &str,
    ) -> crate::Result<()> {
        let session = self.factory.create(tab_id, title)?;
        self.sessions.entry(workspace_id).or_default().push(session);
        debug!("Created session {} in workspace {}", tab_id, workspace_id);
        Ok(())
    }

    /// Terminate and remove the session for a tab. Removing an absent id
    /// is a no-op.
    pub fn remove_session(&mut self, workspace_id: Uuid, tab_id: Uuid) {
        let Some(list) = self.sessions.get_mut(&workspace_id) else {
            return;
        };
        if let Some(pos) = list.iter().position(|s| s.id == tab_id) {
            let mut session = list.remove(pos);
            session.terminate();
            debug!("Removed session {} from workspace {}", tab_id, workspace_id);
        }
    }

    /// Terminate and remove every session of a workspace.
    pub fn remove_workspace(&mut self, workspace_id: Uuid) {
        if let Some(mut list) = self.sessions.remove(&workspace_id) {
            for session in &mut list {
                session.terminate();
            }
            debug!(
                "Removed {} sessions for workspace {}",
                list.len(),
                workspace_id
            );
        }
    }

    /// Look up a session; `None` when `tab_id` is `None` or unmatched.
    pub fn session(&self, workspace_id: Uuid, tab_id: Option<Uuid>) -> Option<&TerminalSession> {
        let tab_id = tab_id?;
        self.sessions
            .get(&workspace_id)?
            .iter()
            .find(|s| s.id == tab_id)
    }

    pub fn session_mut(
        &mut self,
        workspace_id: Uuid,
        tab_id: Option<Uuid>,
    ) -> Option<&mut TerminalSession> {
        let tab_id = tab_id?;
        self.sessions
            .get_mut(&workspace_id)?
            .iter_mut()
            .find(|s| s.id == tab_id)
    }

    /// All sessions of a workspace, in tab order.
    pub fn sessions(&self, workspace_id: Uuid) -> &[TerminalSession] {
        self.sessions
            .get(&workspace_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn session_count(&self, workspace_id: Uuid) -> usize {
        self.sessions.get(&workspace_id).map_or(0, Vec::len)
    }

    /// Terminate everything; called on app shutdown.
    pub fn shutdown(&mut self) {
        for (_, mut list) in self.sessions.drain() {
            for session in &mut list {
                session.terminate();
            }
        }
        debug!("Session registry shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TerminalError;

    struct StubFactory;

    impl SessionFactory for StubFactory {
        fn create(&self, tab_id: Uuid, title: &str) -> crate::Result<TerminalSession> {
            Ok(TerminalSession::detached(tab_id, title))
        }
    }

    struct FailingFactory;

    impl SessionFactory for FailingFactory {
        fn create(&self, _tab_id: Uuid, _title: &str) -> crate::Result<TerminalSession> {
            Err(TerminalError::Spawn("fork failed".to_string()))
        }
    }

    fn registry() -> SessionRegistry {
        SessionRegistry::new(Box::new(StubFactory))
    }

    fn tab(n: u128) -> WorkspaceTab {
        WorkspaceTab::new(Uuid::from_u128(n), format!("Tab {}", n))
    }

    #[test]
    fn test_hydrate_preserves_tab_order_and_identity() {
        let mut registry = registry();
        let workspace = Uuid::from_u128(100);
        let tabs = vec![tab(1), tab(2), tab(3)];

        registry.hydrate(workspace, &tabs);

        let ids: Vec<_> = registry.sessions(workspace).iter().map(|s| s.id).collect();
        assert_eq!(
            ids,
            vec![Uuid::from_u128(1), Uuid::from_u128(2), Uuid::from_u128(3)]
        );
    }

    #[test]
    fn test_rehydrate_replaces_instead_of_accumulating() {
        let mut registry = registry();
        let workspace = Uuid::from_u128(100);

        registry.hydrate(workspace, &[tab(1), tab(2)]);
        registry.hydrate(workspace, &[tab(3)]);

        assert_eq!(registry.session_count(workspace), 1);
        assert!(registry
            .session(workspace, Some(Uuid::from_u128(3)))
            .is_some());
    }

    #[test]
    fn test_sessions_are_workspace_scoped() {
        let mut registry = registry();
        let x = Uuid::from_u128(100);
        let y = Uuid::from_u128(200);

        registry.create_session(x, Uuid::from_u128(1), "Shell").unwrap();
        registry.create_session(y, Uuid::from_u128(2), "Shell").unwrap();

        assert_eq!(registry.session_count(x), 1);
        assert_eq!(registry.session_count(y), 1);
        assert!(registry.session(x, Some(Uuid::from_u128(2))).is_none());
        assert!(registry.session(y, Some(Uuid::from_u128(1))).is_none());
    }

    #[test]
    fn test_remove_session_is_idempotent() {
        let mut registry = registry();
        let workspace = Uuid::from_u128(100);
        let tab_id = Uuid::from_u128(1);

        registry.create_session(workspace, tab_id, "Shell").unwrap();
        registry.remove_session(workspace, tab_id);
        assert_eq!(registry.session_count(workspace), 0);

        // Second removal: no error, no side effect.
        registry.remove_session(workspace, tab_id);
        assert_eq!(registry.session_count(workspace), 0);

        // Unknown workspace: also a no-op.
        registry.remove_session(Uuid::from_u128(999), tab_id);
    }

    #[test]
    fn test_lookup_with_none_or_unknown_id() {
        let mut registry = registry();
        let workspace = Uuid::from_u128(100);
        registry.create_session(workspace, Uuid::from_u128(1), "Shell").unwrap();

        assert!(registry.session(workspace, None).is_none());
        assert!(registry.session(workspace, Some(Uuid::from_u128(9))).is_none());
        assert!(registry.session(workspace, Some(Uuid::from_u128(1))).is_some());
    }

    #[test]
    fn test_create_session_surfaces_spawn_failure() {
        let mut registry = SessionRegistry::new(Box::new(FailingFactory));
        let workspace = Uuid::from_u128(100);

        let result = registry.create_session(workspace, Uuid::from_u128(1), "Shell");
        assert!(matches!(result, Err(TerminalError::Spawn(_))));
        assert_eq!(registry.session_count(workspace), 0);
    }

    #[test]
    fn test_hydrate_skips_failing_tabs() {
        let mut registry = SessionRegistry::new(Box::new(FailingFactory));
        let workspace = Uuid::from_u128(100);

        registry.hydrate(workspace, &[tab(1), tab(2)]);
        assert_eq!(registry.session_count(workspace), 0);
    }

    #[test]
    fn test_remove_workspace_drops_all_sessions() {
        let mut registry = registry();
        let workspace = Uuid::from_u128(100);
        registry.hydrate(workspace, &[tab(1), tab(2)]);

        registry.remove_workspace(workspace);
        assert_eq!(registry.session_count(workspace), 0);
    }

    #[test]
    fn test_shutdown_clears_every_workspace() {
        let mut registry = registry();
        registry.hydrate(Uuid::from_u128(100), &[tab(1)]);
        registry.hydrate(Uuid::from_u128(200), &[tab(2)]);

        registry.shutdown();
        assert_eq!(registry.session_count(Uuid::from_u128(100)), 0);
        assert_eq!(registry.session_count(Uuid::from_u128(200)), 0);
    }
}
