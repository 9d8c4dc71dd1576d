use notchterm_core::config::StateFile;
use notchterm_core::models::{Theme, ThemePreset, ThemeState};
use notchterm_core::ChangeNotifier;
use tracing::{debug, warn};
use uuid::Uuid;

/// Theme document owner, the simpler sibling of the workspace store.
/// Independent of workspace lifecycle; same persistence contract.
pub struct ThemeStore {
    state: ThemeState,
    persistence: StateFile<ThemeState>,
    notifier: ChangeNotifier,
}

impl ThemeStore {
    /// Load the persisted theme document, or synthesize the built-in
    /// presets and persist them.
    pub fn new(persistence: StateFile<ThemeState>) -> Self {
        let state = match persistence.load() {
            Ok(state) => state,
            Err(e) => {
                debug!("No usable theme state ({}), using built-ins", e);
                ThemeState::with_builtin_presets()
            }
        };
        let store = Self {
            state,
            persistence,
            notifier: ChangeNotifier::new(),
        };
        store.save();
        store
    }

    /// Make a preset's theme current and remember the selection.
    pub fn apply_preset(&mut self, preset_id: Uuid) {
        let Some(preset) = self.state.presets.iter().find(|p| p.id == preset_id) else {
            warn!("Ignoring unknown theme preset {}", preset_id);
            return;
        };
        self.state.current_theme = preset.theme.clone();
        self.state.selected_preset_id = Some(preset_id);
        self.save();
        self.notifier.notify();
    }

    /// Replace the current theme with an ad-hoc one; clears the preset
    /// selection since the theme no longer matches any preset.
    pub fn update_theme(&mut self, theme: Theme) {
        self.state.current_theme = theme;
        self.state.selected_preset_id = None;
        self.save();
        self.notifier.notify();
    }

    /// Capture the current theme as a named preset and select it.
    pub fn save_preset(&mut self, name: impl Into<String>) {
        let preset = ThemePreset {
            id: Uuid::new_v4(),
            name: name.into(),
            theme: self.state.current_theme.clone(),
        };
        self.state.selected_preset_id = Some(preset.id);
        self.state.presets.push(preset);
        self.save();
        self.notifier.notify();
    }

    pub fn current_theme(&self) -> &Theme {
        &self.state.current_theme
    }

    pub fn selected_preset_id(&self) -> Option<Uuid> {
        self.state.selected_preset_id
    }

    pub fn presets(&self) -> &[ThemePreset] {
        &self.state.presets
    }

    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: Fn() + Send + 'static,
    {
        self.notifier.subscribe(callback);
    }

    fn save(&self) {
        if let Err(e) = self.persistence.save(&self.state) {
            warn!(
                "Failed to persist theme state to {}: {}",
                self.persistence.path().display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn store_at(dir: &Path) -> ThemeStore {
        ThemeStore::new(StateFile::at(dir.join("theme.json")))
    }

    #[test]
    fn test_fresh_store_gets_builtin_presets() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(dir.path());

        assert_eq!(store.presets().len(), 3);
        assert_eq!(store.selected_preset_id(), Some(store.presets()[0].id));
        assert!(dir.path().join("theme.json").exists());
    }

    #[test]
    fn test_apply_preset_switches_theme_and_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_at(dir.path());
        let smoke = store.presets()[1].clone();

        store.apply_preset(smoke.id);

        assert_eq!(store.selected_preset_id(), Some(smoke.id));
        assert_eq!(*store.current_theme(), smoke.theme);
    }

    #[test]
    fn test_update_theme_clears_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_at(dir.path());

        let mut theme = store.current_theme().clone();
        theme.font_size = 16.0;
        store.update_theme(theme.clone());

        assert_eq!(store.selected_preset_id(), None);
        assert_eq!(*store.current_theme(), theme);
    }

    #[test]
    fn test_save_preset_captures_current_theme() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_at(dir.path());

        let mut theme = store.current_theme().clone();
        theme.glow_intensity = 0.9;
        store.update_theme(theme.clone());
        store.save_preset("Neon");

        let saved = store.presets().last().unwrap();
        assert_eq!(saved.name, "Neon");
        assert_eq!(saved.theme, theme);
        assert_eq!(store.selected_preset_id(), Some(saved.id));
    }

    #[test]
    fn test_theme_round_trips_through_restart() {
        let dir = tempfile::tempdir().unwrap();
        let selected;
        {
            let mut store = store_at(dir.path());
            let aurora = store.presets()[2].id;
            store.apply_preset(aurora);
            selected = aurora;
        }

        let store = store_at(dir.path());
        assert_eq!(store.selected_preset_id(), Some(selected));
        assert_eq!(store.presets().len(), 3);
    }
}
