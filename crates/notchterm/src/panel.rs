use notchterm_core::ChangeNotifier;

/// How far the panel drops from the notch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelSizePreset {
    #[default]
    Compact,
    Tall,
    Full,
}

/// Transient panel visibility state, observed by the presentation layer.
/// Never persisted: the panel always starts hidden and compact.
#[derive(Default)]
pub struct PanelState {
    visible: bool,
    size_preset: PanelSizePreset,
    notifier: ChangeNotifier,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn size_preset(&self) -> PanelSizePreset {
        self.size_preset
    }

    pub fn show(&mut self) {
        self.set_visible(true);
    }

    pub fn hide(&mut self) {
        self.set_visible(false);
    }

    pub fn toggle(&mut self) {
        self.set_visible(!self.visible);
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        self.notifier.notify();
    }

    pub fn set_size_preset(&mut self, preset: PanelSizePreset) {
        if self.size_preset == preset {
            return;
        }
        self.size_preset = preset;
        self.notifier.notify();
    }

    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: Fn() + Send + 'static,
    {
        self.notifier.subscribe(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_defaults_hidden_and_compact() {
        let panel = PanelState::new();
        assert!(!panel.is_visible());
        assert_eq!(panel.size_preset(), PanelSizePreset::Compact);
    }

    #[test]
    fn test_toggle_flips_visibility() {
        let mut panel = PanelState::new();
        panel.toggle();
        assert!(panel.is_visible());
        panel.toggle();
        assert!(!panel.is_visible());
    }

    #[test]
    fn test_changes_notify_but_noops_do_not() {
        let mut panel = PanelState::new();
        let count = Arc::new(AtomicUsize::new(0));
        let observed = count.clone();
        panel.subscribe(move || {
            observed.fetch_add(1, Ordering::SeqCst);
        });

        panel.show();
        panel.show();
        panel.set_size_preset(PanelSizePreset::Tall);
        panel.set_size_preset(PanelSizePreset::Tall);

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
