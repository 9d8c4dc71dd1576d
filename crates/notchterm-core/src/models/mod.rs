pub mod theme;
pub mod workspace;

pub use theme::{Theme, ThemeColor, ThemePreset, ThemeState};
pub use workspace::{Workspace, WorkspaceState, WorkspaceTab};
