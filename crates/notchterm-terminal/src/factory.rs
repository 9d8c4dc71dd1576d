use crate::session::TerminalSession;
use uuid::Uuid;

/// Default terminal dimensions until the surface reports its real size.
pub const DEFAULT_ROWS: u16 = 24;
pub const DEFAULT_COLS: u16 = 80;

/// How the registry obtains sessions.
///
/// Injected at registry construction so tests can supply a factory that
/// returns [`TerminalSession::detached`] instead of spawning real shells.
pub trait SessionFactory: Send {
    fn create(&self, tab_id: Uuid, title: &str) -> crate::Result<TerminalSession>;
}

/// Production factory: spawns one login shell per session.
pub struct ShellSessionFactory {
    shell: Option<String>,
    rows: u16,
    cols: u16,
}

impl ShellSessionFactory {
    /// `shell` overrides `$SHELL`; `None` uses the environment default.
    pub fn new(shell: Option<String>) -> Self {
        Self {
            shell,
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }

    pub fn with_size(mut self, rows: u16, cols: u16) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }
}

impl SessionFactory for ShellSessionFactory {
    fn create(&self, tab_id: Uuid, title: &str) -> crate::Result<TerminalSession> {
        TerminalSession::spawn_shell(tab_id, title, self.shell.as_deref(), self.rows, self.cols)
    }
}
