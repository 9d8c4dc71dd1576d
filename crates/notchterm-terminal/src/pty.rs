use portable_pty::{native_pty_system, Child, CommandBuilder, MasterPty, PtySize};
use std::io::{Read, Write};

/// Fallback when neither the config nor the environment names a shell.
pub const DEFAULT_SHELL: &str = "/bin/zsh";

pub struct ShellPty {
    master: Box<dyn MasterPty + Send>,
    child: Box<dyn Child + Send + Sync>,
    writer: Box<dyn Write + Send>,
}

/// Handle to the PTY master, used for resize operations after the
/// writer and child have been split off to dedicated threads.
pub struct PtyMaster {
    master: Box<dyn MasterPty + Send>,
}

impl PtyMaster {
    /// Resize the underlying PTY.
    pub fn resize(&self, rows: u16, cols: u16) -> crate::Result<()> {
        self.master
            .resize(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| crate::TerminalError::Resize(e.to_string()))
    }
}

/// Resolve which shell executable to spawn: explicit choice, then
/// `$SHELL`, then [`DEFAULT_SHELL`].
pub fn resolve_shell(shell: Option<&str>) -> String {
    match shell {
        Some(s) => s.to_string(),
        None => std::env::var("SHELL").unwrap_or_else(|_| DEFAULT_SHELL.to_string()),
    }
}

impl ShellPty {
    /// Spawn a login shell on a fresh PTY.
    /// Returns the `ShellPty` and a reader for the PTY's output.
    pub fn spawn(
        shell: Option<&str>,
        rows: u16,
        cols: u16,
    ) -> crate::Result<(Self, Box<dyn Read + Send>)> {
        let pty_system = native_pty_system();
        let pair = pty_system
            .openpty(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| crate::TerminalError::Pty(e.to_string()))?;

        let shell_path = resolve_shell(shell);

        let mut cmd = CommandBuilder::new(&shell_path);
        // Login mode so the user's profile is sourced.
        cmd.arg("-l");
        cmd.cwd(std::env::var("HOME").unwrap_or_else(|_| "/".to_string()));
        cmd.env("TERM", "xterm-256color");

        let child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|e| crate::TerminalError::Spawn(e.to_string()))?;

        let reader = pair
            .master
            .try_clone_reader()
            .map_err(|e| crate::TerminalError::Pty(e.to_string()))?;
        let writer = pair
            .master
            .take_writer()
            .map_err(|e| crate::TerminalError::Pty(e.to_string()))?;

        Ok((
            Self {
                master: pair.master,
                child,
                writer,
            },
            reader,
        ))
    }

    /// Consume the PTY and split it into its thread-owned pieces.
    ///
    /// The writer goes to a dedicated writer thread, the child to a waiter
    /// thread, and the `PtyMaster` handle stays with the session for
    /// resize operations.
    pub fn into_parts(
        self,
    ) -> (
        Box<dyn Write + Send>,
        PtyMaster,
        Box<dyn Child + Send + Sync>,
    ) {
        (
            self.writer,
            PtyMaster {
                master: self.master,
            },
            self.child,
        )
    }
}
