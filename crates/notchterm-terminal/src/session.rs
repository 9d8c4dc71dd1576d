use crate::pty::{PtyMaster, ShellPty};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use portable_pty::ChildKiller;
use std::io::{Read, Write};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Exited(u32),
}

/// A live shell process bound to a display surface, keyed by tab id.
///
/// The session does not interpret the shell's output: the raw byte feed is
/// handed to whoever calls [`take_output`](Self::take_output) (the terminal
/// surface), and the session only owns the process handle's lifetime.
pub struct TerminalSession {
    /// Equal to the owning tab's id; sessions have no identity of their own.
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    state: Arc<Mutex<SessionState>>,
    input_tx: Option<mpsc::UnboundedSender<Vec<u8>>>,
    output_rx: Option<mpsc::UnboundedReceiver<Vec<u8>>>,
    master: Option<PtyMaster>,
    killer: Option<Box<dyn ChildKiller + Send + Sync>>,
    has_process: bool,
}

impl TerminalSession {
    /// Spawn a login shell and wire up its I/O threads.
    ///
    /// The spawn is fire-and-forget: the session is returned as soon as the
    /// process starts, without waiting for shell readiness. A waiter thread
    /// records the exit code when the process ends.
    pub fn spawn_shell(
        id: Uuid,
        title: impl Into<String>,
        shell: Option<&str>,
        rows: u16,
        cols: u16,
    ) -> crate::Result<Self> {
        let (pty, reader) = ShellPty::spawn(shell, rows, cols)?;
        let (writer, master, mut child) = pty.into_parts();
        let killer = child.clone_killer();

        let state = Arc::new(Mutex::new(SessionState::Running));
        let (input_tx, mut input_rx) = mpsc::unbounded_channel::<Vec<u8>>();
        let (output_tx, output_rx) = mpsc::unbounded_channel::<Vec<u8>>();

        // Reader thread: drains PTY output into the surface feed. Draining
        // must continue even with no consumer, or the child blocks on a
        // full PTY buffer.
        std::thread::Builder::new()
            .name("pty-reader".into())
            .spawn(move || {
                let mut reader = reader;
                let mut buf = [0u8; 4096];
                loop {
                    match reader.read(&mut buf) {
                        Ok(0) => break,
                        Ok(n) => {
                            let _ = output_tx.send(buf[..n].to_vec());
                        }
                        Err(e) => {
                            tracing::debug!("PTY reader error: {}", e);
                            break;
                        }
                    }
                }
                tracing::debug!("PTY reader thread exiting");
            })
            .map_err(|e| {
                crate::TerminalError::Pty(format!("Failed to spawn reader thread: {}", e))
            })?;

        // Writer thread: forwards input to the PTY.
        std::thread::Builder::new()
            .name("pty-writer".into())
            .spawn(move || {
                let mut writer = writer;
                while let Some(data) = input_rx.blocking_recv() {
                    if writer.write_all(&data).is_err() {
                        break;
                    }
                }
                tracing::debug!("PTY writer thread exiting");
            })
            .map_err(|e| {
                crate::TerminalError::Pty(format!("Failed to spawn writer thread: {}", e))
            })?;

        // Waiter thread: reports process exit.
        let state_clone = state.clone();
        std::thread::Builder::new()
            .name("pty-waiter".into())
            .spawn(move || {
                let code = match child.wait() {
                    Ok(status) => status.exit_code(),
                    Err(e) => {
                        tracing::debug!("PTY wait error: {}", e);
                        1
                    }
                };
                *state_clone.lock() = SessionState::Exited(code);
                tracing::debug!("Shell process exited with code {}", code);
            })
            .map_err(|e| {
                crate::TerminalError::Pty(format!("Failed to spawn waiter thread: {}", e))
            })?;

        Ok(Self {
            id,
            title: title.into(),
            created_at: Utc::now(),
            state,
            input_tx: Some(input_tx),
            output_rx: Some(output_rx),
            master: Some(master),
            killer: Some(killer),
            has_process: true,
        })
    }

    /// A session with no backing process. The seam test factories use in
    /// place of [`spawn_shell`](Self::spawn_shell).
    pub fn detached(id: Uuid, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            created_at: Utc::now(),
            state: Arc::new(Mutex::new(SessionState::Running)),
            input_tx: None,
            output_rx: None,
            master: None,
            killer: None,
            has_process: false,
        }
    }

    /// Send input data to the shell (e.g., keyboard input).
    pub fn write_input(&self, data: &[u8]) {
        if let Some(ref tx) = self.input_tx {
            let _ = tx.send(data.to_vec());
        }
    }

    /// Take the raw output feed. The terminal surface calls this once at
    /// bind time; subsequent calls return `None`.
    pub fn take_output(&mut self) -> Option<mpsc::UnboundedReceiver<Vec<u8>>> {
        self.output_rx.take()
    }

    /// Resize the underlying PTY.
    pub fn resize(&self, rows: u16, cols: u16) {
        if let Some(ref master) = self.master {
            if let Err(e) = master.resize(rows, cols) {
                tracing::warn!("PTY resize failed: {}", e);
            }
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.lock().clone()
    }

    pub fn is_running(&self) -> bool {
        *self.state.lock() == SessionState::Running
    }

    /// Kill the shell process and close its input. Idempotent: terminating
    /// an already-terminated or detached session has no further effect.
    pub fn terminate(&mut self) {
        if let Some(mut killer) = self.killer.take() {
            if let Err(e) = killer.kill() {
                tracing::debug!("Kill failed (process likely gone): {}", e);
            }
        } else if !self.has_process {
            // Detached sessions have no process to wait on.
            *self.state.lock() = SessionState::Exited(0);
        }
        self.input_tx = None;
        self.master = None;
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.terminate();
    }
}
