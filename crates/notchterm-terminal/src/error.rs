use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("PTY error: {0}")]
    Pty(String),
    #[error("Spawn failed: {0}")]
    Spawn(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Resize failed: {0}")]
    Resize(String),
}

pub type Result<T> = std::result::Result<T, TerminalError>;
