pub mod error;
pub mod factory;
pub mod pty;
pub mod registry;
pub mod session;

pub use error::{Result, TerminalError};
pub use factory::{SessionFactory, ShellSessionFactory};
pub use registry::SessionRegistry;
pub use session::{SessionState, TerminalSession};
