//! Connectivity indicator shown next to the board.

use derive_more::Display;

/// Last known state of the persistence backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Connectivity {
    /// No backend configured.
    #[display("Sync disabled")]
    Disabled,
    /// Backend configured, nothing attempted yet.
    #[display("Connecting...")]
    Connecting,
    /// The last call succeeded.
    #[display("Online")]
    Online,
    /// The last call failed.
    #[display("Offline")]
    Offline,
}
