//! Reply sink trait and error types.

use core::future::Future;
use linecmd_proto::Reply;

/// Error type for output operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// UART/communication I/O error.
    Io,
    /// Sink not ready to accept data.
    NotReady,
    /// Transmitter busy.
    Busy,
}

impl core::fmt::Display for OutputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io => write!(f, "i/o error"),
            Self::NotReady => write!(f, "not ready"),
            Self::Busy => write!(f, "busy"),
        }
    }
}

/// Async trait for reply sinks.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait ReplySink {
    /// Send one reply, waiting for the transmitter if needed.
    fn send(&mut self, reply: &Reply) -> impl Future<Output = Result<(), OutputError>>;

    /// Check if the sink is ready to accept data.
    fn is_ready(&self) -> bool;
}
