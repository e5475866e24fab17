//! Line source trait and error types.

use core::future::Future;
use heapless::Vec;
use linecmd_proto::MAX_LINE_LENGTH;

/// One received line, without its terminator.
pub type Line = Vec<u8, MAX_LINE_LENGTH>;

/// Error type for input operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// UART/communication I/O error.
    Io,
    /// Connection lost / timeout.
    Disconnected,
    /// Line longer than [`MAX_LINE_LENGTH`]; the rest of it was discarded.
    BufferOverflow,
    /// UART framing error.
    Framing,
}

impl core::fmt::Display for InputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io => write!(f, "i/o error"),
            Self::Disconnected => write!(f, "disconnected"),
            Self::BufferOverflow => write!(f, "line too long"),
            Self::Framing => write!(f, "framing error"),
        }
    }
}

/// Async trait for command line sources.
///
/// Implementations deliver whole lines; splitting a byte stream on `\n` is
/// their job, not the parser's.
pub trait LineSource {
    /// Wait for the next complete line.
    fn receive(&mut self) -> impl Future<Output = Result<Line, InputError>>;

    fn is_connected(&self) -> bool;
}
