//! UART-based reply sink.

use embassy_rp::uart::{Async, UartTx};
use linecmd_core::{OutputError, Reply, ReplySink};
use linecmd_proto::MAX_REPLY_SIZE;

/// Writes one serialized reply line per executed command to UART TX.
pub struct UartReplySink<'d> {
    tx: UartTx<'d, Async>,
}

impl<'d> UartReplySink<'d> {
    #[must_use]
    pub fn new(tx: UartTx<'d, Async>) -> Self {
        Self { tx }
    }
}

impl ReplySink for UartReplySink<'_> {
    async fn send(&mut self, reply: &Reply) -> Result<(), OutputError> {
        let mut buf = [0u8; MAX_REPLY_SIZE];
        let len = reply.serialize(&mut buf).map_err(|_| OutputError::Io)?;
        self.tx
            .write(&buf[..len])
            .await
            .map_err(|_| OutputError::Io)
    }

    fn is_ready(&self) -> bool {
        true
    }
}
