//! UART-based line source.
//!
//! Collects bytes from UART1 RX until `\n` and hands the line, without the
//! newline, to the bridge.
//!
//! # Pins
//!
//! Uses UART1 by default:
//! - GPIO 8: TX
//! - GPIO 9: RX
//! - GPIO 10: CTS (optional, with `uart-flow-control` feature)
//! - GPIO 11: RTS (optional, with `uart-flow-control` feature)

use embassy_rp::uart::{Async, Error as UartError, UartRx};
use linecmd_core::{InputError, Line, LineSource};

/// Both types are foreign here, so this cannot be a `From` impl.
#[inline]
fn uart_error_to_input_error(e: UartError) -> InputError {
    match e {
        UartError::Framing => InputError::Framing,
        UartError::Overrun => InputError::BufferOverflow,
        _ => InputError::Io,
    }
}

/// Line source reading newline-terminated commands from UART.
pub struct UartLineSource<'d> {
    rx: UartRx<'d, Async>,
}

impl<'d> UartLineSource<'d> {
    #[must_use]
    pub fn new(rx: UartRx<'d, Async>) -> Self {
        Self { rx }
    }

    async fn read_byte(&mut self) -> Result<u8, InputError> {
        let mut byte = [0u8; 1];
        self.rx
            .read(&mut byte)
            .await
            .map_err(uart_error_to_input_error)?;
        Ok(byte[0])
    }

    /// Read bytes until a newline.
    ///
    /// A line longer than the buffer is dropped up to and including its
    /// newline, so the next call starts on a fresh line.
    async fn read_line(&mut self) -> Result<Line, InputError> {
        let mut line = Line::new();

        loop {
            let byte = self.read_byte().await?;
            if byte == b'\n' {
                return Ok(line);
            }

            if line.push(byte).is_err() {
                while self.read_byte().await? != b'\n' {}
                return Err(InputError::BufferOverflow);
            }
        }
    }
}

impl LineSource for UartLineSource<'_> {
    async fn receive(&mut self) -> Result<Line, InputError> {
        self.read_line().await
    }

    fn is_connected(&self) -> bool {
        // UART is always "connected" if we have the peripheral
        true
    }
}
