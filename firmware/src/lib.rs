//! Line command interpreter over UART for RP2040.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Receives command lines over UART (115200 baud, 8N1)
//! 2. Executes them against the [`commands::COMMANDS`] table
//! 3. Answers every non-empty line with `ok` or `err ...`
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | UART1 TX | 8    | Replies |
//! | UART1 RX | 9    | Command lines |
//! | LED      | 25   | On-board LED (error indicator) |
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//! - **`uart-flow-control`**: Enable hardware flow control (CTS/RTS on GPIO 10/11)

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features");

pub use linecmd_core::{
    BridgeError, Command, CommandBridge, CommandParser, DispatchError, InputError, Line,
    LineSource, OutputError, ParamSet, Reply, ReplyError, ReplySink,
};

pub mod commands;
pub mod uart_input;
pub mod uart_output;

pub use commands::{Machine, COMMANDS};
pub use uart_input::UartLineSource;
pub use uart_output::UartReplySink;

/// The bridge as wired up by the firmware binary.
pub type FirmwareBridge =
    CommandBridge<'static, UartLineSource<'static>, UartReplySink<'static>, Machine>;
