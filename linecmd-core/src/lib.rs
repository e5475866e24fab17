//! Command registry, line dispatcher and async line I/O traits.
//!
//! Applications describe their commands as static [`Command`] tables and
//! feed text lines to a [`CommandParser`], which decodes the declared
//! parameters and calls back into an application context.
//!
//! - [`registry`]: [`Command`] descriptors and the bounded [`Registry`]
//! - [`dispatcher`]: [`CommandParser`] and [`DispatchError`]
//! - [`input`]: line source trait ([`LineSource`])
//! - [`output`]: reply sink trait ([`ReplySink`])
//! - [`bridge`]: drives source, parser and sink ([`CommandBridge`])
//!
//! # Example
//!
//! ```rust
//! use linecmd_core::{Command, CommandParser, DispatchError};
//! use linecmd_proto::{ParamSet, ParamSpec};
//!
//! #[derive(Default)]
//! struct Pump {
//!     mode: char,
//!     volume: f32,
//! }
//!
//! fn on_pump(pump: &mut Pump, params: &ParamSet) {
//!     pump.mode = params.letter('M').unwrap_or('A');
//!     pump.volume = params.real('V').unwrap_or(0.0);
//! }
//!
//! const PUMP_PARAMS: &[ParamSpec] = &[ParamSpec::letter('M'), ParamSpec::real('V')];
//! static COMMANDS: [Command<Pump>; 1] = [Command::new("pump", PUMP_PARAMS, on_pump)];
//!
//! let mut parser: CommandParser<Pump> = CommandParser::new();
//! parser.register_all(&COMMANDS).unwrap();
//!
//! let mut pump = Pump::default();
//! parser.dispatch(b"pump V1.25 MD", &mut pump).unwrap();
//! assert_eq!(pump.mode, 'D');
//! assert_eq!(pump.volume, 1.25);
//!
//! assert_eq!(parser.dispatch(b"jump", &mut pump), Err(DispatchError::UnknownCommand));
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and route logs to defmt
//! - **`log`**: Route logs to the `log` facade
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod bridge;
pub mod dispatcher;
pub mod input;
pub mod output;
pub mod registry;

pub use bridge::{BridgeError, CommandBridge};
pub use dispatcher::{CommandParser, DispatchError};
pub use input::{InputError, Line, LineSource};
pub use output::{OutputError, ReplySink};
pub use registry::{Callback, Command, RegisterError, Registry};

pub use linecmd_proto::{ParamKind, ParamSet, ParamSpec, Reply, ReplyError, Value};
