//! Line grammar types, field tokenizer and numeric decoding for the command
//! parser.
//!
//! This crate holds everything that can be done with a line of text without
//! knowing which commands exist:
//!
//! - **Types**: [`ParamKind`], [`ParamSpec`], [`Value`]
//! - **Tokenizing**: [`fields()`], [`tokenize()`], [`Field`]
//! - **Decoding**: [`decode_unsigned`], [`decode_signed`],
//!   [`decode_fractional`], [`decode_real`], [`decode_letter`]
//! - **Parameters**: [`ParamSet`], the letter-keyed values given to a callback
//! - **Replies**: [`Reply`], the `ok` / `err ...` answer to a line
//!
//! # Line Format
//!
//! ```text
//! <command-name> (<letter><value>)*
//! ```
//!
//! Fields are separated by spaces. Letters are case-sensitive. Values are
//! one letter, a signed decimal integer, or a real with an optional sign,
//! one optional `.` and one optional `e`/`E` exponent:
//!
//! ```text
//! delay T1E2
//! versi V10
//! pump V1.25 MD
//! ```
//!
//! # Example
//!
//! ```
//! use linecmd_proto::{decode_real, fields};
//!
//! let line = b"delay T1E2";
//! let param = fields(line).nth(1).unwrap().slice(line);
//! assert_eq!(param[0], b'T');
//! assert_eq!(decode_real(&param[1..]), Ok(100.0));
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod field;
pub mod number;
pub mod params;
pub mod reply;
pub mod types;

pub use config::{
    MAX_COMMAND_NAME_LENGTH, MAX_FIELD_COUNT, MAX_LINE_LENGTH, MAX_NUM_OF_COMMANDS,
    MAX_NUM_OF_PARAMS,
};
pub use field::{fields, strip_line_ending, tokenize, Field, Fields, TokenizeError};
pub use number::{
    decode_fractional, decode_letter, decode_real, decode_signed, decode_unsigned, decode_value,
    split_sign, DecodeError, Sign,
};
pub use params::{CapacityError, ParamSet};
pub use reply::{Reply, ReplyError, SerializeError, MAX_REPLY_SIZE};
pub use types::{ParamKind, ParamSpec, Value};
