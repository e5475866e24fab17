//! Compile-time capacity limits.
//!
//! Every buffer in the parser is sized from these constants; nothing grows at
//! runtime.

/// Maximum number of parameters a command can declare.
pub const MAX_NUM_OF_PARAMS: usize = 5;

/// Default registry capacity (number of commands).
pub const MAX_NUM_OF_COMMANDS: usize = 25;

/// Maximum command name length in bytes.
pub const MAX_COMMAND_NAME_LENGTH: usize = 5;

/// Maximum number of fields on one line: the command name plus its parameters.
pub const MAX_FIELD_COUNT: usize = MAX_NUM_OF_PARAMS + 1;

/// Maximum line length accepted from a line source (excluding the line ending).
pub const MAX_LINE_LENGTH: usize = 64;
