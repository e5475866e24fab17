//! Reply messages sent back after each command line.
//!
//! # Format
//!
//! ```text
//! ok\n
//! err empty\n
//! err unknown\n
//! err fields\n
//! err param <letter>\n
//! err input\n
//! ```

use heapless::Vec;

/// Maximum size of a serialized reply: `err unknown\n` is 12 bytes.
pub const MAX_REPLY_SIZE: usize = 16;

/// Outcome of one command line as reported to the sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    Ok,
    Err(ReplyError),
}

/// Failure reason carried by [`Reply::Err`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReplyError {
    /// The line held no command.
    Empty,
    /// No registered command has this name.
    UnknownCommand,
    /// The line held more fields than a command can take.
    TooManyFields,
    /// The parameter with this letter failed to decode.
    BadParameter(char),
    /// The line could not be received.
    Input,
}

/// Error type for serialization operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerializeError {
    /// The output buffer is too small to hold the serialized reply.
    BufferTooSmall,
}

impl core::fmt::Display for SerializeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
        }
    }
}

impl Reply {
    /// Serialize to the provided buffer, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if the reply does not fit.
    ///
    /// # Example
    ///
    /// ```
    /// use linecmd_proto::{Reply, ReplyError};
    ///
    /// let mut buf = [0u8; 16];
    /// let len = Reply::Err(ReplyError::BadParameter('T')).serialize(&mut buf).unwrap();
    /// assert_eq!(&buf[..len], b"err param T\n");
    /// ```
    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        let head: &[u8] = match self {
            Reply::Ok => b"ok",
            Reply::Err(ReplyError::Empty) => b"err empty",
            Reply::Err(ReplyError::UnknownCommand) => b"err unknown",
            Reply::Err(ReplyError::TooManyFields) => b"err fields",
            Reply::Err(ReplyError::Input) => b"err input",
            Reply::Err(ReplyError::BadParameter(_)) => b"err param ",
        };

        let mut letter = [0u8; 4];
        let tail: &[u8] = match self {
            Reply::Err(ReplyError::BadParameter(c)) => c.encode_utf8(&mut letter).as_bytes(),
            _ => &[],
        };

        let len = head.len() + tail.len() + 1;
        if buf.len() < len {
            return Err(SerializeError::BufferTooSmall);
        }

        buf[..head.len()].copy_from_slice(head);
        buf[head.len()..len - 1].copy_from_slice(tail);
        buf[len - 1] = b'\n';
        Ok(len)
    }

    /// Serialize to a `heapless::Vec`.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if `N` is not large enough.
    pub fn serialize_to_vec<const N: usize>(&self) -> Result<Vec<u8, N>, SerializeError> {
        let mut vec = Vec::new();
        vec.resize(N, 0)
            .map_err(|_| SerializeError::BufferTooSmall)?;
        let len = self.serialize(&mut vec)?;
        vec.truncate(len);
        Ok(vec)
    }

    #[inline]
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Reply::Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(reply: Reply) -> Vec<u8, MAX_REPLY_SIZE> {
        reply.serialize_to_vec().unwrap()
    }

    #[test]
    fn test_serialize_ok() {
        assert_eq!(render(Reply::Ok).as_slice(), b"ok\n");
    }

    #[test]
    fn test_serialize_errors() {
        assert_eq!(render(Reply::Err(ReplyError::Empty)).as_slice(), b"err empty\n");
        assert_eq!(
            render(Reply::Err(ReplyError::UnknownCommand)).as_slice(),
            b"err unknown\n"
        );
        assert_eq!(
            render(Reply::Err(ReplyError::TooManyFields)).as_slice(),
            b"err fields\n"
        );
        assert_eq!(
            render(Reply::Err(ReplyError::BadParameter('V'))).as_slice(),
            b"err param V\n"
        );
        assert_eq!(render(Reply::Err(ReplyError::Input)).as_slice(), b"err input\n");
    }

    #[test]
    fn test_serialize_buffer_too_small() {
        let mut buf = [0u8; 2];
        assert_eq!(Reply::Ok.serialize(&mut buf), Err(SerializeError::BufferTooSmall));
        let mut buf = [0u8; 3];
        assert_eq!(Reply::Ok.serialize(&mut buf), Ok(3));
    }

    #[test]
    fn test_longest_reply_fits() {
        let mut buf = [0u8; MAX_REPLY_SIZE];
        assert!(Reply::Err(ReplyError::UnknownCommand)
            .serialize(&mut buf)
            .is_ok());
        assert!(Reply::Err(ReplyError::BadParameter('Z'))
            .serialize(&mut buf)
            .is_ok());
    }
}
