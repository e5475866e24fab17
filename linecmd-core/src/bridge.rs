//! CommandBridge: feeds lines from a source into a parser and answers on a sink.

use linecmd_proto::{strip_line_ending, Reply, ReplyError, MAX_NUM_OF_COMMANDS};

use crate::dispatcher::{CommandParser, DispatchError};
use crate::input::{InputError, LineSource};
use crate::output::{OutputError, ReplySink};

/// A bridge that executes lines from a [`LineSource`] and reports each
/// outcome to a [`ReplySink`].
///
/// Every non-empty line gets exactly one [`Reply`]. Blank lines are dropped
/// without a reply so that `\r\n` senders and keep-alive newlines do not
/// produce noise.
///
/// # Error Handling
///
/// On input errors, the bridge sends `err input` so the sender does not
/// wait for an answer that will never come.
pub struct CommandBridge<'a, I, O, C, const N: usize = MAX_NUM_OF_COMMANDS> {
    input: I,
    output: O,
    parser: CommandParser<'a, C, N>,
    context: C,
}

impl<'a, I: LineSource, O: ReplySink, C, const N: usize> CommandBridge<'a, I, O, C, N> {
    pub fn new(input: I, output: O, parser: CommandParser<'a, C, N>, context: C) -> Self {
        Self {
            input,
            output,
            parser,
            context,
        }
    }

    /// Process lines indefinitely.
    pub async fn run(&mut self) -> ! {
        loop {
            let _ = self.process_one().await;
        }
    }

    /// Receive, execute and answer a single line.
    pub async fn process_one(&mut self) -> Result<(), BridgeError> {
        let line = match self.input.receive().await {
            Ok(line) => line,
            Err(e) => {
                let _ = self.output.send(&Reply::Err(ReplyError::Input)).await;
                return Err(BridgeError::Input(e));
            }
        };

        let result = self
            .parser
            .dispatch(strip_line_ending(&line), &mut self.context);

        let reply = match result {
            Ok(()) => Reply::Ok,
            Err(DispatchError::Empty) => return Ok(()),
            Err(e) => Reply::Err(e.into()),
        };

        self.output
            .send(&reply)
            .await
            .map_err(BridgeError::Output)?;
        result.map_err(BridgeError::Dispatch)
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn parser(&self) -> &CommandParser<'a, C, N> {
        &self.parser
    }

    /// Mutable access to the parser, e.g. to register more commands.
    pub fn parser_mut(&mut self) -> &mut CommandParser<'a, C, N> {
        &mut self.parser
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Decompose the bridge into its source, sink and context.
    pub fn into_parts(self) -> (I, O, C) {
        (self.input, self.output, self.context)
    }
}

/// Error type for bridge operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeError {
    /// Error from the line source.
    Input(InputError),
    /// The line was received but not executed.
    Dispatch(DispatchError),
    /// Error from the reply sink.
    Output(OutputError),
}

impl From<InputError> for BridgeError {
    fn from(err: InputError) -> Self {
        BridgeError::Input(err)
    }
}

impl From<DispatchError> for BridgeError {
    fn from(err: DispatchError) -> Self {
        BridgeError::Dispatch(err)
    }
}

impl core::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Input(e) => write!(f, "input: {}", e),
            Self::Dispatch(e) => write!(f, "dispatch: {}", e),
            Self::Output(e) => write!(f, "output: {}", e),
        }
    }
}
