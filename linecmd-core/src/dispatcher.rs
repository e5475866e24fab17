//! Line dispatcher: tokenizes a line, finds its command and runs the callback.

use linecmd_proto::{
    decode_value, tokenize, DecodeError, Field, ParamSet, ReplyError, TokenizeError,
    MAX_FIELD_COUNT, MAX_NUM_OF_COMMANDS,
};

use crate::registry::{Command, RegisterError, Registry};

/// Why a line was not executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// The line held no fields.
    Empty,
    /// The first field names no registered command.
    UnknownCommand,
    /// The line held more fields than a command can take.
    TooManyFields,
    /// A declared parameter was present but its value failed to decode.
    BadParameter { letter: char, error: DecodeError },
}

impl From<TokenizeError> for DispatchError {
    fn from(err: TokenizeError) -> Self {
        match err {
            TokenizeError::TooManyFields => DispatchError::TooManyFields,
        }
    }
}

impl From<DispatchError> for ReplyError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Empty => ReplyError::Empty,
            DispatchError::UnknownCommand => ReplyError::UnknownCommand,
            DispatchError::TooManyFields => ReplyError::TooManyFields,
            DispatchError::BadParameter { letter, .. } => ReplyError::BadParameter(letter),
        }
    }
}

impl core::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty line"),
            Self::UnknownCommand => write!(f, "unknown command"),
            Self::TooManyFields => write!(f, "too many fields"),
            Self::BadParameter { letter, error } => {
                write!(f, "bad parameter {}: {}", letter, error)
            }
        }
    }
}

/// Command line parser.
///
/// Holds up to `N` borrowed [`Command`]s and executes lines against them
/// with a caller-supplied context `C`. Each call is independent: nothing
/// decoded from one line is visible to the next.
///
/// # Example
///
/// ```
/// use linecmd_core::{Command, CommandParser};
/// use linecmd_proto::{ParamSet, ParamSpec};
///
/// fn on_delay(total: &mut f32, params: &ParamSet) {
///     *total += params.real('T').unwrap_or(0.0);
/// }
///
/// const DELAY_PARAMS: &[ParamSpec] = &[ParamSpec::real('T')];
/// static DELAY: Command<f32> = Command::new("delay", DELAY_PARAMS, on_delay);
///
/// let mut parser: CommandParser<f32> = CommandParser::new();
/// parser.register(&DELAY).unwrap();
///
/// let mut total = 0.0;
/// assert!(parser.feed_line(b"delay T1E2", &mut total));
/// assert_eq!(total, 100.0);
/// ```
pub struct CommandParser<'a, C, const N: usize = MAX_NUM_OF_COMMANDS> {
    registry: Registry<'a, C, N>,
}

impl<'a, C, const N: usize> CommandParser<'a, C, N> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    /// See [`Registry::register`].
    pub fn register(&mut self, command: &'a Command<C>) -> Result<(), RegisterError> {
        self.registry.register(command)
    }

    /// See [`Registry::register_all`].
    pub fn register_all(&mut self, commands: &'a [Command<C>]) -> Result<(), RegisterError> {
        self.registry.register_all(commands)
    }

    /// Forget every registered command.
    pub fn reset(&mut self) {
        self.registry.reset();
    }

    #[inline]
    pub fn registry(&self) -> &Registry<'a, C, N> {
        &self.registry
    }

    /// Execute one line.
    ///
    /// `line` must not contain the line terminator. Each declared parameter
    /// takes the first field that starts with its letter; parameters with no
    /// such field are left out of the [`ParamSet`]. Fields that match no
    /// declared parameter are ignored.
    ///
    /// # Errors
    ///
    /// On any error the callback is not invoked.
    pub fn dispatch(&self, line: &[u8], ctx: &mut C) -> Result<(), DispatchError> {
        let fields = tokenize::<MAX_FIELD_COUNT>(line)?;
        let (name, args) = fields.split_first().ok_or(DispatchError::Empty)?;
        let name = name.slice(line);

        let Some(command) = self.registry.lookup(name) else {
            debug!("unknown command ({} bytes)", name.len());
            return Err(DispatchError::UnknownCommand);
        };

        let params = collect_params(command, args, line)?;
        trace!("running {} with {} params", command.name, params.len());
        (command.callback)(ctx, &params);
        Ok(())
    }

    /// Execute one line, reporting only whether it ran.
    #[inline]
    pub fn feed_line(&self, line: &[u8], ctx: &mut C) -> bool {
        self.dispatch(line, ctx).is_ok()
    }
}

impl<C, const N: usize> Default for CommandParser<'_, C, N> {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_params<C>(
    command: &Command<C>,
    args: &[Field],
    line: &[u8],
) -> Result<ParamSet, DispatchError> {
    let mut params = ParamSet::new();

    for spec in command.params {
        let Some(field) = args.iter().map(|f| f.slice(line)).find(|f| spec.matches(f)) else {
            continue;
        };

        let value = decode_value(&field[1..], spec.kind).map_err(|error| {
            debug!("{}: bad value for {}", command.name, spec.letter);
            DispatchError::BadParameter {
                letter: spec.letter,
                error,
            }
        })?;

        // Registration guarantees unique letters and at most
        // `MAX_NUM_OF_PARAMS` of them, so this never fails.
        let added = params.add(spec.letter, value);
        debug_assert!(added.is_ok());
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use linecmd_proto::ParamSpec;
    use std::vec::Vec;

    const EPSILON: f32 = 1e-5;

    fn approx(a: f32, b: f32) -> bool {
        let diff = a - b;
        diff < EPSILON && diff > -EPSILON
    }

    /// Records every callback invocation.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<(&'static str, ParamSet)>,
    }

    impl Recorder {
        fn last(&self) -> &(&'static str, ParamSet) {
            self.calls.last().unwrap()
        }
    }

    fn on_delay(rec: &mut Recorder, params: &ParamSet) {
        rec.calls.push(("delay", params.clone()));
    }

    fn on_versi(rec: &mut Recorder, params: &ParamSet) {
        rec.calls.push(("versi", params.clone()));
    }

    fn on_move(rec: &mut Recorder, params: &ParamSet) {
        rec.calls.push(("move", params.clone()));
    }

    fn on_pump(rec: &mut Recorder, params: &ParamSet) {
        rec.calls.push(("pump", params.clone()));
    }

    const DELAY_PARAMS: &[ParamSpec] = &[ParamSpec::real('T')];
    const VERSI_PARAMS: &[ParamSpec] = &[ParamSpec::integer('V')];
    const MOVE_PARAMS: &[ParamSpec] = &[ParamSpec::real('D'), ParamSpec::real('S')];
    const PUMP_PARAMS: &[ParamSpec] = &[ParamSpec::letter('M'), ParamSpec::real('V')];

    static COMMANDS: [Command<Recorder>; 4] = [
        Command::new("delay", DELAY_PARAMS, on_delay),
        Command::new("versi", VERSI_PARAMS, on_versi),
        Command::new("move", MOVE_PARAMS, on_move),
        Command::new("pump", PUMP_PARAMS, on_pump),
    ];

    fn parser() -> CommandParser<'static, Recorder> {
        let mut parser = CommandParser::new();
        parser.register_all(&COMMANDS).unwrap();
        parser
    }

    #[test]
    fn test_delay_with_exponent() {
        let parser = parser();
        let mut rec = Recorder::default();

        assert_eq!(parser.dispatch(b"delay T1E2", &mut rec), Ok(()));
        let (name, params) = rec.last();
        assert_eq!(*name, "delay");
        assert!(approx(params.real('T').unwrap(), 100.0));
    }

    #[test]
    fn test_versi_integer() {
        let parser = parser();
        let mut rec = Recorder::default();

        assert!(parser.feed_line(b"versi V10", &mut rec));
        assert_eq!(rec.last().1.integer('V'), Some(10));
    }

    #[test]
    fn test_move_two_reals() {
        let parser = parser();
        let mut rec = Recorder::default();

        assert!(parser.feed_line(b"move D1.0 S5.0", &mut rec));
        let (name, params) = rec.last();
        assert_eq!(*name, "move");
        assert!(approx(params.real('D').unwrap(), 1.0));
        assert!(approx(params.real('S').unwrap(), 5.0));
    }

    #[test]
    fn test_pump_letter_and_real() {
        let parser = parser();
        let mut rec = Recorder::default();

        assert!(parser.feed_line(b"pump V1.25 MD", &mut rec));
        let (_, params) = rec.last();
        assert_eq!(params.letter('M'), Some('D'));
        assert!(approx(params.real('V').unwrap(), 1.25));

        assert!(parser.feed_line(b"pump MD V1.25", &mut rec));
        assert_eq!(rec.calls[0].1, rec.calls[1].1);
    }

    #[test]
    fn test_param_order_does_not_matter() {
        let parser = parser();
        let mut a = Recorder::default();
        let mut b = Recorder::default();

        assert!(parser.feed_line(b"move D2 S-3.5", &mut a));
        assert!(parser.feed_line(b"move S-3.5 D2", &mut b));
        assert_eq!(a.last().1.real('D'), b.last().1.real('D'));
        assert_eq!(a.last().1.real('S'), b.last().1.real('S'));
    }

    #[test]
    fn test_missing_param_is_unbound() {
        let parser = parser();
        let mut rec = Recorder::default();

        assert!(parser.feed_line(b"move D2", &mut rec));
        let (_, params) = rec.last();
        assert!(params.contains('D'));
        assert!(!params.contains('S'));

        assert!(parser.feed_line(b"delay", &mut rec));
        assert!(rec.last().1.is_empty());
    }

    #[test]
    fn test_undeclared_fields_ignored() {
        let parser = parser();
        let mut rec = Recorder::default();

        assert!(parser.feed_line(b"versi X9 V3", &mut rec));
        let (_, params) = rec.last();
        assert_eq!(params.len(), 1);
        assert_eq!(params.integer('V'), Some(3));
    }

    #[test]
    fn test_first_matching_field_wins() {
        let parser = parser();
        let mut rec = Recorder::default();

        assert!(parser.feed_line(b"versi V1 V2", &mut rec));
        assert_eq!(rec.last().1.integer('V'), Some(1));
    }

    #[test]
    fn test_letters_are_case_sensitive() {
        let parser = parser();
        let mut rec = Recorder::default();

        assert!(parser.feed_line(b"versi v7", &mut rec));
        assert!(!rec.last().1.contains('V'));
    }

    #[test]
    fn test_unknown_command() {
        let parser = parser();
        let mut rec = Recorder::default();

        assert_eq!(
            parser.dispatch(b"jump H2", &mut rec),
            Err(DispatchError::UnknownCommand)
        );
        assert_eq!(
            parser.dispatch(b"dela T1", &mut rec),
            Err(DispatchError::UnknownCommand)
        );
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn test_bad_parameter_skips_callback() {
        let parser = parser();
        let mut rec = Recorder::default();

        assert_eq!(
            parser.dispatch(b"delay Tabc", &mut rec),
            Err(DispatchError::BadParameter {
                letter: 'T',
                error: DecodeError::InvalidDigit,
            })
        );
        assert!(!parser.feed_line(b"pump MDD", &mut rec));
        assert!(!parser.feed_line(b"versi V1.5", &mut rec));
        assert!(rec.calls.is_empty());

        // The parser is still usable.
        assert!(parser.feed_line(b"delay T2", &mut rec));
    }

    #[test]
    fn test_empty_line() {
        let parser = parser();
        let mut rec = Recorder::default();

        assert_eq!(parser.dispatch(b"", &mut rec), Err(DispatchError::Empty));
        assert_eq!(parser.dispatch(b"   ", &mut rec), Err(DispatchError::Empty));
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn test_extra_spaces_tolerated() {
        let parser = parser();
        let mut rec = Recorder::default();

        assert!(parser.feed_line(b"  move  D1.5   S2 ", &mut rec));
        let (_, params) = rec.last();
        assert!(approx(params.real('D').unwrap(), 1.5));
        assert!(approx(params.real('S').unwrap(), 2.0));
    }

    #[test]
    fn test_too_many_fields() {
        let parser = parser();
        let mut rec = Recorder::default();

        assert_eq!(
            parser.dispatch(b"move D1 S2 A1 B1 C1 E1", &mut rec),
            Err(DispatchError::TooManyFields)
        );
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn test_reset_twice() {
        let mut parser = parser();
        let mut rec = Recorder::default();

        parser.reset();
        parser.reset();
        assert!(parser.registry().is_empty());
        assert!(!parser.feed_line(b"delay T1", &mut rec));

        parser.register(&COMMANDS[0]).unwrap();
        assert!(parser.feed_line(b"delay T1", &mut rec));
    }

    #[test]
    fn test_repeated_param_letter_is_never_dispatched() {
        const TWICE: &[ParamSpec] = &[ParamSpec::integer('V'), ParamSpec::real('V')];
        static X: Command<Recorder> = Command::new("x", TWICE, on_versi);

        let mut parser = parser();
        let mut rec = Recorder::default();

        assert_eq!(parser.register(&X), Err(RegisterError::DuplicateParam('V')));
        assert_eq!(
            parser.dispatch(b"x V2", &mut rec),
            Err(DispatchError::UnknownCommand)
        );
        assert!(rec.calls.is_empty());

        // An integer parameter keeps its declared type in the callback.
        assert!(parser.feed_line(b"versi V2", &mut rec));
        assert_eq!(rec.last().1.get('V'), Some(linecmd_proto::Value::Integer(2)));
    }

    #[test]
    fn test_dispatch_error_to_reply() {
        assert_eq!(ReplyError::from(DispatchError::Empty), ReplyError::Empty);
        assert_eq!(
            ReplyError::from(DispatchError::BadParameter {
                letter: 'V',
                error: DecodeError::Overflow,
            }),
            ReplyError::BadParameter('V')
        );
    }
}
