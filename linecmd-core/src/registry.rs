//! Command descriptors and the bounded table that holds them.

use heapless::Vec;
use linecmd_proto::{
    ParamSet, ParamSpec, MAX_COMMAND_NAME_LENGTH, MAX_NUM_OF_COMMANDS, MAX_NUM_OF_PARAMS,
};

/// Function invoked with the decoded parameters of a matched line.
///
/// `C` is the application context the parser was asked to dispatch into.
pub type Callback<C> = fn(&mut C, &ParamSet);

/// Static description of one command.
///
/// Descriptors are usually `static` tables built with [`Command::new`]:
///
/// ```
/// use linecmd_core::Command;
/// use linecmd_proto::{ParamSet, ParamSpec};
///
/// struct Pump { volume: f32 }
///
/// fn on_pump(pump: &mut Pump, params: &ParamSet) {
///     if let Some(v) = params.real('V') {
///         pump.volume = v;
///     }
/// }
///
/// const PUMP_PARAMS: &[ParamSpec] = &[ParamSpec::letter('M'), ParamSpec::real('V')];
/// static PUMP: Command<Pump> = Command::new("pump", PUMP_PARAMS, on_pump);
/// assert_eq!(PUMP.param_count(), 2);
/// ```
pub struct Command<C = ()> {
    /// Name matched against the first field of a line.
    pub name: &'static str,
    /// Declared parameters, scanned in this order.
    pub params: &'static [ParamSpec],
    pub callback: Callback<C>,
}

impl<C> Command<C> {
    #[must_use]
    pub const fn new(
        name: &'static str,
        params: &'static [ParamSpec],
        callback: Callback<C>,
    ) -> Self {
        Self {
            name,
            params,
            callback,
        }
    }

    #[inline]
    #[must_use]
    pub const fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Exact, case-sensitive name comparison.
    #[inline]
    #[must_use]
    pub fn is_named(&self, name: &[u8]) -> bool {
        self.name.as_bytes() == name
    }

    fn validate(&self) -> Result<(), RegisterError> {
        let name = self.name.as_bytes();
        if name.is_empty() || name.contains(&b' ') {
            return Err(RegisterError::InvalidName);
        }
        if name.len() > MAX_COMMAND_NAME_LENGTH {
            return Err(RegisterError::NameTooLong);
        }
        if self.params.len() > MAX_NUM_OF_PARAMS {
            return Err(RegisterError::TooManyParams);
        }
        for (i, spec) in self.params.iter().enumerate() {
            if self.params[..i].iter().any(|p| p.letter == spec.letter) {
                return Err(RegisterError::DuplicateParam(spec.letter));
            }
        }
        Ok(())
    }
}

impl<C> core::fmt::Debug for Command<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Error type for command registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterError {
    /// The registry already holds its maximum number of commands.
    RegistryFull,
    /// The name is longer than [`MAX_COMMAND_NAME_LENGTH`].
    NameTooLong,
    /// The name is empty or contains a field separator.
    InvalidName,
    /// More parameters than [`MAX_NUM_OF_PARAMS`].
    TooManyParams,
    /// Two parameters share this letter.
    DuplicateParam(char),
}

impl core::fmt::Display for RegisterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::RegistryFull => write!(f, "registry full"),
            Self::NameTooLong => write!(f, "command name too long"),
            Self::InvalidName => write!(f, "invalid command name"),
            Self::TooManyParams => write!(f, "too many parameters"),
            Self::DuplicateParam(letter) => write!(f, "parameter {} declared twice", letter),
        }
    }
}

/// Insertion-ordered table of up to `N` command descriptors.
///
/// The registry only borrows descriptors; [`reset`](Self::reset) forgets
/// them without touching their storage.
pub struct Registry<'a, C, const N: usize = MAX_NUM_OF_COMMANDS> {
    commands: Vec<&'a Command<C>, N>,
}

impl<'a, C, const N: usize> Registry<'a, C, N> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Append a command.
    ///
    /// A name that is already registered is accepted, but lookups keep
    /// returning the earlier command.
    ///
    /// # Errors
    ///
    /// Rejects invalid descriptors and returns
    /// [`RegisterError::RegistryFull`] once `N` commands are registered.
    pub fn register(&mut self, command: &'a Command<C>) -> Result<(), RegisterError> {
        command.validate()?;

        if self.lookup(command.name.as_bytes()).is_some() {
            warn!("command {} registered twice, first one wins", command.name);
        }

        self.commands
            .push(command)
            .map_err(|_| RegisterError::RegistryFull)
    }

    /// Register every command of a table, in order.
    ///
    /// Stops at the first error; commands before it stay registered.
    pub fn register_all(&mut self, commands: &'a [Command<C>]) -> Result<(), RegisterError> {
        commands.iter().try_for_each(|command| self.register(command))
    }

    /// Forget all registered commands.
    #[inline]
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Find the first command whose name equals `name` exactly.
    pub fn lookup(&self, name: &[u8]) -> Option<&'a Command<C>> {
        self.commands.iter().copied().find(|c| c.is_named(name))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Iterate over commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Command<C>> + '_ {
        self.commands.iter().copied()
    }
}

impl<C, const N: usize> Default for Registry<'_, C, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut (), _: &ParamSet) {}

    const ONE_REAL: &[ParamSpec] = &[ParamSpec::real('T')];
    const SIX: &[ParamSpec] = &[
        ParamSpec::real('A'),
        ParamSpec::real('B'),
        ParamSpec::real('C'),
        ParamSpec::real('D'),
        ParamSpec::real('E'),
        ParamSpec::real('F'),
    ];

    static DELAY: Command = Command::new("delay", ONE_REAL, noop);
    static DELAY_AGAIN: Command = Command::new("delay", &[], noop);
    static MOVE: Command = Command::new("move", &[], noop);

    #[test]
    fn test_register_and_lookup() {
        let mut registry: Registry<()> = Registry::new();
        registry.register(&DELAY).unwrap();
        registry.register(&MOVE).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(core::ptr::eq(registry.lookup(b"delay").unwrap(), &DELAY));
        assert!(core::ptr::eq(registry.lookup(b"move").unwrap(), &MOVE));
    }

    #[test]
    fn test_lookup_is_exact() {
        let mut registry: Registry<()> = Registry::new();
        registry.register(&DELAY).unwrap();

        assert!(registry.lookup(b"dela").is_none());
        assert!(registry.lookup(b"delays").is_none());
        assert!(registry.lookup(b"DELAY").is_none());
        assert!(registry.lookup(b"").is_none());
    }

    #[test]
    fn test_duplicate_name_first_wins() {
        let mut registry: Registry<()> = Registry::new();
        registry.register(&DELAY).unwrap();
        registry.register(&DELAY_AGAIN).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(core::ptr::eq(registry.lookup(b"delay").unwrap(), &DELAY));
    }

    #[test]
    fn test_registry_full() {
        let mut registry: Registry<(), 2> = Registry::new();
        registry.register(&DELAY).unwrap();
        registry.register(&MOVE).unwrap();
        assert_eq!(registry.register(&MOVE), Err(RegisterError::RegistryFull));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.capacity(), 2);
    }

    #[test]
    fn test_rejects_invalid_descriptors() {
        static LONG: Command = Command::new("version", &[], noop);
        static EMPTY: Command = Command::new("", &[], noop);
        static SPACED: Command = Command::new("a b", &[], noop);
        static WIDE: Command = Command::new("wide", SIX, noop);

        let mut registry: Registry<()> = Registry::new();
        assert_eq!(registry.register(&LONG), Err(RegisterError::NameTooLong));
        assert_eq!(registry.register(&EMPTY), Err(RegisterError::InvalidName));
        assert_eq!(registry.register(&SPACED), Err(RegisterError::InvalidName));
        assert_eq!(registry.register(&WIDE), Err(RegisterError::TooManyParams));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_rejects_repeated_param_letter() {
        const TWICE: &[ParamSpec] = &[ParamSpec::integer('V'), ParamSpec::real('V')];
        const CASED: &[ParamSpec] = &[ParamSpec::integer('V'), ParamSpec::real('v')];
        static X: Command = Command::new("x", TWICE, noop);
        static Y: Command = Command::new("y", CASED, noop);

        let mut registry: Registry<()> = Registry::new();
        assert_eq!(registry.register(&X), Err(RegisterError::DuplicateParam('V')));
        assert!(registry.lookup(b"x").is_none());

        // Letters are case-sensitive, so `V` and `v` are distinct keys.
        registry.register(&Y).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_all_stops_at_first_error() {
        static TABLE: [Command; 3] = [
            Command::new("a", &[], noop),
            Command::new("toolong", &[], noop),
            Command::new("c", &[], noop),
        ];

        let mut registry: Registry<()> = Registry::new();
        assert_eq!(registry.register_all(&TABLE), Err(RegisterError::NameTooLong));
        assert_eq!(registry.len(), 1);
        assert!(registry.lookup(b"a").is_some());
        assert!(registry.lookup(b"c").is_none());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut registry: Registry<()> = Registry::new();
        registry.register(&DELAY).unwrap();

        registry.reset();
        assert!(registry.is_empty());
        registry.reset();
        assert!(registry.is_empty());
        assert!(registry.lookup(b"delay").is_none());

        // Descriptors are untouched and can be registered again.
        registry.register(&DELAY).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_iter_in_registration_order() {
        let mut registry: Registry<()> = Registry::new();
        registry.register(&MOVE).unwrap();
        registry.register(&DELAY).unwrap();

        let mut names = registry.iter().map(|c| c.name);
        assert_eq!(names.next(), Some("move"));
        assert_eq!(names.next(), Some("delay"));
        assert_eq!(names.next(), None);
    }
}
