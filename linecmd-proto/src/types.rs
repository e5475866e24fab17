//! Core parameter types: ParamKind, ParamSpec, Value.

/// Declared type of a command parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParamKind {
    /// A single ASCII character, e.g. the `D` in `MD`.
    Letter,
    /// Signed 32-bit decimal integer.
    Integer,
    /// 32-bit real number, fixed point or scientific notation.
    Real,
}

/// One declared parameter of a command: its key letter and expected type.
///
/// # Example
///
/// ```
/// use linecmd_proto::{ParamKind, ParamSpec};
///
/// const SPEED: ParamSpec = ParamSpec::real('S');
/// assert_eq!(SPEED.letter, 'S');
/// assert_eq!(SPEED.kind, ParamKind::Real);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParamSpec {
    pub letter: char,
    pub kind: ParamKind,
}

impl ParamSpec {
    #[must_use]
    pub const fn new(letter: char, kind: ParamKind) -> Self {
        Self { letter, kind }
    }

    #[must_use]
    pub const fn letter(letter: char) -> Self {
        Self::new(letter, ParamKind::Letter)
    }

    #[must_use]
    pub const fn integer(letter: char) -> Self {
        Self::new(letter, ParamKind::Integer)
    }

    #[must_use]
    pub const fn real(letter: char) -> Self {
        Self::new(letter, ParamKind::Real)
    }

    /// Check whether a field starts with this parameter's letter.
    #[inline]
    #[must_use]
    pub fn matches(&self, field: &[u8]) -> bool {
        field.first().is_some_and(|&b| b as char == self.letter)
    }
}

/// A decoded parameter value, tagged with its type.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Value {
    Letter(char),
    Integer(i32),
    Real(f32),
}

impl Value {
    /// The type tag of this value.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ParamKind {
        match self {
            Value::Letter(_) => ParamKind::Letter,
            Value::Integer(_) => ParamKind::Integer,
            Value::Real(_) => ParamKind::Real,
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_letter(&self) -> Option<char> {
        match *self {
            Value::Letter(c) => Some(c),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_integer(&self) -> Option<i32> {
        match *self {
            Value::Integer(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_real(&self) -> Option<f32> {
        match *self {
            Value::Real(v) => Some(v),
            _ => None,
        }
    }
}
