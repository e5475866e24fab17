//! Decoded parameter set handed to command callbacks.

use heapless::Vec;

use crate::config::MAX_NUM_OF_PARAMS;
use crate::types::Value;

/// Error returned when a [`ParamSet`] has no room for another key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CapacityError;

impl core::fmt::Display for CapacityError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "parameter set full")
    }
}

/// Letter-keyed values decoded from one command line.
///
/// Keys are unique. Lookup is a linear scan, which is the fastest option
/// at this size.
///
/// # Example
///
/// ```
/// use linecmd_proto::{ParamSet, Value};
///
/// let mut params = ParamSet::new();
/// params.add('V', Value::Real(1.25)).unwrap();
/// params.add('M', Value::Letter('D')).unwrap();
///
/// assert_eq!(params.real('V'), Some(1.25));
/// assert_eq!(params.letter('M'), Some('D'));
/// assert!(!params.contains('S'));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamSet {
    entries: Vec<(char, Value), MAX_NUM_OF_PARAMS>,
}

impl ParamSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Bind `key` to `value`, replacing any previous value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if `key` is new and the set is full.
    pub fn add(&mut self, key: char, value: Value) -> Result<(), CapacityError> {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
            return Ok(());
        }
        self.entries
            .push((key, value))
            .map_err(|_| CapacityError)
    }

    /// Remove `key`, returning its value if it was bound.
    ///
    /// The last entry takes the removed entry's place.
    pub fn remove(&mut self, key: char) -> Option<Value> {
        let idx = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.swap_remove(idx).1)
    }

    /// Remove all entries.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, key: char) -> bool {
        self.entries.iter().any(|(k, _)| *k == key)
    }

    /// Get the value bound to `key`.
    #[inline]
    #[must_use]
    pub fn get(&self, key: char) -> Option<Value> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    /// Get a letter value. `None` if absent or of another type.
    #[inline]
    #[must_use]
    pub fn letter(&self, key: char) -> Option<char> {
        self.get(key)?.as_letter()
    }

    /// Get an integer value. `None` if absent or of another type.
    #[inline]
    #[must_use]
    pub fn integer(&self, key: char) -> Option<i32> {
        self.get(key)?.as_integer()
    }

    /// Get a real value. `None` if absent or of another type.
    #[inline]
    #[must_use]
    pub fn real(&self, key: char) -> Option<f32> {
        self.get(key)?.as_real()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    ///
    /// Order is not preserved across [`remove`](Self::remove).
    pub fn iter(&self) -> impl Iterator<Item = (char, Value)> + '_ {
        self.entries.iter().copied()
    }
}
