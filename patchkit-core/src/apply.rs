//! Merge helpers: apply a decoded `Nullable` onto a longer-lived field.

use crate::nullable::Nullable;

/// Overwrite a required field, only when the input holds a value.
///
/// Absent and null leave `target` untouched, so a client cannot clear a
/// column that must not be NULL.
pub fn apply_value<T: Clone>(input: &Nullable<T>, target: &mut T) {
    if let Nullable::Present(value) = input {
        *target = value.clone();
    }
}

/// Update a nullable field.
///
/// - absent: untouched
/// - null: cleared to `None`
/// - value: replaced by `Some` holding a fresh copy
pub fn apply_optional<T: Clone>(input: &Nullable<T>, target: &mut Option<T>) {
    match input {
        Nullable::Absent => {}
        Nullable::Null => *target = None,
        Nullable::Present(value) => *target = Some(value.clone()),
    }
}

impl<T> Nullable<T> {
    /// Consuming form of [`apply_value`].
    pub fn apply_to(self, target: &mut T) {
        if let Self::Present(value) = self {
            *target = value;
        }
    }

    /// Consuming form of [`apply_optional`].
    pub fn apply_to_option(self, target: &mut Option<T>) {
        match self {
            Self::Absent => {}
            Self::Null => *target = None,
            Self::Present(value) => *target = Some(value),
        }
    }
}
