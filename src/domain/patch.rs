//! Tri-state field for partial updates.

use serde::{Deserialize, Deserializer};

/// A single field of a partial-update body.
///
/// Serde cannot tell a missing key from an explicit `null` with a plain
/// `Option<T>`, so patch structs use this type with `#[serde(default)]`:
/// a missing key stays [`Patch::Absent`], `null` becomes [`Patch::Null`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Key not present: keep the stored value.
    Absent,
    /// Explicit `null`: clear the stored value.
    Null,
    /// New value.
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    /// Apply onto a nullable column.
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Patch::Absent => current,
            Patch::Null => None,
            Patch::Value(value) => Some(value),
        }
    }

    /// Apply onto a required column. `Null` is rejected during validation,
    /// so it is treated like `Absent` here.
    pub fn apply_required(self, current: T) -> T {
        match self {
            Patch::Value(value) => value,
            Patch::Absent | Patch::Null => current,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}
