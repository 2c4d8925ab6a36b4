//! Identity of the user performing a write.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::macros::define_error;

define_error! {
    /// Reasons a textual actor identifier is refused.
    pub enum ActorIdError {
        /// The value is not a decimal integer.
        Malformed { value: String } => "actor id {value:?} is not an integer",
        /// Ids at or below zero belong to the system actor.
        Reserved { id: i64 } => "actor id {id} is reserved",
    }
}

/// Opaque identifier of the acting user, as issued by the login flow.
///
/// [`ActorId::SYSTEM`] marks writes performed without an authenticated
/// actor when the audit policy allows them. Parsing only yields positive
/// ids, so no caller-supplied value can pose as the system actor.
///
/// # Examples
/// ```
/// use backend::domain::ActorId;
///
/// let actor: ActorId = "42".parse().expect("numeric id");
/// assert_eq!(actor.get(), 42);
/// assert!(!actor.is_system());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(i64);

impl ActorId {
    /// Sentinel recorded when no actor is bound to the current task.
    pub const SYSTEM: Self = Self(0);

    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Whether this is the [`ActorId::SYSTEM`] sentinel.
    #[must_use]
    pub const fn is_system(self) -> bool {
        self.0 == Self::SYSTEM.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ActorId {
    type Err = ActorIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let id: i64 = raw.parse().map_err(|_| ActorIdError::malformed(raw))?;
        if id <= Self::SYSTEM.0 {
            return Err(ActorIdError::reserved(id));
        }
        Ok(Self(id))
    }
}
