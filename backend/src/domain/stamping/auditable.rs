//! Capability trait for entities carrying audit fields.

use std::fmt;

use chrono::{DateTime, Utc};

use super::StampError;
use crate::domain::ActorId;

/// One of the four conventional audit fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditField {
    /// When the record was created.
    CreatedAt,
    /// Who created the record.
    CreatedBy,
    /// When the record was last modified.
    UpdatedAt,
    /// Who last modified the record.
    UpdatedBy,
}

impl AuditField {
    /// Every audit field, in stamping order.
    pub const ALL: [Self; 4] = [
        Self::CreatedAt,
        Self::CreatedBy,
        Self::UpdatedAt,
        Self::UpdatedBy,
    ];

    /// Only the modification pair.
    pub const UPDATED: [Self; 2] = [Self::UpdatedAt, Self::UpdatedBy];

    /// Name of the [`Auditable`] setter writing this field.
    #[must_use]
    pub const fn setter_name(self) -> &'static str {
        match self {
            Self::CreatedAt => "set_created_at",
            Self::CreatedBy => "set_created_by",
            Self::UpdatedAt => "set_updated_at",
            Self::UpdatedBy => "set_updated_by",
        }
    }
}

impl fmt::Display for AuditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.setter_name())
    }
}

fn missing<T: ?Sized>(field: AuditField) -> StampError {
    StampError::missing_setter(std::any::type_name::<T>(), field.setter_name())
}

/// Entity whose audit fields can be stamped before a write.
///
/// `AUDIT_FIELDS` declares which setters the type exposes. The stamper
/// checks it before touching the entity, so a type lacking a field the
/// intent needs fails without being partially written. Setters that are
/// not overridden report [`StampError::MissingSetter`]. Types used only
/// with update operations may omit the created pair.
///
/// Most entities implement this through [`impl_auditable!`](crate::impl_auditable).
pub trait Auditable {
    /// Setters this type exposes.
    const AUDIT_FIELDS: &'static [AuditField];

    /// Whether the type exposes the setter for `field`.
    fn exposes(field: AuditField) -> bool {
        Self::AUDIT_FIELDS.contains(&field)
    }

    /// Record the creation time.
    ///
    /// # Errors
    /// Fails when the type does not store a creation time.
    fn set_created_at(&mut self, _at: DateTime<Utc>) -> Result<(), StampError> {
        Err(missing::<Self>(AuditField::CreatedAt))
    }

    /// Record the creating actor.
    ///
    /// # Errors
    /// Fails when the type does not store a creating actor.
    fn set_created_by(&mut self, _actor: ActorId) -> Result<(), StampError> {
        Err(missing::<Self>(AuditField::CreatedBy))
    }

    /// Record the modification time.
    ///
    /// # Errors
    /// Fails when the type does not store a modification time.
    fn set_updated_at(&mut self, _at: DateTime<Utc>) -> Result<(), StampError> {
        Err(missing::<Self>(AuditField::UpdatedAt))
    }

    /// Record the modifying actor.
    ///
    /// # Errors
    /// Fails when the type does not store a modifying actor.
    fn set_updated_by(&mut self, _actor: ActorId) -> Result<(), StampError> {
        Err(missing::<Self>(AuditField::UpdatedBy))
    }
}

/// Implement [`Auditable`] for a struct by naming its audit fields.
///
/// Time fields must be `Option<DateTime<Utc>>` and actor fields
/// `Option<ActorId>`. Naming only the `updated_*` pair produces an
/// update-only entity.
///
/// # Examples
/// ```
/// use backend::domain::ActorId;
/// use backend::domain::stamping::{Auditable, AuditField};
/// use chrono::{DateTime, Utc};
///
/// #[derive(Default)]
/// struct Dish {
///     create_time: Option<DateTime<Utc>>,
///     create_user: Option<ActorId>,
///     update_time: Option<DateTime<Utc>>,
///     update_user: Option<ActorId>,
/// }
///
/// backend::impl_auditable!(Dish {
///     created_at: create_time,
///     created_by: create_user,
///     updated_at: update_time,
///     updated_by: update_user,
/// });
///
/// assert!(Dish::exposes(AuditField::CreatedBy));
/// ```
#[macro_export]
macro_rules! impl_auditable {
    (@updated $updated_at:ident, $updated_by:ident) => {
        fn set_updated_at(
            &mut self,
            at: $crate::domain::stamping::AuditTimestamp,
        ) -> ::core::result::Result<(), $crate::domain::stamping::StampError> {
            self.$updated_at = ::core::option::Option::Some(at);
            ::core::result::Result::Ok(())
        }

        fn set_updated_by(
            &mut self,
            actor: $crate::domain::ActorId,
        ) -> ::core::result::Result<(), $crate::domain::stamping::StampError> {
            self.$updated_by = ::core::option::Option::Some(actor);
            ::core::result::Result::Ok(())
        }
    };
    (
        $entity:ty {
            created_at: $created_at:ident,
            created_by: $created_by:ident,
            updated_at: $updated_at:ident,
            updated_by: $updated_by:ident $(,)?
        }
    ) => {
        impl $crate::domain::stamping::Auditable for $entity {
            const AUDIT_FIELDS: &'static [$crate::domain::stamping::AuditField] =
                &$crate::domain::stamping::AuditField::ALL;

            fn set_created_at(
                &mut self,
                at: $crate::domain::stamping::AuditTimestamp,
            ) -> ::core::result::Result<(), $crate::domain::stamping::StampError> {
                self.$created_at = ::core::option::Option::Some(at);
                ::core::result::Result::Ok(())
            }

            fn set_created_by(
                &mut self,
                actor: $crate::domain::ActorId,
            ) -> ::core::result::Result<(), $crate::domain::stamping::StampError> {
                self.$created_by = ::core::option::Option::Some(actor);
                ::core::result::Result::Ok(())
            }

            $crate::impl_auditable!(@updated $updated_at, $updated_by);
        }
    };
    (
        $entity:ty {
            updated_at: $updated_at:ident,
            updated_by: $updated_by:ident $(,)?
        }
    ) => {
        impl $crate::domain::stamping::Auditable for $entity {
            const AUDIT_FIELDS: &'static [$crate::domain::stamping::AuditField] =
                &$crate::domain::stamping::AuditField::UPDATED;

            $crate::impl_auditable!(@updated $updated_at, $updated_by);
        }
    };
}
