//! Writes audit metadata onto a single entity.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, warn};

use super::{AuditField, Auditable, OperationIntent, StampError};
use crate::domain::ActorId;

/// What to do when a write runs without an actor bound to its task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingActorPolicy {
    /// Record [`ActorId::SYSTEM`] in the actor fields.
    #[default]
    StampSystem,
    /// Fail the write with [`StampError::MissingActor`].
    Reject,
}

/// Stamps creation and modification metadata onto entities.
///
/// The timestamp is read once per stamp, so an insert records the same
/// instant in both its created and updated fields.
#[derive(Clone)]
pub struct AuditStamper {
    clock: Arc<dyn Clock + Send + Sync>,
    policy: MissingActorPolicy,
}

impl AuditStamper {
    /// Create a stamper reading time from `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock + Send + Sync>, policy: MissingActorPolicy) -> Self {
        Self { clock, policy }
    }

    /// Stamp `entity` for `intent`, attributing it to `actor`.
    ///
    /// Every setter the intent needs is checked before any field is
    /// written; on error the entity is left as it was.
    ///
    /// # Errors
    /// [`StampError::MissingSetter`] when the entity lacks a required audit
    /// field, [`StampError::MissingActor`] when `actor` is absent and the
    /// policy is [`MissingActorPolicy::Reject`].
    pub fn stamp<E>(
        &self,
        operation: &str,
        intent: OperationIntent,
        actor: Option<ActorId>,
        entity: &mut E,
    ) -> Result<(), StampError>
    where
        E: Auditable + ?Sized,
    {
        let actor = self.resolve_actor(operation, actor)?;
        let fields = intent.fields();
        if let Some(field) = fields.iter().copied().find(|field| !E::exposes(*field)) {
            return Err(StampError::missing_setter(
                std::any::type_name::<E>(),
                field.setter_name(),
            ));
        }

        let now = self.clock.utc();
        for field in fields {
            match field {
                AuditField::CreatedAt => entity.set_created_at(now)?,
                AuditField::CreatedBy => entity.set_created_by(actor)?,
                AuditField::UpdatedAt => entity.set_updated_at(now)?,
                AuditField::UpdatedBy => entity.set_updated_by(actor)?,
            }
        }

        debug!(
            operation,
            intent = %intent,
            actor = %actor,
            system = actor.is_system(),
            stamped_at = %now,
            "audit fields stamped"
        );
        Ok(())
    }

    fn resolve_actor(
        &self,
        operation: &str,
        actor: Option<ActorId>,
    ) -> Result<ActorId, StampError> {
        match (actor, self.policy) {
            (Some(actor), _) => Ok(actor),
            (None, MissingActorPolicy::StampSystem) => {
                warn!(operation, "no actor bound to task; stamping system actor");
                Ok(ActorId::SYSTEM)
            }
            (None, MissingActorPolicy::Reject) => Err(StampError::missing_actor(operation)),
        }
    }
}
