//! Declared write intents and the registry mapping operations to them.
//!
//! Only operations registered here are stamped. Read operations are simply
//! never declared, so they pass through the interceptor unchanged.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use super::AuditField;
use crate::domain::macros::define_error;

/// Kind of write a persistence operation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationIntent {
    /// Creates a record; all four audit fields are stamped.
    Insert,
    /// Modifies a record; only the `updated_*` pair is stamped.
    Update,
}

impl OperationIntent {
    /// Audit fields this intent writes, in order.
    #[must_use]
    pub const fn fields(self) -> &'static [AuditField] {
        match self {
            Self::Insert => &AuditField::ALL,
            Self::Update => &AuditField::UPDATED,
        }
    }
}

impl fmt::Display for OperationIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert => f.write_str("insert"),
            Self::Update => f.write_str("update"),
        }
    }
}

/// Stable name of a persistence operation, such as `category.insert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationId(&'static str);

impl OperationId {
    /// Name an operation.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Operation name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

define_error! {
    /// Errors raised while building an [`IntentRegistry`].
    pub enum RegistryError {
        /// The same operation was declared more than once.
        DuplicateOperation { operation: String } =>
            "operation {operation} is already declared",
    }
}

/// Lookup table from operation to declared intent.
///
/// # Examples
/// ```
/// use backend::domain::stamping::{IntentRegistry, OperationId, OperationIntent};
///
/// const INSERT_DISH: OperationId = OperationId::new("dish.insert");
/// const FIND_DISH: OperationId = OperationId::new("dish.find");
///
/// let registry = IntentRegistry::builder()
///     .insert(INSERT_DISH)
///     .build()
///     .expect("no duplicates");
/// assert_eq!(registry.intent_for(INSERT_DISH), Some(OperationIntent::Insert));
/// assert_eq!(registry.intent_for(FIND_DISH), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct IntentRegistry {
    intents: HashMap<OperationId, OperationIntent>,
}

impl IntentRegistry {
    /// Start declaring operations.
    #[must_use]
    pub fn builder() -> IntentRegistryBuilder {
        IntentRegistryBuilder::default()
    }

    /// Intent declared for `operation`, if any.
    #[must_use]
    pub fn intent_for(&self, operation: OperationId) -> Option<OperationIntent> {
        self.intents.get(&operation).copied()
    }

    /// Number of declared operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    /// Whether no operation is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}

/// Builder collecting operation declarations.
#[derive(Debug, Clone, Default)]
pub struct IntentRegistryBuilder {
    declarations: Vec<(OperationId, OperationIntent)>,
}

impl IntentRegistryBuilder {
    /// Declare `operation` with `intent`.
    #[must_use]
    pub fn declare(mut self, operation: OperationId, intent: OperationIntent) -> Self {
        self.declarations.push((operation, intent));
        self
    }

    /// Declare `operation` as creating records.
    #[must_use]
    pub fn insert(self, operation: OperationId) -> Self {
        self.declare(operation, OperationIntent::Insert)
    }

    /// Declare `operation` as modifying records.
    #[must_use]
    pub fn update(self, operation: OperationId) -> Self {
        self.declare(operation, OperationIntent::Update)
    }

    /// Finish the registry.
    ///
    /// # Errors
    /// Returns [`RegistryError::DuplicateOperation`] when an operation was
    /// declared twice, even with the same intent.
    pub fn build(self) -> Result<IntentRegistry, RegistryError> {
        let mut intents = HashMap::with_capacity(self.declarations.len());
        for (operation, intent) in self.declarations {
            match intents.entry(operation) {
                Entry::Occupied(_) => {
                    return Err(RegistryError::duplicate_operation(operation.as_str()));
                }
                Entry::Vacant(slot) => {
                    slot.insert(intent);
                }
            }
        }
        Ok(IntentRegistry { intents })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const INSERT: OperationId = OperationId::new("category.insert");
    const UPDATE: OperationId = OperationId::new("category.update");
    const FIND: OperationId = OperationId::new("category.find");

    #[rstest]
    fn declared_operations_resolve_to_their_intent() {
        let registry = IntentRegistry::builder()
            .insert(INSERT)
            .update(UPDATE)
            .build()
            .expect("registry builds");

        assert_eq!(registry.intent_for(INSERT), Some(OperationIntent::Insert));
        assert_eq!(registry.intent_for(UPDATE), Some(OperationIntent::Update));
        assert_eq!(registry.intent_for(FIND), None);
        assert_eq!(registry.len(), 2);
    }

    #[rstest]
    #[case(OperationIntent::Insert)]
    #[case(OperationIntent::Update)]
    fn duplicate_declarations_are_rejected(#[case] second: OperationIntent) {
        let err = IntentRegistry::builder()
            .insert(INSERT)
            .declare(INSERT, second)
            .build()
            .expect_err("duplicate declaration");

        assert_eq!(err, RegistryError::duplicate_operation("category.insert"));
    }

    #[rstest]
    fn empty_registry_declares_nothing() {
        let registry = IntentRegistry::default();
        assert!(registry.is_empty());
        assert_eq!(registry.intent_for(INSERT), None);
    }

    #[rstest]
    fn insert_writes_every_field_and_update_only_the_modification_pair() {
        assert_eq!(OperationIntent::Insert.fields(), &AuditField::ALL);
        assert_eq!(
            OperationIntent::Update.fields(),
            &[AuditField::UpdatedAt, AuditField::UpdatedBy]
        );
    }
}
