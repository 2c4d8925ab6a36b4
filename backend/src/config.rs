//! Audit stamping configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::stamping::MissingActorPolicy;

/// Header carrying the acting user's identifier when none is configured.
pub const DEFAULT_ACTOR_HEADER: &str = "x-actor-id";

/// Configuration values controlling audit stamping at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "AUDIT")]
pub struct AuditSettings {
    /// Refuse declared writes that run without a bound actor.
    #[ortho_config(default = false)]
    pub reject_missing_actor: bool,
    /// Optional request header override for the actor identifier.
    pub actor_header: Option<String>,
}

impl AuditSettings {
    /// Policy applied when a write has no actor.
    pub fn missing_actor_policy(&self) -> MissingActorPolicy {
        if self.reject_missing_actor {
            MissingActorPolicy::Reject
        } else {
            MissingActorPolicy::StampSystem
        }
    }

    /// Return the configured actor header, falling back to the default.
    pub fn actor_header(&self) -> &str {
        self.actor_header
            .as_deref()
            .map(str::trim)
            .filter(|header| !header.is_empty())
            .unwrap_or(DEFAULT_ACTOR_HEADER)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for audit configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> AuditSettings {
        AuditSettings::load_from_iter([OsString::from("backend")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("AUDIT_REJECT_MISSING_ACTOR", None::<String>),
            ("AUDIT_ACTOR_HEADER", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(!settings.reject_missing_actor);
        assert_eq!(
            settings.missing_actor_policy(),
            MissingActorPolicy::StampSystem
        );
        assert_eq!(settings.actor_header(), DEFAULT_ACTOR_HEADER);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("AUDIT_REJECT_MISSING_ACTOR", Some("true".to_owned())),
            ("AUDIT_ACTOR_HEADER", Some("x-operator".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.missing_actor_policy(), MissingActorPolicy::Reject);
        assert_eq!(settings.actor_header(), "x-operator");
    }

    #[rstest]
    fn blank_header_falls_back_to_default() {
        let _guard = lock_env([
            ("AUDIT_REJECT_MISSING_ACTOR", None::<String>),
            ("AUDIT_ACTOR_HEADER", Some("   ".to_owned())),
        ]);

        assert_eq!(load_from_empty_args().actor_header(), DEFAULT_ACTOR_HEADER);
    }
}
