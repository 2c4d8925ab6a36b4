//! Tests for the stamping interceptor.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::stamping::{AuditField, MissingActorPolicy, OperationIntent};
use crate::test_support::{FixtureClock, MutableClock};

const INSERT_TEA: OperationId = OperationId::new("tea.insert");
const UPDATE_TEA: OperationId = OperationId::new("tea.update");
const FIND_TEA: OperationId = OperationId::new("tea.find");

#[derive(Debug, Default, Clone, PartialEq)]
struct Tea {
    name: String,
    created_at: Option<DateTime<Utc>>,
    created_by: Option<ActorId>,
    updated_at: Option<DateTime<Utc>>,
    updated_by: Option<ActorId>,
}

crate::impl_auditable!(Tea {
    created_at: created_at,
    created_by: created_by,
    updated_at: updated_at,
    updated_by: updated_by,
});

impl Tea {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct TimestampOnly {
    updated_at: Option<DateTime<Utc>>,
}

impl Auditable for TimestampOnly {
    const AUDIT_FIELDS: &'static [AuditField] = &[AuditField::UpdatedAt];

    fn set_updated_at(&mut self, at: DateTime<Utc>) -> Result<(), StampError> {
        self.updated_at = Some(at);
        Ok(())
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Steep {
    seconds: u32,
    updated_at: Option<DateTime<Utc>>,
    updated_by: Option<ActorId>,
}

crate::impl_auditable!(Steep {
    updated_at: updated_at,
    updated_by: updated_by,
});

#[fixture]
fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 8, 0, 0)
        .single()
        .expect("valid time")
}

#[fixture]
fn registry() -> Arc<IntentRegistry> {
    Arc::new(
        IntentRegistry::builder()
            .insert(INSERT_TEA)
            .update(UPDATE_TEA)
            .build()
            .expect("registry builds"),
    )
}

fn interceptor_at(
    registry: Arc<IntentRegistry>,
    clock: Arc<dyn mockable::Clock + Send + Sync>,
    policy: MissingActorPolicy,
) -> StampingInterceptor {
    StampingInterceptor::new(registry, AuditStamper::new(clock, policy))
}

#[fixture]
fn interceptor(registry: Arc<IntentRegistry>, t0: DateTime<Utc>) -> StampingInterceptor {
    interceptor_at(
        registry,
        Arc::new(FixtureClock::new(t0)),
        MissingActorPolicy::Reject,
    )
}

#[rstest]
fn insert_scenario_stamps_actor_and_single_timestamp(
    interceptor: StampingInterceptor,
    t0: DateTime<Utc>,
) {
    let mut args = [Tea::named("tea")];
    interceptor
        .before(INSERT_TEA, Some(ActorId::new(42)), &mut args)
        .expect("stamp succeeds");

    let [tea] = args;
    assert_eq!(tea.name, "tea");
    assert_eq!(tea.created_by, Some(ActorId::new(42)));
    assert_eq!(tea.updated_by, Some(ActorId::new(42)));
    assert_eq!(tea.created_at, Some(t0));
    assert_eq!(tea.created_at, tea.updated_at);
}

#[rstest]
fn update_scenario_keeps_creation_and_advances_modification(
    registry: Arc<IntentRegistry>,
    t0: DateTime<Utc>,
) {
    let clock = Arc::new(MutableClock::new(t0));
    let interceptor = interceptor_at(registry, clock.clone(), MissingActorPolicy::Reject);

    let mut args = vec![Tea::named("tea")];
    interceptor
        .before(INSERT_TEA, Some(ActorId::new(42)), &mut args)
        .expect("insert stamp");

    clock.advance_seconds(90);
    interceptor
        .before(UPDATE_TEA, Some(ActorId::new(7)), &mut args)
        .expect("update stamp");

    let tea = args.first().expect("entity present");
    assert_eq!(tea.created_by, Some(ActorId::new(42)));
    assert_eq!(tea.created_at, Some(t0));
    assert_eq!(tea.updated_by, Some(ActorId::new(7)));
    assert_eq!(tea.updated_at, Some(t0 + TimeDelta::seconds(90)));
    assert!(tea.updated_at > tea.created_at);
}

#[rstest]
fn undeclared_operations_never_mutate_arguments(interceptor: StampingInterceptor) {
    let original = Tea::named("oolong");
    let mut args = vec![original.clone(), Tea::named("sencha")];

    let seen = interceptor
        .intercept_in(
            &RequestContext::for_actor(ActorId::new(1)),
            FIND_TEA,
            &mut args,
            |args| Ok::<_, std::convert::Infallible>(args.len()),
        )
        .expect("pass through");

    assert_eq!(seen, 2);
    assert_eq!(args.first(), Some(&original));
}

#[rstest]
fn zero_arguments_skip_stamping(interceptor: StampingInterceptor) {
    let mut args: Vec<Tea> = Vec::new();
    let ran = interceptor
        .intercept_in(
            &RequestContext::for_actor(ActorId::new(1)),
            INSERT_TEA,
            &mut args,
            |_| Ok::<_, std::convert::Infallible>(true),
        )
        .expect("empty call proceeds");

    assert!(ran);
    assert!(args.is_empty());
}

#[rstest]
fn only_the_first_argument_is_stamped(interceptor: StampingInterceptor) {
    let mut args = vec![Tea::named("first"), Tea::named("second")];
    interceptor
        .before(INSERT_TEA, Some(ActorId::new(3)), &mut args)
        .expect("stamp succeeds");

    let stamped: Vec<bool> = args.iter().map(|tea| tea.created_by.is_some()).collect();
    assert_eq!(stamped, vec![true, false]);
}

#[rstest]
fn missing_setter_aborts_before_the_body_runs(interceptor: StampingInterceptor) {
    let mut args = vec![TimestampOnly::default()];
    let mut body_ran = false;

    let err = interceptor
        .intercept_in(
            &RequestContext::for_actor(ActorId::new(7)),
            UPDATE_TEA,
            &mut args,
            |_| {
                body_ran = true;
                Ok::<_, std::convert::Infallible>(())
            },
        )
        .expect_err("missing updated_by setter");

    assert!(!body_ran);
    assert!(matches!(
        err.as_stamp(),
        Some(StampError::MissingSetter { field, .. }) if field == "set_updated_by"
    ));
    assert_eq!(args.first(), Some(&TimestampOnly::default()));
}

#[rstest]
fn operation_errors_are_distinguished_from_stamp_errors(interceptor: StampingInterceptor) {
    let mut args = vec![Tea::named("tea")];
    let err = interceptor
        .intercept_in(
            &RequestContext::for_actor(ActorId::new(7)),
            INSERT_TEA,
            &mut args,
            |_| Err::<(), _>("disk full"),
        )
        .expect_err("body fails");

    assert!(matches!(err, InterceptError::Operation("disk full")));
    assert!(err.as_stamp().is_none());
}

#[rstest]
fn strict_policy_rejects_calls_without_actor(interceptor: StampingInterceptor) {
    let mut args = vec![Tea::named("tea")];
    let err = interceptor
        .intercept_in(&RequestContext::anonymous(), INSERT_TEA, &mut args, |_| {
            Ok::<_, std::convert::Infallible>(())
        })
        .expect_err("actor required");

    assert_eq!(err.as_stamp(), Some(&StampError::missing_actor("tea.insert")));
    assert_eq!(args.first(), Some(&Tea::named("tea")));
}

#[rstest]
fn lenient_policy_stamps_system_actor(registry: Arc<IntentRegistry>, t0: DateTime<Utc>) {
    let interceptor = interceptor_at(
        registry,
        Arc::new(FixtureClock::new(t0)),
        MissingActorPolicy::StampSystem,
    );
    let mut args = vec![Tea::named("tea")];
    interceptor
        .intercept(INSERT_TEA, &mut args, |_| Ok::<_, std::convert::Infallible>(()))
        .expect("system actor substituted");

    let tea = args.first().expect("entity present");
    assert_eq!(tea.created_by, Some(ActorId::SYSTEM));
    assert_eq!(tea.updated_by, Some(ActorId::SYSTEM));
}

#[rstest]
#[tokio::test]
async fn intercept_reads_the_task_local_actor(interceptor: StampingInterceptor) {
    let stamped = ActorContext::scope_with(ActorId::new(42), async {
        let mut args = vec![Tea::named("tea")];
        interceptor
            .intercept(INSERT_TEA, &mut args, |args| {
                Ok::<_, std::convert::Infallible>(args.first().cloned())
            })
            .expect("stamp succeeds")
    })
    .await
    .expect("entity present");

    assert_eq!(stamped.created_by, Some(ActorId::new(42)));
}

#[rstest]
#[tokio::test]
async fn intercept_async_hands_stamped_arguments_to_body(
    interceptor: StampingInterceptor,
    t0: DateTime<Utc>,
) {
    let stamped = ActorContext::scope_with(ActorId::new(8), async {
        interceptor
            .intercept_async(UPDATE_TEA, vec![Tea::named("tea")], |args| async move {
                Ok::<_, std::convert::Infallible>(args.into_iter().next())
            })
            .await
            .expect("stamp succeeds")
    })
    .await
    .expect("entity present");

    assert_eq!(stamped.updated_by, Some(ActorId::new(8)));
    assert_eq!(stamped.updated_at, Some(t0));
    assert_eq!(stamped.created_by, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_see_only_their_own_actor(interceptor: StampingInterceptor) {
    let interceptor = Arc::new(interceptor);
    let handles: Vec<_> = (1..=32_i64)
        .map(|id| {
            let interceptor = Arc::clone(&interceptor);
            tokio::spawn(ActorContext::scope(async move {
                ActorContext::set_current(ActorId::new(id)).expect("inside scope");
                tokio::task::yield_now().await;
                let tea = interceptor
                    .intercept_async(INSERT_TEA, vec![Tea::named("tea")], |args| async move {
                        tokio::task::yield_now().await;
                        Ok::<_, std::convert::Infallible>(args.into_iter().next())
                    })
                    .await
                    .expect("stamp succeeds")
                    .expect("entity present");
                (id, tea)
            }))
        })
        .collect();

    for handle in handles {
        let (id, tea) = handle.await.expect("task completes");
        assert_eq!(tea.created_by, Some(ActorId::new(id)));
        assert_eq!(tea.updated_by, Some(ActorId::new(id)));
    }
}

#[rstest]
fn explicit_context_overrides_absent_task_local(interceptor: StampingInterceptor) {
    let mut args = vec![Tea::named("tea")];
    interceptor
        .intercept_in(
            &RequestContext::for_actor(ActorId::new(99)),
            INSERT_TEA,
            &mut args,
            |_| Ok::<_, std::convert::Infallible>(()),
        )
        .expect("stamp succeeds");

    assert_eq!(
        args.first().and_then(|tea| tea.created_by),
        Some(ActorId::new(99))
    );
    assert_eq!(
        interceptor.registry().intent_for(INSERT_TEA),
        Some(OperationIntent::Insert)
    );
}

#[rstest]
fn update_only_entities_are_stamped_on_update(
    interceptor: StampingInterceptor,
    t0: DateTime<Utc>,
) {
    let mut args = vec![Steep {
        seconds: 180,
        ..Steep::default()
    }];
    interceptor
        .intercept_in(
            &RequestContext::for_actor(ActorId::new(7)),
            UPDATE_TEA,
            &mut args,
            |_| Ok::<_, std::convert::Infallible>(()),
        )
        .expect("update stamps");

    let [steep] = args.as_slice() else {
        panic!("one argument expected");
    };
    assert_eq!(steep.seconds, 180);
    assert_eq!(steep.updated_at, Some(t0));
    assert_eq!(steep.updated_by, Some(ActorId::new(7)));
}

#[rstest]
fn update_only_entities_cannot_be_inserted(interceptor: StampingInterceptor) {
    let mut args = vec![Steep::default()];
    let mut body_ran = false;

    let err = interceptor
        .intercept_in(
            &RequestContext::for_actor(ActorId::new(7)),
            INSERT_TEA,
            &mut args,
            |_| {
                body_ran = true;
                Ok::<_, std::convert::Infallible>(())
            },
        )
        .expect_err("creation setters are missing");

    assert!(!body_ran);
    assert!(matches!(
        err.as_stamp(),
        Some(StampError::MissingSetter { field, .. }) if field == "set_created_at"
    ));
    assert_eq!(args, vec![Steep::default()]);
}
