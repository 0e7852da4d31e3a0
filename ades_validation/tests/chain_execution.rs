// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use ades_validation::policy::{CryptographicConstraintEvaluator, Level};
use ades_validation::trust::TrustAnchorVerifier;
use ades_validation::{
    CheckContext, CheckItem, CheckOutcome, ConstraintStatus, CustomCheck, Indication, MessageTag,
    SubIndication, ValidationChain,
};
use ades_validation_test_utils::utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const NAMES: [&str; 5] = ["CHECK_1", "CHECK_2", "CHECK_3", "CHECK_4", "CHECK_5"];
const ANSWERS: [&str; 5] = [
    "CHECK_1_ANS",
    "CHECK_2_ANS",
    "CHECK_3_ANS",
    "CHECK_4_ANS",
    "CHECK_5_ANS",
];

fn name(i: usize) -> MessageTag {
    MessageTag::Custom {
        id: NAMES[i],
        text: "Does the check hold?",
    }
}

fn answer(i: usize) -> MessageTag {
    MessageTag::Custom {
        id: ANSWERS[i],
        text: "The check does not hold!",
    }
}

fn check(i: usize, passes: bool, level: Level) -> CheckItem {
    CheckItem::new(
        CustomCheck::new(NAMES[i], move |_| CheckOutcome::from_bool(passes)),
        name(i),
        answer(i),
        level,
    )
}

fn counting_check(i: usize, passes: bool, level: Level, calls: Arc<AtomicUsize>) -> CheckItem {
    CheckItem::new(
        CustomCheck::new(NAMES[i], move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            CheckOutcome::from_bool(passes)
        }),
        name(i),
        answer(i),
        level,
    )
}

struct Fixture {
    crypto: CryptographicConstraintEvaluator,
    trust: TrustAnchorVerifier,
}

impl Fixture {
    fn new() -> Self {
        Self {
            crypto: CryptographicConstraintEvaluator::absent(),
            trust: TrustAnchorVerifier::default(),
        }
    }

    fn ctx(&self) -> CheckContext<'_> {
        CheckContext::new(utc(2024, 5, 1), &self.crypto, &self.trust)
    }
}

#[test]
fn all_passing_checks_yield_success_indication() {
    let fixture = Fixture::new();
    let chain = ValidationChain::builder("target-1")
        .checks((0..5).map(|i| check(i, true, Level::Fail)))
        .build();

    let conclusion = chain.execute(&fixture.ctx(), Indication::Passed);
    assert_eq!(Indication::Passed, conclusion.indication);
    assert_eq!(None, conclusion.sub_indication);
    assert!(conclusion.errors.is_empty());
    assert!(conclusion.warnings.is_empty());
    assert!(conclusion.infos.is_empty());
    assert_eq!("target-1", conclusion.target_id);
    assert_eq!(5, conclusion.constraints.len());
    assert!(conclusion
        .constraints
        .iter()
        .all(|c| c.status == ConstraintStatus::Ok && c.answer.is_none()));
    assert!(conclusion.is_passed());
}

#[test]
fn failing_fail_level_check_halts_the_chain() {
    let fixture = Fixture::new();
    let later_calls = Arc::new(AtomicUsize::new(0));
    let chain = ValidationChain::builder("target-2")
        .check(check(0, true, Level::Fail))
        .check(check(1, true, Level::Fail))
        .check(
            check(2, false, Level::Fail).failure(
                Indication::Failed,
                Some(SubIndication::SigConstraintsFailure),
            ),
        )
        .check(counting_check(3, false, Level::Warn, later_calls.clone()))
        .check(counting_check(4, false, Level::Fail, later_calls.clone()))
        .build();

    let conclusion = chain.execute(&fixture.ctx(), Indication::Passed);

    assert_eq!(Indication::Failed, conclusion.indication);
    assert_eq!(
        Some(SubIndication::SigConstraintsFailure),
        conclusion.sub_indication
    );
    assert_eq!(vec!["CHECK_3_ANS"], conclusion.error_keys());
    assert!(conclusion.warnings.is_empty());
    assert!(conclusion.infos.is_empty());
    assert_eq!(0, later_calls.load(Ordering::SeqCst));

    let statuses: Vec<_> = conclusion.constraints.iter().map(|c| c.status).collect();
    assert_eq!(
        vec![
            ConstraintStatus::Ok,
            ConstraintStatus::Ok,
            ConstraintStatus::NotOk
        ],
        statuses
    );
    assert_eq!(Some(answer(2)), conclusion.constraints[2].answer);
    assert!(conclusion.constraint(name(3)).is_none());
    assert!(conclusion.constraint(name(4)).is_none());
}

#[test]
fn default_failure_indication_is_indeterminate_without_sub_indication() {
    let fixture = Fixture::new();
    let chain = ValidationChain::builder("t")
        .check(check(0, false, Level::Fail))
        .build();
    let conclusion = chain.execute(&fixture.ctx(), Indication::Passed);
    assert_eq!(Indication::Indeterminate, conclusion.indication);
    assert_eq!(None, conclusion.sub_indication);
}

#[test]
fn inform_and_warn_failures_do_not_halt() {
    let fixture = Fixture::new();
    let chain = ValidationChain::builder("target-3")
        .check(check(0, false, Level::Inform))
        .check(check(1, false, Level::Warn))
        .check(check(2, true, Level::Fail))
        .build();

    let conclusion = chain.execute(&fixture.ctx(), Indication::TotalPassed);
    assert_eq!(Indication::TotalPassed, conclusion.indication);
    assert_eq!(None, conclusion.sub_indication);
    assert!(conclusion.errors.is_empty());
    assert_eq!(vec!["CHECK_1_ANS"], conclusion.info_keys());
    assert_eq!(vec!["CHECK_2_ANS"], conclusion.warning_keys());

    let statuses: Vec<_> = conclusion.constraints.iter().map(|c| c.status).collect();
    assert_eq!(
        vec![
            ConstraintStatus::Information,
            ConstraintStatus::Warning,
            ConstraintStatus::Ok
        ],
        statuses
    );
}

#[test]
fn ignored_checks_are_recorded_but_not_evaluated() {
    let fixture = Fixture::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let chain = ValidationChain::builder("target-4")
        .check(counting_check(0, false, Level::Ignore, calls.clone()))
        .check(check(1, true, Level::Fail))
        .build();

    let conclusion = chain.execute(&fixture.ctx(), Indication::Passed);
    assert_eq!(0, calls.load(Ordering::SeqCst));
    assert_eq!(Indication::Passed, conclusion.indication);
    let ignored = conclusion.constraint(name(0)).unwrap();
    assert_eq!(ConstraintStatus::Ignored, ignored.status);
    assert_eq!(None, ignored.answer);
    assert!(conclusion.errors.is_empty());
}

#[test]
fn each_level_reports_a_failure_in_its_own_list() {
    let fixture = Fixture::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let chain = ValidationChain::builder("target-levels")
        .check(counting_check(0, false, Level::Ignore, calls.clone()))
        .check(check(1, false, Level::Inform))
        .check(check(2, false, Level::Warn))
        .check(
            check(3, false, Level::Fail)
                .failure(Indication::Failed, Some(SubIndication::HashFailure)),
        )
        .check(counting_check(4, false, Level::Ignore, calls.clone()))
        .build();

    let conclusion = chain.execute(&fixture.ctx(), Indication::Passed);
    assert_eq!(0, calls.load(Ordering::SeqCst));
    assert_eq!(Indication::Failed, conclusion.indication);
    assert_eq!(Some(SubIndication::HashFailure), conclusion.sub_indication);
    assert_eq!(vec!["CHECK_2_ANS"], conclusion.info_keys());
    assert_eq!(vec!["CHECK_3_ANS"], conclusion.warning_keys());
    assert_eq!(vec!["CHECK_4_ANS"], conclusion.error_keys());

    let records: Vec<_> = conclusion
        .constraints
        .iter()
        .map(|c| (c.status, c.answer.map(|a| a.id())))
        .collect();
    assert_eq!(
        vec![
            (ConstraintStatus::Ignored, None),
            (ConstraintStatus::Information, Some("CHECK_2_ANS")),
            (ConstraintStatus::Warning, Some("CHECK_3_ANS")),
            (ConstraintStatus::NotOk, Some("CHECK_4_ANS")),
        ],
        records
    );
}

#[test]
fn re_execution_yields_identical_conclusions() {
    let fixture = Fixture::new();
    let chain = ValidationChain::builder("target-5")
        .check(check(0, false, Level::Warn))
        .check(check(1, true, Level::Fail).info_on_success())
        .check(
            check(2, false, Level::Fail)
                .failure(Indication::Indeterminate, Some(SubIndication::TryLater)),
        )
        .check(check(3, true, Level::Fail))
        .build();

    let first = chain.execute(&fixture.ctx(), Indication::Passed);
    let second = chain.execute(&fixture.ctx(), Indication::Passed);
    assert_eq!(first, second);
    assert_eq!(Some(SubIndication::TryLater), second.sub_indication);
}

#[test]
fn fallback_that_holds_passes_with_warning() {
    let fixture = Fixture::new();
    let warning = MessageTag::Custom {
        id: "FALLBACK_USED",
        text: "Accepted through a fallback.",
    };
    let item = check(0, false, Level::Fail).with_fallback(
        CustomCheck::new("fallback", |_| CheckOutcome::passed().with_info("via fallback")),
        warning,
    );
    let chain = ValidationChain::builder("t").check(item).build();

    let conclusion = chain.execute(&fixture.ctx(), Indication::Passed);
    assert_eq!(Indication::Passed, conclusion.indication);
    assert!(conclusion.errors.is_empty());
    assert_eq!(vec!["FALLBACK_USED"], conclusion.warning_keys());
    let record = conclusion.constraint(name(0)).unwrap();
    assert_eq!(ConstraintStatus::Ok, record.status);
    assert_eq!(Some("via fallback".to_string()), record.additional_info);
}

#[test]
fn fallback_is_skipped_when_primary_passes() {
    let fixture = Fixture::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let item = check(0, true, Level::Fail).with_fallback(
        CustomCheck::new("fallback", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            CheckOutcome::passed()
        }),
        MessageTag::LegacyEncryptionAlgorithmAlias,
    );
    let chain = ValidationChain::builder("t").check(item).build();

    let conclusion = chain.execute(&fixture.ctx(), Indication::Passed);
    assert_eq!(0, calls.load(Ordering::SeqCst));
    assert!(conclusion.warnings.is_empty());
}

#[test]
fn failing_fallback_keeps_primary_failure() {
    let fixture = Fixture::new();
    let item = check(0, false, Level::Fail)
        .with_fallback(
            CustomCheck::new("fallback", |_| CheckOutcome::failed()),
            MessageTag::LegacyEncryptionAlgorithmAlias,
        )
        .failure(Indication::Failed, None);
    let chain = ValidationChain::builder("t").check(item).build();

    let conclusion = chain.execute(&fixture.ctx(), Indication::Passed);
    assert_eq!(Indication::Failed, conclusion.indication);
    assert_eq!(vec!["CHECK_1_ANS"], conclusion.error_keys());
    assert!(conclusion.warnings.is_empty());
}

#[test]
fn info_on_success_reports_the_check_name() {
    let fixture = Fixture::new();
    let chain = ValidationChain::builder("t")
        .check(check(0, true, Level::Fail).info_on_success())
        .check(check(1, true, Level::Fail))
        .build();

    let conclusion = chain.execute(&fixture.ctx(), Indication::Passed);
    assert_eq!(vec!["CHECK_1"], conclusion.info_keys());
    assert_eq!("Does the check hold?", conclusion.infos[0].text);
}

#[test]
fn custom_checks_see_the_validation_time() {
    let fixture = Fixture::new();
    let item = CheckItem::new(
        CustomCheck::new("after_2020", |ctx| {
            CheckOutcome::from_bool(ctx.validation_time > utc(2020, 1, 1))
        }),
        name(0),
        answer(0),
        Level::Fail,
    );
    let chain = ValidationChain::builder("t").check(item).build();

    let conclusion = chain.execute(&fixture.ctx(), Indication::Passed);
    assert!(conclusion.is_passed());

    let early = CheckContext::new(utc(2019, 1, 1), &fixture.crypto, &fixture.trust);
    assert!(!chain.execute(&early, Indication::Passed).is_passed());
}

#[test]
fn empty_chain_passes() {
    let fixture = Fixture::new();
    let chain = ValidationChain::builder("empty").build();
    let conclusion = chain.execute(&fixture.ctx(), Indication::Passed);
    assert_eq!(Indication::Passed, conclusion.indication);
    assert!(conclusion.constraints.is_empty());
    assert!(chain.items().is_empty());
    assert_eq!("empty", chain.target_id());
}
