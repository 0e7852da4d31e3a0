// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use ades_validation::checks::{
    certificate_validity_check, certificate_values_check, prospective_chain_check,
    trusted_certificate_check, CertificateValuesConstraint, ANY_VALUE,
};
use ades_validation::policy::{CryptographicConstraintEvaluator, Level};
use ades_validation::trust::{
    CertificateTrustTime, CommonTrustedCertificateSource, Context, TrustAnchorVerifier,
    TrustTimeRecord, TrustedListsCertificateSource,
};
use ades_validation::{
    CheckContext, CheckItem, Conclusion, ConstraintStatus, Indication, MessageTag, SubIndication,
    ValidationChain,
};
use ades_validation_test_utils::{certificate, certificate_valid_between, utc};
use chrono::{DateTime, Utc};
use std::sync::Arc;

const QC_STATEMENTS: &str = "1.3.6.1.5.5.7.1.3";
const KEY_USAGE: &str = "2.5.29.15";
const QCP_NATURAL: &str = "0.4.0.194112.1.0";

fn run_with(trust: &TrustAnchorVerifier, time: DateTime<Utc>, items: Vec<CheckItem>) -> Conclusion {
    let crypto = CryptographicConstraintEvaluator::absent();
    ValidationChain::builder("C-TARGET")
        .checks(items)
        .build()
        .execute(&CheckContext::new(time, &crypto, trust), Indication::Passed)
}

fn run(time: DateTime<Utc>, items: Vec<CheckItem>) -> Conclusion {
    run_with(&TrustAnchorVerifier::default(), time, items)
}

#[test]
fn validity_range_check_is_inclusive() {
    let cert = certificate_valid_between("leaf", utc(2020, 1, 1), utc(2023, 1, 1));

    for inside in [utc(2020, 1, 1), utc(2021, 7, 1), utc(2023, 1, 1)] {
        let conclusion = run(inside, vec![certificate_validity_check(cert.clone(), Level::Fail)]);
        assert_eq!(Indication::Passed, conclusion.indication);
    }

    let conclusion = run(
        utc(2023, 1, 2),
        vec![certificate_validity_check(cert, Level::Fail)],
    );
    assert_eq!(Indication::Indeterminate, conclusion.indication);
    assert_eq!(Some(SubIndication::OutOfBoundsNoPoe), conclusion.sub_indication);
    assert_eq!(vec!["BBB_XCV_ICTIVRSC_ANS"], conclusion.error_keys());
    let record = conclusion
        .constraint(MessageTag::CertificateValidityRange)
        .unwrap();
    assert_eq!(
        Some(
            "validation time 2023-01-02 00:00:00 (UTC), certificate validity \
             2020-01-01 00:00:00 (UTC) - 2023-01-01 00:00:00 (UTC)"
                .to_string()
        ),
        record.additional_info
    );
}

#[test]
fn values_check_matches_any_expected_value() {
    let cert = certificate("leaf")
        .with_extension_oid(KEY_USAGE)
        .with_extension_oid(QC_STATEMENTS);

    let conclusion = run(
        utc(2020, 1, 1),
        vec![certificate_values_check(
            cert.clone(),
            CertificateValuesConstraint::new()
                .extension(QC_STATEMENTS)
                .extension("1.2.3"),
            Level::Fail,
        )],
    );
    assert!(conclusion.is_passed());
    let record = conclusion
        .constraint(MessageTag::CertificateValuesMatch)
        .unwrap();
    assert_eq!(
        Some(format!("extensions [{KEY_USAGE}, {QC_STATEMENTS}], policies []")),
        record.additional_info
    );

    let conclusion = run(
        utc(2020, 1, 1),
        vec![certificate_values_check(
            cert,
            CertificateValuesConstraint::new().policy(QCP_NATURAL),
            Level::Fail,
        )],
    );
    assert_eq!(vec!["BBB_XCV_ICVM_ANS"], conclusion.error_keys());
    assert_eq!(
        Some(SubIndication::ChainConstraintsFailure),
        conclusion.sub_indication
    );
}

#[test]
fn values_check_accepts_extension_or_policy() {
    let constraint = || {
        CertificateValuesConstraint::new()
            .extension(KEY_USAGE)
            .policy(QCP_NATURAL)
    };

    for cert in [
        certificate("policy-only").with_policy_oid(QCP_NATURAL),
        certificate("extension-only").with_extension_oid(KEY_USAGE),
        certificate("both")
            .with_extension_oid(KEY_USAGE)
            .with_policy_oid(QCP_NATURAL),
    ] {
        let conclusion = run(
            utc(2020, 1, 1),
            vec![certificate_values_check(cert, constraint(), Level::Fail)],
        );
        assert_eq!(Indication::Passed, conclusion.indication);
        assert!(conclusion.errors.is_empty());
    }

    let conclusion = run(
        utc(2020, 1, 1),
        vec![certificate_values_check(
            certificate("neither")
                .with_extension_oid(QC_STATEMENTS)
                .with_policy_oid("1.2.3"),
            constraint(),
            Level::Fail,
        )],
    );
    assert_eq!(vec!["BBB_XCV_ICVM_ANS"], conclusion.error_keys());
}

#[test]
fn values_wildcard_requires_at_least_one_value() {
    let with_policy = certificate("with-policy").with_policy_oid(QCP_NATURAL);
    let without_policy = certificate("without-policy");
    let wildcard = || CertificateValuesConstraint::new().policy(ANY_VALUE);

    let conclusion = run(
        utc(2020, 1, 1),
        vec![certificate_values_check(with_policy, wildcard(), Level::Fail)],
    );
    assert!(conclusion.is_passed());

    let conclusion = run(
        utc(2020, 1, 1),
        vec![certificate_values_check(without_policy, wildcard(), Level::Warn)],
    );
    assert!(conclusion.is_passed());
    assert_eq!(vec!["BBB_XCV_ICVM_ANS"], conclusion.warning_keys());
}

#[test]
fn empty_expectation_never_matches() {
    let conclusion = run(
        utc(2020, 1, 1),
        vec![certificate_values_check(
            certificate("plain"),
            CertificateValuesConstraint::new(),
            Level::Fail,
        )],
    );
    assert_eq!(Indication::Indeterminate, conclusion.indication);
    assert_eq!(vec!["BBB_XCV_ICVM_ANS"], conclusion.error_keys());

    // an empty policy list does not rescue a failed extension match
    let conclusion = run(
        utc(2020, 1, 1),
        vec![certificate_values_check(
            certificate("extended").with_extension_oid(KEY_USAGE),
            CertificateValuesConstraint::new().extension(QC_STATEMENTS),
            Level::Inform,
        )],
    );
    assert!(conclusion.is_passed());
    assert_eq!(vec!["BBB_XCV_ICVM_ANS"], conclusion.info_keys());
    let record = conclusion
        .constraint(MessageTag::CertificateValuesMatch)
        .unwrap();
    assert_eq!(ConstraintStatus::Information, record.status);
}

#[test]
fn prospective_chain_requires_a_trust_anchor() {
    let root = certificate("root");
    let chain = vec![certificate("leaf"), certificate("ca"), root.clone()];
    let trusted = TrustAnchorVerifier::builder()
        .trusted_certificate_source(Arc::new(CommonTrustedCertificateSource::from_certificates([
            root,
        ])))
        .build();

    let conclusion = run_with(
        &trusted,
        utc(2022, 1, 1),
        vec![prospective_chain_check(chain.clone(), None, Level::Fail)],
    );
    assert!(conclusion.is_passed());
    let record = conclusion
        .constraint(MessageTag::CertificateChainAnchored)
        .unwrap();
    assert_eq!(
        Some(format!("trust anchor {}", certificate("root").id())),
        record.additional_info
    );

    let conclusion = run(
        utc(2022, 1, 1),
        vec![prospective_chain_check(chain, None, Level::Fail)],
    );
    assert_eq!(Indication::Indeterminate, conclusion.indication);
    assert_eq!(
        Some(SubIndication::NoCertificateChainFound),
        conclusion.sub_indication
    );
    assert_eq!(vec!["BBB_XCV_CCCBB_ANS"], conclusion.error_keys());
}

#[test]
fn trust_checks_honour_context_and_escape_hatches() {
    let tsa = certificate("tsa");
    let mut lists = TrustedListsCertificateSource::new();
    lists.add_trust_time(
        tsa.clone(),
        TrustTimeRecord::for_context(
            Context::Timestamp,
            CertificateTrustTime::between(utc(2018, 1, 1), utc(2024, 1, 1)),
        ),
    );
    let mut verifier = TrustAnchorVerifier::builder()
        .trusted_certificate_source(Arc::new(lists))
        .build();
    let time = utc(2020, 1, 1);

    let conclusion = run_with(
        &verifier,
        time,
        vec![
            trusted_certificate_check(tsa.clone(), Some(Context::Timestamp), Level::Fail),
            trusted_certificate_check(tsa.clone(), Some(Context::Signature), Level::Warn),
        ],
    );
    assert!(conclusion.is_passed());
    assert_eq!(vec!["BBB_XCV_ICTA_ANS"], conclusion.warning_keys());

    let stranger = certificate("stranger");
    let items = || {
        vec![
            prospective_chain_check(vec![stranger.clone()], Some(Context::Revocation), Level::Fail),
            prospective_chain_check(vec![stranger.clone()], Some(Context::Signature), Level::Fail),
        ]
    };
    let conclusion = run_with(&verifier, time, items());
    assert_eq!(vec!["BBB_XCV_CCCBB_ANS"], conclusion.error_keys());
    assert_eq!(1, conclusion.constraints.len());

    verifier.set_accept_revocation_untrusted_certificate_chains(true);
    let conclusion = run_with(&verifier, time, items());
    let statuses: Vec<_> = conclusion.constraints.iter().map(|c| c.status).collect();
    assert_eq!(vec![ConstraintStatus::Ok, ConstraintStatus::NotOk], statuses);
}
