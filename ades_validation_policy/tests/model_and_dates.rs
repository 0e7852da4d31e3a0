// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use ades_validation_policy::dates::{DateFormat, DEFAULT_DATE_PATTERN};
use ades_validation_policy::error::PolicyError;
use ades_validation_policy::shared::SharedConstraintModel;
use ades_validation_policy::{
    ConstraintCategory, ConstraintModel, CryptographicConstraintEvaluator, DigestAlgorithm,
    EncryptionAlgorithm, Level,
};
use ades_validation_test_utils::{default_constraint_model, default_constraint_model_builder, utc};
use chrono::{TimeZone, Utc};
use std::sync::Arc;

#[test]
fn duplicate_expiration_rows_are_rejected() {
    let err = ConstraintModel::builder()
        .expiration_for_key_size(EncryptionAlgorithm::Rsa, 2048, "2025-01-01")
        .expiration_for_key_size(EncryptionAlgorithm::Rsa, 3072, "2030-01-01")
        .expiration_for_key_size(EncryptionAlgorithm::Rsa, 2048, "2026-01-01")
        .build()
        .unwrap_err();
    assert_eq!(
        PolicyError::DuplicateExpirationEntry {
            algorithm: "RSA".to_string(),
            key_size: Some(2048),
        },
        err
    );

    let err = ConstraintModel::builder()
        .expiration(DigestAlgorithm::Sha1, "2009-01-01")
        .expiration(DigestAlgorithm::Sha1, "2010-01-01")
        .build()
        .unwrap_err();
    assert_eq!(
        PolicyError::DuplicateExpirationEntry {
            algorithm: "SHA1".to_string(),
            key_size: None,
        },
        err
    );
}

#[test]
fn zero_minimum_key_size_is_rejected() {
    let err = default_constraint_model_builder()
        .minimum_key_size(EncryptionAlgorithm::EdDsa, 0)
        .build()
        .unwrap_err();
    assert_eq!(PolicyError::ZeroMinimumKeySize("EdDSA".to_string()), err);
}

#[test]
fn acceptable_lists_keep_first_occurrence_order() {
    let model = ConstraintModel::builder()
        .acceptable_digest_algorithms([
            DigestAlgorithm::Sha512,
            DigestAlgorithm::Sha256,
            DigestAlgorithm::Sha512,
        ])
        .acceptable_encryption_algorithm(EncryptionAlgorithm::Ecdsa)
        .acceptable_encryption_algorithm(EncryptionAlgorithm::Ecdsa)
        .build()
        .unwrap();
    assert_eq!(
        ["SHA512".to_string(), "SHA256".to_string()].as_slice(),
        model.acceptable_digest_algorithms()
    );
    assert_eq!(
        ["ECDSA".to_string()].as_slice(),
        model.acceptable_encryption_algorithms()
    );
}

#[test]
fn unparsable_dates_do_not_fail_the_build() {
    let model = ConstraintModel::builder()
        .expiration(DigestAlgorithm::Sha256, "tomorrow")
        .suite_update_date("yesterday")
        .build()
        .unwrap();
    assert_eq!(1, model.expiration_entries().len());
    assert_eq!(Some("yesterday"), model.suite_update_date());
}

#[test]
fn explicit_levels_are_stored_per_category() {
    let model = default_constraint_model();
    assert_eq!(
        Some(Level::Fail),
        model.explicit_level(ConstraintCategory::Global)
    );
    assert_eq!(
        Some(Level::Fail),
        model.explicit_level(ConstraintCategory::ExpirationDate)
    );
    assert_eq!(None, model.explicit_level(ConstraintCategory::MinimumKeySize));
}

#[test]
fn names_parse_from_policy_text() {
    assert_eq!(Ok(Level::Warn), "WARN".parse::<Level>());
    assert_eq!(Ok(Level::Ignore), "IGNORE".parse::<Level>());
    assert_eq!(
        Err(PolicyError::UnknownLevel("warn".to_string())),
        "warn".parse::<Level>()
    );

    for digest in DigestAlgorithm::ALL {
        assert_eq!(Ok(digest), digest.to_string().parse::<DigestAlgorithm>());
    }
    assert_eq!(Ok(DigestAlgorithm::Sha3_256), "SHA3-256".parse::<DigestAlgorithm>());
    assert_eq!(
        Err(PolicyError::UnknownDigestAlgorithm("SHA-256".to_string())),
        "SHA-256".parse::<DigestAlgorithm>()
    );

    assert_eq!(Ok(EncryptionAlgorithm::RsassaPss), "RSASSA-PSS".parse::<EncryptionAlgorithm>());
    assert_eq!(
        Err(PolicyError::UnknownEncryptionAlgorithm("ED25519".to_string())),
        "ED25519".parse::<EncryptionAlgorithm>()
    );
}

#[test]
fn default_date_format_is_day_precision() {
    let format = DateFormat::default();
    assert_eq!(DEFAULT_DATE_PATTERN, format.pattern());
    assert_eq!("%Y-%m-%d", format.chrono_format());
    assert_eq!(Ok(utc(2029, 12, 31)), format.parse("2029-12-31"));
    assert_eq!(Ok(utc(2029, 12, 31)), format.parse(" 2029-12-31\n"));
    assert_eq!(
        Err(PolicyError::MalformedDate {
            value: "2029/12/31".to_string(),
            format: DEFAULT_DATE_PATTERN.to_string(),
        }),
        format.parse("2029/12/31")
    );
}

#[test]
fn date_patterns_translate_to_chrono() {
    let format = DateFormat::from_pattern("yyyy-MM-dd'T'HH:mm:ss").unwrap();
    assert_eq!("%Y-%m-%dT%H:%M:%S", format.chrono_format());
    assert_eq!(
        Utc.with_ymd_and_hms(2029, 12, 31, 23, 59, 30).unwrap(),
        format.parse("2029-12-31T23:59:30").unwrap()
    );

    let format = DateFormat::from_pattern("dd/MM/yyyy").unwrap();
    assert_eq!("%d/%m/%Y", format.chrono_format());
    assert_eq!(Ok(utc(2029, 12, 31)), format.parse("31/12/2029"));

    let format = DateFormat::from_pattern("yyyy-MM-dd'T'HH:mm:ssX").unwrap();
    assert_eq!(
        Utc.with_ymd_and_hms(2029, 12, 31, 9, 0, 0).unwrap(),
        format.parse("2029-12-31T10:00:00+0100").unwrap()
    );

    let format = DateFormat::from_pattern("yyyy'''s' MM % dd").unwrap();
    assert_eq!("%Y's %m %% %d", format.chrono_format());
}

#[test]
fn unsupported_pattern_letters_are_rejected() {
    assert_eq!(
        Err(PolicyError::UnsupportedDatePattern {
            pattern: "EEE, dd MMM yyyy".to_string(),
            letter: 'E',
        }),
        DateFormat::from_pattern("EEE, dd MMM yyyy")
    );
}

#[test]
fn model_date_format_applies_to_expirations() {
    let model = ConstraintModel::builder()
        .date_format(DateFormat::from_pattern("dd.MM.yyyy").unwrap())
        .acceptable_digest_algorithm(DigestAlgorithm::Sha256)
        .expiration(DigestAlgorithm::Sha256, "01.01.2030")
        .expiration(DigestAlgorithm::Sha384, "2030-01-01")
        .suite_update_date("15.06.2024")
        .build()
        .unwrap();
    let evaluator = CryptographicConstraintEvaluator::new(Arc::new(model));

    assert_eq!(
        Some(utc(2030, 1, 1)),
        evaluator.digest_expiration_date(DigestAlgorithm::Sha256)
    );
    assert_eq!(None, evaluator.digest_expiration_date(DigestAlgorithm::Sha384));
    assert_eq!(Some(utc(2024, 6, 15)), evaluator.suite_update_date());
}

#[test]
fn shared_model_swap_keeps_old_snapshots_intact() {
    let shared = SharedConstraintModel::new(default_constraint_model());
    let before = shared.snapshot();
    let evaluator_before = shared.evaluator();

    let replacement = ConstraintModel::builder()
        .level(Level::Warn)
        .acceptable_digest_algorithm(DigestAlgorithm::Sha512)
        .build()
        .unwrap();
    let previous = shared.swap(replacement);

    assert!(Arc::ptr_eq(&before, &previous));
    assert!(before
        .acceptable_digest_algorithms()
        .contains(&"SHA256".to_string()));
    assert!(evaluator_before.is_digest_algorithm_reliable(DigestAlgorithm::Sha256));

    let evaluator_after = shared.evaluator();
    assert!(!evaluator_after.is_digest_algorithm_reliable(DigestAlgorithm::Sha256));
    assert!(evaluator_after.is_digest_algorithm_reliable(DigestAlgorithm::Sha512));
    assert_eq!(
        Some(Level::Warn),
        evaluator_after.level(ConstraintCategory::MinimumKeySize)
    );
    assert!(!Arc::ptr_eq(&before, &shared.snapshot()));
}

#[test]
fn shared_model_serves_concurrent_readers() {
    let shared = Arc::new(SharedConstraintModel::new(default_constraint_model()));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || {
                let evaluator = shared.evaluator();
                evaluator.is_encryption_algorithm_with_key_size_reliable(EncryptionAlgorithm::Rsa, 2048)
            })
        })
        .collect();
    shared.swap(default_constraint_model_builder().build().unwrap());

    for reader in readers {
        assert!(reader.join().unwrap());
    }
}
