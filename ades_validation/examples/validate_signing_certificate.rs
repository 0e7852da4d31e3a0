// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use ades_validation::checks::{
    certificate_validity_check, cryptographic_checks, prospective_chain_check,
    CryptographicPosition, CryptographicSubject,
};
use ades_validation::policy::{
    ConstraintModel, CryptographicConstraintEvaluator, DigestAlgorithm, EncryptionAlgorithm, Level,
};
use ades_validation::trust::{
    CertificateToken, CertificateTrustTime, Context, TrustAnchorVerifier, TrustTimeRecord,
    TrustedListsCertificateSource,
};
use ades_validation::{CheckContext, Indication, ValidationChain};
use chrono::{TimeZone, Utc};
use std::sync::Arc;

fn main() {
    let date = |y, m, d| {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
            .single()
            .expect("valid date")
    };

    let model = ConstraintModel::builder()
        .level(Level::Fail)
        .acceptable_digest_algorithms([DigestAlgorithm::Sha256, DigestAlgorithm::Sha384])
        .acceptable_encryption_algorithms([EncryptionAlgorithm::Rsa, EncryptionAlgorithm::Ecdsa])
        .minimum_key_size(EncryptionAlgorithm::Rsa, 1900)
        .minimum_key_size(EncryptionAlgorithm::Ecdsa, 256)
        .expiration(DigestAlgorithm::Sha256, "2030-01-01")
        .expiration_for_key_size(EncryptionAlgorithm::Rsa, 1900, "2022-01-01")
        .expiration_for_key_size(EncryptionAlgorithm::Rsa, 3000, "2030-01-01")
        .build()
        .expect("valid policy");
    let crypto = CryptographicConstraintEvaluator::new(Arc::new(model));

    let root = CertificateToken::new(
        b"root-ca".to_vec(),
        "CN=Root CA",
        date(2010, 1, 1),
        date(2040, 1, 1),
    );
    let signer = CertificateToken::new(
        b"signer".to_vec(),
        "CN=Signer",
        date(2021, 1, 1),
        date(2026, 1, 1),
    )
    .with_issuer("CN=Root CA")
    .with_public_key(EncryptionAlgorithm::Rsa, 3072)
    .with_signature_algorithm(DigestAlgorithm::Sha256, EncryptionAlgorithm::Rsa, 4096);

    let mut trusted_lists = TrustedListsCertificateSource::new();
    trusted_lists.add_trust_time(
        root.clone(),
        TrustTimeRecord::for_context(
            Context::Signature,
            CertificateTrustTime::starting_at(date(2012, 1, 1)),
        ),
    );
    let trust = TrustAnchorVerifier::builder()
        .trusted_certificate_source(Arc::new(trusted_lists))
        .build();

    let validation_time = date(2024, 6, 1);
    let subject = CryptographicSubject::from_certificate(&signer).expect("signature algorithm");

    let chain = ValidationChain::builder(signer.id().to_string())
        .check(prospective_chain_check(
            vec![signer.clone(), root],
            Some(Context::Signature),
            Level::Fail,
        ))
        .check(certificate_validity_check(signer, Level::Fail))
        .checks(cryptographic_checks(
            &subject,
            CryptographicPosition::SigningCertificate,
            &crypto,
            validation_time,
        ))
        .build();

    let ctx = CheckContext::new(validation_time, &crypto, &trust);
    let conclusion = chain.execute(&ctx, Indication::Passed);

    println!("target: {}", conclusion.target_id);
    println!("indication: {}", conclusion.indication);
    if let Some(sub) = conclusion.sub_indication {
        println!("sub-indication: {sub}");
    }
    for record in &conclusion.constraints {
        println!(
            "  [{}] {} {}",
            record.status,
            record.name,
            record.additional_info.as_deref().unwrap_or("")
        );
    }
}
