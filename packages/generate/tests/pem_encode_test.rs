//! Tests for the generic PEM encoder

use p256::SecretKey;
use rcgen::{CertificateParams, KeyPair};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::RsaPrivateKey;
use rustls::pki_types::CertificateSigningRequestDer;
use tls_generate::{key_pair, pem_encode, pem_encode_any, GenerateError, PemSource};

fn ec_key() -> SecretKey {
    SecretKey::from_slice(&[0x42; 32]).expect("valid P-256 scalar")
}

fn csr() -> CertificateSigningRequestDer<'static> {
    let params = CertificateParams::new(vec!["example.com".to_string()]).expect("params");
    let key_pair = KeyPair::generate().expect("key pair");
    params
        .serialize_request(&key_pair)
        .expect("CSR should be serialized")
        .der()
        .clone()
}

#[test]
fn test_ec_private_key_round_trip() {
    let key = ec_key();

    let encoded = pem_encode(PemSource::EcPrivateKey(&key)).expect("encode");
    let block = pem::parse(&encoded).expect("PEM parses");

    assert_eq!(block.tag(), "EC PRIVATE KEY");
    let decoded = SecretKey::from_sec1_der(block.contents()).expect("SEC1 decodes");
    assert_eq!(decoded.to_bytes(), key.to_bytes());
}

#[test]
fn test_rsa_private_key_round_trip() {
    let pair = key_pair("example.com", None).expect("key pair");
    let original = pem::parse(pair.private_key_pem.as_slice()).expect("PEM parses");
    let key = RsaPrivateKey::from_pkcs1_der(original.contents()).expect("PKCS#1 decodes");

    let encoded = pem_encode_any(&key).expect("encode");
    let block = pem::parse(&encoded).expect("PEM parses");

    assert_eq!(block.tag(), "RSA PRIVATE KEY");
    assert_eq!(block.contents(), original.contents());
    assert_eq!(
        RsaPrivateKey::from_pkcs1_der(block.contents()).expect("PKCS#1 decodes"),
        key
    );
}

#[test]
fn test_certificate_request_round_trip() {
    let csr = csr();

    let encoded = pem_encode(PemSource::CertificateRequest(&csr)).expect("encode");
    let block = pem::parse(&encoded).expect("PEM parses");

    let expected: &[u8] = csr.as_ref();
    assert_eq!(block.tag(), "CERTIFICATE REQUEST");
    assert_eq!(block.contents(), expected);
}

#[test]
fn test_any_dispatch_selects_block_type() {
    let ec = ec_key();
    let csr = csr();
    let der: Vec<u8> = vec![0x30, 0x00];
    let static_der: &'static [u8] = &[0x30, 0x00];

    let cases: [(&dyn std::any::Any, &str); 4] = [
        (&ec, "EC PRIVATE KEY"),
        (&csr, "CERTIFICATE REQUEST"),
        (&der, "CERTIFICATE"),
        (&static_der, "CERTIFICATE"),
    ];

    for (value, tag) in cases {
        let encoded = pem_encode_any(value).expect("encode");
        let block = pem::parse(&encoded).expect("PEM parses");
        assert_eq!(block.tag(), tag);
        assert!(!block.contents().is_empty());
    }
}

#[test]
fn test_certificate_pem_matches_der() {
    let pair = key_pair("example.com", None).expect("key pair");
    let block = pem::parse(&pair.certificate_pem).expect("PEM parses");

    let reencoded = pem_encode_any(&block.contents().to_vec()).expect("encode");
    assert_eq!(reencoded, pair.certificate_pem);
}

#[test]
fn test_unsupported_kinds_fail_explicitly() {
    struct Unrelated;

    let values: [&dyn std::any::Any; 4] = [&7i64, &"CERTIFICATE", &String::from("key"), &Unrelated];

    for value in values {
        match pem_encode_any(value) {
            Err(GenerateError::UnsupportedInputKind(_)) => {}
            other => panic!("Expected UnsupportedInputKind error, got {other:?}"),
        }
    }
}
