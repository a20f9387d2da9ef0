//! PEM encoding for keys, signing requests and certificates
//!
//! [`PemSource`] is the closed set of values this crate knows how to wrap in a
//! PEM block. [`pem_encode_any`] accepts an arbitrary value and rejects kinds
//! outside that set instead of emitting an empty block.

use std::any::Any;

use pem::{EncodeConfig, LineEnding, Pem};
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::RsaPrivateKey;
use rustls::pki_types::CertificateSigningRequestDer;

use crate::error::{GenerateError, Result};

/// PEM tag for a DER X.509 certificate
pub const CERTIFICATE_TAG: &str = "CERTIFICATE";
/// PEM tag for a PKCS#1 RSA private key
pub const RSA_PRIVATE_KEY_TAG: &str = "RSA PRIVATE KEY";
/// PEM tag for a SEC1 elliptic-curve private key
pub const EC_PRIVATE_KEY_TAG: &str = "EC PRIVATE KEY";
/// PEM tag for a PKCS#10 certificate signing request
pub const CERTIFICATE_REQUEST_TAG: &str = "CERTIFICATE REQUEST";

/// A value that can be PEM encoded
#[derive(Debug, Clone, Copy)]
pub enum PemSource<'a> {
    /// P-256 private key, marshaled as SEC1
    EcPrivateKey(&'a p256::SecretKey),
    /// RSA private key, marshaled as PKCS#1
    RsaPrivateKey(&'a RsaPrivateKey),
    /// Already encoded certificate signing request
    CertificateRequest(&'a CertificateSigningRequestDer<'a>),
    /// DER certificate bytes
    Certificate(&'a [u8]),
}

impl PemSource<'_> {
    /// PEM block type this source is written under
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            PemSource::EcPrivateKey(_) => EC_PRIVATE_KEY_TAG,
            PemSource::RsaPrivateKey(_) => RSA_PRIVATE_KEY_TAG,
            PemSource::CertificateRequest(_) => CERTIFICATE_REQUEST_TAG,
            PemSource::Certificate(_) => CERTIFICATE_TAG,
        }
    }

    fn contents(&self) -> Result<Vec<u8>> {
        match self {
            PemSource::EcPrivateKey(key) => key
                .to_sec1_der()
                .map(|der| der.to_vec())
                .map_err(|e| GenerateError::KeyEncoding(format!("SEC1 encoding failed: {e}"))),
            PemSource::RsaPrivateKey(key) => key
                .to_pkcs1_der()
                .map(|der| der.as_bytes().to_vec())
                .map_err(|e| GenerateError::KeyEncoding(format!("PKCS#1 encoding failed: {e}"))),
            PemSource::CertificateRequest(csr) => {
                let der: &[u8] = csr.as_ref();
                Ok(der.to_vec())
            }
            PemSource::Certificate(der) => Ok(der.to_vec()),
        }
    }
}

/// Encode a value as a PEM block
///
/// # Errors
///
/// Returns [`GenerateError::KeyEncoding`] if a private key cannot be marshaled.
pub fn pem_encode(source: PemSource<'_>) -> Result<Vec<u8>> {
    let block = Pem::new(source.tag(), source.contents()?);
    Ok(encode_block(&block))
}

/// Encode a value of any runtime type as a PEM block
///
/// Recognized types are `p256::SecretKey`, `RsaPrivateKey`,
/// `CertificateSigningRequestDer<'static>`, and DER certificate bytes given as
/// `Vec<u8>` or `&'static [u8]`.
///
/// # Errors
///
/// Returns [`GenerateError::UnsupportedInputKind`] for any other type, and
/// [`GenerateError::KeyEncoding`] if a private key cannot be marshaled.
pub fn pem_encode_any(value: &dyn Any) -> Result<Vec<u8>> {
    let source = if let Some(key) = value.downcast_ref::<p256::SecretKey>() {
        PemSource::EcPrivateKey(key)
    } else if let Some(key) = value.downcast_ref::<RsaPrivateKey>() {
        PemSource::RsaPrivateKey(key)
    } else if let Some(csr) = value.downcast_ref::<CertificateSigningRequestDer<'static>>() {
        PemSource::CertificateRequest(csr)
    } else if let Some(der) = value.downcast_ref::<Vec<u8>>() {
        PemSource::Certificate(der)
    } else if let Some(der) = value.downcast_ref::<&'static [u8]>() {
        PemSource::Certificate(der)
    } else {
        return Err(GenerateError::UnsupportedInputKind(format!(
            "{:?} is not a key, signing request or certificate",
            value.type_id()
        )));
    };

    pem_encode(source)
}

fn encode_block(block: &Pem) -> Vec<u8> {
    pem::encode_config(block, EncodeConfig::new().set_line_ending(LineEnding::LF)).into_bytes()
}
