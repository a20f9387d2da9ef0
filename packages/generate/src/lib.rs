//! # Default TLS certificate generation
//!
//! Self-signed X.509 certificates with fresh RSA keys, either for a random
//! placeholder domain (the fallback identity served when nothing else matches)
//! or for an explicit domain and expiration. Results come back PEM encoded.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # fn main() -> tls_generate::Result<()> {
//! // Fallback identity, ready for a rustls server
//! let identity = tls_generate::default_certificate()?;
//! let server_config = identity.server_config()?;
//!
//! // Explicit domain, default one year validity
//! let pair = tls_generate::key_pair("example.com", None)?;
//! assert!(pair.certificate_pem.starts_with(b"-----BEGIN CERTIFICATE-----"));
//! # let _ = server_config;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod default_cert;
pub mod encode;
pub mod error;
pub mod generator;
pub mod identity;
pub mod inspect;

use rsa::RsaPrivateKey;
use time::OffsetDateTime;

pub use config::GeneratorConfig;
pub use encode::{pem_encode, pem_encode_any, PemSource};
pub use error::{GenerateError, Result};
pub use generator::{CertificateGenerator, GeneratedKeyPair};
pub use identity::TlsIdentity;
pub use inspect::CertificateInfo;

/// Generate a certificate for a random placeholder domain and load it as a TLS
/// server identity, using the default configuration
///
/// # Errors
///
/// See [`CertificateGenerator::default_certificate`].
pub fn default_certificate() -> Result<TlsIdentity> {
    CertificateGenerator::new().default_certificate()
}

/// Generate an RSA key and a self-signed certificate for `domain`, using the
/// default configuration
///
/// # Errors
///
/// See [`CertificateGenerator::key_pair`].
pub fn key_pair(domain: &str, expiration: Option<OffsetDateTime>) -> Result<GeneratedKeyPair> {
    CertificateGenerator::new().key_pair(domain, expiration)
}

/// Sign a PEM certificate for `domain` with `key`, using the default
/// configuration
///
/// # Errors
///
/// See [`CertificateGenerator::pem_cert`].
pub fn pem_cert(
    key: &RsaPrivateKey,
    domain: &str,
    expiration: Option<OffsetDateTime>,
) -> Result<Vec<u8>> {
    CertificateGenerator::new().pem_cert(key, domain, expiration)
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        default_certificate, key_pair, pem_cert, pem_encode, pem_encode_any, CertificateGenerator,
        CertificateInfo, GenerateError, GeneratedKeyPair, GeneratorConfig, PemSource, Result,
        TlsIdentity,
    };
}
