//! Key pair generation and self-signed certificate signing
//!
//! The generator creates an RSA key, builds a certificate template around a
//! single DNS name and signs it with that same key.

use rand::rng;
use rcgen::{
    CertificateParams, DistinguishedName, DnType, IsCa, KeyPair, KeyUsagePurpose, SanType,
    SerialNumber,
};
use rsa::pkcs8::EncodePrivateKey;
use rsa::RsaPrivateKey;
use time::OffsetDateTime;
use tracing::debug;
use zeroize::Zeroizing;

use crate::config::GeneratorConfig;
use crate::encode::{pem_encode, PemSource};
use crate::error::{GenerateError, Result};
use crate::identity::TlsIdentity;

/// Size of a certificate serial number in bytes
pub const SERIAL_NUMBER_BYTES: usize = 16;

/// Years representable as an X.509 `GeneralizedTime`
pub const ENCODABLE_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// PEM encoded certificate and the private key that signed it
#[derive(Clone)]
pub struct GeneratedKeyPair {
    /// `CERTIFICATE` block
    pub certificate_pem: Vec<u8>,
    /// `RSA PRIVATE KEY` block, wiped on drop
    pub private_key_pem: Zeroizing<Vec<u8>>,
}

impl std::fmt::Debug for GeneratedKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedKeyPair")
            .field("certificate_pem", &String::from_utf8_lossy(&self.certificate_pem))
            .field("private_key_pem", &"<redacted>")
            .finish()
    }
}

/// Self-signed certificate generator
#[derive(Debug, Clone, Default)]
pub struct CertificateGenerator {
    config: GeneratorConfig,
}

impl CertificateGenerator {
    /// Create a generator with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator with the given configuration
    #[must_use]
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a certificate for a random placeholder domain and load it as a
    /// TLS server identity
    ///
    /// # Errors
    ///
    /// Fails if the random source, key generation, signing, or reassembly of
    /// the PEM pair fails.
    pub fn default_certificate(&self) -> Result<TlsIdentity> {
        let domain = crate::default_cert::placeholder_domain(&self.config.default_domain_suffix)?;
        let pair = self.key_pair(&domain, None)?;
        TlsIdentity::from_pem(domain, &pair.certificate_pem, &pair.private_key_pem)
    }

    /// Generate an RSA key and a self-signed certificate for `domain`
    ///
    /// `None` expiration means the configured default validity from now.
    ///
    /// # Errors
    ///
    /// Fails if key generation, key encoding, or certificate signing fails.
    /// No key is returned without its certificate.
    pub fn key_pair(
        &self,
        domain: &str,
        expiration: Option<OffsetDateTime>,
    ) -> Result<GeneratedKeyPair> {
        let key = self.generate_key()?;
        let private_key_pem = Zeroizing::new(pem_encode(PemSource::RsaPrivateKey(&key))?);
        let certificate_pem = self.pem_cert(&key, domain, expiration)?;

        Ok(GeneratedKeyPair {
            certificate_pem,
            private_key_pem,
        })
    }

    /// Sign a certificate for `domain` with an existing key and PEM encode it
    ///
    /// An expiration in the past is used as-is and yields an already expired
    /// certificate.
    ///
    /// # Errors
    ///
    /// Fails if the serial number cannot be drawn, the expiration falls
    /// outside [`ENCODABLE_YEARS`], the default validity overflows, or the
    /// template cannot be signed.
    pub fn pem_cert(
        &self,
        key: &RsaPrivateKey,
        domain: &str,
        expiration: Option<OffsetDateTime>,
    ) -> Result<Vec<u8>> {
        let der = self.der_cert(key, domain, expiration)?;
        pem_encode(PemSource::Certificate(&der))
    }

    fn generate_key(&self) -> Result<RsaPrivateKey> {
        let mut rng = rng();
        let key = RsaPrivateKey::new(&mut rng, self.config.key_bits).map_err(|e| {
            GenerateError::KeyGeneration(format!("RSA key generation failed: {e}"))
        })?;
        debug!(bits = self.config.key_bits, "generated RSA key");
        Ok(key)
    }

    fn der_cert(
        &self,
        key: &RsaPrivateKey,
        domain: &str,
        expiration: Option<OffsetDateTime>,
    ) -> Result<Vec<u8>> {
        let serial = random_serial_number()?;

        let now = OffsetDateTime::now_utc();
        let not_after = match expiration {
            Some(expiration) => expiration,
            None => now.checked_add(self.config.validity()).ok_or_else(|| {
                GenerateError::CertificateBuild(format!(
                    "Validity of {} days overflows the certificate time range",
                    self.config.validity_days
                ))
            })?,
        };
        if !ENCODABLE_YEARS.contains(&not_after.year()) {
            return Err(GenerateError::CertificateBuild(format!(
                "Expiration {not_after} is outside years {}..={}",
                ENCODABLE_YEARS.start(),
                ENCODABLE_YEARS.end()
            )));
        }

        let params = self.template(serial, domain, now, not_after)?;
        let signing_key = signing_key_pair(key)?;
        let cert = params.self_signed(&signing_key)?;

        debug!(domain, %not_after, "signed self-signed certificate");
        Ok(cert.der().to_vec())
    }

    fn template(
        &self,
        serial: [u8; SERIAL_NUMBER_BYTES],
        domain: &str,
        not_before: OffsetDateTime,
        not_after: OffsetDateTime,
    ) -> Result<CertificateParams> {
        let mut params = CertificateParams::default();

        params.serial_number = Some(SerialNumber::from_slice(&serial));

        let mut distinguished_name = DistinguishedName::new();
        distinguished_name.push(DnType::CommonName, self.config.common_name.as_str());
        params.distinguished_name = distinguished_name;

        params.not_before = not_before;
        params.not_after = not_after;

        params.key_usages = vec![KeyUsagePurpose::KeyEncipherment];
        params.is_ca = IsCa::ExplicitNoCa;
        params.subject_alt_names = vec![SanType::DnsName(domain.try_into()?)];

        Ok(params)
    }
}

/// Draw a serial number uniformly from `[0, 2^128)`
fn random_serial_number() -> Result<[u8; SERIAL_NUMBER_BYTES]> {
    let mut serial = [0u8; SERIAL_NUMBER_BYTES];
    getrandom::fill(&mut serial)?;
    Ok(serial)
}

/// Load an RSA key into the signer used by the certificate builder
fn signing_key_pair(key: &RsaPrivateKey) -> Result<KeyPair> {
    let pkcs8 = key
        .to_pkcs8_der()
        .map_err(|e| GenerateError::KeyEncoding(format!("PKCS#8 encoding failed: {e}")))?;
    Ok(KeyPair::try_from(pkcs8.as_bytes())?)
}
