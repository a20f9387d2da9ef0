//! TLS server identity assembled from a PEM certificate and private key

use std::sync::Arc;

use rustls::crypto::ring::{default_provider, sign::any_supported_type};
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::sign::CertifiedKey;
use rustls::ServerConfig;

use crate::error::{GenerateError, Result};

/// Certificate chain and matching private key, ready to serve TLS
pub struct TlsIdentity {
    domain: String,
    cert_chain: Vec<CertificateDer<'static>>,
    private_key: PrivateKeyDer<'static>,
    certified_key: Arc<CertifiedKey>,
}

impl std::fmt::Debug for TlsIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsIdentity")
            .field("domain", &self.domain)
            .field("cert_chain_len", &self.cert_chain.len())
            .finish_non_exhaustive()
    }
}

impl TlsIdentity {
    /// Parse a PEM certificate chain and private key into a TLS identity
    ///
    /// The first certificate is the leaf. The key must match its public key.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::CertificateParse`] if either PEM input is
    /// malformed or empty, the key type is unsupported, or the key does not
    /// belong to the leaf certificate.
    pub fn from_pem(domain: impl Into<String>, cert_pem: &[u8], key_pem: &[u8]) -> Result<Self> {
        let cert_chain = rustls_pemfile::certs(&mut &cert_pem[..])
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| GenerateError::CertificateParse(format!("Invalid certificate PEM: {e}")))?;
        if cert_chain.is_empty() {
            return Err(GenerateError::CertificateParse(
                "No certificate found in PEM data".to_string(),
            ));
        }

        let private_key = rustls_pemfile::private_key(&mut &key_pem[..])
            .map_err(|e| GenerateError::CertificateParse(format!("Invalid private key PEM: {e}")))?
            .ok_or_else(|| {
                GenerateError::CertificateParse("No private key found in PEM data".to_string())
            })?;

        let signing_key = any_supported_type(&private_key).map_err(|e| {
            GenerateError::CertificateParse(format!("Unsupported private key: {e}"))
        })?;
        let certified_key = CertifiedKey::new(cert_chain.clone(), signing_key);
        certified_key.keys_match().map_err(|e| {
            GenerateError::CertificateParse(format!("Private key does not match certificate: {e}"))
        })?;

        Ok(Self {
            domain: domain.into(),
            cert_chain,
            private_key,
            certified_key: Arc::new(certified_key),
        })
    }

    /// DNS name the leaf certificate was issued for
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Certificate chain, leaf first
    #[must_use]
    pub fn cert_chain(&self) -> &[CertificateDer<'static>] {
        &self.cert_chain
    }

    /// Private key of the leaf certificate
    #[must_use]
    pub fn private_key(&self) -> &PrivateKeyDer<'static> {
        &self.private_key
    }

    /// Certificate chain bound to its signing key, for certificate resolvers
    #[must_use]
    pub fn certified_key(&self) -> Arc<CertifiedKey> {
        Arc::clone(&self.certified_key)
    }

    /// Server configuration presenting this identity to every client
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::CertificateParse`] if rustls rejects the
    /// certificate or key.
    pub fn server_config(&self) -> Result<ServerConfig> {
        ServerConfig::builder_with_provider(Arc::new(default_provider()))
            .with_safe_default_protocol_versions()
            .and_then(|builder| {
                builder
                    .with_no_client_auth()
                    .with_single_cert(self.cert_chain.clone(), self.private_key.clone_key())
            })
            .map_err(|e| GenerateError::CertificateParse(format!("TLS server setup failed: {e}")))
    }
}
