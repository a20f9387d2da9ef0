//! Error handling for certificate generation

use thiserror::Error;

/// Certificate generation errors
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The operating system random source could not be read
    #[error("Random source failure: {0}")]
    RandomSource(String),

    /// Asymmetric key generation failed
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    /// A private key could not be marshaled to DER
    #[error("Key encoding failed: {0}")]
    KeyEncoding(String),

    /// Building or signing the certificate template failed
    #[error("Certificate build failed: {0}")]
    CertificateBuild(String),

    /// A PEM certificate/key pair could not be turned back into a usable object
    #[error("Certificate parsing failed: {0}")]
    CertificateParse(String),

    /// The generic PEM encoder received a value it does not know how to encode
    #[error("Unsupported PEM input kind: {0}")]
    UnsupportedInputKind(String),
}

/// Result type for certificate generation
pub type Result<T> = std::result::Result<T, GenerateError>;

impl From<getrandom::Error> for GenerateError {
    fn from(err: getrandom::Error) -> Self {
        GenerateError::RandomSource(err.to_string())
    }
}

impl From<rcgen::Error> for GenerateError {
    fn from(err: rcgen::Error) -> Self {
        GenerateError::CertificateBuild(err.to_string())
    }
}
