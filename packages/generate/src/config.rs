//! Generator configuration
//!
//! Every field has a default matching the fallback certificate served when no
//! other certificate matches, so a partial document deserializes cleanly.

use serde::{Deserialize, Serialize};

/// Subject common name stamped on every generated certificate
pub const DEFAULT_COMMON_NAME: &str = "TRAEFIK DEFAULT CERT";

/// Suffix appended to the random placeholder domain
pub const DEFAULT_DOMAIN_SUFFIX: &str = "traefik.default";

/// RSA modulus size in bits
pub const DEFAULT_KEY_BITS: usize = 2048;

/// Validity used when no expiration is supplied
pub const DEFAULT_VALIDITY_DAYS: u32 = 365;

/// Configuration for [`crate::CertificateGenerator`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// RSA key size in bits
    pub key_bits: usize,
    /// Days between `not_before` and `not_after` when no expiration is given
    pub validity_days: u32,
    /// Subject common name
    pub common_name: String,
    /// Trailing labels of the placeholder domain used by the default certificate
    pub default_domain_suffix: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            key_bits: DEFAULT_KEY_BITS,
            validity_days: DEFAULT_VALIDITY_DAYS,
            common_name: DEFAULT_COMMON_NAME.to_string(),
            default_domain_suffix: DEFAULT_DOMAIN_SUFFIX.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Set RSA key size in bits
    #[must_use]
    pub fn with_key_bits(self, key_bits: usize) -> Self {
        Self { key_bits, ..self }
    }

    /// Set default validity period in days
    #[must_use]
    pub fn with_validity_days(self, validity_days: u32) -> Self {
        Self {
            validity_days,
            ..self
        }
    }

    /// Set subject common name
    #[must_use]
    pub fn with_common_name(self, common_name: impl Into<String>) -> Self {
        Self {
            common_name: common_name.into(),
            ..self
        }
    }

    /// Set placeholder domain suffix
    #[must_use]
    pub fn with_default_domain_suffix(self, suffix: impl Into<String>) -> Self {
        Self {
            default_domain_suffix: suffix.into(),
            ..self
        }
    }

    /// Default validity as a duration
    pub(crate) fn validity(&self) -> time::Duration {
        time::Duration::days(i64::from(self.validity_days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.key_bits, 2048);
        assert_eq!(config.validity(), time::Duration::days(365));
        assert_eq!(config.common_name, "TRAEFIK DEFAULT CERT");
        assert_eq!(config.default_domain_suffix, "traefik.default");
    }

    #[test]
    fn test_builder_overrides() {
        let config = GeneratorConfig::default()
            .with_validity_days(30)
            .with_common_name("EDGE FALLBACK")
            .with_default_domain_suffix("edge.invalid");
        assert_eq!(config.validity(), time::Duration::days(30));
        assert_eq!(config.common_name, "EDGE FALLBACK");
        assert_eq!(config.default_domain_suffix, "edge.invalid");
        assert_eq!(config.key_bits, DEFAULT_KEY_BITS);
    }
}
