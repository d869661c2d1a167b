//! Broker and schema registry connection settings.

use crate::error::{KafkaPopulatorError, Result};
use rdkafka::ClientConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the producer authenticates to the cluster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Security {
    /// Plaintext connection
    #[default]
    None,
    /// SASL/PLAIN over TLS
    Sasl,
    /// Mutual TLS (accepted by the parser, rejected by validation)
    Mtls,
}

impl fmt::Display for Security {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Sasl => write!(f, "sasl"),
            Self::Mtls => write!(f, "mtls"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaslConfiguration {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRegistryConfiguration {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl SchemaRegistryConfiguration {
    pub fn is_configured(&self) -> bool {
        !self.endpoint.is_empty()
    }

    /// Basic-auth credentials, when a username is set.
    pub fn credentials(&self) -> Option<(String, String)> {
        if self.username.is_empty() {
            None
        } else {
            Some((self.username.clone(), self.password.clone()))
        }
    }
}

/// The `kafka` section of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaConfiguration {
    #[serde(default)]
    pub cluster_endpoint: String,

    #[serde(default)]
    pub schema_registry: SchemaRegistryConfiguration,

    #[serde(default)]
    pub security: Security,

    #[serde(default)]
    pub sasl: SaslConfiguration,

    /// Delivery timeout of a single message, in milliseconds
    #[serde(default = "default_message_timeout_ms")]
    pub message_timeout_ms: u64,
}

fn default_message_timeout_ms() -> u64 {
    30_000
}

impl Default for KafkaConfiguration {
    fn default() -> Self {
        Self {
            cluster_endpoint: String::new(),
            schema_registry: SchemaRegistryConfiguration::default(),
            security: Security::default(),
            sasl: SaslConfiguration::default(),
            message_timeout_ms: default_message_timeout_ms(),
        }
    }
}

impl KafkaConfiguration {
    /// Producer client settings for this cluster.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::new();
        config
            .set("bootstrap.servers", &self.cluster_endpoint)
            .set("message.timeout.ms", self.message_timeout_ms.to_string())
            .set("queue.buffering.max.messages", "100000")
            .set("linger.ms", "5");

        match self.security {
            Security::None => {}
            Security::Sasl => {
                if self.sasl.username.is_empty() {
                    return Err(KafkaPopulatorError::MissingSaslCredentials);
                }
                config
                    .set("security.protocol", "SASL_SSL")
                    .set("sasl.mechanisms", "PLAIN")
                    .set("sasl.username", &self.sasl.username)
                    .set("sasl.password", &self.sasl.password);
            }
            Security::Mtls => {
                return Err(KafkaPopulatorError::UnsupportedSecurity(
                    self.security.to_string(),
                ));
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kafka_section() {
        let yaml = r#"
clusterEndpoint: broker:9092
security: sasl
sasl:
  username: user
  password: secret
schemaRegistry:
  endpoint: http://registry:8081
  username: reg
  password: regpass
"#;
        let config: KafkaConfiguration = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.cluster_endpoint, "broker:9092");
        assert_eq!(config.security, Security::Sasl);
        assert_eq!(config.sasl.username, "user");
        assert!(config.schema_registry.is_configured());
        assert_eq!(
            config.schema_registry.credentials(),
            Some(("reg".to_string(), "regpass".to_string()))
        );
        assert_eq!(config.message_timeout_ms, 30_000);
    }

    #[test]
    fn test_defaults() {
        let config: KafkaConfiguration = serde_yaml::from_str("clusterEndpoint: b:9092").unwrap();

        assert_eq!(config.security, Security::None);
        assert!(!config.schema_registry.is_configured());
        assert_eq!(config.schema_registry.credentials(), None);
    }

    #[test]
    fn test_unknown_security_is_rejected_by_parser() {
        let result: std::result::Result<KafkaConfiguration, _> =
            serde_yaml::from_str("clusterEndpoint: b:9092\nsecurity: kerberos");
        assert!(result.is_err());
    }

    #[test]
    fn test_plain_client_config() {
        let config = KafkaConfiguration {
            cluster_endpoint: "localhost:9092".to_string(),
            message_timeout_ms: 5000,
            ..Default::default()
        };
        let client = config.client_config().unwrap();

        assert_eq!(client.get("bootstrap.servers"), Some("localhost:9092"));
        assert_eq!(client.get("message.timeout.ms"), Some("5000"));
        assert_eq!(client.get("security.protocol"), None);
    }

    #[test]
    fn test_sasl_client_config() {
        let config = KafkaConfiguration {
            cluster_endpoint: "broker:9093".to_string(),
            security: Security::Sasl,
            sasl: SaslConfiguration {
                username: "user".to_string(),
                password: "secret".to_string(),
            },
            ..Default::default()
        };
        let client = config.client_config().unwrap();

        assert_eq!(client.get("security.protocol"), Some("SASL_SSL"));
        assert_eq!(client.get("sasl.mechanisms"), Some("PLAIN"));
        assert_eq!(client.get("sasl.username"), Some("user"));
        assert_eq!(client.get("sasl.password"), Some("secret"));
    }

    #[test]
    fn test_unsupported_client_configs() {
        let sasl_without_user = KafkaConfiguration {
            security: Security::Sasl,
            ..Default::default()
        };
        assert!(matches!(
            sasl_without_user.client_config(),
            Err(KafkaPopulatorError::MissingSaslCredentials)
        ));

        let mtls = KafkaConfiguration {
            security: Security::Mtls,
            ..Default::default()
        };
        assert_eq!(
            mtls.client_config().unwrap_err().to_string(),
            "Security setting `mtls` not supported"
        );
    }
}
