//! Configuration file loading.
//!
//! ```yaml
//! kafka:
//!   clusterEndpoint: $KAFKA_ENDPOINT
//!   security: sasl
//!   sasl: { username: $KAFKA_USER, password: $KAFKA_PASSWORD }
//!   schemaRegistry: { endpoint: http://localhost:8081 }
//! producers:
//!   - name: orders
//!     topic: orders
//!     numberOfMessages: 1000
//!     avro:
//!       schemaName: orders-value
//!       generators: { qty: "{int}[1|2|3]{1}[0-9]{1}" }
//!       generationRules: { .quantity: qty }
//! ```
//!
//! Connection strings and credentials whose value starts with `$` are replaced
//! by the named environment variable (empty when unset).

use avro_generator::GeneratorConfig;
use avro_populate_kafka::{KafkaConfiguration, Security};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// One producer: where to publish, how many records, how to generate them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProducerConfiguration {
    pub name: String,

    #[serde(default)]
    pub topic: String,

    #[serde(default)]
    pub number_of_messages: u64,

    #[serde(default)]
    pub avro: GeneratorConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub kafka: KafkaConfiguration,

    #[serde(default)]
    pub producers: Vec<ProducerConfiguration>,
}

impl Configuration {
    /// Parse YAML text without substitution or validation.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Replace `$NAME` connection fields with the process environment.
    pub fn substitute_env(&mut self) {
        self.substitute_with(|name| std::env::var(name).ok());
    }

    /// Replace `$NAME` connection fields using `lookup`.
    pub fn substitute_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let kafka = &mut self.kafka;
        for field in [
            &mut kafka.cluster_endpoint,
            &mut kafka.schema_registry.endpoint,
            &mut kafka.schema_registry.username,
            &mut kafka.schema_registry.password,
            &mut kafka.sasl.username,
            &mut kafka.sasl.password,
        ] {
            if let Some(name) = field.strip_prefix('$') {
                debug!("Substituting configuration value from ${name}");
                *field = lookup(name).unwrap_or_default();
            }
        }
    }

    /// Validate everything a produce run needs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_broker()?;
        self.validate_producers()
    }

    /// Broker connection settings.
    pub fn validate_broker(&self) -> Result<(), ConfigError> {
        if self.kafka.cluster_endpoint.is_empty() {
            return Err(ConfigError::Validation(
                "an endpoint for kafka needs to be configured in order to produce records"
                    .to_string(),
            ));
        }

        if !matches!(self.kafka.security, Security::None | Security::Sasl) {
            return Err(ConfigError::Validation(format!(
                "security setting `{}` not supported",
                self.kafka.security
            )));
        }

        Ok(())
    }

    /// Producer definitions, without the broker connection.
    pub fn validate_producers(&self) -> Result<(), ConfigError> {
        if self.producers.is_empty() {
            return Err(ConfigError::Validation(
                "at least one producer must be specified".to_string(),
            ));
        }

        let registry_configured = self.kafka.schema_registry.is_configured();
        for producer in &self.producers {
            let has_schema_name = producer
                .avro
                .schema_name
                .as_deref()
                .is_some_and(|name| !name.is_empty());

            if has_schema_name && !registry_configured {
                return Err(ConfigError::Validation(format!(
                    "producer {}: cannot use `schemaName` when the schema registry is not configured",
                    producer.name
                )));
            }
            if !has_schema_name && producer.avro.needs_registry() {
                return Err(ConfigError::Validation(format!(
                    "producer {}: either `schema.raw` or `schemaName` must be set",
                    producer.name
                )));
            }
            if producer.topic.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "producer {}: a topic must be specified",
                    producer.name
                )));
            }
        }

        Ok(())
    }

    /// Look up a producer by name.
    pub fn producer(&self, name: &str) -> Option<&ProducerConfiguration> {
        self.producers.iter().find(|p| p.name == name)
    }

    /// Sum of `numberOfMessages` over all producers.
    pub fn total_messages(&self) -> u64 {
        self.producers.iter().map(|p| p.number_of_messages).sum()
    }
}

/// Parse, substitute environment variables and validate.
pub fn parse_configuration(yaml: &str) -> Result<Configuration, ConfigError> {
    let mut config = Configuration::from_yaml(yaml)?;
    config.substitute_env();
    config.validate()?;
    Ok(config)
}

/// Load the configuration from a YAML file.
pub fn load_configuration(path: &Path) -> Result<Configuration, ConfigError> {
    parse_configuration(&read_file(path)?)
}

/// Load the configuration for offline use: the broker section is not checked.
pub fn load_producer_configuration(path: &Path) -> Result<Configuration, ConfigError> {
    let mut config = Configuration::from_yaml(&read_file(path)?)?;
    config.substitute_env();
    config.validate_producers()?;
    Ok(config)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
