//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Todas las variables tienen un valor por defecto salvo `DATABASE_URL`; un
//! valor presente pero inválido es un `ConfigError`.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Errores de configuración
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be set")]
    Missing { name: &'static str },

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Origen de variables. En producción es `std::env`; en los tests un mapa.
pub trait VarSource {
    fn var(&self, name: &str) -> Option<String>;
}

/// Variables del proceso
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl VarSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok().filter(|value| !value.trim().is_empty())
    }
}

impl<F> VarSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, name: &str) -> Option<String> {
        self(name)
    }
}

pub(crate) fn parse_or<T: FromStr>(
    source: &impl VarSource,
    name: &'static str,
    default: T,
) -> ConfigResult<T> {
    match source.var(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

/// Backend del store de vehículos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(()),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub store_backend: StoreBackend,
}

impl EnvironmentConfig {
    /// Leer la configuración del proceso. `default_port` depende del binario.
    pub fn from_env(default_port: u16) -> ConfigResult<Self> {
        Self::from_source(&ProcessEnv, default_port)
    }

    pub fn from_source(source: &impl VarSource, default_port: u16) -> ConfigResult<Self> {
        Ok(Self {
            environment: source
                .var("ENVIRONMENT")
                .unwrap_or_else(|| "development".to_string()),
            port: parse_or(source, "PORT", default_port)?,
            host: source.var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            cors_origins: source
                .var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            store_backend: parse_or(source, "STORE_BACKEND", StoreBackend::default())?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuración del servicio principal visto desde shop/reports
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub drain_concurrency: usize,
    pub drain_timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(30),
            drain_concurrency: 4,
            drain_timeout: Duration::from_secs(30),
        }
    }
}

impl UpstreamConfig {
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_source(&ProcessEnv)
    }

    pub fn from_source(source: &impl VarSource) -> ConfigResult<Self> {
        let defaults = Self::default();

        let drain_concurrency: usize =
            parse_or(source, "DRAIN_CONCURRENCY", defaults.drain_concurrency)?;
        if drain_concurrency == 0 {
            return Err(ConfigError::Invalid {
                name: "DRAIN_CONCURRENCY",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            base_url: source.var("UPSTREAM_BASE_URL").unwrap_or(defaults.base_url),
            timeout: Duration::from_secs(parse_or(
                source,
                "UPSTREAM_TIMEOUT_SECS",
                defaults.timeout.as_secs(),
            )?),
            drain_concurrency,
            drain_timeout: Duration::from_secs(parse_or(
                source,
                "DRAIN_TIMEOUT_SECS",
                defaults.drain_timeout.as_secs(),
            )?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::from_source(&source(&[]), 8081).unwrap();
        assert_eq!(config.port, 8081);
        assert_eq!(config.host, "0.0.0.0");
        assert!(config.is_development());
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.store_backend, StoreBackend::Postgres);
        assert_eq!(config.server_url(), "0.0.0.0:8081");
    }

    #[test]
    fn test_explicit_values() {
        let config = EnvironmentConfig::from_source(
            &source(&[
                ("PORT", "9000"),
                ("ENVIRONMENT", "production"),
                ("CORS_ORIGINS", "http://a.test, http://b.test,"),
                ("STORE_BACKEND", "Memory"),
            ]),
            8080,
        )
        .unwrap();
        assert_eq!(config.port, 9000);
        assert!(config.is_production());
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.store_backend, StoreBackend::Memory);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let err = EnvironmentConfig::from_source(&source(&[("PORT", "eighty")]), 8080).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "PORT",
                value: "eighty".to_string()
            }
        );

        let err = UpstreamConfig::from_source(&source(&[("DRAIN_CONCURRENCY", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "DRAIN_CONCURRENCY", .. }));
    }

    #[test]
    fn test_upstream_config() {
        let config = UpstreamConfig::from_source(&source(&[
            ("UPSTREAM_BASE_URL", "http://vehicles:8080"),
            ("DRAIN_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://vehicles:8080");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.drain_concurrency, 4);
        assert_eq!(config.drain_timeout, Duration::from_secs(5));
    }
}
