//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::gauge::GaugeConfig;
use super::mapper::MapperConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemConfig {
    /// Named gauge configurations.
    pub gauges: FnvIndexMap<String<32>, GaugeConfig, 4>,

    /// Named measurement-to-step mappers.
    #[serde(default)]
    pub mappers: FnvIndexMap<String<32>, MapperConfig, 8>,
}

impl SystemConfig {
    /// Get a gauge configuration by name.
    pub fn gauge(&self, name: &str) -> Option<&GaugeConfig> {
        self.gauges
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get a mapper configuration by name.
    pub fn mapper(&self, name: &str) -> Option<&MapperConfig> {
        self.mappers
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all gauge names.
    pub fn gauge_names(&self) -> impl Iterator<Item = &str> {
        self.gauges.keys().map(|s| s.as_str())
    }

    /// List all mapper names.
    pub fn mapper_names(&self) -> impl Iterator<Item = &str> {
        self.mappers.keys().map(|s| s.as_str())
    }

    /// Mappers that drive the named gauge.
    pub fn mappers_for_gauge<'a>(
        &'a self,
        gauge: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a MapperConfig)> + 'a {
        self.mappers
            .iter()
            .filter(move |(_, m)| m.gauge.as_str() == gauge)
            .map(|(name, m)| (name.as_str(), m))
    }
}
