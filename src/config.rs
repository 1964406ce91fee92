//! Registry tuning knobs, loadable from TOML.
//!
//! ```toml
//! entity_capacity = 4096
//! id_reuse = "lifo"
//! ```

use crate::data_structures::IdReuse;
use crate::error::EcsError;
use serde::Deserialize;

/// Settings read once when a [Registry](crate::registry::Registry) is created.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
	/// Entity slots reserved up front. Pools created later reserve the same amount.
	pub entity_capacity: usize,
	/// Which freed id [create_entity](crate::registry::Registry::create_entity) hands out first.
	pub id_reuse: IdReuse,
}

impl Default for RegistryConfig {
	fn default() -> Self {
		Self {
			entity_capacity: 256,
			id_reuse: IdReuse::Lowest,
		}
	}
}

impl RegistryConfig {
	/// Parse a configuration from TOML; missing keys keep their defaults.
	pub fn from_toml_str(source: &str) -> Result<Self, EcsError> {
		Ok(toml::from_str(source)?)
	}
}
