// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration, loadable from TOML.
//!
//! Every field has a default, so an empty file is a valid configuration:
//!
//! ```toml
//! [grid]
//! cell_size = 10.0
//! occupancy_words = 8192
//!
//! [vehicle]
//! acceleration = 0.005
//! max_speed = 0.2
//! friction = 0.98
//! brake = 0.01
//! turn_rate = 0.04
//! stop_epsilon = 0.001
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use understory_grid::GridConfig;
use understory_vehicle::VehicleParams;

use crate::error::{BridgeError, Result};

/// Everything a [`Host`](crate::Host) needs to start.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Grid sizing.
    pub grid: GridConfig,
    /// Vehicle handling.
    pub vehicle: VehicleParams,
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| BridgeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!(
            "loaded engine config from {}: cell size {}, {} occupancy words",
            path.display(),
            config.grid.cell_size,
            config.grid.occupancy_words
        );
        Ok(config)
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Check value ranges the engine relies on.
    pub fn validate(&self) -> Result<()> {
        let invalid = |field, reason| Err(BridgeError::InvalidConfig { field, reason });

        if !(self.grid.cell_size.is_finite() && self.grid.cell_size > 0.0) {
            return invalid("grid.cell_size", "must be positive and finite");
        }
        if self.grid.occupancy_words == 0 {
            return invalid("grid.occupancy_words", "must be at least 1");
        }

        let v = &self.vehicle;
        if !(v.friction > 0.0 && v.friction < 1.0) {
            return invalid("vehicle.friction", "must lie strictly between 0 and 1");
        }
        if !(v.max_speed.is_finite() && v.max_speed > 0.0) {
            return invalid("vehicle.max_speed", "must be positive and finite");
        }
        if !(v.stop_epsilon > 0.0 && v.stop_epsilon < v.max_speed) {
            return invalid("vehicle.stop_epsilon", "must be positive and below max_speed");
        }
        for (field, value) in [
            ("vehicle.acceleration", v.acceleration),
            ("vehicle.brake", v.brake),
            ("vehicle.turn_rate", v.turn_rate),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(field, "must be finite and non-negative");
            }
        }
        Ok(())
    }
}
