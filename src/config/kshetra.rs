//! Main KshetraConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::exploration::ExplorationConfig;
use crate::grid::MapConfig;

use super::error::ConfigLoadError;
use super::exploration::{ExplorationSection, PersistenceSection};
use super::grid::{GridSection, SensorSection};
use super::motion::{NavigationSection, OdometrySection, PlannerSection};

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "configs/kshetra.yaml";

/// Full configuration loaded from YAML
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KshetraConfig {
    /// Grid dimensions
    #[serde(default)]
    pub grid: GridSection,

    /// Range and proximity sensor model
    #[serde(default)]
    pub sensor: SensorSection,

    /// Dead-reckoning calibration
    #[serde(default)]
    pub odometry: OdometrySection,

    /// A* settings
    #[serde(default)]
    pub planner: PlannerSection,

    /// Navigation policy
    #[serde(default)]
    pub navigation: NavigationSection,

    /// Frontier exploration behaviour
    #[serde(default)]
    pub exploration: ExplorationSection,

    /// Snapshot storage
    #[serde(default)]
    pub persistence: PersistenceSection,
}

impl KshetraConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from the default config path, falling back to built-in defaults
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no map can be built from
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        self.grid
            .to_grid_config()
            .validate()
            .map_err(ConfigLoadError::Invalid)?;
        if self.sensor.min_range_cm > self.sensor.max_range_cm {
            return Err(ConfigLoadError::Invalid(format!(
                "sensor.min_range_cm {} exceeds max_range_cm {}",
                self.sensor.min_range_cm, self.sensor.max_range_cm
            )));
        }
        Ok(())
    }

    /// Convert to MapConfig for RoverMap
    pub fn to_map_config(&self) -> MapConfig {
        MapConfig {
            grid: self.grid.to_grid_config(),
            sensor: self.sensor.to_sensor_config(),
            calibration: self.odometry.to_calibration(),
            planner: self.planner.to_astar_config(),
            navigation: self.navigation.to_navigation_config(),
        }
    }

    /// Get the exploration config
    pub fn exploration_config(&self) -> ExplorationConfig {
        self.exploration.to_exploration_config()
    }
}
