//! Configuration for trace runs

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TraceError};

/// Main trace configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceConfig {
    /// Indented output instead of one line per root
    #[serde(default = "default_true")]
    pub pretty: bool,

    /// Seed for fixtures and maze generators
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Label of the traced container
    #[serde(default = "default_reference")]
    pub reference: String,

    /// Maze generator configuration
    #[serde(default)]
    pub maze: MazeConfig,

    /// Input fixture configuration
    #[serde(default)]
    pub fixture: FixtureConfig,
}

fn default_true() -> bool { true }
fn default_seed() -> u64 { 42 }
fn default_reference() -> String { "v".to_string() }

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            seed: 42,
            reference: default_reference(),
            maze: MazeConfig::default(),
            fixture: FixtureConfig::default(),
        }
    }
}

impl TraceConfig {
    /// Load and validate a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no run can use
    pub fn validate(&self) -> Result<()> {
        if self.reference.is_empty() {
            return Err(TraceError::Config {
                reason: "reference must not be empty".to_string(),
            });
        }
        self.maze.validate()?;
        self.fixture.validate()
    }
}

/// Maze grid configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeConfig {
    #[serde(default = "default_side")]
    pub width: usize,

    #[serde(default = "default_side")]
    pub height: usize,

    /// Row-major index of the start cell
    #[serde(default)]
    pub start: usize,
}

fn default_side() -> usize { 8 }

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            start: 0,
        }
    }
}

impl MazeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TraceError::Config {
                reason: format!("maze dimensions must be positive, got {}x{}", self.width, self.height),
            });
        }
        if self.start >= self.width * self.height {
            return Err(TraceError::Config {
                reason: format!(
                    "start cell {} is outside a {}x{} grid",
                    self.start, self.width, self.height
                ),
            });
        }
        Ok(())
    }
}

/// Generated input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureConfig {
    /// Number of elements
    #[serde(default = "default_size")]
    pub size: usize,

    /// Distinct values used by the few-uniques fixture
    #[serde(default = "default_uniques")]
    pub uniques: usize,
}

fn default_size() -> usize { 16 }
fn default_uniques() -> usize { 4 }

impl Default for FixtureConfig {
    fn default() -> Self {
        Self { size: 16, uniques: 4 }
    }
}

impl FixtureConfig {
    pub fn validate(&self) -> Result<()> {
        if self.uniques == 0 {
            return Err(TraceError::Config {
                reason: "uniques must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
