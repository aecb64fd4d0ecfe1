//! Configuration schema definitions

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::params::{ParamStore, ParamValue};
use crate::router::Channel;

/// Main configuration for twistmap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwistmapConfig {
    /// MIDI input settings
    #[serde(default)]
    pub midi: MidiConfig,

    /// Channel-to-role mapping for the surface
    #[serde(default)]
    pub channels: ChannelMap,

    /// Parameter definitions
    #[serde(default)]
    pub parameters: Vec<ParameterConfig>,

    /// Encoder banks, at most four of sixteen encoders each
    #[serde(default)]
    pub banks: Vec<BankConfig>,
}

impl TwistmapConfig {
    /// Validate the parameter definitions.
    ///
    /// Bank structure (count, size, step sizes, name resolution) is
    /// validated by the binding table's constructor.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for param in &self.parameters {
            if !names.insert(param.name.as_str()) {
                bail!("Duplicate parameter name '{}'", param.name);
            }
            param.kind.validate(&param.name)?;
        }
        Ok(())
    }

    /// Build the parameter store from the parameter definitions
    pub fn build_params(&self) -> ParamStore {
        let mut store = ParamStore::new();
        for param in &self.parameters {
            store.insert(&param.name, param.kind.to_value());
        }
        store
    }
}

/// MIDI input configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MidiConfig {
    /// Input port name, matched by substring (None = first port)
    pub port: Option<String>,
}

/// Maps the surface's MIDI channel numbers to logical roles.
///
/// The numbering is a property of the controller's firmware configuration,
/// not of this crate; anything unlisted classifies as unknown and is
/// ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelMap {
    /// Encoder rotation (default: 0)
    #[serde(default = "default_turn_channel")]
    pub turn: u8,

    /// Encoder button, resets floats to midpoint (default: 1)
    #[serde(default = "default_encoder_button_channel")]
    pub encoder_button: u8,

    /// Encoder press, toggles booleans (default: 2)
    #[serde(default = "default_push_channel")]
    pub push: u8,

    /// Side buttons (default: 3)
    #[serde(default = "default_side_button_channel")]
    pub side_button: u8,
}

fn default_turn_channel() -> u8 { 0 }
fn default_encoder_button_channel() -> u8 { 1 }
fn default_push_channel() -> u8 { 2 }
fn default_side_button_channel() -> u8 { 3 }

impl Default for ChannelMap {
    fn default() -> Self {
        Self {
            turn: default_turn_channel(),
            encoder_button: default_encoder_button_channel(),
            push: default_push_channel(),
            side_button: default_side_button_channel(),
        }
    }
}

impl ChannelMap {
    /// Classify a MIDI channel number
    pub fn classify(&self, channel: u8) -> Channel {
        if channel == self.turn {
            Channel::Turn
        } else if channel == self.encoder_button {
            Channel::EncoderButton
        } else if channel == self.push {
            Channel::Push
        } else if channel == self.side_button {
            Channel::SideButton
        } else {
            Channel::Unknown
        }
    }
}

/// A parameter definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterConfig {
    /// Unique name, referenced by encoder entries
    pub name: String,

    /// Kind, bounds, and initial value
    #[serde(flatten)]
    pub kind: ParameterKind,
}

/// Kind-specific parameter settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParameterKind {
    /// Continuous value
    Float {
        #[serde(default = "default_float_min")]
        min: f32,
        #[serde(default = "default_float_max")]
        max: f32,
        #[serde(default = "default_float_min")]
        value: f32,
    },
    /// Stepped value
    Int {
        #[serde(default = "default_int_min")]
        min: i32,
        #[serde(default = "default_int_max")]
        max: i32,
        #[serde(default = "default_int_min")]
        value: i32,
    },
    /// On/off state
    Bool {
        #[serde(default)]
        value: bool,
    },
}

fn default_float_min() -> f32 { 0.0 }
fn default_float_max() -> f32 { 1.0 }
fn default_int_min() -> i32 { 0 }
fn default_int_max() -> i32 { 127 }

impl ParameterKind {
    fn validate(&self, name: &str) -> Result<()> {
        match *self {
            ParameterKind::Float { min, max, value } => {
                if min > max {
                    bail!("Parameter '{}': minimum {} exceeds maximum {}", name, min, max);
                }
                if value < min || value > max {
                    bail!("Parameter '{}': initial value {} is outside [{}, {}]", name, value, min, max);
                }
            }
            ParameterKind::Int { min, max, value } => {
                if min > max {
                    bail!("Parameter '{}': minimum {} exceeds maximum {}", name, min, max);
                }
                if value < min || value > max {
                    bail!("Parameter '{}': initial value {} is outside [{}, {}]", name, value, min, max);
                }
            }
            ParameterKind::Bool { .. } => {}
        }
        Ok(())
    }

    /// Convert to the runtime parameter value
    pub fn to_value(&self) -> ParamValue {
        match *self {
            ParameterKind::Float { min, max, value } => ParamValue::Float { value, min, max },
            ParameterKind::Int { min, max, value } => ParamValue::Int { value, min, max },
            ParameterKind::Bool { value } => ParamValue::Bool { value },
        }
    }
}

/// One bank of sixteen encoder entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankConfig {
    /// Encoder entries in slot order; must be exactly sixteen
    pub encoders: Vec<EncoderConfig>,
}

/// One encoder entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Name of the bound parameter (absent = unbound)
    #[serde(default)]
    pub parameter: Option<String>,

    /// Encoding mode for float turns (default: absolute)
    #[serde(default)]
    pub mode: EncoderMode,

    /// Per-tick increment in relative mode (default: 0.01)
    #[serde(default = "default_step_size")]
    pub step_size: f32,
}

fn default_step_size() -> f32 { 0.01 }

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            parameter: None,
            mode: EncoderMode::default(),
            step_size: default_step_size(),
        }
    }
}

/// Encoding mode as written in configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EncoderMode {
    /// Raw value maps linearly onto the parameter range (default)
    #[default]
    Absolute,
    /// Raw value encodes a direction; step by a fixed increment
    Relative,
}
