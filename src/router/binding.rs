//! The encoder binding table
//!
//! Fixed-capacity layout of the surface: up to four banks of exactly
//! sixteen encoders, each optionally bound to one parameter. Built once
//! from configuration, read-only afterwards.

use thiserror::Error;

use super::address::{ControlAddress, BANK_SIZE};
use crate::config::{BankConfig, EncoderConfig, EncoderMode};
use crate::params::{ParamHandle, ParamStore};

/// Maximum number of banks the surface supports.
pub const MAX_BANKS: usize = 4;

/// Default per-tick increment for relative encoders.
pub const DEFAULT_STEP_SIZE: f32 = 0.01;

/// How a turn event's raw value becomes a new float value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingMode {
    /// Raw value maps linearly onto the full parameter range
    #[default]
    Absolute,
    /// Raw value encodes a direction; the value moves by a fixed step
    Relative,
}

/// One physical encoder's configuration.
#[derive(Debug, Clone)]
pub struct EncoderBinding {
    /// Bound parameter; `None` means events for this encoder are ignored
    pub parameter: Option<ParamHandle>,
    /// Encoding mode, meaningful for float parameters on the turn channel
    pub mode: EncodingMode,
    /// Per-tick increment in relative mode, always positive
    pub step_size: f32,
}

impl Default for EncoderBinding {
    fn default() -> Self {
        Self {
            parameter: None,
            mode: EncodingMode::Absolute,
            step_size: DEFAULT_STEP_SIZE,
        }
    }
}

impl EncoderBinding {
    fn from_config(
        bank: usize,
        slot: usize,
        cfg: &EncoderConfig,
        params: &ParamStore,
    ) -> Result<Self, ConfigError> {
        if cfg.step_size <= 0.0 {
            return Err(ConfigError::NonPositiveStep { bank, slot, step: cfg.step_size });
        }

        let parameter = match &cfg.parameter {
            Some(name) => Some(params.find(name).ok_or_else(|| ConfigError::UnknownParameter {
                bank,
                slot,
                name: name.clone(),
            })?),
            None => None,
        };

        let mode = match cfg.mode {
            EncoderMode::Absolute => EncodingMode::Absolute,
            EncoderMode::Relative => EncodingMode::Relative,
        };

        Ok(Self { parameter, mode, step_size: cfg.step_size })
    }
}

/// Sixteen encoders, addressed by slot.
#[derive(Debug, Clone, Default)]
pub struct Bank {
    encoders: [EncoderBinding; BANK_SIZE],
}

impl Bank {
    fn from_config(bank: usize, cfg: &BankConfig, params: &ParamStore) -> Result<Self, ConfigError> {
        if cfg.encoders.len() != BANK_SIZE {
            return Err(ConfigError::BankSize {
                bank,
                found: cfg.encoders.len(),
                expected: BANK_SIZE,
            });
        }

        let mut encoders: [EncoderBinding; BANK_SIZE] = Default::default();
        for (slot, enc_cfg) in cfg.encoders.iter().enumerate() {
            encoders[slot] = EncoderBinding::from_config(bank, slot, enc_cfg, params)?;
        }

        Ok(Self { encoders })
    }
}

/// Errors raised while building the binding table.
///
/// All of these are fatal at startup; the mapping session never begins with
/// an invalid table.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration has {found} banks, the surface supports at most {limit}")]
    TooManyBanks { found: usize, limit: usize },

    #[error("bank {bank} has {found} encoders, expected exactly {expected}")]
    BankSize { bank: usize, found: usize, expected: usize },

    #[error("bank {bank}, encoder {slot}: step size {step} is not positive")]
    NonPositiveStep { bank: usize, slot: usize, step: f32 },

    #[error("bank {bank}, encoder {slot}: unknown parameter '{name}'")]
    UnknownParameter { bank: usize, slot: usize, name: String },
}

/// The surface's banks, validated at construction.
#[derive(Debug)]
pub struct BindingTable {
    banks: Vec<Bank>,
}

impl BindingTable {
    /// Build the table from configuration, resolving parameter names to
    /// handles in `params`.
    pub fn from_config(banks: &[BankConfig], params: &ParamStore) -> Result<Self, ConfigError> {
        if banks.len() > MAX_BANKS {
            return Err(ConfigError::TooManyBanks { found: banks.len(), limit: MAX_BANKS });
        }

        let banks = banks
            .iter()
            .enumerate()
            .map(|(index, cfg)| Bank::from_config(index, cfg, params))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { banks })
    }

    /// Number of configured banks, the address decoder's range
    pub fn bank_count(&self) -> usize {
        self.banks.len()
    }

    /// Look up the binding at a decoded address.
    ///
    /// Addresses come from [`super::address::resolve`] called with this
    /// table's own `bank_count`, so they are always in range.
    pub fn lookup(&self, addr: ControlAddress) -> &EncoderBinding {
        &self.banks[addr.bank].encoders[addr.slot]
    }

    /// Number of encoders bound to a parameter, for status output
    pub fn bound_count(&self) -> usize {
        self.banks
            .iter()
            .flat_map(|b| b.encoders.iter())
            .filter(|e| e.parameter.is_some())
            .count()
    }
}
