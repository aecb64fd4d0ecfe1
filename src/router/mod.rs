//! Event routing for twistmap
//!
//! Turns surface events into parameter updates: decode the control number
//! to a (bank, slot) address, classify the MIDI channel, look up the
//! binding, and dispatch the transform policy. Per-event problems are
//! absorbed here; nothing past configuration time can fail hard.

mod address;
mod binding;
mod transform;

pub use address::{resolve, ControlAddress, OutOfRange, BANK_SIZE};
pub use binding::{
    Bank, BindingTable, ConfigError, EncoderBinding, EncodingMode, DEFAULT_STEP_SIZE, MAX_BANKS,
};
pub use transform::{dispatch, PRESS_THRESHOLD, RELATIVE_CENTER};

use log::{debug, trace};

use crate::config::ChannelMap;
use crate::midi::SurfaceEvent;
use crate::params::ParamStore;

/// Logical role of an event on a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Encoder rotation
    Turn,
    /// Encoder push-down
    Push,
    /// Encoder button release-to-midpoint
    EncoderButton,
    /// Side buttons next to the encoder grid
    SideButton,
    /// Anything the channel map does not recognize
    Unknown,
}

/// Routes surface events to parameter updates.
///
/// Read-only during dispatch; the parameter store is the only state an
/// event mutates.
pub struct Router {
    table: BindingTable,
    channels: ChannelMap,
}

impl Router {
    /// Create a router over a validated binding table
    pub fn new(table: BindingTable, channels: ChannelMap) -> Self {
        Self { table, channels }
    }

    /// Number of configured banks
    pub fn bank_count(&self) -> usize {
        self.table.bank_count()
    }

    /// Process one event end to end.
    ///
    /// Out-of-range controls are dropped, unbound encoders ignored;
    /// malformed input never surfaces as an error.
    pub fn handle_event(&self, event: &SurfaceEvent, params: &mut ParamStore) {
        let addr = match address::resolve(event.control_number, self.table.bank_count()) {
            Ok(addr) => addr,
            Err(err) => {
                debug!("dropping event: {err}");
                return;
            }
        };

        let channel = self.channels.classify(event.channel);
        let binding = self.table.lookup(addr);
        trace!(
            "control {} -> bank {} slot {} ({:?}, value {}) -> {}",
            event.control_number,
            addr.bank,
            addr.slot,
            channel,
            event.value,
            binding
                .parameter
                .and_then(|handle| params.name(handle))
                .unwrap_or("unbound")
        );

        transform::dispatch(binding, channel, event.value, params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BankConfig, EncoderConfig, EncoderMode};
    use crate::params::ParamValue;

    fn one_bank_router(params: &ParamStore) -> Router {
        let mut encoders = vec![EncoderConfig::default(); BANK_SIZE];
        encoders[3] = EncoderConfig {
            parameter: Some("level".to_string()),
            mode: EncoderMode::Absolute,
            step_size: 0.01,
        };
        let table = BindingTable::from_config(&[BankConfig { encoders }], params).unwrap();
        Router::new(table, ChannelMap::default())
    }

    #[test]
    fn test_event_reaches_bound_parameter() {
        let mut params = ParamStore::new();
        let handle = params.insert("level", ParamValue::Float { value: 0.0, min: 0.0, max: 100.0 });
        let router = one_bank_router(&params);

        let event = SurfaceEvent { control_number: 3, channel: 0, value: 127 };
        router.handle_event(&event, &mut params);

        assert_eq!(params.get(handle), Some(&ParamValue::Float { value: 100.0, min: 0.0, max: 100.0 }));
    }

    #[test]
    fn test_out_of_range_event_is_dropped() {
        let mut params = ParamStore::new();
        let handle = params.insert("level", ParamValue::Float { value: 42.0, min: 0.0, max: 100.0 });
        let router = one_bank_router(&params);

        // Control 19 addresses a second bank that does not exist
        let event = SurfaceEvent { control_number: 19, channel: 0, value: 127 };
        router.handle_event(&event, &mut params);

        assert_eq!(params.get(handle), Some(&ParamValue::Float { value: 42.0, min: 0.0, max: 100.0 }));
    }

    #[test]
    fn test_unbound_slot_is_ignored() {
        let mut params = ParamStore::new();
        let handle = params.insert("level", ParamValue::Float { value: 42.0, min: 0.0, max: 100.0 });
        let router = one_bank_router(&params);

        let event = SurfaceEvent { control_number: 0, channel: 0, value: 127 };
        router.handle_event(&event, &mut params);

        assert_eq!(params.get(handle), Some(&ParamValue::Float { value: 42.0, min: 0.0, max: 100.0 }));
    }

    #[test]
    fn test_unmapped_channel_is_ignored() {
        let mut params = ParamStore::new();
        let handle = params.insert("level", ParamValue::Float { value: 42.0, min: 0.0, max: 100.0 });
        let router = one_bank_router(&params);

        let event = SurfaceEvent { control_number: 3, channel: 9, value: 127 };
        router.handle_event(&event, &mut params);

        assert_eq!(params.get(handle), Some(&ParamValue::Float { value: 42.0, min: 0.0, max: 100.0 }));
    }

    #[test]
    fn test_encoder_button_channel_resets_to_midpoint() {
        let mut params = ParamStore::new();
        let handle = params.insert("level", ParamValue::Float { value: 80.0, min: 0.0, max: 100.0 });
        let router = one_bank_router(&params);

        let event = SurfaceEvent { control_number: 3, channel: 1, value: 0 };
        router.handle_event(&event, &mut params);

        assert_eq!(params.get(handle), Some(&ParamValue::Float { value: 50.0, min: 0.0, max: 100.0 }));
    }
}
