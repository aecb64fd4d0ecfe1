//! Per-type, per-channel value transform policies
//!
//! Stateless: everything a policy needs (current value, bounds) is read
//! from the parameter at dispatch time.

use log::debug;

use super::binding::{EncoderBinding, EncodingMode};
use super::Channel;
use crate::params::{ParamStore, ParamValue};

/// Raw value at which a button-down registers.
pub const PRESS_THRESHOLD: u8 = 127;

/// Relative-direction midpoint: strictly above is clockwise.
pub const RELATIVE_CENTER: u8 = 64;

/// Apply a classified event to the parameter bound to `binding`.
///
/// Unbound bindings and dangling handles are silent no-ops, as are all
/// channel/kind combinations without a defined policy. Matches are kept
/// exhaustive on both enums so a new parameter kind or channel has to be
/// handled here before the crate compiles.
pub fn dispatch(binding: &EncoderBinding, channel: Channel, raw: u8, params: &mut ParamStore) {
    let Some(handle) = binding.parameter else {
        return;
    };
    let Some(param) = params.get_mut(handle) else {
        debug!("binding references a removed parameter, ignoring event");
        return;
    };

    match param {
        ParamValue::Float { value, min, max } => match channel {
            Channel::Turn => match binding.mode {
                EncodingMode::Absolute => {
                    let normal = raw as f32 / 127.0;
                    *value = *min + normal * (*max - *min);
                }
                EncodingMode::Relative => {
                    // 63 = anticlockwise, 65 = clockwise
                    let clockwise = raw > RELATIVE_CENTER;
                    let step = if clockwise { binding.step_size } else { -binding.step_size };
                    *value += step;
                }
            },
            Channel::EncoderButton => {
                *value = *min + 0.5 * (*max - *min);
            }
            Channel::Push | Channel::SideButton | Channel::Unknown => {}
        },
        ParamValue::Int { value, min, max } => match channel {
            Channel::Turn => {
                // Int encoders always step relatively, and clamp.
                // Saturating: bounds may sit at the ends of the i32 range.
                let step = if raw > RELATIVE_CENTER { 1 } else { -1 };
                *value = value.saturating_add(step).clamp(*min, *max);
            }
            Channel::Push | Channel::EncoderButton | Channel::SideButton | Channel::Unknown => {}
        },
        ParamValue::Bool { value } => match channel {
            Channel::Push => {
                if raw >= PRESS_THRESHOLD {
                    *value = !*value;
                }
            }
            Channel::Turn | Channel::EncoderButton | Channel::SideButton | Channel::Unknown => {}
        },
    }
}
