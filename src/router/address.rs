//! Flat control number to (bank, slot) decoding

use thiserror::Error;

/// Number of encoders in one bank.
pub const BANK_SIZE: usize = 16;

/// A decoded (bank, slot) coordinate on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlAddress {
    /// Bank index, `< bank_count`
    pub bank: usize,
    /// Encoder index within the bank, `< BANK_SIZE`
    pub slot: usize,
}

/// The control number addresses a bank beyond the configured range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("control {control} is beyond the configured {bank_count} bank(s)")]
pub struct OutOfRange {
    pub control: u8,
    pub bank_count: usize,
}

/// Decode a flat control number against the configured bank count.
///
/// Controls are numbered bank-major: control 0 is bank 0 slot 0, control 16
/// is bank 1 slot 0, and so on. On success the returned address satisfies
/// `bank < bank_count` and `slot < BANK_SIZE`.
pub fn resolve(control: u8, bank_count: usize) -> Result<ControlAddress, OutOfRange> {
    let control_index = control as usize;
    if control_index >= bank_count * BANK_SIZE {
        return Err(OutOfRange { control, bank_count });
    }

    Ok(ControlAddress {
        bank: control_index / BANK_SIZE,
        slot: control_index % BANK_SIZE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_first_control() {
        assert_eq!(resolve(0, 1), Ok(ControlAddress { bank: 0, slot: 0 }));
    }

    #[test]
    fn test_resolve_divides_into_banks() {
        assert_eq!(resolve(3, 1), Ok(ControlAddress { bank: 0, slot: 3 }));
        assert_eq!(resolve(16, 2), Ok(ControlAddress { bank: 1, slot: 0 }));
        assert_eq!(resolve(35, 4), Ok(ControlAddress { bank: 2, slot: 3 }));
        assert_eq!(resolve(63, 4), Ok(ControlAddress { bank: 3, slot: 15 }));
    }

    #[test]
    fn test_resolve_rejects_beyond_last_bank() {
        // First control past the end is already out of range
        assert_eq!(resolve(16, 1), Err(OutOfRange { control: 16, bank_count: 1 }));
        assert_eq!(resolve(19, 1), Err(OutOfRange { control: 19, bank_count: 1 }));
        assert_eq!(resolve(64, 4), Err(OutOfRange { control: 64, bank_count: 4 }));
    }

    #[test]
    fn test_resolve_rejects_everything_with_no_banks() {
        assert!(resolve(0, 0).is_err());
    }

    #[test]
    fn test_resolve_covers_whole_range() {
        for control in 0..64u8 {
            let addr = resolve(control, 4).unwrap();
            assert!(addr.bank < 4);
            assert!(addr.slot < BANK_SIZE);
            assert_eq!(addr.bank * BANK_SIZE + addr.slot, control as usize);
        }
    }
}
