//! DC difference and AC coefficient decoding procedures (ISO/IEC 10918-1 F.2.4).

use crate::arithmetic::bit_decoder::BitDecoder;
use crate::arithmetic::context::{AcContextBank, ContextState, DcContextBank};
use crate::byte_reader::StuffedByteReader;
use crate::constants::{LAST_AC_INDEX, MAXIMUM_WIDTH};
use crate::error::ArithmeticError;

/// Outcome of one AC decoding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcDecision {
    /// No nonzero coefficients remain in the block.
    EndOfBlock,
    /// `run` zero coefficients followed by `value`.
    Coefficient { run: usize, value: i32 },
}

impl<R: StuffedByteReader> BitDecoder<R> {
    /// Decodes the DC difference of one block (Figure F.19).
    ///
    /// `previous_delta` is the difference decoded for the previous block of
    /// the same component; it selects the conditioning category.
    pub fn decode_dc_delta(
        &mut self,
        bank: &mut DcContextBank,
        previous_delta: i32,
    ) -> Result<i32, ArithmeticError> {
        let category = bank.category(previous_delta) as usize;

        if !self.decode_bit(&mut bank.nonzero[category])? {
            return Ok(0);
        }

        let negative = self.decode_bit(&mut bank.sign[category])?;
        let unit = if negative {
            &mut bank.negative_unit[category]
        } else {
            &mut bank.positive_unit[category]
        };
        let magnitude = if self.decode_bit(unit)? {
            let width = self.decode_width(&mut bank.width)?;
            self.decode_magnitude(width, &mut bank.magnitude)?
        } else {
            0
        };

        let value = magnitude + 1;
        Ok(if negative { -value } else { value })
    }

    /// Decodes the next AC decision of a block, starting at zig-zag index `k`
    /// (Figure F.20).
    pub fn decode_ac(
        &mut self,
        bank: &mut AcContextBank,
        k: usize,
    ) -> Result<AcDecision, ArithmeticError> {
        if !(1..=LAST_AC_INDEX).contains(&k) {
            return Err(ArithmeticError::InvalidArgument("AC index must be in 1..=63"));
        }

        if self.decode_bit(&mut bank.end_of_block[k - 1])? {
            return Ok(AcDecision::EndOfBlock);
        }

        let mut k = k;
        let mut run = 0;
        while !self.decode_bit(&mut bank.nonzero[k - 1])? {
            run += 1;
            k += 1;
            if k > LAST_AC_INDEX {
                return Err(ArithmeticError::SpectralOverflow);
            }
        }

        // The sign is coded with a fixed one-half probability.
        let negative = self.decode_fixed_bit()?;

        let magnitude = if !self.decode_bit(&mut bank.unit_or_short[k - 1])? {
            0
        } else if !self.decode_bit(&mut bank.unit_or_short[k - 1])? {
            1
        } else {
            let (width_contexts, magnitude_contexts) = bank.magnitude_contexts(k);
            let width = self.decode_ac_width(width_contexts)?;
            self.decode_magnitude(width, magnitude_contexts)?
        };

        let value = magnitude + 1;
        Ok(AcDecision::Coefficient {
            run,
            value: if negative { -value } else { value },
        })
    }

    // Counts the leading 1 decisions of X1, X2, ... and returns the bit width
    // of the magnitude minus one.
    fn decode_width(&mut self, contexts: &mut [ContextState]) -> Result<usize, ArithmeticError> {
        let mut width = 1;
        while self.decode_bit(&mut contexts[width - 1])? {
            width += 1;
            if width > MAXIMUM_WIDTH {
                return Err(ArithmeticError::MagnitudeCategoryOverflow);
            }
        }
        Ok(width)
    }

    // AC widths start at 2: X1 is the second unit_or_short decision.
    fn decode_ac_width(&mut self, contexts: &mut [ContextState]) -> Result<usize, ArithmeticError> {
        let mut width = 2;
        while self.decode_bit(&mut contexts[width - 2])? {
            width += 1;
            if width > MAXIMUM_WIDTH {
                return Err(ArithmeticError::MagnitudeCategoryOverflow);
            }
        }
        Ok(width)
    }

    // The leading 1 is implied; the remaining width - 1 bits share context M(width).
    fn decode_magnitude(
        &mut self,
        width: usize,
        contexts: &mut [ContextState],
    ) -> Result<i32, ArithmeticError> {
        let mut magnitude = 1i32;
        if width < 2 {
            return Ok(magnitude);
        }
        let context = &mut contexts[width - 2];
        for _ in 1..width {
            magnitude = (magnitude << 1) | i32::from(self.decode_bit(context)?);
        }
        Ok(magnitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arithmetic::conditioning::DcBounds;
    use crate::byte_reader::SliceByteReader;

    fn decoder(data: &[u8]) -> BitDecoder<SliceByteReader<'_>> {
        BitDecoder::new(SliceByteReader::new(data)).unwrap()
    }

    #[test]
    fn test_dc_on_padding_is_deterministic() {
        // A segment holding only a marker decodes from zero padding, which
        // is not a run of zero differences.
        let decode = || {
            let mut decoder = decoder(&[0xFF, 0xD9]);
            let mut bank = DcContextBank::new(DcBounds::default());
            (0..4)
                .map(|_| decoder.decode_dc_delta(&mut bank, 0).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(decode(), vec![0, -1, -1, -1]);
        assert_eq!(decode(), decode());
    }

    #[test]
    fn test_dc_magnitude_category_overflow() {
        let mut decoder = decoder(&[0xD2, 0xF1, 0x58, 0xFF, 0xD9]);
        let mut bank = DcContextBank::new(DcBounds::default());
        assert!(matches!(
            decoder.decode_dc_delta(&mut bank, 0),
            Err(ArithmeticError::MagnitudeCategoryOverflow)
        ));
    }

    #[test]
    fn test_dc_widest_difference() {
        let mut decoder = decoder(&[0xFF, 0x00, 0xFF, 0x00, 0xC0, 0xFF, 0xD9]);
        let mut bank = DcContextBank::new(DcBounds::default());
        assert_eq!(decoder.decode_dc_delta(&mut bank, 0).unwrap(), -32768);
        // Only M15 carries the 14 magnitude bits.
        assert_eq!(bank.magnitude[13], ContextState { index: 3, mps: true });
        assert!(bank.magnitude[..13].iter().all(|state| *state == ContextState::default()));
        assert_eq!(bank.width[14], ContextState { index: 1, mps: false });
    }

    #[test]
    fn test_ac_rejects_invalid_index() {
        let mut decoder = decoder(&[0xFF, 0xD9]);
        let mut bank = AcContextBank::new(5);
        assert!(matches!(
            decoder.decode_ac(&mut bank, 0),
            Err(ArithmeticError::InvalidArgument(_))
        ));
        assert!(matches!(
            decoder.decode_ac(&mut bank, 64),
            Err(ArithmeticError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_ac_uses_low_contexts_up_to_threshold() {
        let mut decoder = decoder(&[0x37, 0xFF, 0xD9]);
        let mut bank = AcContextBank::new(5);
        assert_eq!(
            decoder.decode_ac(&mut bank, 3).unwrap(),
            AcDecision::Coefficient { run: 0, value: 5 }
        );
        assert_eq!(bank.nonzero[2], ContextState { index: 1, mps: true });
        assert_eq!(bank.unit_or_short[2], ContextState { index: 1, mps: true });
        assert_eq!(bank.low_width[0], ContextState { index: 1, mps: true });
        assert_eq!(bank.low_width[1], ContextState { index: 1, mps: false });
        assert_eq!(bank.low_magnitude[1], ContextState { index: 1, mps: false });
        assert!(bank.high_width.iter().all(|state| *state == ContextState::default()));
        assert!(bank.high_magnitude.iter().all(|state| *state == ContextState::default()));
    }

    #[test]
    fn test_ac_uses_high_contexts_above_threshold() {
        let mut decoder = decoder(&[0x37, 0xFF, 0xD9]);
        let mut bank = AcContextBank::new(5);
        assert_eq!(
            decoder.decode_ac(&mut bank, 7).unwrap(),
            AcDecision::Coefficient { run: 0, value: 5 }
        );
        assert_eq!(bank.high_width[0], ContextState { index: 1, mps: true });
        assert_eq!(bank.high_width[1], ContextState { index: 1, mps: false });
        assert_eq!(bank.high_magnitude[1], ContextState { index: 1, mps: false });
        assert!(bank.low_width.iter().all(|state| *state == ContextState::default()));
        assert!(bank.low_magnitude.iter().all(|state| *state == ContextState::default()));
    }

    #[test]
    fn test_ac_spectral_overflow() {
        // DC zero, no end-of-block, then 63 zero decisions.
        let mut decoder = decoder(&[0x4B, 0xC6, 0xFF, 0xD9]);
        let mut dc = DcContextBank::new(DcBounds::default());
        let mut ac = AcContextBank::new(5);
        assert_eq!(decoder.decode_dc_delta(&mut dc, 0).unwrap(), 0);
        assert!(matches!(
            decoder.decode_ac(&mut ac, 1),
            Err(ArithmeticError::SpectralOverflow)
        ));
    }

    #[test]
    fn test_ac_run_to_last_position() {
        let data = [0x4B, 0xC6, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x20, 0xFF, 0xD9];
        let mut decoder = decoder(&data);
        let mut dc = DcContextBank::new(DcBounds::default());
        let mut ac = AcContextBank::new(5);
        assert_eq!(decoder.decode_dc_delta(&mut dc, 0).unwrap(), 0);
        assert_eq!(
            decoder.decode_ac(&mut ac, 1).unwrap(),
            AcDecision::Coefficient { run: 62, value: -1 }
        );
    }
}
