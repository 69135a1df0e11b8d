//! QM-coder arithmetic decoder (ISO/IEC 10918-1 Annex D.2).
//!
//! The code register holds the 16 bits of the code stream that line up with
//! the interval register (Cx in the standard). The low-order part of the
//! standard's C register is kept as the current byte and a countdown of its
//! unconsumed bits, which are shifted in MSB first during renormalization.

use crate::arithmetic::context::ContextState;
use crate::arithmetic::probability_table::probability_state;
use crate::byte_reader::{StuffedByte, StuffedByteReader};
use crate::error::ArithmeticError;

pub struct BitDecoder<R> {
    reader: R,
    /// Interval register. 0x0000 stands for 0x10000 right after INITDEC.
    a: u16,
    /// Code register.
    c: u16,
    byte: u8,
    bits_left: u8,
    // Set once a marker is reached; the rest of the segment reads as zeros.
    padding: bool,
}

impl<R: StuffedByteReader> BitDecoder<R> {
    /// Creates a decoder and runs INITDEC on the first segment.
    pub fn new(reader: R) -> Result<Self, ArithmeticError> {
        let mut decoder = Self {
            reader,
            a: 0,
            c: 0,
            byte: 0,
            bits_left: 0,
            padding: false,
        };
        decoder.initialize()?;
        Ok(decoder)
    }

    /// INITDEC (Figure D.22). Must run at the start of every entropy-coded
    /// segment, after the contexts have been reset.
    pub fn initialize(&mut self) -> Result<(), ArithmeticError> {
        self.padding = false;
        self.bits_left = 0;
        self.byte = 0;
        let high = self.byte_in()?;
        let low = self.byte_in()?;
        self.c = u16::from_be_bytes([high, low]);
        self.a = 0;
        log::debug!("INITDEC: C={:#06x}", self.c);
        Ok(())
    }

    /// DECODE (Figure D.19): decodes one binary decision and updates `context`.
    pub fn decode_bit(&mut self, context: &mut ContextState) -> Result<bool, ArithmeticError> {
        let entry = probability_state(context.index);
        self.a = self.a.wrapping_sub(entry.qe);

        if self.c < self.a {
            if self.a >= 0x8000 {
                return Ok(context.mps);
            }
            // Conditional MPS exchange (Figure D.20)
            let bit = if self.a < entry.qe {
                let lps = !context.mps;
                if entry.switch_mps {
                    context.mps = lps;
                }
                context.index = entry.next_lps;
                lps
            } else {
                context.index = entry.next_mps;
                context.mps
            };
            self.renormalize()?;
            Ok(bit)
        } else {
            // Conditional LPS exchange (Figure D.21)
            self.c = self.c.wrapping_sub(self.a);
            let bit = if self.a < entry.qe {
                context.index = entry.next_mps;
                context.mps
            } else {
                let lps = !context.mps;
                if entry.switch_mps {
                    context.mps = lps;
                }
                context.index = entry.next_lps;
                lps
            };
            self.a = entry.qe;
            self.renormalize()?;
            Ok(bit)
        }
    }

    /// Decodes a decision with a fixed probability of one half. The context
    /// is not adaptive: it starts from the initial state on every call.
    pub fn decode_fixed_bit(&mut self) -> Result<bool, ArithmeticError> {
        let mut context = ContextState::default();
        self.decode_bit(&mut context)
    }

    /// True once the segment's terminating marker has been reached.
    pub fn is_padding(&self) -> bool {
        self.padding
    }

    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn into_reader(self) -> R {
        self.reader
    }

    // RENORMD (Figure D.23)
    fn renormalize(&mut self) -> Result<(), ArithmeticError> {
        loop {
            if self.bits_left == 0 {
                self.byte = self.byte_in()?;
                self.bits_left = 8;
            }
            self.bits_left -= 1;
            let bit = u16::from((self.byte >> self.bits_left) & 1);
            self.a <<= 1;
            self.c = (self.c << 1) | bit;
            if self.a >= 0x8000 {
                return Ok(());
            }
        }
    }

    // BYTEIN (Figure D.24)
    fn byte_in(&mut self) -> Result<u8, ArithmeticError> {
        if self.padding {
            return Ok(0);
        }
        match self.reader.read_stuffed_byte()? {
            StuffedByte::Data(byte) => Ok(byte),
            StuffedByte::MissingStuffing => {
                log::debug!("marker reached, padding the segment with zero bits");
                self.padding = true;
                Ok(0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_reader::{IoByteReader, SliceByteReader};
    use crate::constants::PROBABILITY_STATE_COUNT;
    use std::io::{self, Read};

    // ITU-T T.81 K.4.1: 256 decisions coded in a single context.
    const K4_SOURCE: [u8; 32] = [
        0x00, 0x02, 0x00, 0x51, 0x00, 0x00, 0x00, 0xC0, 0x03, 0x52, 0x87, 0x2A, 0xAA, 0xAA,
        0xAA, 0xAA, 0x82, 0xC0, 0x20, 0x00, 0xFC, 0xD7, 0x9E, 0xF6, 0x74, 0xEA, 0xAB, 0xF7,
        0x69, 0x7E, 0xE7, 0x4C,
    ];
    const K4_CODED: [u8; 32] = [
        0x65, 0x5B, 0x51, 0x44, 0xF7, 0x96, 0x9D, 0x51, 0x78, 0x55, 0xBF, 0xFF, 0x00, 0xFC,
        0x51, 0x84, 0xC7, 0xCE, 0xF9, 0x39, 0x00, 0x28, 0x7D, 0x46, 0x70, 0x8E, 0xCB, 0xC0,
        0xF6, 0xFF, 0xD9, 0x00,
    ];

    #[test]
    fn test_k4_test_sequence() {
        let mut decoder = BitDecoder::new(SliceByteReader::new(&K4_CODED)).unwrap();
        let mut context = ContextState::default();
        let mut decoded = [0u8; 32];
        for i in 0..256 {
            if decoder.decode_bit(&mut context).unwrap() {
                decoded[i / 8] |= 0x80 >> (i % 8);
            }
            assert!((context.index as usize) < PROBABILITY_STATE_COUNT);
        }
        assert_eq!(decoded, K4_SOURCE);
        // The final FF D9 is a marker, which is left unread.
        assert!(decoder.is_padding());
        assert_eq!(decoder.into_reader().position(), 29);
    }

    #[test]
    fn test_interval_stays_normalized() {
        let mut decoder = BitDecoder::new(SliceByteReader::new(&K4_CODED)).unwrap();
        let mut contexts = [ContextState::default(); 3];
        for i in 0..300 {
            decoder.decode_bit(&mut contexts[i % 3]).unwrap();
            assert!(decoder.a >= 0x8000, "A={:#06x} after decision {i}", decoder.a);
        }
    }

    #[test]
    fn test_padding_after_marker() {
        // Only a marker: the whole segment is zero padding.
        let data = [0xFF, 0xD9];
        let mut decoder = BitDecoder::new(SliceByteReader::new(&data)).unwrap();
        let mut context = ContextState::default();
        let mut bits = Vec::new();
        for _ in 0..20 {
            bits.push(decoder.decode_bit(&mut context).unwrap());
        }
        let mut expected = vec![true; 20];
        expected[0] = false;
        assert_eq!(bits, expected);
        assert_eq!(context, ContextState { index: 3, mps: true });
        assert_eq!(decoder.into_reader().position(), 0);
    }

    #[test]
    fn test_padding_is_deterministic_mid_segment() {
        let data = [0xA5, 0x3C, 0xFF, 0xD0, 0x12];
        let expected = "0010111010100011111100111110101101111010";
        let mut decoder = BitDecoder::new(SliceByteReader::new(&data)).unwrap();
        let mut context = ContextState::default();
        let decoded: String = (0..40)
            .map(|_| if decoder.decode_bit(&mut context).unwrap() { '1' } else { '0' })
            .collect();
        assert_eq!(decoded, expected);
        assert_eq!(context, ContextState { index: 104, mps: true });
        // RST0 and the byte after it are never consumed.
        assert_eq!(decoder.into_reader().position(), 2);
    }

    // Yields `data`, then fails like a dropped connection.
    struct TruncatedSource {
        data: Vec<u8>,
        position: usize,
    }

    impl Read for TruncatedSource {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.position == self.data.len() {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
            }
            let count = buf.len().min(self.data.len() - self.position);
            buf[..count].copy_from_slice(&self.data[self.position..self.position + count]);
            self.position += count;
            Ok(count)
        }
    }

    #[test]
    fn test_read_failure_is_not_padding() {
        let source = TruncatedSource {
            data: vec![0x12, 0x34, 0x56],
            position: 0,
        };
        let mut decoder = BitDecoder::new(IoByteReader::new(source)).unwrap();
        let mut context = ContextState::default();
        // Three bytes carry exactly 23 decisions in one fresh context.
        for _ in 0..23 {
            decoder.decode_bit(&mut context).unwrap();
        }
        match decoder.decode_bit(&mut context) {
            Err(ArithmeticError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::ConnectionReset),
            other => panic!("unexpected result {other:?}"),
        }
        assert!(!decoder.is_padding());
    }

    #[test]
    fn test_initialize_requires_data() {
        assert!(matches!(
            BitDecoder::new(SliceByteReader::new(&[0x12])),
            Err(ArithmeticError::NeedMoreData)
        ));
    }
}
