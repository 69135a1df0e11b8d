//! Byte sources for entropy-coded segments.
//!
//! Entropy-coded data follows every literal 0xFF byte with a stuffed 0x00
//! (ISO/IEC 10918-1 B.1.1.5). A 0xFF followed by anything else is a marker,
//! which ends the segment: the readers report it as
//! [`StuffedByte::MissingStuffing`] and leave the marker unread.

use crate::error::ArithmeticError;
use crate::jpeg_marker_code::JPEG_MARKER_START_BYTE;
use std::io::Read;

/// Result of reading one byte of entropy-coded data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StuffedByte {
    Data(u8),
    /// A marker was reached; the segment has no more data.
    MissingStuffing,
}

pub trait StuffedByteReader {
    /// Reads the next data byte, removing the stuffed 0x00 after 0xFF.
    fn read_stuffed_byte(&mut self) -> Result<StuffedByte, ArithmeticError>;

    /// Skips whatever is left of the current segment and returns the code of
    /// the marker that terminates it.
    fn read_marker(&mut self) -> Result<u8, ArithmeticError>;
}

/// Reads entropy-coded data from an in-memory buffer.
pub struct SliceByteReader<'a> {
    source: &'a [u8],
    position: usize,
}

impl<'a> SliceByteReader<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// Offset of the next unread byte. After the segment ends this points at
    /// the 0xFF of the terminating marker.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining_data(&self) -> &'a [u8] {
        &self.source[self.position..]
    }
}

impl StuffedByteReader for SliceByteReader<'_> {
    fn read_stuffed_byte(&mut self) -> Result<StuffedByte, ArithmeticError> {
        let byte = *self
            .source
            .get(self.position)
            .ok_or(ArithmeticError::NeedMoreData)?;

        if byte != JPEG_MARKER_START_BYTE {
            self.position += 1;
            return Ok(StuffedByte::Data(byte));
        }

        match self.source.get(self.position + 1) {
            Some(0x00) => {
                self.position += 2;
                Ok(StuffedByte::Data(JPEG_MARKER_START_BYTE))
            }
            Some(_) => Ok(StuffedByte::MissingStuffing),
            None => Err(ArithmeticError::NeedMoreData),
        }
    }

    fn read_marker(&mut self) -> Result<u8, ArithmeticError> {
        let mut discarded = 0usize;
        loop {
            let byte = *self
                .source
                .get(self.position)
                .ok_or(ArithmeticError::NeedMoreData)?;
            self.position += 1;
            if byte != JPEG_MARKER_START_BYTE {
                discarded += 1;
                continue;
            }

            // Fill bytes (repeated 0xFF) may precede the marker code.
            let mut code = JPEG_MARKER_START_BYTE;
            while code == JPEG_MARKER_START_BYTE {
                code = *self
                    .source
                    .get(self.position)
                    .ok_or(ArithmeticError::NeedMoreData)?;
                self.position += 1;
            }

            if code == 0x00 {
                discarded += 2;
                continue;
            }

            if discarded > 0 {
                log::warn!("discarded {discarded} bytes of entropy-coded data before marker {code:#04x}");
            }
            return Ok(code);
        }
    }
}

/// Reads entropy-coded data from any `std::io::Read`.
///
/// Reads one byte at a time; wrap unbuffered sources in a `BufReader`.
pub struct IoByteReader<R: Read> {
    inner: R,
    // Marker code read while looking past a 0xFF.
    pending_marker: Option<u8>,
}

impl<R: Read> IoByteReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pending_marker: None,
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn read_raw_byte(&mut self) -> Result<u8, ArithmeticError> {
        let mut buffer = [0u8; 1];
        self.inner.read_exact(&mut buffer)?;
        Ok(buffer[0])
    }
}

impl<R: Read> StuffedByteReader for IoByteReader<R> {
    fn read_stuffed_byte(&mut self) -> Result<StuffedByte, ArithmeticError> {
        if self.pending_marker.is_some() {
            return Ok(StuffedByte::MissingStuffing);
        }

        let byte = self.read_raw_byte()?;
        if byte != JPEG_MARKER_START_BYTE {
            return Ok(StuffedByte::Data(byte));
        }

        // Only 0xFF 0x00 is stuffing; 0xFF 0xFF already starts a marker.
        let next = self.read_raw_byte()?;
        if next == 0x00 {
            Ok(StuffedByte::Data(JPEG_MARKER_START_BYTE))
        } else {
            self.pending_marker = Some(next);
            Ok(StuffedByte::MissingStuffing)
        }
    }

    fn read_marker(&mut self) -> Result<u8, ArithmeticError> {
        let mut discarded = 0usize;
        loop {
            if let StuffedByte::Data(_) = self.read_stuffed_byte()? {
                discarded += 1;
                continue;
            }

            let mut code = self.pending_marker.take().ok_or(ArithmeticError::NeedMoreData)?;
            // Fill bytes (repeated 0xFF) may precede the marker code.
            while code == JPEG_MARKER_START_BYTE {
                code = self.read_raw_byte()?;
            }

            if code == 0x00 {
                discarded += 2;
                continue;
            }

            if discarded > 0 {
                log::warn!("discarded {discarded} bytes of entropy-coded data before marker {code:#04x}");
            }
            return Ok(code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_reader_removes_stuffing() {
        let data = [0x12, 0xFF, 0x00, 0x34, 0xFF, 0xD9];
        let mut reader = SliceByteReader::new(&data);
        assert_eq!(reader.read_stuffed_byte().unwrap(), StuffedByte::Data(0x12));
        assert_eq!(reader.read_stuffed_byte().unwrap(), StuffedByte::Data(0xFF));
        assert_eq!(reader.read_stuffed_byte().unwrap(), StuffedByte::Data(0x34));
        assert_eq!(reader.read_stuffed_byte().unwrap(), StuffedByte::MissingStuffing);
        // The marker stays in place for every later read.
        assert_eq!(reader.read_stuffed_byte().unwrap(), StuffedByte::MissingStuffing);
        assert_eq!(reader.position(), 4);
        assert_eq!(reader.read_marker().unwrap(), 0xD9);
        assert_eq!(reader.position(), 6);
    }

    #[test]
    fn test_slice_reader_exhausted() {
        let mut reader = SliceByteReader::new(&[0x01]);
        assert_eq!(reader.read_stuffed_byte().unwrap(), StuffedByte::Data(0x01));
        assert!(matches!(reader.read_stuffed_byte(), Err(ArithmeticError::NeedMoreData)));

        let mut reader = SliceByteReader::new(&[0xFF]);
        assert!(matches!(reader.read_stuffed_byte(), Err(ArithmeticError::NeedMoreData)));
    }

    #[test]
    fn test_slice_reader_read_marker_skips_data_and_fill() {
        let data = [0xAB, 0xFF, 0x00, 0xCD, 0xFF, 0xFF, 0xD3, 0x77];
        let mut reader = SliceByteReader::new(&data);
        assert_eq!(reader.read_marker().unwrap(), 0xD3);
        assert_eq!(reader.remaining_data(), &[0x77]);
    }

    #[test]
    fn test_io_reader_matches_slice_reader() {
        let data = [0x12, 0xFF, 0x00, 0x34, 0xFF, 0xD0, 0x56];
        let mut reader = IoByteReader::new(&data[..]);
        assert_eq!(reader.read_stuffed_byte().unwrap(), StuffedByte::Data(0x12));
        assert_eq!(reader.read_stuffed_byte().unwrap(), StuffedByte::Data(0xFF));
        assert_eq!(reader.read_stuffed_byte().unwrap(), StuffedByte::Data(0x34));
        assert_eq!(reader.read_stuffed_byte().unwrap(), StuffedByte::MissingStuffing);
        assert_eq!(reader.read_stuffed_byte().unwrap(), StuffedByte::MissingStuffing);
        assert_eq!(reader.read_marker().unwrap(), 0xD0);
        assert_eq!(reader.read_stuffed_byte().unwrap(), StuffedByte::Data(0x56));
    }

    #[test]
    fn test_io_reader_treats_repeated_ff_as_marker() {
        for data in [&[0xAB, 0xFF, 0xFF, 0x00, 0x12][..], &[0xAB, 0xFF, 0xFF, 0xD3, 0x12][..]] {
            let mut slice = SliceByteReader::new(data);
            let mut io = IoByteReader::new(data);
            for _ in 0..2 {
                let expected = slice.read_stuffed_byte().unwrap();
                assert_eq!(io.read_stuffed_byte().unwrap(), expected);
            }
            assert_eq!(io.read_stuffed_byte().unwrap(), StuffedByte::MissingStuffing);
        }

        // Fill bytes before a marker code.
        let data = [0xFF, 0xFF, 0xD3, 0x77];
        let mut slice = SliceByteReader::new(&data);
        let mut io = IoByteReader::new(&data[..]);
        assert_eq!(slice.read_stuffed_byte().unwrap(), StuffedByte::MissingStuffing);
        assert_eq!(io.read_stuffed_byte().unwrap(), StuffedByte::MissingStuffing);
        assert_eq!(slice.read_marker().unwrap(), 0xD3);
        assert_eq!(io.read_marker().unwrap(), 0xD3);
        assert_eq!(io.read_stuffed_byte().unwrap(), StuffedByte::Data(0x77));

        // 0xFF 0xFF 0x00 resolves to skipped data, not to a marker.
        let data = [0xFF, 0xFF, 0x00, 0x12, 0xFF, 0xD9];
        let mut slice = SliceByteReader::new(&data);
        let mut io = IoByteReader::new(&data[..]);
        assert_eq!(slice.read_marker().unwrap(), 0xD9);
        assert_eq!(io.read_marker().unwrap(), 0xD9);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    #[test]
    fn test_io_reader_propagates_errors() {
        let mut reader = IoByteReader::new(FailingReader);
        match reader.read_stuffed_byte() {
            Err(ArithmeticError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::ConnectionReset),
            other => panic!("unexpected result {other:?}"),
        }
    }
}
