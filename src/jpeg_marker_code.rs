use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Marker codes that frame or parameterize arithmetic-coded scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum JpegMarkerCode {
    /// SOF9: Extended sequential DCT, arithmetic coding.
    StartOfFrameExtendedArithmetic = 0xC9,
    /// SOF10: Progressive DCT, arithmetic coding.
    StartOfFrameProgressiveArithmetic = 0xCA,
    /// SOF11: Lossless, arithmetic coding.
    StartOfFrameLosslessArithmetic = 0xCB,

    /// DAC: Defines arithmetic coding conditioning.
    DefineArithmeticConditioning = 0xCC,

    /// SOF13: Differential sequential DCT, arithmetic coding.
    StartOfFrameDifferentialSequentialArithmetic = 0xCD,
    /// SOF14: Differential progressive DCT, arithmetic coding.
    StartOfFrameDifferentialProgressiveArithmetic = 0xCE,
    /// SOF15: Differential lossless, arithmetic coding.
    StartOfFrameDifferentialLosslessArithmetic = 0xCF,

    /// RST0..RST7: Restart markers between entropy-coded segments.
    Restart0 = 0xD0,
    Restart1 = 0xD1,
    Restart2 = 0xD2,
    Restart3 = 0xD3,
    Restart4 = 0xD4,
    Restart5 = 0xD5,
    Restart6 = 0xD6,
    Restart7 = 0xD7,

    /// SOI: Marks the start of an image.
    StartOfImage = 0xD8,
    /// EOI: Marks the end of an image.
    EndOfImage = 0xD9,
    /// SOS: Marks the start of scan.
    StartOfScan = 0xDA,
    /// DNL: Defines the number of lines in a scan.
    DefineNumberOfLines = 0xDC,
    /// DRI: Defines the restart interval used in succeeding scans.
    DefineRestartInterval = 0xDD,
}

impl JpegMarkerCode {
    /// Returns the modulo-8 index of a restart marker, or `None` for any other marker.
    pub fn restart_index(self) -> Option<u8> {
        let code = u8::from(self);
        is_restart_marker(code).then(|| code - JPEG_RESTART_MARKER_BASE)
    }
}

pub const JPEG_MARKER_START_BYTE: u8 = 0xFF;
pub const JPEG_RESTART_MARKER_BASE: u8 = 0xD0;
pub const JPEG_RESTART_MARKER_RANGE: u8 = 8;

pub fn is_restart_marker(code: u8) -> bool {
    (JPEG_RESTART_MARKER_BASE..JPEG_RESTART_MARKER_BASE + JPEG_RESTART_MARKER_RANGE).contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restart_index() {
        assert_eq!(JpegMarkerCode::Restart0.restart_index(), Some(0));
        assert_eq!(JpegMarkerCode::Restart7.restart_index(), Some(7));
        assert_eq!(JpegMarkerCode::EndOfImage.restart_index(), None);
    }

    #[test]
    fn test_try_from_byte() {
        assert_eq!(
            JpegMarkerCode::try_from(0xCC).ok(),
            Some(JpegMarkerCode::DefineArithmeticConditioning)
        );
        assert_eq!(JpegMarkerCode::try_from(0xD3).ok(), Some(JpegMarkerCode::Restart3));
        // SOF0 is a Huffman frame and is not listed.
        assert!(JpegMarkerCode::try_from(0xC0).is_err());
        assert!(is_restart_marker(0xD5));
        assert!(!is_restart_marker(0xD8));
    }
}
