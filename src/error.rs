use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArithmeticError {
    #[error("Need more data")]
    NeedMoreData,
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    // Format violations
    #[error("Invalid marker segment size {0}")]
    InvalidMarkerSegmentSize(usize),
    #[error("Invalid table class {0}")]
    InvalidTableClass(u8),
    #[error("Invalid table ID {0}")]
    InvalidTableId(u8),
    #[error("Invalid AC conditioning value {0} (expected 1..=63)")]
    InvalidAcConditioning(u8),
    #[error("Invalid DC conditioning value {0:#04x} (lower bound exceeds upper bound)")]
    InvalidDcConditioning(u8),
    #[error("Magnitude category exceeds 15")]
    MagnitudeCategoryOverflow,
    #[error("AC coefficient run extends past the end of the block")]
    SpectralOverflow,
    #[error("Restart marker not found (found marker {0:#04x})")]
    RestartMarkerNotFound(u8),
    #[error("Unexpected restart marker RST{found} (expected RST{expected})")]
    UnexpectedRestartMarker { expected: u8, found: u8 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ArithmeticError {
    /// True for violations of the compressed data format, as opposed to
    /// caller mistakes, truncated input or I/O failures.
    pub fn is_format_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidMarkerSegmentSize(_)
                | Self::InvalidTableClass(_)
                | Self::InvalidTableId(_)
                | Self::InvalidAcConditioning(_)
                | Self::InvalidDcConditioning(_)
                | Self::MagnitudeCategoryOverflow
                | Self::SpectralOverflow
                | Self::RestartMarkerNotFound(_)
                | Self::UnexpectedRestartMarker { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_violation_grouping() {
        assert!(ArithmeticError::SpectralOverflow.is_format_violation());
        assert!(ArithmeticError::InvalidTableId(4).is_format_violation());
        assert!(!ArithmeticError::NeedMoreData.is_format_violation());
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        assert!(!ArithmeticError::from(io).is_format_violation());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ArithmeticError::UnexpectedRestartMarker { expected: 1, found: 3 }.to_string(),
            "Unexpected restart marker RST3 (expected RST1)"
        );
        assert_eq!(
            ArithmeticError::InvalidAcConditioning(64).to_string(),
            "Invalid AC conditioning value 64 (expected 1..=63)"
        );
    }
}
