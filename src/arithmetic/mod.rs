//! JPEG arithmetic entropy decoding (ISO/IEC 10918-1 / ITU-T T.81, Annexes D and F)
//!
//! This module implements the adaptive binary arithmetic decoder (QM-coder)
//! and the sequential DCT coefficient procedures built on it.
//!
//! Features:
//! - Bit-exact decoding with the 113-state probability estimation table.
//! - DC and AC statistics conditioned by DAC parameters (or the defaults).
//! - Zero padding at the end of entropy-coded segments.
//! - Interleaved scans with restart markers (DRI/RSTm).

pub mod bit_decoder;
pub mod coefficient_decoder;
pub mod conditioning;
pub mod context;
pub mod probability_table;
pub mod scan_decoder;

pub use bit_decoder::BitDecoder;
pub use coefficient_decoder::AcDecision;
pub use conditioning::{ConditioningTable, DcBounds, TableClass};
pub use context::{AcContextBank, ContextState, DcContextBank, DcContextCategory};
pub use scan_decoder::{ArithmeticScanDecoder, ScanComponent, to_natural_order};
