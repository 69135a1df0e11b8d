pub mod arithmetic;
pub mod byte_reader;
pub mod constants;
pub mod error;
pub mod jpeg_marker_code;

pub use arithmetic::{
    AcDecision, ArithmeticScanDecoder, BitDecoder, ConditioningTable, ContextState, ScanComponent,
    TableClass,
};
pub use byte_reader::{IoByteReader, SliceByteReader, StuffedByte, StuffedByteReader};
pub use error::ArithmeticError;
