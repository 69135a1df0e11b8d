// Table limits for arithmetic coding, ISO/IEC 10918-1 B.2.4.3.
pub const MAXIMUM_TABLE_ID: u8 = 3;
pub const TABLE_COUNT: usize = MAXIMUM_TABLE_ID as usize + 1;

pub const MINIMUM_AC_CONDITIONING: u8 = 1;
pub const MAXIMUM_AC_CONDITIONING: u8 = 63;

// Conditioning used when no DAC segment defines a table (F.1.4.4.1.4, F.1.4.4.2.1).
// DC: L = 0, U = 1. AC: Kx = 5.
pub const DEFAULT_DC_CONDITIONING: u8 = 0x10;
pub const DEFAULT_AC_CONDITIONING: u8 = 5;

pub const BLOCK_SIZE: usize = 64;
pub const LAST_AC_INDEX: usize = BLOCK_SIZE - 1;

// Number of entries in the probability estimation table (Table D.2).
pub const PROBABILITY_STATE_COUNT: usize = 113;

// DC contexts: 5 conditioning categories, X1..X15 and M2..M15.
pub const DC_CATEGORY_COUNT: usize = 5;
pub const MAXIMUM_WIDTH: usize = 15;
pub const DC_WIDTH_CONTEXT_COUNT: usize = MAXIMUM_WIDTH;
pub const MAGNITUDE_CONTEXT_COUNT: usize = MAXIMUM_WIDTH - 1;

// AC contexts: X2..X15 per low/high set.
pub const AC_WIDTH_CONTEXT_COUNT: usize = MAXIMUM_WIDTH - 1;

// Scan limits (B.2.3).
pub const MAXIMUM_SCAN_COMPONENTS: usize = 4;
pub const MAXIMUM_BLOCKS_PER_MCU: usize = 10;

// The size in bytes of the segment length field.
pub const SEGMENT_LENGTH_SIZE: usize = 2;

// Zig-zag scan position -> row-major index (Figure A.6).
pub const ZIGZAG_ORDER: [usize; BLOCK_SIZE] = [
    0,  1,  8, 16,  9,  2,  3, 10,
    17, 24, 32, 25, 18, 11,  4,  5,
    12, 19, 26, 33, 40, 48, 41, 34,
    27, 20, 13,  6,  7, 14, 21, 28,
    35, 42, 49, 56, 57, 50, 43, 36,
    29, 22, 15, 23, 30, 37, 44, 51,
    58, 59, 52, 45, 38, 31, 39, 46,
    53, 60, 61, 54, 47, 55, 62, 63,
];
