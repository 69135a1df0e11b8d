//! Probability estimation state machine, ISO/IEC 10918-1 Table D.2.

use crate::constants::PROBABILITY_STATE_COUNT;

/// One row of the probability estimation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbabilityStateEntry {
    /// LPS probability estimate, as a 16-bit interval size.
    pub qe: u16,
    pub next_lps: u8,
    pub next_mps: u8,
    /// Exchange the sense of the MPS when an LPS is coded in this state.
    pub switch_mps: bool,
}

impl ProbabilityStateEntry {
    const fn new(qe: u16, next_lps: u8, next_mps: u8, switch_mps: bool) -> Self {
        Self {
            qe,
            next_lps,
            next_mps,
            switch_mps,
        }
    }
}

// Qe, Next_Index_LPS, Next_Index_MPS, Switch_MPS
static PROBABILITY_TABLE: [ProbabilityStateEntry; PROBABILITY_STATE_COUNT] = [
    ProbabilityStateEntry::new(0x5A1D, 1, 1, true), // 0
    ProbabilityStateEntry::new(0x2586, 14, 2, false), // 1
    ProbabilityStateEntry::new(0x1114, 16, 3, false), // 2
    ProbabilityStateEntry::new(0x080B, 18, 4, false), // 3
    ProbabilityStateEntry::new(0x03D8, 20, 5, false), // 4
    ProbabilityStateEntry::new(0x01DA, 23, 6, false), // 5
    ProbabilityStateEntry::new(0x00E5, 25, 7, false), // 6
    ProbabilityStateEntry::new(0x006F, 28, 8, false), // 7
    ProbabilityStateEntry::new(0x0036, 30, 9, false), // 8
    ProbabilityStateEntry::new(0x001A, 33, 10, false), // 9
    ProbabilityStateEntry::new(0x000D, 35, 11, false), // 10
    ProbabilityStateEntry::new(0x0006, 9, 12, false), // 11
    ProbabilityStateEntry::new(0x0003, 10, 13, false), // 12
    ProbabilityStateEntry::new(0x0001, 12, 13, false), // 13
    ProbabilityStateEntry::new(0x5A7F, 15, 15, true), // 14
    ProbabilityStateEntry::new(0x3F25, 36, 16, false), // 15
    ProbabilityStateEntry::new(0x2CF2, 38, 17, false), // 16
    ProbabilityStateEntry::new(0x207C, 39, 18, false), // 17
    ProbabilityStateEntry::new(0x17B9, 40, 19, false), // 18
    ProbabilityStateEntry::new(0x1182, 42, 20, false), // 19
    ProbabilityStateEntry::new(0x0CEF, 43, 21, false), // 20
    ProbabilityStateEntry::new(0x09A1, 45, 22, false), // 21
    ProbabilityStateEntry::new(0x072F, 46, 23, false), // 22
    ProbabilityStateEntry::new(0x055C, 48, 24, false), // 23
    ProbabilityStateEntry::new(0x0406, 49, 25, false), // 24
    ProbabilityStateEntry::new(0x0303, 51, 26, false), // 25
    ProbabilityStateEntry::new(0x0240, 52, 27, false), // 26
    ProbabilityStateEntry::new(0x01B1, 54, 28, false), // 27
    ProbabilityStateEntry::new(0x0144, 56, 29, false), // 28
    ProbabilityStateEntry::new(0x00F5, 57, 30, false), // 29
    ProbabilityStateEntry::new(0x00B7, 59, 31, false), // 30
    ProbabilityStateEntry::new(0x008A, 60, 32, false), // 31
    ProbabilityStateEntry::new(0x0068, 62, 33, false), // 32
    ProbabilityStateEntry::new(0x004E, 63, 34, false), // 33
    ProbabilityStateEntry::new(0x003B, 32, 35, false), // 34
    ProbabilityStateEntry::new(0x002C, 33, 9, false), // 35
    ProbabilityStateEntry::new(0x5AE1, 37, 37, true), // 36
    ProbabilityStateEntry::new(0x484C, 64, 38, false), // 37
    ProbabilityStateEntry::new(0x3A0D, 65, 39, false), // 38
    ProbabilityStateEntry::new(0x2EF1, 67, 40, false), // 39
    ProbabilityStateEntry::new(0x261F, 68, 41, false), // 40
    ProbabilityStateEntry::new(0x1F33, 69, 42, false), // 41
    ProbabilityStateEntry::new(0x19A8, 70, 43, false), // 42
    ProbabilityStateEntry::new(0x1518, 72, 44, false), // 43
    ProbabilityStateEntry::new(0x1177, 73, 45, false), // 44
    ProbabilityStateEntry::new(0x0E74, 74, 46, false), // 45
    ProbabilityStateEntry::new(0x0BFB, 75, 47, false), // 46
    ProbabilityStateEntry::new(0x09F8, 77, 48, false), // 47
    ProbabilityStateEntry::new(0x0861, 78, 49, false), // 48
    ProbabilityStateEntry::new(0x0706, 79, 50, false), // 49
    ProbabilityStateEntry::new(0x05CD, 48, 51, false), // 50
    ProbabilityStateEntry::new(0x04DE, 50, 52, false), // 51
    ProbabilityStateEntry::new(0x040F, 50, 53, false), // 52
    ProbabilityStateEntry::new(0x0363, 51, 54, false), // 53
    ProbabilityStateEntry::new(0x02D4, 52, 55, false), // 54
    ProbabilityStateEntry::new(0x025C, 53, 56, false), // 55
    ProbabilityStateEntry::new(0x01F8, 54, 57, false), // 56
    ProbabilityStateEntry::new(0x01A4, 55, 58, false), // 57
    ProbabilityStateEntry::new(0x0160, 56, 59, false), // 58
    ProbabilityStateEntry::new(0x0125, 57, 60, false), // 59
    ProbabilityStateEntry::new(0x00F6, 58, 61, false), // 60
    ProbabilityStateEntry::new(0x00CB, 59, 62, false), // 61
    ProbabilityStateEntry::new(0x00AB, 61, 63, false), // 62
    ProbabilityStateEntry::new(0x008F, 61, 32, false), // 63
    ProbabilityStateEntry::new(0x5B12, 65, 65, true), // 64
    ProbabilityStateEntry::new(0x4D04, 80, 66, false), // 65
    ProbabilityStateEntry::new(0x412C, 81, 67, false), // 66
    ProbabilityStateEntry::new(0x37D8, 82, 68, false), // 67
    ProbabilityStateEntry::new(0x2FE8, 83, 69, false), // 68
    ProbabilityStateEntry::new(0x293C, 84, 70, false), // 69
    ProbabilityStateEntry::new(0x2379, 86, 71, false), // 70
    ProbabilityStateEntry::new(0x1EDF, 87, 72, false), // 71
    ProbabilityStateEntry::new(0x1AA9, 87, 73, false), // 72
    ProbabilityStateEntry::new(0x174E, 72, 74, false), // 73
    ProbabilityStateEntry::new(0x1424, 72, 75, false), // 74
    ProbabilityStateEntry::new(0x119C, 74, 76, false), // 75
    ProbabilityStateEntry::new(0x0F6B, 74, 77, false), // 76
    ProbabilityStateEntry::new(0x0D51, 75, 78, false), // 77
    ProbabilityStateEntry::new(0x0BB6, 77, 79, false), // 78
    ProbabilityStateEntry::new(0x0A40, 77, 48, false), // 79
    ProbabilityStateEntry::new(0x5832, 80, 81, true), // 80
    ProbabilityStateEntry::new(0x4D1C, 88, 82, false), // 81
    ProbabilityStateEntry::new(0x438E, 89, 83, false), // 82
    ProbabilityStateEntry::new(0x3BDD, 90, 84, false), // 83
    ProbabilityStateEntry::new(0x34EE, 91, 85, false), // 84
    ProbabilityStateEntry::new(0x2EAE, 92, 86, false), // 85
    ProbabilityStateEntry::new(0x299A, 93, 87, false), // 86
    ProbabilityStateEntry::new(0x2516, 86, 71, false), // 87
    ProbabilityStateEntry::new(0x5570, 88, 89, true), // 88
    ProbabilityStateEntry::new(0x4CA9, 95, 90, false), // 89
    ProbabilityStateEntry::new(0x44D9, 96, 91, false), // 90
    ProbabilityStateEntry::new(0x3E22, 97, 92, false), // 91
    ProbabilityStateEntry::new(0x3824, 99, 93, false), // 92
    ProbabilityStateEntry::new(0x32B4, 99, 94, false), // 93
    ProbabilityStateEntry::new(0x2E17, 93, 86, false), // 94
    ProbabilityStateEntry::new(0x56A8, 95, 96, true), // 95
    ProbabilityStateEntry::new(0x4F46, 101, 97, false), // 96
    ProbabilityStateEntry::new(0x47E5, 102, 98, false), // 97
    ProbabilityStateEntry::new(0x41CF, 103, 99, false), // 98
    ProbabilityStateEntry::new(0x3C3D, 104, 100, false), // 99
    ProbabilityStateEntry::new(0x375E, 99, 93, false), // 100
    ProbabilityStateEntry::new(0x5231, 105, 102, false), // 101
    ProbabilityStateEntry::new(0x4C0F, 106, 103, false), // 102
    ProbabilityStateEntry::new(0x4639, 107, 104, false), // 103
    ProbabilityStateEntry::new(0x415E, 103, 99, false), // 104
    ProbabilityStateEntry::new(0x5627, 105, 106, true), // 105
    ProbabilityStateEntry::new(0x50E7, 108, 107, false), // 106
    ProbabilityStateEntry::new(0x4B85, 109, 103, false), // 107
    ProbabilityStateEntry::new(0x5597, 110, 109, false), // 108
    ProbabilityStateEntry::new(0x504F, 111, 107, false), // 109
    ProbabilityStateEntry::new(0x5A10, 110, 111, true), // 110
    ProbabilityStateEntry::new(0x5522, 112, 109, false), // 111
    ProbabilityStateEntry::new(0x59EB, 112, 111, true), // 112
];

/// Returns the table row for a context state index (0..=112).
#[inline]
pub fn probability_state(index: u8) -> &'static ProbabilityStateEntry {
    &PROBABILITY_TABLE[index as usize]
}

/// All rows, in index order.
pub fn probability_table() -> &'static [ProbabilityStateEntry] {
    &PROBABILITY_TABLE
}
