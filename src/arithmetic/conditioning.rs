//! Arithmetic coding conditioning (DAC marker segment, ISO/IEC 10918-1 B.2.4.3).

use crate::constants::{
    DEFAULT_AC_CONDITIONING, DEFAULT_DC_CONDITIONING, MAXIMUM_AC_CONDITIONING,
    MAXIMUM_TABLE_ID, MINIMUM_AC_CONDITIONING, SEGMENT_LENGTH_SIZE, TABLE_COUNT,
};
use crate::error::ArithmeticError;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Table class (Tc) of a conditioning table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum TableClass {
    Dc = 0,
    Ac = 1,
}

/// DC conditioning bounds derived from Cs = (U << 4) | L.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DcBounds {
    /// Differences with magnitude up to this value are "zero".
    pub lower: u32,
    /// Differences with magnitude above this value are "large".
    pub upper: u32,
}

impl DcBounds {
    pub fn from_conditioning(value: u8) -> Self {
        let l = value & 0x0F;
        let u = value >> 4;
        Self {
            lower: if l == 0 { 0 } else { 1 << (l - 1) },
            upper: 1 << u,
        }
    }
}

impl Default for DcBounds {
    fn default() -> Self {
        Self::from_conditioning(DEFAULT_DC_CONDITIONING)
    }
}

/// Conditioning values of all DC and AC table slots.
///
/// Values persist across scans until a DAC segment redefines them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditioningTable {
    dc: [u8; TABLE_COUNT],
    ac: [u8; TABLE_COUNT],
}

impl Default for ConditioningTable {
    fn default() -> Self {
        Self {
            dc: [DEFAULT_DC_CONDITIONING; TABLE_COUNT],
            ac: [DEFAULT_AC_CONDITIONING; TABLE_COUNT],
        }
    }
}

impl ConditioningTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_conditioning(
        &mut self,
        class: TableClass,
        table_id: u8,
        value: u8,
    ) -> Result<(), ArithmeticError> {
        let slot = Self::slot(table_id)?;
        match class {
            TableClass::Dc => {
                if (value & 0x0F) > (value >> 4) {
                    return Err(ArithmeticError::InvalidDcConditioning(value));
                }
                self.dc[slot] = value;
            }
            TableClass::Ac => {
                if !(MINIMUM_AC_CONDITIONING..=MAXIMUM_AC_CONDITIONING).contains(&value) {
                    return Err(ArithmeticError::InvalidAcConditioning(value));
                }
                self.ac[slot] = value;
            }
        }
        log::debug!("conditioning {class:?}{table_id} = {value:#04x}");
        Ok(())
    }

    /// The raw Cs byte of a table slot.
    pub fn conditioning(&self, class: TableClass, table_id: u8) -> Result<u8, ArithmeticError> {
        let slot = Self::slot(table_id)?;
        Ok(match class {
            TableClass::Dc => self.dc[slot],
            TableClass::Ac => self.ac[slot],
        })
    }

    pub fn dc_bounds(&self, table_id: u8) -> Result<DcBounds, ArithmeticError> {
        Ok(DcBounds::from_conditioning(
            self.conditioning(TableClass::Dc, table_id)?,
        ))
    }

    /// The AC threshold Kx.
    pub fn ac_threshold(&self, table_id: u8) -> Result<u8, ArithmeticError> {
        self.conditioning(TableClass::Ac, table_id)
    }

    /// Applies a DAC marker segment. `segment` starts at the length field.
    pub fn read_dac_segment(&mut self, segment: &[u8]) -> Result<(), ArithmeticError> {
        if segment.len() < SEGMENT_LENGTH_SIZE {
            return Err(ArithmeticError::InvalidMarkerSegmentSize(segment.len()));
        }
        let length = u16::from_be_bytes([segment[0], segment[1]]) as usize;
        if length != segment.len() || (length - SEGMENT_LENGTH_SIZE) % 2 != 0 {
            return Err(ArithmeticError::InvalidMarkerSegmentSize(length));
        }

        for entry in segment[SEGMENT_LENGTH_SIZE..].chunks_exact(2) {
            let tc = entry[0] >> 4;
            let tb = entry[0] & 0x0F;
            let class = TableClass::try_from(tc).map_err(|_| ArithmeticError::InvalidTableClass(tc))?;
            self.set_conditioning(class, tb, entry[1])?;
        }
        Ok(())
    }

    fn slot(table_id: u8) -> Result<usize, ArithmeticError> {
        if table_id > MAXIMUM_TABLE_ID {
            return Err(ArithmeticError::InvalidTableId(table_id));
        }
        Ok(table_id as usize)
    }
}
