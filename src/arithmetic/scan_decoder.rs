//! Block and MCU decoding for sequential arithmetic-coded scans.
//!
//! The scan decoder owns the context banks of all table slots, the DC
//! prediction of every scan component and the restart interval bookkeeping.
//! Marker parsing outside the entropy-coded segments is left to the caller.

use crate::arithmetic::bit_decoder::BitDecoder;
use crate::arithmetic::coefficient_decoder::AcDecision;
use crate::arithmetic::conditioning::ConditioningTable;
use crate::arithmetic::context::{AcContextBank, DcContextBank};
use crate::byte_reader::StuffedByteReader;
use crate::constants::{
    BLOCK_SIZE, LAST_AC_INDEX, MAXIMUM_BLOCKS_PER_MCU, MAXIMUM_SCAN_COMPONENTS,
    MAXIMUM_TABLE_ID, TABLE_COUNT, ZIGZAG_ORDER,
};
use crate::error::ArithmeticError;
use crate::jpeg_marker_code::{JPEG_RESTART_MARKER_RANGE, JpegMarkerCode};

/// Table selectors of one scan component (Tdj, Taj).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanComponent {
    pub dc_table: u8,
    pub ac_table: u8,
}

#[derive(Debug, Clone, Copy)]
struct ComponentState {
    dc_table: usize,
    ac_table: usize,
    predictor: i16,
    previous_delta: i32,
}

impl ComponentState {
    fn reset(&mut self) {
        self.predictor = 0;
        self.previous_delta = 0;
    }
}

pub struct ArithmeticScanDecoder<R> {
    decoder: BitDecoder<R>,
    dc_banks: Vec<DcContextBank>,
    ac_banks: Vec<AcContextBank>,
    components: Vec<ComponentState>,
    restart_interval: u16,
    mcus_until_restart: u16,
    next_restart_index: u8,
}

impl<R: StuffedByteReader> ArithmeticScanDecoder<R> {
    /// Starts decoding a scan. `reader` must be positioned at the first byte
    /// of the entropy-coded data. A `restart_interval` of 0 disables restarts.
    pub fn new(
        reader: R,
        conditioning: &ConditioningTable,
        components: &[ScanComponent],
        restart_interval: u16,
    ) -> Result<Self, ArithmeticError> {
        if components.is_empty() || components.len() > MAXIMUM_SCAN_COMPONENTS {
            return Err(ArithmeticError::InvalidArgument(
                "a scan has between 1 and 4 components",
            ));
        }

        let components = components
            .iter()
            .map(|component| {
                for table_id in [component.dc_table, component.ac_table] {
                    if table_id > MAXIMUM_TABLE_ID {
                        return Err(ArithmeticError::InvalidTableId(table_id));
                    }
                }
                Ok(ComponentState {
                    dc_table: component.dc_table as usize,
                    ac_table: component.ac_table as usize,
                    predictor: 0,
                    previous_delta: 0,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut dc_banks = Vec::with_capacity(TABLE_COUNT);
        let mut ac_banks = Vec::with_capacity(TABLE_COUNT);
        for table_id in 0..=MAXIMUM_TABLE_ID {
            dc_banks.push(DcContextBank::new(conditioning.dc_bounds(table_id)?));
            ac_banks.push(AcContextBank::new(conditioning.ac_threshold(table_id)?));
        }

        Ok(Self {
            decoder: BitDecoder::new(reader)?,
            dc_banks,
            ac_banks,
            components,
            restart_interval,
            mcus_until_restart: restart_interval,
            next_restart_index: 0,
        })
    }

    /// Decodes the next block of scan component `component` into `block`, in
    /// zig-zag order. `block[0]` receives the predicted DC value.
    pub fn decode_block(
        &mut self,
        component: usize,
        block: &mut [i16; BLOCK_SIZE],
    ) -> Result<(), ArithmeticError> {
        let state = self
            .components
            .get_mut(component)
            .ok_or(ArithmeticError::InvalidArgument("component index out of range"))?;

        let delta = self
            .decoder
            .decode_dc_delta(&mut self.dc_banks[state.dc_table], state.previous_delta)?;
        state.previous_delta = delta;
        // DC values are modulo 2^16 (F.2.1.3.1).
        state.predictor = state.predictor.wrapping_add(delta as i16);

        block.fill(0);
        block[0] = state.predictor;

        let bank = &mut self.ac_banks[state.ac_table];
        let mut k = 1;
        while k <= LAST_AC_INDEX {
            match self.decoder.decode_ac(bank, k)? {
                AcDecision::EndOfBlock => break,
                AcDecision::Coefficient { run, value } => {
                    k += run;
                    block[k] = value as i16;
                    k += 1;
                }
            }
        }
        Ok(())
    }

    /// Decodes one MCU. `layout[i]` is the scan component of `blocks[i]`.
    ///
    /// When the restart interval has elapsed, the restart marker is consumed
    /// and the decoder is reset before the first block.
    pub fn decode_mcu(
        &mut self,
        blocks: &mut [[i16; BLOCK_SIZE]],
        layout: &[usize],
    ) -> Result<(), ArithmeticError> {
        if blocks.len() != layout.len() {
            return Err(ArithmeticError::InvalidArgument(
                "MCU layout and block count differ",
            ));
        }
        if layout.len() > MAXIMUM_BLOCKS_PER_MCU {
            return Err(ArithmeticError::InvalidArgument("too many blocks in MCU"));
        }

        if self.restart_interval > 0 {
            if self.mcus_until_restart == 0 {
                self.process_restart()?;
            }
            self.mcus_until_restart -= 1;
        }

        for (block, &component) in blocks.iter_mut().zip(layout) {
            self.decode_block(component, block)?;
        }
        Ok(())
    }

    /// Hands back the reader. It is positioned at or before the marker that
    /// ends the last decoded segment.
    pub fn into_reader(self) -> R {
        self.decoder.into_reader()
    }

    fn process_restart(&mut self) -> Result<(), ArithmeticError> {
        let code = self.decoder.reader_mut().read_marker()?;
        let found = JpegMarkerCode::try_from(code)
            .ok()
            .and_then(JpegMarkerCode::restart_index)
            .ok_or(ArithmeticError::RestartMarkerNotFound(code))?;
        if found != self.next_restart_index {
            return Err(ArithmeticError::UnexpectedRestartMarker {
                expected: self.next_restart_index,
                found,
            });
        }
        log::debug!("RST{found}: resetting contexts and DC prediction");

        self.next_restart_index = (self.next_restart_index + 1) % JPEG_RESTART_MARKER_RANGE;
        self.mcus_until_restart = self.restart_interval;
        self.dc_banks.iter_mut().for_each(DcContextBank::reset);
        self.ac_banks.iter_mut().for_each(AcContextBank::reset);
        self.components.iter_mut().for_each(ComponentState::reset);
        self.decoder.initialize()
    }
}

/// Reorders a zig-zag block into row-major order.
pub fn to_natural_order(block: &[i16; BLOCK_SIZE]) -> [i16; BLOCK_SIZE] {
    let mut natural = [0i16; BLOCK_SIZE];
    for (&value, &position) in block.iter().zip(ZIGZAG_ORDER.iter()) {
        natural[position] = value;
    }
    natural
}
