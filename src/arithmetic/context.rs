//! Adaptive contexts ("statistics bins") for DC and AC decoding.

use crate::arithmetic::conditioning::DcBounds;
use crate::constants::{
    AC_WIDTH_CONTEXT_COUNT, DC_CATEGORY_COUNT, DC_WIDTH_CONTEXT_COUNT, LAST_AC_INDEX,
    MAGNITUDE_CONTEXT_COUNT,
};

/// Probability state of one binary decision context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContextState {
    /// Index into the probability estimation table, 0..=112.
    pub index: u8,
    /// Sense of the more probable symbol.
    pub mps: bool,
}

impl ContextState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// DC conditioning category of the previous DC difference (Table F.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum DcContextCategory {
    Zero = 0,
    SmallPositive = 1,
    SmallNegative = 2,
    LargePositive = 3,
    LargeNegative = 4,
}

impl DcContextCategory {
    pub fn classify(previous_delta: i32, bounds: DcBounds) -> Self {
        let magnitude = previous_delta.unsigned_abs();
        if magnitude <= bounds.lower {
            Self::Zero
        } else if magnitude <= bounds.upper {
            if previous_delta > 0 {
                Self::SmallPositive
            } else {
                Self::SmallNegative
            }
        } else if previous_delta > 0 {
            Self::LargePositive
        } else {
            Self::LargeNegative
        }
    }
}

/// Contexts of one DC table slot.
#[derive(Debug, Clone)]
pub struct DcContextBank {
    bounds: DcBounds,
    pub(crate) nonzero: [ContextState; DC_CATEGORY_COUNT],
    pub(crate) sign: [ContextState; DC_CATEGORY_COUNT],
    pub(crate) positive_unit: [ContextState; DC_CATEGORY_COUNT],
    pub(crate) negative_unit: [ContextState; DC_CATEGORY_COUNT],
    /// X1..X15.
    pub(crate) width: [ContextState; DC_WIDTH_CONTEXT_COUNT],
    /// M2..M15.
    pub(crate) magnitude: [ContextState; MAGNITUDE_CONTEXT_COUNT],
}

impl DcContextBank {
    pub fn new(bounds: DcBounds) -> Self {
        Self {
            bounds,
            nonzero: Default::default(),
            sign: Default::default(),
            positive_unit: Default::default(),
            negative_unit: Default::default(),
            width: Default::default(),
            magnitude: Default::default(),
        }
    }

    pub fn bounds(&self) -> DcBounds {
        self.bounds
    }

    pub fn category(&self, previous_delta: i32) -> DcContextCategory {
        DcContextCategory::classify(previous_delta, self.bounds)
    }

    /// Returns every context to its initial state; the conditioning is kept.
    pub fn reset(&mut self) {
        *self = Self::new(self.bounds);
    }

    pub fn contexts(&self) -> impl Iterator<Item = &ContextState> {
        self.nonzero
            .iter()
            .chain(&self.sign)
            .chain(&self.positive_unit)
            .chain(&self.negative_unit)
            .chain(&self.width)
            .chain(&self.magnitude)
    }
}

/// Which of the two AC width/magnitude context sets a position uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagnitudeContextSet {
    /// k <= Kx.
    Low,
    /// k > Kx.
    High,
}

/// Contexts of one AC table slot.
#[derive(Debug, Clone)]
pub struct AcContextBank {
    threshold: u8,
    pub(crate) end_of_block: [ContextState; LAST_AC_INDEX],
    pub(crate) nonzero: [ContextState; LAST_AC_INDEX],
    pub(crate) unit_or_short: [ContextState; LAST_AC_INDEX],
    /// X2..X15 for k <= Kx.
    pub(crate) low_width: [ContextState; AC_WIDTH_CONTEXT_COUNT],
    /// X2..X15 for k > Kx.
    pub(crate) high_width: [ContextState; AC_WIDTH_CONTEXT_COUNT],
    /// M2..M15 for k <= Kx.
    pub(crate) low_magnitude: [ContextState; MAGNITUDE_CONTEXT_COUNT],
    /// M2..M15 for k > Kx.
    pub(crate) high_magnitude: [ContextState; MAGNITUDE_CONTEXT_COUNT],
}

impl AcContextBank {
    pub fn new(threshold: u8) -> Self {
        Self {
            threshold,
            end_of_block: [ContextState::default(); LAST_AC_INDEX],
            nonzero: [ContextState::default(); LAST_AC_INDEX],
            unit_or_short: [ContextState::default(); LAST_AC_INDEX],
            low_width: Default::default(),
            high_width: Default::default(),
            low_magnitude: Default::default(),
            high_magnitude: Default::default(),
        }
    }

    /// The conditioning threshold Kx.
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn magnitude_context_set(&self, k: usize) -> MagnitudeContextSet {
        if k <= self.threshold as usize {
            MagnitudeContextSet::Low
        } else {
            MagnitudeContextSet::High
        }
    }

    pub(crate) fn magnitude_contexts(
        &mut self,
        k: usize,
    ) -> (
        &mut [ContextState; AC_WIDTH_CONTEXT_COUNT],
        &mut [ContextState; MAGNITUDE_CONTEXT_COUNT],
    ) {
        match self.magnitude_context_set(k) {
            MagnitudeContextSet::Low => (&mut self.low_width, &mut self.low_magnitude),
            MagnitudeContextSet::High => (&mut self.high_width, &mut self.high_magnitude),
        }
    }

    /// Returns every context to its initial state; the conditioning is kept.
    pub fn reset(&mut self) {
        *self = Self::new(self.threshold);
    }

    pub fn contexts(&self) -> impl Iterator<Item = &ContextState> {
        self.end_of_block
            .iter()
            .chain(&self.nonzero)
            .chain(&self.unit_or_short)
            .chain(&self.low_width)
            .chain(&self.high_width)
            .chain(&self.low_magnitude)
            .chain(&self.high_magnitude)
    }
}
