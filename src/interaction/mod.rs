use serde::{Deserialize, Serialize};

use crate::core::{Sample, SampleKind};

/// Currently highlighted sample.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum HoverState {
    #[default]
    None,
    Active {
        /// Index into the reduced (downsampled) series.
        index: usize,
        /// Device x where the indicator is drawn.
        device_x: f64,
    },
}

impl HoverState {
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active { .. })
    }
}

/// Value handed to hover callbacks, shaped like the input series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HoverValue {
    /// Bare-number input: the sample's y value.
    Value(f64),
    /// Pair input: the full sample.
    Sample(Sample),
}

impl HoverValue {
    #[must_use]
    pub fn from_sample(sample: Sample, kind: SampleKind) -> Self {
        match kind {
            SampleKind::Values => Self::Value(sample.y),
            SampleKind::Pairs => Self::Sample(sample),
        }
    }
}

/// Pointer and hover state owned by one chart instance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    cursor: Option<(f64, f64)>,
    hover: HoverState,
}

impl InteractionState {
    #[must_use]
    pub fn cursor(self) -> Option<(f64, f64)> {
        self.cursor
    }

    #[must_use]
    pub fn hover(self) -> HoverState {
        self.hover
    }

    /// Records the pointer position and replaces the hover state in one step.
    ///
    /// Returns the previous hover state.
    pub fn on_pointer_move(&mut self, x: f64, y: f64, hover: HoverState) -> HoverState {
        self.cursor = Some((x, y));
        std::mem::replace(&mut self.hover, hover)
    }

    /// Clears cursor and hover, returning the previous hover state.
    pub fn on_pointer_leave(&mut self) -> HoverState {
        self.cursor = None;
        std::mem::take(&mut self.hover)
    }

    /// Drops hover without forgetting the cursor, used when geometry is rebuilt.
    pub fn reset_hover(&mut self) {
        self.hover = HoverState::None;
    }
}
