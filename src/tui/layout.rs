//! Responsive breakpoint system for layout decisions.
//!
//! Single source of truth for width thresholds - no magic numbers scattered in render code.
//! The compact threshold is configurable (`[layout] compact_below`); the wide
//! threshold sits a fixed distance above it.

/// Extra columns above the compact threshold before the filter panel docks beside the table.
pub const WIDE_MARGIN: u16 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// Below the threshold: stacked cards, filter drawer from the bottom
    Compact,
    /// Grid table, filter drawer as an overlay
    Normal,
    /// Grid table with the filter panel docked on the right
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16, compact_below: u16) -> Self {
        if width < compact_below {
            Breakpoint::Compact
        } else if u32::from(width) < u32::from(compact_below) + u32::from(WIDE_MARGIN) {
            Breakpoint::Normal
        } else {
            Breakpoint::Wide
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        self.ordinal() >= min.ordinal()
    }

    /// Grid rows above the threshold, cards below.
    pub fn shows_grid(&self) -> bool {
        self.at_least(Breakpoint::Normal)
    }

    fn ordinal(&self) -> u8 {
        match self {
            Breakpoint::Compact => 0,
            Breakpoint::Normal => 1,
            Breakpoint::Wide => 2,
        }
    }
}
