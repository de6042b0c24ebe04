use crate::error::{HshgError, HshgResult};

/// How arena and cell-table growth reacts when the allocator refuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OomPolicy {
    /// Surface the failure as `HshgError::AllocationFailed`.
    Propagate,
    /// Abort the process.
    Abort,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Cells per side of the finest layer. Must be a power of two.
    pub cells_side: u32,
    /// Edge length of a finest-layer cell, in world units. Must be
    /// non-zero; powers of two give exact layer selection, other values
    /// select conservatively coarse layers.
    pub cell_size: u32,
    /// Log2 of the side shrink factor between adjacent layers. 0 is
    /// treated as 1.
    pub cell_div_log: u8,
    /// Entity slots allocated up front, including the reserved sentinel.
    pub entity_capacity: u32,
    pub oom_policy: OomPolicy,
    /// Print defragmentation timings to stderr.
    pub profile: bool,
}

impl Config {
    pub fn new(cells_side: u32, cell_size: u32) -> Self {
        Config {
            cells_side,
            cell_size,
            ..Default::default()
        }
    }

    pub(crate) fn validate(&self) -> HshgResult<()> {
        if !self.cells_side.is_power_of_two() {
            return Err(HshgError::InvalidCellsSide {
                cells_side: self.cells_side,
            });
        }
        if self.cell_size == 0 {
            return Err(HshgError::InvalidCellSize {
                cell_size: self.cell_size,
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cells_side: 256,
            cell_size: 16,
            cell_div_log: 1,
            entity_capacity: 1,
            oom_policy: OomPolicy::Propagate,
            profile: false,
        }
    }
}
