use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HshgError {
    InvalidCellsSide { cells_side: u32 },
    InvalidCellSize { cell_size: u32 },
    AllocationFailed { bytes: usize },
}

pub type HshgResult<T> = Result<T, HshgError>;

impl fmt::Display for HshgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HshgError::InvalidCellsSide { cells_side } => {
                write!(
                    f,
                    "cell count per side must be a power of two (cells_side: {})",
                    cells_side
                )
            }
            HshgError::InvalidCellSize { cell_size } => {
                write!(
                    f,
                    "cell size must be greater than zero (cell_size: {})",
                    cell_size
                )
            }
            HshgError::AllocationFailed { bytes } => {
                write!(f, "failed to allocate {} bytes for grid growth", bytes)
            }
        }
    }
}

impl std::error::Error for HshgError {}
