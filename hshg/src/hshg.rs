mod collision_pairs;
mod config;
mod core;
mod grid;
mod maintenance;
mod query_rect;
mod storage;
mod types;
mod update_entities;

pub use config::{Config, OomPolicy};
pub use types::Entity;

use crate::error::{HshgError, HshgResult};
use common::shapes::{Aabb, Circle};
use grid::Grid;
use smallvec::SmallVec;
use types::{FREE_CELL, LAYER_STACK_INLINE, NO_ENTITY};

/// Hierarchical spatial hash grid over circle entities.
///
/// Layer 0 is the finest grid; each coarser layer shrinks the cell count
/// per side and grows the cell edge so that an entity's diameter never
/// exceeds the cell size of its layer. Cell membership is intrusive:
/// entities chain through `next`/`prev` indices into a single arena, and
/// arena slot 0 is a reserved sentinel that terminates every chain.
pub struct Hshg {
    pub(crate) entities: Vec<Entity>,
    pub(crate) layers: SmallVec<[Grid; LAYER_STACK_INLINE]>,
    pub(crate) free_entity: u32,
    pub(crate) alive_count: u32,
    pub(crate) cell_div_log: u32,
    pub(crate) cell_log: u32,
    pub(crate) oom_policy: OomPolicy,
    pub(crate) oom_hook: Option<Box<dyn FnMut(usize) -> bool>>,
    pub(crate) profile: bool,
}

// Manual impl: `oom_hook` holds a closure, so `Debug` cannot be derived.
impl std::fmt::Debug for Hshg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hshg")
            .field("alive_count", &self.alive_count)
            .field("layer_count", &self.layers.len())
            .finish_non_exhaustive()
    }
}
