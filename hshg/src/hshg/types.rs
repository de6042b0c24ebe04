use common::shapes::{Aabb, Circle};

/// Chain terminator for cell lists and the free list; arena slot 0 is
/// reserved so 0 can never be a live entity index.
pub(crate) const NO_ENTITY: u32 = 0;
/// Cell marker for recycled arena slots; live entities always hold a real
/// cell index.
pub(crate) const FREE_CELL: u32 = u32::MAX;
/// Layers kept inline before the stack spills; a 65536-cell side produces
/// sixteen layers, the practical maximum.
pub(crate) const LAYER_STACK_INLINE: usize = 16;

/// One arena slot: entity geometry plus intrusive list links.
#[derive(Clone, Copy, Debug)]
pub struct Entity {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    /// Opaque caller reference carried alongside the entity. Arena indices
    /// are renumbered by defragmentation; this value is the stable handle.
    pub value: u32,
    pub(crate) cell: u32,
    pub(crate) next: u32,
    pub(crate) prev: u32,
    pub(crate) layer: u8,
}

impl Entity {
    /// Layer currently holding the entity; 0 is the finest.
    #[inline(always)]
    pub fn layer(&self) -> usize {
        self.layer as usize
    }

    #[inline(always)]
    pub fn circle(&self) -> Circle {
        Circle::new(self.x, self.y, self.r)
    }

    #[inline(always)]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(
            self.x - self.r,
            self.y - self.r,
            self.x + self.r,
            self.y + self.r,
        )
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            r: 0.0,
            value: 0,
            cell: FREE_CELL,
            next: NO_ENTITY,
            prev: NO_ENTITY,
            layer: 0,
        }
    }
}
