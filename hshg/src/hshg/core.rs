use super::*;

impl Hshg {
    pub fn new(cells_side: u32, cell_size: u32) -> HshgResult<Self> {
        Self::with_config(Config::new(cells_side, cell_size))
    }

    pub fn with_config(config: Config) -> HshgResult<Self> {
        config.validate()?;
        let mut hshg = Hshg {
            entities: Vec::new(),
            layers: SmallVec::new(),
            free_entity: NO_ENTITY,
            alive_count: 0,
            cell_div_log: u32::from(config.cell_div_log.max(1)),
            cell_log: 31 - config.cell_size.trailing_zeros(),
            oom_policy: config.oom_policy,
            oom_hook: None,
            profile: config.profile,
        };
        hshg.reserve_entities(config.entity_capacity.max(1) as usize)?;
        hshg.entities.push(Entity::default());
        let side = config.cells_side as usize;
        let cells = hshg.alloc_cells(side * side)?;
        hshg.layers.push(Grid {
            cells,
            cells_side: config.cells_side,
            cells_mask: config.cells_side - 1,
            cells_log: config.cells_side.trailing_zeros(),
            cell_size: config.cell_size,
            inverse_cell_size: 1.0 / config.cell_size as f32,
        });
        Ok(hshg)
    }

    /// O(1) layer selection from the truncated diameter's bit position.
    /// Uncapped by the actual layer stack; `ensure_layer` clamps.
    #[inline(always)]
    pub(crate) fn layer_for_radius(&self, r: f32) -> u32 {
        // Truncation, not rounding: a diameter just under the cell size
        // still fits the finer layer. The cast saturates huge radii.
        let diameter = (r + r) as u32;
        if diameter < self.layers[0].cell_size {
            return 0;
        }
        (self.cell_log - diameter.leading_zeros()) / self.cell_div_log + 1
    }

    /// Layer index for a radius, creating coarser layers on demand and
    /// clamping into the stack once the 2x2 catch-all exists.
    fn ensure_layer(&mut self, r: f32) -> HshgResult<u32> {
        let layer = self.layer_for_radius(r);
        if layer < self.layers.len() as u32 {
            return Ok(layer);
        }
        while (self.layers.len() as u32) <= layer
            && self.layers[self.layers.len() - 1].cells_side > 2
        {
            self.create_layer()?;
        }
        Ok((self.layers.len() - 1) as u32)
    }

    /// Appends the next coarser layer. The side step is clamped so the
    /// coarsest layer ever created is exactly 2x2; entities too large
    /// even for that are caught by its full-table neighborhood scan.
    fn create_layer(&mut self) -> HshgResult<()> {
        let last = self.layers.len() - 1;
        let shrink = self.cell_div_log.min(self.layers[last].cells_log - 1);
        let side = self.layers[last].cells_side >> shrink;
        let cells = self.alloc_cells((side as usize) * (side as usize))?;
        let grid = self.layers[last].coarser(shrink, cells);
        self.layers.push(grid);
        Ok(())
    }

    /// Inserts a circle, returning its arena index. Layer and cell are
    /// derived from the radius and position.
    pub fn insert(&mut self, value: u32, circle: Circle) -> HshgResult<u32> {
        let layer = self.ensure_layer(circle.r)?;
        let index = self.alloc_entity()?;
        let entity = &mut self.entities[index as usize];
        entity.x = circle.x;
        entity.y = circle.y;
        entity.r = circle.r;
        entity.value = value;
        self.link(index, layer);
        self.alive_count += 1;
        Ok(index)
    }

    /// Removes a live entity and recycles its slot.
    pub fn remove(&mut self, index: u32) {
        debug_assert!(index != NO_ENTITY, "slot 0 is reserved");
        debug_assert!(
            self.entities[index as usize].cell != FREE_CELL,
            "stale entity index"
        );
        self.unlink(index);
        self.release_entity(index);
        self.alive_count -= 1;
    }

    /// Re-derives the cell from the current position within the current
    /// layer. Same cell is a no-op, so per-tick calls are cheap for
    /// entities wandering inside one cell.
    pub fn move_entity(&mut self, index: u32) {
        debug_assert!(index != NO_ENTITY, "slot 0 is reserved");
        let entity = self.entities[index as usize];
        debug_assert!(entity.cell != FREE_CELL, "stale entity index");
        let layer = entity.layer as u32;
        let cell = self.layers[layer as usize].cell_at(entity.x, entity.y);
        if cell != entity.cell {
            self.unlink(index);
            self.link_at(index, layer, cell);
        }
    }

    /// Re-derives the layer from the current radius, relocating the
    /// entity when it changed. The arena index is preserved. Layer
    /// creation happens before any unlinking, so a failed allocation
    /// leaves the entity exactly where it was.
    pub fn resize(&mut self, index: u32) -> HshgResult<()> {
        debug_assert!(index != NO_ENTITY, "slot 0 is reserved");
        debug_assert!(
            self.entities[index as usize].cell != FREE_CELL,
            "stale entity index"
        );
        let layer = self.ensure_layer(self.entities[index as usize].r)?;
        if layer != self.entities[index as usize].layer as u32 {
            self.unlink(index);
            self.link(index, layer);
        }
        Ok(())
    }

    /// Head-push onto the cell list derived from the entity's position.
    fn link(&mut self, index: u32, layer: u32) {
        let entity = &self.entities[index as usize];
        let cell = self.layers[layer as usize].cell_at(entity.x, entity.y);
        self.link_at(index, layer, cell);
    }

    fn link_at(&mut self, index: u32, layer: u32, cell: u32) {
        let head = self.layers[layer as usize].cells[cell as usize];
        let entity = &mut self.entities[index as usize];
        entity.layer = layer as u8;
        entity.cell = cell;
        entity.prev = NO_ENTITY;
        entity.next = head;
        if head != NO_ENTITY {
            self.entities[head as usize].prev = index;
        }
        self.layers[layer as usize].cells[cell as usize] = index;
    }

    /// Detaches the entity from its cell list; the slot itself is left
    /// untouched.
    fn unlink(&mut self, index: u32) {
        let Entity {
            cell,
            next,
            prev,
            layer,
            ..
        } = self.entities[index as usize];
        if prev == NO_ENTITY {
            self.layers[layer as usize].cells[cell as usize] = next;
        } else {
            self.entities[prev as usize].next = next;
        }
        if next != NO_ENTITY {
            self.entities[next as usize].prev = prev;
        }
    }
}
