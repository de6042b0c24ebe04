use super::*;

impl Hshg {
    /// Invokes `on_pair` for every candidate pair of entities close
    /// enough to possibly overlap. Every pair whose bounding circles
    /// truly overlap is reported, each unordered pair at most once; the
    /// callback owns the exact narrow-phase test.
    ///
    /// Within a cell only successors are paired, and within a layer only
    /// the left/bottom half of the 8-neighborhood is scanned; the other
    /// half is covered when those neighbors run their own scans. Coarser
    /// layers are scanned with a full 3x3 window around the entity's
    /// folded footprint, which never wraps thanks to the reflective fold.
    pub fn for_each_collision_pair<F>(&self, mut on_pair: F)
    where
        F: FnMut(&Entity, &Entity),
    {
        for index in 1..self.entities.len() {
            let entity = &self.entities[index];
            let cell = entity.cell;
            if cell == FREE_CELL {
                continue;
            }
            let layer = &self.layers[entity.layer as usize];

            // Rest of the entity's own cell, forward only.
            let mut other_index = entity.next;
            while other_index != NO_ENTITY {
                let other = &self.entities[other_index as usize];
                on_pair(entity, other);
                other_index = other.next;
            }

            let mut cell_x = cell & layer.cells_mask;
            let mut cell_y = cell >> layer.cells_log;

            if cell_x != 0 {
                self.scan_cell(entity, layer.cells[(cell - 1) as usize], &mut on_pair);
                if cell_y != 0 {
                    self.scan_cell(
                        entity,
                        layer.cells[(cell - layer.cells_side - 1) as usize],
                        &mut on_pair,
                    );
                }
            }
            if cell_y != 0 {
                self.scan_cell(
                    entity,
                    layer.cells[(cell - layer.cells_side) as usize],
                    &mut on_pair,
                );
                if cell_x != layer.cells_mask {
                    self.scan_cell(
                        entity,
                        layer.cells[(cell - layer.cells_side + 1) as usize],
                        &mut on_pair,
                    );
                }
            }

            // Larger entities live on coarser layers and never scan
            // downward, so the upward 3x3 window is what pairs small
            // with large.
            let mut finer_log = layer.cells_log;
            for up in (entity.layer as usize + 1)..self.layers.len() {
                let up_layer = &self.layers[up];
                let shift = finer_log - up_layer.cells_log;
                finer_log = up_layer.cells_log;
                cell_x >>= shift;
                cell_y >>= shift;
                let min_x = cell_x.saturating_sub(1);
                let min_y = cell_y.saturating_sub(1);
                let max_x = if cell_x == up_layer.cells_mask {
                    cell_x
                } else {
                    cell_x + 1
                };
                let max_y = if cell_y == up_layer.cells_mask {
                    cell_y
                } else {
                    cell_y + 1
                };
                for cur_y in min_y..=max_y {
                    for cur_x in min_x..=max_x {
                        self.scan_cell(
                            entity,
                            up_layer.cells[(cur_x | (cur_y << up_layer.cells_log)) as usize],
                            &mut on_pair,
                        );
                    }
                }
            }
        }
    }

    #[inline(always)]
    fn scan_cell<F>(&self, entity: &Entity, head: u32, on_pair: &mut F)
    where
        F: FnMut(&Entity, &Entity),
    {
        let mut other_index = head;
        while other_index != NO_ENTITY {
            let other = &self.entities[other_index as usize];
            on_pair(entity, other);
            other_index = other.next;
        }
    }
}
