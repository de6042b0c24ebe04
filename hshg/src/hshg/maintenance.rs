use super::*;
use std::time::Instant;

impl Hshg {
    /// Rebuilds the arena in layer, cell, then list order so every cell's
    /// members sit contiguously in memory, compacting out free-listed
    /// holes. Arena indices are renumbered; membership, geometry and
    /// relative list order are preserved, and `Entity::value` carries
    /// identity across the move.
    ///
    /// The replacement arena is allocated up front, so on failure the
    /// grid is left fully intact.
    pub fn defragment(&mut self) -> HshgResult<()> {
        let start = if self.profile {
            Some(Instant::now())
        } else {
            None
        };

        let capacity = self.entities.capacity();
        let mut fresh: Vec<Entity> = Vec::new();
        while fresh.try_reserve_exact(capacity).is_err() {
            let bytes = capacity.saturating_mul(std::mem::size_of::<Entity>());
            if !self.consult_oom_hook(bytes) {
                return Err(self.out_of_memory(bytes));
            }
        }
        fresh.push(Entity::default());

        for layer in self.layers.iter_mut() {
            for head in layer.cells.iter_mut() {
                let mut index = *head;
                if index == NO_ENTITY {
                    continue;
                }
                *head = fresh.len() as u32;
                let mut prev = NO_ENTITY;
                while index != NO_ENTITY {
                    let new_index = fresh.len() as u32;
                    let mut entity = self.entities[index as usize];
                    index = entity.next;
                    entity.prev = prev;
                    entity.next = if index != NO_ENTITY {
                        new_index + 1
                    } else {
                        NO_ENTITY
                    };
                    fresh.push(entity);
                    prev = new_index;
                }
            }
        }

        self.entities = fresh;
        self.free_entity = NO_ENTITY;

        if let Some(start) = start {
            eprintln!(
                "defragment: {} live in {} slots: {:.3}ms",
                self.alive_count,
                self.entities.len(),
                start.elapsed().as_secs_f64() * 1000.0
            );
        }
        Ok(())
    }
}
