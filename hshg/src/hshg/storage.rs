use super::*;

impl Hshg {
    /// Pops the free list or grows the arena; never returns slot 0.
    pub(crate) fn alloc_entity(&mut self) -> HshgResult<u32> {
        if self.free_entity != NO_ENTITY {
            let index = self.free_entity;
            self.free_entity = self.entities[index as usize].next;
            return Ok(index);
        }
        if self.entities.len() == self.entities.capacity() {
            // Doubling growth keeps insert amortized O(1).
            let additional = self.entities.capacity().max(1);
            self.reserve_entities(additional)?;
        }
        self.entities.push(Entity::default());
        Ok((self.entities.len() - 1) as u32)
    }

    /// Returns a slot to the LIFO free list. The caller must already have
    /// unlinked the entity from its cell.
    pub(crate) fn release_entity(&mut self, index: u32) {
        let entity = &mut self.entities[index as usize];
        entity.cell = FREE_CELL;
        entity.next = self.free_entity;
        self.free_entity = index;
    }

    /// Growth chokepoint for the entity arena. On allocator failure the
    /// reclamation hook gets a chance to free memory and request a retry;
    /// otherwise the configured policy applies.
    pub(crate) fn reserve_entities(&mut self, additional: usize) -> HshgResult<()> {
        while self.entities.try_reserve_exact(additional).is_err() {
            let bytes = additional.saturating_mul(std::mem::size_of::<Entity>());
            if !self.consult_oom_hook(bytes) {
                return Err(self.out_of_memory(bytes));
            }
        }
        Ok(())
    }

    /// Allocates a zero-filled cell table, with the same failure handling
    /// as entity growth.
    pub(crate) fn alloc_cells(&mut self, len: usize) -> HshgResult<Vec<u32>> {
        let mut cells = Vec::new();
        while cells.try_reserve_exact(len).is_err() {
            let bytes = len.saturating_mul(std::mem::size_of::<u32>());
            if !self.consult_oom_hook(bytes) {
                return Err(self.out_of_memory(bytes));
            }
        }
        cells.resize(len, NO_ENTITY);
        Ok(cells)
    }

    pub(crate) fn consult_oom_hook(&mut self, bytes: usize) -> bool {
        match self.oom_hook.as_mut() {
            Some(hook) => hook(bytes),
            None => false,
        }
    }

    pub(crate) fn out_of_memory(&self, bytes: usize) -> HshgError {
        match self.oom_policy {
            OomPolicy::Abort => std::process::abort(),
            OomPolicy::Propagate => HshgError::AllocationFailed { bytes },
        }
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.alive_count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.alive_count == 0
    }

    /// Arena slots currently allocated, counting the sentinel and any
    /// free-listed holes.
    pub fn capacity(&self) -> usize {
        self.entities.capacity()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Borrow a live entity record.
    pub fn get(&self, index: u32) -> &Entity {
        let entity = &self.entities[index as usize];
        debug_assert!(
            index != NO_ENTITY && entity.cell != FREE_CELL,
            "stale entity index"
        );
        entity
    }

    /// Mutable access to a live entity. After changing the position call
    /// `move_entity`; after changing the radius call `resize`.
    pub fn get_mut(&mut self, index: u32) -> &mut Entity {
        let entity = &mut self.entities[index as usize];
        debug_assert!(
            index != NO_ENTITY && entity.cell != FREE_CELL,
            "stale entity index"
        );
        entity
    }

    /// Live entities in arena order with their current indices. Indices
    /// are renumbered by defragmentation; `Entity::value` is the stable
    /// handle across it.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Entity)> + '_ {
        self.entities
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, entity)| entity.cell != FREE_CELL)
            .map(|(index, entity)| (index as u32, entity))
    }

    /// Linear scan for the entity carrying `value`.
    pub fn index_of_value(&self, value: u32) -> Option<u32> {
        self.iter()
            .find(|(_, entity)| entity.value == value)
            .map(|(index, _)| index)
    }

    /// Installs a reclamation hook consulted on allocation failure.
    /// Returning `true` retries the allocation after the hook freed
    /// memory elsewhere; `false` falls through to the configured policy.
    pub fn set_oom_hook(&mut self, hook: Box<dyn FnMut(usize) -> bool>) {
        self.oom_hook = Some(hook);
    }

    pub fn clear_oom_hook(&mut self) {
        self.oom_hook = None;
    }
}
