use super::*;

impl Hshg {
    /// Per-tick driver: walks live entities in arena order and hands each
    /// one to the hook for mutation. A `true` return re-derives the
    /// entity's layer and cell from the (possibly changed) radius and
    /// position; `false` promises the geometry is untouched and skips the
    /// re-derivation.
    ///
    /// Relocation mid-walk cannot cause revisits: arena order is
    /// independent of cell structure, so each live entity is handed to
    /// the hook exactly once per call.
    pub fn update<F>(&mut self, mut on_update: F) -> HshgResult<()>
    where
        F: FnMut(u32, &mut Entity) -> bool,
    {
        for index in 1..self.entities.len() as u32 {
            if self.entities[index as usize].cell == FREE_CELL {
                continue;
            }
            if !on_update(index, &mut self.entities[index as usize]) {
                continue;
            }
            self.resize(index)?;
            self.move_entity(index);
        }
        Ok(())
    }
}
