use super::*;

impl Hshg {
    /// Invokes `on_entity` for every live entity whose bounding box
    /// intersects the rectangle, each exactly once. Corner order does
    /// not matter.
    ///
    /// Every layer folds the rectangle into one contiguous cell range
    /// per axis (widened a cell on each side for entity radii), walks
    /// those cells and filters by exact bounding box, so mirrored far
    /// cells sharing a table slot cost a scan but never a false report.
    pub fn for_each_in_rect<F>(&self, x1: f32, y1: f32, x2: f32, y2: f32, mut on_entity: F)
    where
        F: FnMut(&Entity),
    {
        let query = Aabb::from_corners(x1, y1, x2, y2);
        for layer in self.layers.iter() {
            let (min_x, max_x) = layer.fold_span(query.min_x, query.max_x);
            let (min_y, max_y) = layer.fold_span(query.min_y, query.max_y);
            for cur_y in min_y..=max_y {
                for cur_x in min_x..=max_x {
                    let mut index = layer.cells[(cur_x | (cur_y << layer.cells_log)) as usize];
                    while index != NO_ENTITY {
                        let entity = &self.entities[index as usize];
                        if query.overlaps(&entity.aabb()) {
                            on_entity(entity);
                        }
                        index = entity.next;
                    }
                }
            }
        }
    }
}
