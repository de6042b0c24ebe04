/// One layer of the hierarchy: a square table of cell-head entity indices
/// addressed by a folded 2D cell coordinate.
///
/// Folding maps the infinite plane onto the finite table by reflecting at
/// every table edge instead of wrapping, so world neighbors stay table
/// neighbors and a 3x3 table window always covers the true 3x3 world
/// neighborhood of a cell. Taking |x| first makes the fold symmetric
/// about the origin.
pub(crate) struct Grid {
    pub(crate) cells: Vec<u32>,
    pub(crate) cells_side: u32,
    pub(crate) cells_mask: u32,
    pub(crate) cells_log: u32,
    pub(crate) cell_size: u32,
    pub(crate) inverse_cell_size: f32,
}

impl Grid {
    pub(crate) fn cell_count(&self) -> usize {
        (self.cells_side as usize) * (self.cells_side as usize)
    }

    /// Fold one coordinate into [0, cells_side). The truncated cell
    /// ordinal ping-pongs across the table: ordinals with the side bit
    /// clear map through the mask directly, ordinals with it set map
    /// mirrored.
    #[inline(always)]
    pub(crate) fn cell_1d(&self, x: f32) -> u32 {
        // Saturating cast: huge coordinates and NaN still land in range.
        let cell = (x.abs() * self.inverse_cell_size) as u32;
        if cell & self.cells_side != 0 {
            self.cells_mask - (cell & self.cells_mask)
        } else {
            cell & self.cells_mask
        }
    }

    #[inline(always)]
    pub(crate) fn cell_at(&self, x: f32, y: f32) -> u32 {
        self.cell_1d(x) | (self.cell_1d(y) << self.cells_log)
    }

    /// Derive the next coarser layer. `shrink` is the log2 side step; the
    /// caller clamps it so the new side never drops below 2.
    pub(crate) fn coarser(&self, shrink: u32, cells: Vec<u32>) -> Grid {
        Grid {
            cells,
            cells_side: self.cells_side >> shrink,
            cells_mask: (self.cells_side >> shrink) - 1,
            cells_log: self.cells_log - shrink,
            cell_size: self.cell_size.saturating_mul(1 << shrink),
            inverse_cell_size: self.inverse_cell_size / (1u32 << shrink) as f32,
        }
    }

    /// Signed tile ordinal of a coordinate. A tile is an unfolded cell
    /// along one axis; negative tiles mirror to non-negative ones.
    #[inline(always)]
    fn tile(&self, v: f32) -> i64 {
        (v * self.inverse_cell_size).floor() as i64
    }

    /// Folded cell range covering [lo, hi] plus one tile of slack on each
    /// side. The slack absorbs entity radii up to half a cell and the
    /// trunc-versus-floor difference on the negative half-plane. The fold
    /// moves by at most one cell per tile, so the covered cells always
    /// form the contiguous range returned here.
    pub(crate) fn fold_span(&self, lo: f32, hi: f32) -> (u32, u32) {
        let lo_t = self.tile(lo).saturating_sub(1);
        let hi_t = self.tile(hi).saturating_add(1);
        if lo_t >= 0 {
            self.wave_span(lo_t as u64, hi_t as u64)
        } else if hi_t < 0 {
            // Entirely negative: tile t mirrors to ordinal -t - 1.
            self.wave_span((-(hi_t + 1)) as u64, (-(lo_t + 1)) as u64)
        } else {
            // Straddles the origin. Both halves include ordinal 0, so
            // their folded ranges overlap and the union stays contiguous.
            let (neg_min, neg_max) = self.wave_span(0, (-(lo_t + 1)) as u64);
            let (pos_min, pos_max) = self.wave_span(0, hi_t as u64);
            (neg_min.min(pos_min), neg_max.max(pos_max))
        }
    }

    /// Min and max of the fold over the ordinal interval [a, b], a <= b.
    /// The fold is periodic in 2 * cells_side: it climbs 0..cells_mask,
    /// plateaus at cells_mask for two ordinals, descends back and
    /// plateaus at 0 across the period boundary.
    fn wave_span(&self, a: u64, b: u64) -> (u32, u32) {
        let period = (self.cells_side as u64) << 1;
        if b - a >= period - 1 {
            return (0, self.cells_mask);
        }
        let pa = a % period;
        let pb = pa + (b - a);
        let at_a = self.wave(pa);
        let at_b = self.wave(pb);
        let (mut min, mut max) = if at_a <= at_b {
            (at_a, at_b)
        } else {
            (at_b, at_a)
        };
        // Endpoints alone miss interior extremes; crossing a plateau
        // phase pins the corresponding bound.
        if Self::phase_in(pa, pb, period, 0) || Self::phase_in(pa, pb, period, period - 1) {
            min = 0;
        }
        let side = self.cells_side as u64;
        if Self::phase_in(pa, pb, period, side - 1) || Self::phase_in(pa, pb, period, side) {
            max = self.cells_mask;
        }
        (min, max)
    }

    #[inline(always)]
    fn wave(&self, phase: u64) -> u32 {
        let cell = (phase % ((self.cells_side as u64) << 1)) as u32;
        if cell & self.cells_side != 0 {
            self.cells_mask - (cell & self.cells_mask)
        } else {
            cell & self.cells_mask
        }
    }

    /// Whether [pa, pb] contains a phase congruent to `target`, given
    /// pa < period and target < period.
    #[inline(always)]
    fn phase_in(pa: u64, pb: u64, period: u64, target: u64) -> bool {
        let first = if target >= pa { target } else { target + period };
        first <= pb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(cells_side: u32, cell_size: u32) -> Grid {
        Grid {
            cells: Vec::new(),
            cells_side,
            cells_mask: cells_side - 1,
            cells_log: cells_side.trailing_zeros(),
            cell_size,
            inverse_cell_size: 1.0 / cell_size as f32,
        }
    }

    #[test]
    fn test_cell_folding_direct_and_mirror() {
        let g = grid(4, 1);
        // First pass across the table maps directly.
        assert_eq!(g.cell_1d(0.5), 0);
        assert_eq!(g.cell_1d(1.5), 1);
        assert_eq!(g.cell_1d(3.5), 3);
        // Second pass reflects.
        assert_eq!(g.cell_1d(4.5), 3);
        assert_eq!(g.cell_1d(5.5), 2);
        assert_eq!(g.cell_1d(7.5), 0);
        // Third pass maps directly again.
        assert_eq!(g.cell_1d(8.5), 0);
        assert_eq!(g.cell_1d(9.5), 1);
    }

    #[test]
    fn test_cell_folding_symmetry_and_period() {
        let g = grid(8, 2);
        let period = (2 * 8 * 2) as f32;
        for i in 0..64 {
            let x = i as f32 * 0.73 + 0.11;
            assert_eq!(g.cell_1d(x), g.cell_1d(-x));
            assert_eq!(g.cell_1d(x), g.cell_1d(x + period));
        }
    }

    #[test]
    fn test_cell_folding_saturates_extremes() {
        let g = grid(4, 1);
        let huge = g.cell_1d(f32::MAX);
        assert!(huge <= g.cells_mask);
        assert!(g.cell_1d(f32::NAN) <= g.cells_mask);
        assert!(g.cell_1d(f32::NEG_INFINITY) <= g.cells_mask);
    }

    #[test]
    fn test_cell_at_combines_axes() {
        let g = grid(2, 4);
        assert_eq!(g.cell_at(1.0, 1.0), 0);
        assert_eq!(g.cell_at(4.0, 1.0), 1);
        assert_eq!(g.cell_at(1.0, 4.0), 2);
        assert_eq!(g.cell_at(4.0, 4.0), 3);
    }

    #[test]
    fn test_coarser_halves_side_and_doubles_cell() {
        let g = grid(8, 2);
        let up = g.coarser(1, Vec::new());
        assert_eq!(up.cells_side, 4);
        assert_eq!(up.cells_mask, 3);
        assert_eq!(up.cells_log, 2);
        assert_eq!(up.cell_size, 4);
        assert_eq!(up.inverse_cell_size, 0.25);
    }

    fn fold_signed_tile(g: &Grid, t: i64) -> u32 {
        if t >= 0 {
            g.wave(t as u64)
        } else {
            g.wave((-t - 1) as u64)
        }
    }

    #[test]
    fn test_fold_span_matches_tile_enumeration() {
        for side in [2, 4, 8] {
            let g = grid(side, 1);
            for lo_i in -24..24i64 {
                for len in 0..14i64 {
                    // Offset keeps endpoints off tile boundaries.
                    let lo = lo_i as f32 + 0.25;
                    let hi = (lo_i + len) as f32 + 0.25;
                    let (min, max) = g.fold_span(lo, hi);
                    let mut expect_min = u32::MAX;
                    let mut expect_max = 0;
                    for t in (lo_i - 1)..=(lo_i + len + 1) {
                        let folded = fold_signed_tile(&g, t);
                        expect_min = expect_min.min(folded);
                        expect_max = expect_max.max(folded);
                    }
                    assert_eq!(
                        (min, max),
                        (expect_min, expect_max),
                        "side {} interval [{}, {}]",
                        side,
                        lo,
                        hi
                    );
                }
            }
        }
    }

    #[test]
    fn test_fold_span_saturates_to_full_table() {
        let g = grid(4, 1);
        assert_eq!(g.fold_span(0.5, 100.0), (0, 3));
        assert_eq!(g.fold_span(-1000.0, 1000.0), (0, 3));
        let catch_all = grid(2, 4);
        assert_eq!(catch_all.fold_span(-1e30, 1e30), (0, 1));
    }
}
