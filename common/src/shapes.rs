use rand::Rng;

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub r: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, r: f32) -> Self {
        Self { x, y, r }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn r(&self) -> f32 {
        self.r
    }

    pub fn aabb(&self) -> Aabb {
        Aabb {
            min_x: self.x - self.r,
            min_y: self.y - self.r,
            max_x: self.x + self.r,
            max_y: self.y + self.r,
        }
    }

    #[inline(always)]
    pub fn overlaps(&self, other: &Circle) -> bool {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let reach = self.r + other.r;
        dx * dx + dy * dy <= reach * reach
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Aabb {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Aabb {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Builds a box from two opposite corners given in any order.
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            min_x: f32::min(x1, x2),
            min_y: f32::min(y1, y2),
            max_x: f32::max(x1, x2),
            max_y: f32::max(y1, y2),
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    #[inline(always)]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    #[inline(always)]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    pub fn overlaps_circle(&self, circle: &Circle) -> bool {
        let dx = circle.x - circle.x.clamp(self.min_x, self.max_x);
        let dy = circle.y - circle.y.clamp(self.min_y, self.max_y);
        dx * dx + dy * dy <= circle.r * circle.r
    }

    pub fn expand_to_include(&mut self, other: &Aabb) {
        self.min_x = f32::min(self.min_x, other.min_x);
        self.min_y = f32::min(self.min_y, other.min_y);
        self.max_x = f32::max(self.max_x, other.max_x);
        self.max_y = f32::max(self.max_y, other.max_y);
    }

    pub fn get_random_circle_inside<R: Rng>(&self, r: f32, rng: &mut R) -> Circle {
        // Increase radius by 1 in calculations to add a minimal margin.
        let margin = r + 1.0;
        Circle::new(
            self._safe_randf32(rng, self.min_x + margin, self.max_x - margin),
            self._safe_randf32(rng, self.min_y + margin, self.max_y - margin),
            r,
        )
    }

    fn _safe_randf32<R: Rng>(&self, rng: &mut R, min: f32, max: f32) -> f32 {
        if min > max {
            return min;
        }
        rng.gen_range(min..=max)
    }
}
