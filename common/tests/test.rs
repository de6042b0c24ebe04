use common::shapes::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_new_and_getters() {
    let aabb = Aabb::new(0.0, 0.0, 4.0, 6.0);
    assert_eq!(aabb.width(), 4.0);
    assert_eq!(aabb.height(), 6.0);
    assert_eq!(aabb.min_x, 0.0);
    assert_eq!(aabb.max_x, 4.0);
    assert_eq!(aabb.min_y, 0.0);
    assert_eq!(aabb.max_y, 6.0);
}

#[test]
fn test_from_corners_normalizes_order() {
    let aabb = Aabb::from_corners(4.0, 6.0, 0.0, 0.0);
    assert_eq!(aabb, Aabb::new(0.0, 0.0, 4.0, 6.0));
}

#[test]
fn test_circle_aabb() {
    let circle = Circle::new(2.0, 3.0, 1.0);
    assert_eq!(circle.aabb(), Aabb::new(1.0, 2.0, 3.0, 4.0));
}

#[test]
fn test_circle_overlaps() {
    let circle = Circle::new(0.0, 0.0, 1.0);
    assert!(circle.overlaps(&Circle::new(1.5, 0.0, 1.0)));
    // Touching circles count as overlapping.
    assert!(circle.overlaps(&Circle::new(2.0, 0.0, 1.0)));
    assert!(!circle.overlaps(&Circle::new(2.1, 0.0, 1.0)));
}

#[test]
fn test_aabb_overlaps() {
    let aabb = Aabb::new(0.0, 0.0, 4.0, 6.0);
    assert!(aabb.overlaps(&Aabb::new(3.0, 5.0, 8.0, 8.0)));
    assert!(aabb.overlaps(&Aabb::new(4.0, 6.0, 8.0, 8.0)));
    assert!(!aabb.overlaps(&Aabb::new(4.1, 0.0, 8.0, 8.0)));
    assert!(!aabb.overlaps(&Aabb::new(0.0, 6.1, 4.0, 8.0)));
}

#[test]
fn test_contains_point() {
    let aabb = Aabb::new(0.0, 0.0, 4.0, 6.0);
    assert!(aabb.contains_point(2.0, 3.0));
    assert!(aabb.contains_point(0.0, 0.0));
    assert!(!aabb.contains_point(6.0, 3.0));
    assert!(!aabb.contains_point(2.0, 8.0));
}

#[test]
fn test_overlaps_circle() {
    let aabb = Aabb::new(0.0, 0.0, 4.0, 6.0);
    assert!(aabb.overlaps_circle(&Circle::new(2.0, 3.0, 1.0)));
    assert!(aabb.overlaps_circle(&Circle::new(5.0, 3.0, 1.0)));
    assert!(!aabb.overlaps_circle(&Circle::new(5.1, 3.0, 1.0)));
    // Near a corner the diagonal distance decides, not the axis gaps.
    assert!(!aabb.overlaps_circle(&Circle::new(4.8, 6.8, 1.0)));
}

#[test]
fn test_expand_to_include() {
    let mut aabb = Aabb::new(0.0, 0.0, 4.0, 6.0);
    let other = Aabb::new(4.0, 4.0, 8.0, 6.0);
    aabb.expand_to_include(&other);
    assert_eq!(aabb, Aabb::new(0.0, 0.0, 8.0, 6.0));
}

#[test]
fn test_get_random_circle_inside() {
    let aabb = Aabb::new(-1.0, -1.0, 5.0, 7.0);
    let radius = 1.0;

    // Use a fixed seed for reproducibility.
    let mut rng: StdRng = SeedableRng::seed_from_u64(123);

    for _ in 0..10 {
        let circle = aabb.get_random_circle_inside(radius, &mut rng);
        assert_eq!(circle.r, radius);
        assert!(aabb.contains_point(circle.x, circle.y));
        assert!(aabb.overlaps(&circle.aabb()));
    }
}

#[test]
fn test_get_random_circle_inside_small_aabb() {
    let aabb = Aabb::new(1.0, 2.0, 3.0, 4.0);
    let radius = 2.0;

    // Use a fixed seed for reproducibility.
    let mut rng: StdRng = SeedableRng::seed_from_u64(123);

    let circle = aabb.get_random_circle_inside(radius, &mut rng);
    // The generated coordinates should be clamped to the min corner.
    assert_eq!(circle.x, aabb.min_x + radius + 1.0);
    assert_eq!(circle.y, aabb.min_y + radius + 1.0);
}
