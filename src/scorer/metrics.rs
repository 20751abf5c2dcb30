use crate::geometry::KeySlot;

#[inline(always)]
pub fn euclidean_dist(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x1 - x2;
    let dy = y1 - y2;
    (dx * dx + dy * dy).sqrt()
}

/// Straight-line distance between two keystrokes, whichever hand types them.
/// A repeated key has no travel.
#[inline(always)]
pub fn travel_dist(k1: &KeySlot, k2: &KeySlot) -> f64 {
    if k1.id == k2.id {
        return 0.0;
    }
    k1.distance_to(k2)
}
