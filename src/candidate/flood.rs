//! Flood suppression of a response blob.

use crate::surface::ResponseSurface;

/// Zeroes the 4-connected region around `(seed_x, seed_y)` whose scores lie
/// in `[low, high]`, returning the number of cleared cells.
///
/// The range is fixed relative to the seed peak rather than to each visited
/// neighbour, so a slowly sloping ridge stops at `low` instead of creeping
/// into an adjacent instance.
pub(crate) fn flood_suppress(
    surface: &mut ResponseSurface,
    seed_x: usize,
    seed_y: usize,
    low: f32,
    high: f32,
) -> usize {
    let width = surface.width();
    let height = surface.height();
    let in_range = |v: f32| v >= low && v <= high;

    let mut visited = vec![false; width * height];
    let mut stack = vec![(seed_x, seed_y)];
    let mut cleared = 0usize;

    while let Some((x, y)) = stack.pop() {
        let idx = y * width + x;
        if visited[idx] {
            continue;
        }
        visited[idx] = true;
        match surface.get(x, y) {
            Some(v) if in_range(v) => {}
            _ => continue,
        }

        surface.set(x, y, 0.0);
        cleared += 1;

        if x > 0 {
            stack.push((x - 1, y));
        }
        if x + 1 < width {
            stack.push((x + 1, y));
        }
        if y > 0 {
            stack.push((x, y - 1));
        }
        if y + 1 < height {
            stack.push((x, y + 1));
        }
    }

    cleared
}
