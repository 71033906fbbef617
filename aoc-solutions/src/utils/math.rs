//! Small integer helpers.

/// Greatest common divisor (always non-negative).
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple; `lcm(0, x) == 0`.
pub fn lcm(a: i64, b: i64) -> i64 {
    if a == 0 || b == 0 {
        return 0;
    }
    (a / gcd(a, b) * b).abs()
}

/// LCM of every value, or 1 for an empty iterator.
pub fn lcm_all<I: IntoIterator<Item = i64>>(values: I) -> i64 {
    values.into_iter().fold(1, lcm)
}

/// Twice the signed area of a closed polygon (shoelace formula).
///
/// The last vertex connects back to the first.
pub fn shoelace2(vertices: &[(i64, i64)]) -> i64 {
    vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(&(x1, y1), &(x2, y2))| x1 * y2 - x2 * y1)
        .sum()
}

/// Interior lattice points of a simple polygon (Pick's theorem),
/// given twice its area and the number of boundary points.
pub fn pick_interior(area2: i64, boundary: i64) -> i64 {
    (area2.abs() - boundary) / 2 + 1
}
