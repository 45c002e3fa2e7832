//! Logarithmically spaced step-size grids.

/// Geometric grid `10^e` for `points` evenly spaced exponents in
/// `[start_exp, end_exp]` (inclusive on both ends).
pub fn log_grid(start_exp: f64, end_exp: f64, points: usize) -> Vec<f64> {
    if points <= 1 {
        return vec![10f64.powf(start_exp)];
    }

    let step = (end_exp - start_exp) / (points as f64 - 1.0);
    (0..points)
        .map(|i| 10f64.powf(start_exp + i as f64 * step))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_shape() {
        let grid = log_grid(-16.0, -4.0, 24);
        assert_eq!(grid.len(), 24);
        // Endpoints are exact up to float rounding of powf.
        assert!((grid[0] / 1e-16 - 1.0).abs() < 1e-12);
        assert!((grid[23] / 1e-4 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn grid_is_strictly_increasing() {
        let grid = log_grid(-16.0, -4.0, 24);
        for pair in grid.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn single_point_grid() {
        let grid = log_grid(-8.0, -4.0, 1);
        assert_eq!(grid.len(), 1);
        assert!((grid[0] / 1e-8 - 1.0).abs() < 1e-12);
    }
}
