//! Traveling Salesman tour length.

/// City coordinates in the plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Cities {
    points: Vec<[f64; 2]>,
}

impl Cities {
    /// Wraps a list of `[x, y]` coordinates; city `i` is `points[i]`.
    pub fn new(points: Vec<[f64; 2]>) -> Self {
        Self { points }
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether there are no cities.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Euclidean distance between two cities.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        let [x1, y1] = self.points[from];
        let [x2, y2] = self.points[to];
        (x2 - x1).hypot(y2 - y1)
    }

    /// Length of the closed tour visiting `tour` in order and returning to
    /// its first city.
    ///
    /// # Panics
    /// Panics if `tour` names a city index `>= self.len()`.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        let n = tour.len();
        (0..n)
            .map(|i| self.distance(tour[i], tour[(i + 1) % n]))
            .sum()
    }
}
