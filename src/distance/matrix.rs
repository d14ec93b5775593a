//! Dense distance matrix.

/// A dense n×n distance matrix stored in row-major order.
///
/// Entries are shortest-path distances; `f64::INFINITY` marks an
/// unreachable pair. Asymmetric matrices (directed graphs) are supported.
///
/// # Examples
///
/// ```
/// use tour_routing::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).unwrap();
/// assert_eq!(dm.get(0, 1), 5.0);
/// assert_eq!(dm.size(), 2);
/// assert!(dm.is_symmetric(1e-10));
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a matrix of the given size with all entries infinite.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![f64::INFINITY; size * size],
            size,
        }
    }

    /// Creates a matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given
    /// tolerance. Pairs that are infinite in both directions count as
    /// equal.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let (a, b) = (self.get(i, j), self.get(j, i));
                if a.is_infinite() && b.is_infinite() {
                    continue;
                }
                if (a - b).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the nearest of `candidates` from `from` and its distance,
    /// taking the lowest index on ties. The winner may be at infinite
    /// distance; the caller decides whether that is fatal.
    ///
    /// Returns `None` if `candidates` yields nothing.
    pub fn nearest(
        &self,
        from: usize,
        candidates: impl IntoIterator<Item = usize>,
    ) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for candidate in candidates {
            let d = self.get(from, candidate);
            let better = match best {
                None => true,
                Some((best_idx, best_d)) => {
                    d < best_d || (d == best_d && candidate < best_idx)
                }
            };
            if better {
                best = Some((candidate, d));
            }
        }
        best
    }
}
