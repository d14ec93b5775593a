//! Stop-subset distance matrix built from per-stop shortest-path runs.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::distance::DistanceMatrix;
use crate::error::{Result, RoutingError};
use crate::models::Graph;
use crate::shortest_path::shortest_paths;

/// A pairwise shortest-path distance matrix over a subset of stops,
/// together with the id↔index mapping and the realizing paths.
///
/// The diagonal is zero; unreachable pairs are `f64::INFINITY` (deciding
/// whether that is fatal is the solvers' job). Paths are recorded for
/// every finite off-diagonal pair as full node sequences through the
/// underlying graph, for consumers that render or replay tours.
///
/// Built fresh per invocation; nothing is cached across calls.
///
/// # Examples
///
/// ```
/// use tour_routing::distance::StopMatrix;
/// use tour_routing::models::Graph;
///
/// let mut graph = Graph::undirected();
/// graph.add_node("a", 0.0, 0.0).unwrap();
/// graph.add_node("b", 0.0, 1.0).unwrap();
/// graph.add_node("c", 0.0, 2.0).unwrap();
/// graph.add_edge("a", "b", 1.0).unwrap();
/// graph.add_edge("b", "c", 1.0).unwrap();
///
/// let matrix = StopMatrix::build(&graph, &["a", "c"]).unwrap();
/// assert_eq!(matrix.distance(0, 1), 2.0);
/// assert_eq!(
///     matrix.path(0, 1).unwrap(),
///     &["a".to_string(), "b".to_string(), "c".to_string()]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct StopMatrix {
    stops: Vec<String>,
    index: HashMap<String, usize>,
    matrix: DistanceMatrix,
    paths: HashMap<(usize, usize), Vec<String>>,
}

impl StopMatrix {
    /// Builds the matrix by running Dijkstra once per stop, with the stop
    /// set as the stopping set.
    ///
    /// The stop list is validated up front, before any shortest-path run:
    /// fails with [`RoutingError::DuplicateStop`] on a repeated id and
    /// [`RoutingError::StopNotFound`] on an id absent from the graph.
    pub fn build<S: AsRef<str>>(graph: &Graph, stops: &[S]) -> Result<Self> {
        let (stops, index) = validate_stops(graph, stops)?;
        let n = stops.len();
        debug!("building {n}x{n} stop matrix");

        let targets: HashSet<String> = stops.iter().cloned().collect();
        let mut matrix = DistanceMatrix::new(n);
        let mut paths = HashMap::new();

        for (i, source) in stops.iter().enumerate() {
            let (row, row_paths) = source_row(graph, source, &stops, &targets)?;
            for (j, distance) in row.into_iter().enumerate() {
                matrix.set(i, j, distance);
            }
            for (j, path) in row_paths {
                paths.insert((i, j), path);
            }
        }

        Ok(Self {
            stops,
            index,
            matrix,
            paths,
        })
    }

    /// Same as [`build`](Self::build), with the per-stop shortest-path
    /// runs spread over the rayon pool. Output is identical to the
    /// sequential build.
    #[cfg(feature = "parallel")]
    pub fn build_parallel<S: AsRef<str> + Sync>(graph: &Graph, stops: &[S]) -> Result<Self> {
        use rayon::prelude::*;

        let (stops, index) = validate_stops(graph, stops)?;
        let n = stops.len();
        debug!("building {n}x{n} stop matrix on the rayon pool");

        let targets: HashSet<String> = stops.iter().cloned().collect();
        let rows: Vec<_> = stops
            .par_iter()
            .map(|source| source_row(graph, source, &stops, &targets))
            .collect::<Result<_>>()?;

        let mut matrix = DistanceMatrix::new(n);
        let mut paths = HashMap::new();
        for (i, (row, row_paths)) in rows.into_iter().enumerate() {
            for (j, distance) in row.into_iter().enumerate() {
                matrix.set(i, j, distance);
            }
            for (j, path) in row_paths {
                paths.insert((i, j), path);
            }
        }

        Ok(Self {
            stops,
            index,
            matrix,
            paths,
        })
    }

    /// Wraps a precomputed matrix over the given stops, with no path
    /// lookup. Useful when distances come from somewhere other than the
    /// graph (tests, external services).
    ///
    /// Fails with [`RoutingError::DuplicateStop`] on repeated ids.
    ///
    /// # Panics
    ///
    /// Panics if the matrix size does not match the stop count.
    pub fn from_parts(stops: Vec<String>, matrix: DistanceMatrix) -> Result<Self> {
        assert_eq!(
            matrix.size(),
            stops.len(),
            "matrix size must match the stop count"
        );
        let mut index = HashMap::new();
        for (i, stop) in stops.iter().enumerate() {
            if index.insert(stop.clone(), i).is_some() {
                return Err(RoutingError::DuplicateStop(stop.clone()));
            }
        }
        Ok(Self {
            stops,
            index,
            matrix,
            paths: HashMap::new(),
        })
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if the matrix covers no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// The stops in matrix order.
    pub fn stops(&self) -> &[String] {
        &self.stops
    }

    /// Matrix index of a stop id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Stop id at a matrix index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn stop_at(&self, index: usize) -> &str {
        &self.stops[index]
    }

    /// Distance between two stops by matrix index.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.matrix.get(from, to)
    }

    /// Distance between two stops by id, `None` if either is unknown.
    pub fn distance_between(&self, from: &str, to: &str) -> Option<f64> {
        Some(self.distance(self.index_of(from)?, self.index_of(to)?))
    }

    /// Delegates to [`DistanceMatrix::nearest`].
    pub fn nearest(
        &self,
        from: usize,
        candidates: impl IntoIterator<Item = usize>,
    ) -> Option<(usize, f64)> {
        self.matrix.nearest(from, candidates)
    }

    /// The realizing node sequence for a finite off-diagonal pair, if the
    /// matrix was built from a graph.
    pub fn path(&self, from: usize, to: usize) -> Option<&[String]> {
        self.paths.get(&(from, to)).map(Vec::as_slice)
    }

    /// Path lookup by stop id.
    pub fn path_between(&self, from: &str, to: &str) -> Option<&[String]> {
        self.path(self.index_of(from)?, self.index_of(to)?)
    }

    /// The underlying dense matrix.
    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    /// Delegates to [`DistanceMatrix::is_symmetric`].
    pub fn is_symmetric(&self, tol: f64) -> bool {
        self.matrix.is_symmetric(tol)
    }
}

/// Checks the stop list for duplicates and unknown ids, producing the
/// owned stop vector and the id→index map.
fn validate_stops<S: AsRef<str>>(
    graph: &Graph,
    stops: &[S],
) -> Result<(Vec<String>, HashMap<String, usize>)> {
    let mut owned = Vec::with_capacity(stops.len());
    let mut index = HashMap::with_capacity(stops.len());
    for (i, stop) in stops.iter().enumerate() {
        let stop = stop.as_ref();
        if !graph.contains(stop) {
            return Err(RoutingError::StopNotFound(stop.to_string()));
        }
        if index.insert(stop.to_string(), i).is_some() {
            return Err(RoutingError::DuplicateStop(stop.to_string()));
        }
        owned.push(stop.to_string());
    }
    Ok((owned, index))
}

/// One matrix row: distances from `source` to every stop, plus the
/// realizing paths for finite non-trivial pairs.
type Row = (Vec<f64>, Vec<(usize, Vec<String>)>);

fn source_row(
    graph: &Graph,
    source: &str,
    stops: &[String],
    targets: &HashSet<String>,
) -> Result<Row> {
    let sp = shortest_paths(graph, source, Some(targets))?;
    let mut row = Vec::with_capacity(stops.len());
    let mut row_paths = Vec::new();
    for (j, target) in stops.iter().enumerate() {
        if target == source {
            row.push(0.0);
            continue;
        }
        match sp.distance_to(target) {
            Some(distance) => {
                row.push(distance);
                if let Some(path) = sp.path_to(target) {
                    row_paths.push((j, path));
                }
            }
            None => row.push(f64::INFINITY),
        }
    }
    Ok((row, row_paths))
}
