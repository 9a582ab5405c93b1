//! Pairing expected products with detected ones
//!
//! Given which (expected, detected) pairs are pose-compatible, find how many
//! pairs can be matched one-to-one at best. Small groups are searched
//! exhaustively over permutations; larger ones use a maximum matching on the
//! bipartite compatibility graph, which reaches the same count.

use petgraph::algo::maximum_matching;
use petgraph::graph::UnGraph;

/// Pose compatibility between every expected and detected product of a group
#[derive(Debug, Clone)]
pub struct CompatibilityMatrix {
    expected: usize,
    detected: usize,
    cells: Vec<bool>,
}

impl CompatibilityMatrix {
    pub fn from_fn(
        expected: usize,
        detected: usize,
        mut compatible: impl FnMut(usize, usize) -> bool,
    ) -> Self {
        let mut cells = Vec::with_capacity(expected * detected);
        for e in 0..expected {
            for d in 0..detected {
                cells.push(compatible(e, d));
            }
        }
        Self {
            expected,
            detected,
            cells,
        }
    }

    pub fn is_compatible(&self, expected: usize, detected: usize) -> bool {
        self.cells[expected * self.detected + detected]
    }

    /// Size of the index set that permutations are drawn from
    pub fn order(&self) -> usize {
        self.expected.max(self.detected)
    }

    fn upper_bound(&self) -> usize {
        self.expected.min(self.detected)
    }
}

/// Largest number of compatible pairs, picking the strategy by group size
pub fn best_assignment(matrix: &CompatibilityMatrix, permutation_limit: usize) -> usize {
    if matrix.order() <= permutation_limit {
        best_assignment_by_permutation(matrix)
    } else {
        best_assignment_by_matching(matrix)
    }
}

/// Try every permutation of detected slots against the expected list.
///
/// Factorial in the group size.
pub fn best_assignment_by_permutation(matrix: &CompatibilityMatrix) -> usize {
    let mut permutation: Vec<usize> = (0..matrix.order()).collect();
    let mut best = 0;
    loop {
        let score = (0..matrix.expected)
            .filter(|&e| {
                let d = permutation[e];
                d < matrix.detected && matrix.is_compatible(e, d)
            })
            .count();
        best = best.max(score);
        if best == matrix.upper_bound() || !next_permutation(&mut permutation) {
            return best;
        }
    }
}

/// Maximum cardinality matching over the compatibility graph
pub fn best_assignment_by_matching(matrix: &CompatibilityMatrix) -> usize {
    let mut graph = UnGraph::<(), ()>::with_capacity(
        matrix.expected + matrix.detected,
        matrix.cells.iter().filter(|cell| **cell).count(),
    );
    let expected_nodes: Vec<_> = (0..matrix.expected).map(|_| graph.add_node(())).collect();
    let detected_nodes: Vec<_> = (0..matrix.detected).map(|_| graph.add_node(())).collect();
    for (e, expected_node) in expected_nodes.iter().enumerate() {
        for (d, detected_node) in detected_nodes.iter().enumerate() {
            if matrix.is_compatible(e, d) {
                graph.add_edge(*expected_node, *detected_node, ());
            }
        }
    }
    maximum_matching(&graph).len()
}

/// Advance to the next lexicographic permutation; false after the last one
fn next_permutation(values: &mut [usize]) -> bool {
    if values.len() < 2 {
        return false;
    }
    let mut pivot = values.len() - 1;
    while pivot > 0 && values[pivot - 1] >= values[pivot] {
        pivot -= 1;
    }
    if pivot == 0 {
        return false;
    }
    let mut successor = values.len() - 1;
    while values[successor] <= values[pivot - 1] {
        successor -= 1;
    }
    values.swap(pivot - 1, successor);
    values[pivot..].reverse();
    true
}
