//! Device properties shared between passes.
//!
//! A [`PropertySet`] travels through every pass of a
//! [`PassManager`](crate::PassManager) run. Targets fill in the [`CouplingMap`] and
//! [`BasisGates`]; the layout pass adds a [`Layout`].
//!
//! ```
//! use qmlkit_compile::{BasisGates, CouplingMap, PropertySet};
//!
//! let props = PropertySet::new().with_target(CouplingMap::linear(5), BasisGates::iqm());
//! let map = props.coupling_map.as_ref().unwrap();
//! assert!(map.is_connected(3, 4));
//! assert_eq!(map.distance(0, 4), Some(4));
//! assert!(props.basis_gates.as_ref().unwrap().contains("prx"));
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use qmlkit_ir::QubitId;

/// Mapping between circuit (logical) and device (physical) qubits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    logical_to_physical: FxHashMap<QubitId, u32>,
    physical_to_logical: FxHashMap<u32, QubitId>,
}

impl Layout {
    /// An empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Logical qubit `i` on physical qubit `i`.
    pub fn trivial(num_qubits: u32) -> Self {
        let mut layout = Self::new();
        for i in 0..num_qubits {
            layout.add(QubitId(i), i);
        }
        layout
    }

    /// Map `logical` onto `physical`, dropping any previous mapping of either.
    pub fn add(&mut self, logical: QubitId, physical: u32) {
        if let Some(old) = self.logical_to_physical.remove(&logical) {
            self.physical_to_logical.remove(&old);
        }
        if let Some(old) = self.physical_to_logical.remove(&physical) {
            self.logical_to_physical.remove(&old);
        }
        self.logical_to_physical.insert(logical, physical);
        self.physical_to_logical.insert(physical, logical);
    }

    /// Physical qubit holding `logical`.
    pub fn get_physical(&self, logical: QubitId) -> Option<u32> {
        self.logical_to_physical.get(&logical).copied()
    }

    /// Logical qubit held by `physical`.
    pub fn get_logical(&self, physical: u32) -> Option<QubitId> {
        self.physical_to_logical.get(&physical).copied()
    }

    /// Number of mapped qubits.
    pub fn len(&self) -> usize {
        self.logical_to_physical.len()
    }

    /// Whether nothing is mapped.
    pub fn is_empty(&self) -> bool {
        self.logical_to_physical.is_empty()
    }
}

/// Undirected device connectivity.
///
/// Factory constructors precompute all-pairs BFS distances and predecessors,
/// so [`distance`](Self::distance) and [`shortest_path`](Self::shortest_path)
/// are table lookups. Maps assembled edge by edge compute the tables on the
/// first [`finalize`](Self::finalize).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouplingMap {
    num_qubits: u32,
    edges: Vec<(u32, u32)>,
    #[serde(skip)]
    adjacency: Vec<Vec<u32>>,
    #[serde(skip)]
    dist: Vec<Vec<u32>>,
    #[serde(skip)]
    pred: Vec<Vec<u32>>,
}

impl CouplingMap {
    /// A map with no edges.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            edges: vec![],
            adjacency: vec![vec![]; num_qubits as usize],
            dist: vec![],
            pred: vec![],
        }
    }

    /// Build from an edge list.
    pub fn from_edges(num_qubits: u32, edges: &[(u32, u32)]) -> Self {
        let mut map = Self::new(num_qubits);
        for &(a, b) in edges {
            map.add_edge(a, b);
        }
        map.finalize();
        map
    }

    /// Add an undirected edge. Duplicates and out-of-range qubits are ignored.
    pub fn add_edge(&mut self, q1: u32, q2: u32) {
        if q1 == q2 || q1 >= self.num_qubits || q2 >= self.num_qubits || self.is_connected(q1, q2) {
            return;
        }
        self.edges.push((q1, q2));
        self.adjacency[q1 as usize].push(q2);
        self.adjacency[q2 as usize].push(q1);
        self.dist.clear();
        self.pred.clear();
    }

    /// Recompute adjacency and path tables, e.g. after deserialization.
    pub fn finalize(&mut self) {
        let n = self.num_qubits as usize;
        self.adjacency = vec![vec![]; n];
        for &(a, b) in &self.edges {
            self.adjacency[a as usize].push(b);
            self.adjacency[b as usize].push(a);
        }

        self.dist = vec![vec![u32::MAX; n]; n];
        self.pred = vec![vec![u32::MAX; n]; n];
        for src in 0..n {
            self.dist[src][src] = 0;
            let mut queue = VecDeque::from([src as u32]);
            while let Some(current) = queue.pop_front() {
                for &next in &self.adjacency[current as usize] {
                    let nb = next as usize;
                    if self.dist[src][nb] == u32::MAX {
                        self.dist[src][nb] = self.dist[src][current as usize] + 1;
                        self.pred[src][nb] = current;
                        queue.push_back(next);
                    }
                }
            }
        }
    }

    /// Linear chain `0-1-2-...`.
    pub fn linear(n: u32) -> Self {
        let edges: Vec<_> = (1..n).map(|i| (i - 1, i)).collect();
        Self::from_edges(n, &edges)
    }

    /// Qubit 0 connected to every other qubit.
    pub fn star(n: u32) -> Self {
        let edges: Vec<_> = (1..n).map(|i| (0, i)).collect();
        Self::from_edges(n, &edges)
    }

    /// All-to-all connectivity.
    pub fn full(n: u32) -> Self {
        let edges: Vec<_> = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .collect();
        Self::from_edges(n, &edges)
    }

    /// Whether `q1` and `q2` share an edge.
    #[inline]
    pub fn is_connected(&self, q1: u32, q2: u32) -> bool {
        self.adjacency
            .get(q1 as usize)
            .is_some_and(|nbrs| nbrs.contains(&q2))
    }

    /// Number of physical qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    /// Neighbours of `qubit`.
    pub fn neighbors(&self, qubit: u32) -> impl Iterator<Item = u32> + '_ {
        self.adjacency
            .get(qubit as usize)
            .into_iter()
            .flatten()
            .copied()
    }

    /// Hop count between two qubits, `None` when disconnected or not finalized.
    pub fn distance(&self, from: u32, to: u32) -> Option<u32> {
        if from == to {
            return Some(0);
        }
        let d = *self.dist.get(from as usize)?.get(to as usize)?;
        (d != u32::MAX).then_some(d)
    }

    /// Qubits on a shortest path, both endpoints included.
    pub fn shortest_path(&self, from: u32, to: u32) -> Option<Vec<u32>> {
        self.distance(from, to)?;
        let mut path = vec![to];
        let mut current = to;
        while current != from {
            current = *self.pred.get(from as usize)?.get(current as usize)?;
            if current == u32::MAX {
                return None;
            }
            path.push(current);
        }
        path.reverse();
        Some(path)
    }
}

/// Native gate names of a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasisGates {
    gates: Vec<String>,
}

impl BasisGates {
    /// A basis from gate names.
    pub fn new(gates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            gates: gates.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `gate` is native.
    pub fn contains(&self, gate: &str) -> bool {
        self.gates.iter().any(|g| g == gate)
    }

    /// Gate names.
    pub fn gates(&self) -> &[String] {
        &self.gates
    }

    /// IQM: PRX + CZ.
    pub fn iqm() -> Self {
        Self::new(["prx", "cz", "measure", "barrier"])
    }

    /// IBM: RZ + SX + X + CX.
    pub fn ibm() -> Self {
        Self::new(["id", "rz", "sx", "x", "cx", "measure", "barrier"])
    }

    /// Every standard gate.
    pub fn universal() -> Self {
        Self::new([
            "id", "x", "y", "z", "h", "s", "sdg", "t", "tdg", "sx", "sxdg", "rx", "ry", "rz", "p",
            "u", "prx", "cx", "cy", "cz", "ch", "swap", "iswap", "crx", "cry", "crz", "cp", "rxx",
            "ryy", "rzz", "measure", "barrier",
        ])
    }
}

/// State threaded through a pass-manager run.
#[derive(Debug, Clone, Default)]
pub struct PropertySet {
    /// Set by the layout pass.
    pub layout: Option<Layout>,
    /// Device connectivity; routing is skipped without it.
    pub coupling_map: Option<CouplingMap>,
    /// Native gates; translation is skipped without them.
    pub basis_gates: Option<BasisGates>,
}

impl PropertySet {
    /// Empty properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the coupling map and basis gates.
    #[must_use]
    pub fn with_target(mut self, coupling_map: CouplingMap, basis_gates: BasisGates) -> Self {
        self.coupling_map = Some(coupling_map);
        self.basis_gates = Some(basis_gates);
        self
    }

    /// Set only the basis gates.
    #[must_use]
    pub fn with_basis_gates(mut self, basis_gates: BasisGates) -> Self {
        self.basis_gates = Some(basis_gates);
        self
    }

    /// Set the layout.
    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qmlkit_ir::{ParameterExpression, StandardGate};

    #[test]
    fn test_layout_trivial_and_remap() {
        let mut layout = Layout::trivial(3);
        assert_eq!(layout.get_physical(QubitId(2)), Some(2));
        layout.add(QubitId(0), 2);
        assert_eq!(layout.get_logical(2), Some(QubitId(0)));
        assert_eq!(layout.get_physical(QubitId(2)), None);
        assert_eq!(layout.get_logical(0), None);
        assert_eq!(layout.len(), 2);
    }

    #[test]
    fn test_coupling_map_paths() {
        let map = CouplingMap::linear(5);
        assert!(map.is_connected(1, 0));
        assert!(!map.is_connected(0, 2));
        assert_eq!(map.shortest_path(0, 3), Some(vec![0, 1, 2, 3]));
        assert_eq!(map.shortest_path(2, 2), Some(vec![2]));

        let star = CouplingMap::star(4);
        assert_eq!(star.distance(1, 3), Some(2));
        assert_eq!(star.shortest_path(1, 3), Some(vec![1, 0, 3]));
    }

    #[test]
    fn test_disconnected_and_unfinalized() {
        let map = CouplingMap::from_edges(4, &[(0, 1), (2, 3)]);
        assert_eq!(map.distance(0, 3), None);
        assert_eq!(map.shortest_path(0, 3), None);

        let mut manual = CouplingMap::new(3);
        manual.add_edge(0, 1);
        manual.add_edge(1, 0);
        manual.add_edge(1, 2);
        assert_eq!(manual.edges().len(), 2);
        assert_eq!(manual.distance(0, 2), None);
        manual.finalize();
        assert_eq!(manual.distance(0, 2), Some(2));
    }

    #[test]
    fn test_basis_gates() {
        assert!(BasisGates::iqm().contains("cz"));
        assert!(!BasisGates::iqm().contains("cx"));
        assert!(BasisGates::ibm().contains("sx"));
        assert!(BasisGates::universal().contains("iswap"));
        assert!(!BasisGates::universal().contains("reset"));
    }

    #[test]
    fn test_universal_gates_are_routable() {
        for name in BasisGates::universal().gates() {
            if name == "measure" || name == "barrier" {
                continue;
            }
            let gate = (0..=3)
                .find_map(|n| StandardGate::from_name(name, &vec![ParameterExpression::constant(0.5); n]))
                .unwrap_or_else(|| panic!("{name} is not a standard gate"));
            assert!(gate.num_qubits() <= 2, "{name} acts on {} qubits", gate.num_qubits());
        }
    }
}
