//! Qubit-wise commuting partition of Pauli labels.
//!
//! Labels that pairwise commute qubit-wise can be estimated from a single
//! measurement setting. The partition colours the conflict graph (an edge
//! joins two labels that do not commute qubit-wise) greedily, visiting
//! nodes by descending degree with ties broken by term index.

use petgraph::graph::{NodeIndex, UnGraph};
use std::cmp::Reverse;
use tracing::debug;

use crate::error::{ObservableError, ObservableResult};
use crate::pauli::{Pauli, PauliLabel};

/// A set of mutually qubit-wise commuting labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommutingGroup {
    labels: Vec<PauliLabel>,
    term_indices: Vec<usize>,
}

impl CommutingGroup {
    /// Labels in original term order.
    pub fn labels(&self) -> &[PauliLabel] {
        &self.labels
    }

    /// Positions of the labels in the input list.
    pub fn term_indices(&self) -> &[usize] {
        &self.term_indices
    }

    /// Labels joined by `+`, e.g. `ZZI+IZZ`.
    pub fn name(&self) -> String {
        self.labels
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("+")
    }

    /// For each qubit some label acts on non-trivially, the basis it is
    /// measured in, ascending by qubit.
    ///
    /// Labels in a group never disagree on a non-identity position, so the
    /// first non-identity operator found decides the basis.
    pub fn measurement_bases(&self) -> Vec<(usize, Pauli)> {
        let width = self.labels.first().map_or(0, PauliLabel::num_qubits);
        (0..width)
            .filter_map(|q| {
                self.labels
                    .iter()
                    .filter_map(|l| l.get(q))
                    .find(|p| !p.is_identity())
                    .map(|p| (q, p))
            })
            .collect()
    }

    /// Number of qubits measured for this group.
    pub fn num_active_qubits(&self) -> usize {
        self.measurement_bases().len()
    }
}

/// Partition `labels` into qubit-wise commuting groups.
///
/// Groups are ordered by their first member; members keep input order.
pub fn group_qubit_wise_commuting(labels: &[PauliLabel]) -> ObservableResult<Vec<CommutingGroup>> {
    let Some(first) = labels.first() else {
        return Ok(vec![]);
    };
    let width = first.num_qubits();
    if let Some(bad) = labels.iter().find(|l| l.num_qubits() != width) {
        return Err(ObservableError::LabelLength {
            label: bad.to_string(),
            expected: width,
            got: bad.num_qubits(),
        });
    }

    let mut graph = UnGraph::<usize, ()>::with_capacity(labels.len(), 0);
    let nodes: Vec<NodeIndex> = (0..labels.len()).map(|i| graph.add_node(i)).collect();
    for i in 0..labels.len() {
        for j in (i + 1)..labels.len() {
            if !labels[i].qubit_wise_commutes(&labels[j]) {
                graph.add_edge(nodes[i], nodes[j], ());
            }
        }
    }

    let mut order = nodes.clone();
    order.sort_by_key(|&v| Reverse(graph.neighbors(v).count()));

    let mut colors: Vec<Option<usize>> = vec![None; labels.len()];
    for v in order {
        let used: Vec<usize> = graph
            .neighbors(v)
            .filter_map(|n| colors[graph[n]])
            .collect();
        let mut color = 0;
        while used.contains(&color) {
            color += 1;
        }
        colors[graph[v]] = Some(color);
    }

    let mut slot_of_color: Vec<(usize, usize)> = vec![];
    let mut groups: Vec<CommutingGroup> = vec![];
    for (i, color) in colors.into_iter().enumerate() {
        let color = color.unwrap_or_default();
        let slot = match slot_of_color.iter().find(|(c, _)| *c == color) {
            Some(&(_, slot)) => slot,
            None => {
                slot_of_color.push((color, groups.len()));
                groups.push(CommutingGroup {
                    labels: vec![],
                    term_indices: vec![],
                });
                groups.len() - 1
            }
        };
        groups[slot].labels.push(labels[i].clone());
        groups[slot].term_indices.push(i);
    }

    debug!(terms = labels.len(), groups = groups.len(), "grouped qubit-wise commuting terms");
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(strings: &[&str]) -> Vec<PauliLabel> {
        strings.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn names(groups: &[CommutingGroup]) -> Vec<String> {
        groups.iter().map(CommutingGroup::name).collect()
    }

    #[test]
    fn test_all_commuting_forms_one_group() {
        let groups = group_qubit_wise_commuting(&labels(&["ZZI", "IZZ", "III"])).unwrap();
        assert_eq!(names(&groups), vec!["ZZI+IZZ+III"]);
        assert_eq!(groups[0].measurement_bases(), vec![
            (0, Pauli::Z),
            (1, Pauli::Z),
            (2, Pauli::Z)
        ]);
    }

    #[test]
    fn test_conflicting_terms_split() {
        let groups = group_qubit_wise_commuting(&labels(&["XX", "ZZ", "XI", "IZ", "II"])).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(names(&groups), vec!["XX+XI+II", "ZZ+IZ"]);
        assert_eq!(groups[1].term_indices(), &[1, 3]);
        for group in &groups {
            for (a, la) in group.labels().iter().enumerate() {
                for lb in &group.labels()[a + 1..] {
                    assert!(la.qubit_wise_commutes(lb));
                }
            }
        }
    }

    #[test]
    fn test_identity_group_has_no_active_qubits() {
        let groups = group_qubit_wise_commuting(&labels(&["III"])).unwrap();
        assert_eq!(groups[0].num_active_qubits(), 0);
    }

    #[test]
    fn test_width_mismatch() {
        assert!(matches!(
            group_qubit_wise_commuting(&labels(&["XX", "X"])),
            Err(ObservableError::LabelLength { .. })
        ));
        assert!(group_qubit_wise_commuting(&[]).unwrap().is_empty());
    }
}
