//! Integration tests for the seeded observable builders.

use proptest::prelude::*;
use qmlkit_ir::{Circuit, QubitId};
use qmlkit_observables::{
    CustomObservable, Observable, ObservableKind, Pauli, get_pauli_strings,
    group_qubit_wise_commuting, summed_neighbours, summed_pairs, summed_singles,
};
use qmlkit_sim::Statevector;

fn bases_strategy() -> impl Strategy<Value = Vec<Pauli>> {
    prop::collection::vec(
        prop_oneof![Just(Pauli::X), Just(Pauli::Y), Just(Pauli::Z)],
        1..4,
    )
}

fn strings(obs: &CustomObservable) -> Vec<String> {
    get_pauli_strings(obs).unwrap()
}

proptest! {
    #[test]
    fn term_counts_and_widths(n in 2usize..9, bases in bases_strategy(), seed in any::<u64>()) {
        let expected = [
            (summed_neighbours(n, &bases, seed).unwrap(), n),
            (summed_pairs(n, &bases, seed).unwrap(), n * (n - 1) / 2 + 1),
            (summed_singles(n, &bases, seed).unwrap(), n + 1),
        ];
        for (obs, count) in expected {
            let terms = strings(&obs);
            prop_assert_eq!(terms.len(), count);
            prop_assert_eq!(obs.num_parameters(), count);
            prop_assert!(terms.iter().all(|t| t.len() == n));
            prop_assert_eq!(terms.last().unwrap(), &"I".repeat(n));
        }
    }

    #[test]
    fn builders_are_deterministic(n in 1usize..8, bases in bases_strategy(), seed in any::<u64>()) {
        for kind in [ObservableKind::Neighbours, ObservableKind::Pairs, ObservableKind::Singles] {
            let a = kind.build(n, &bases, seed).unwrap();
            let b = kind.build(n, &bases, seed).unwrap();
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn non_identity_positions_follow_pattern(n in 2usize..8, bases in bases_strategy(), seed in any::<u64>()) {
        let allowed: Vec<char> = bases.iter().map(|b| b.as_char()).collect();

        let neighbours = strings(&summed_neighbours(n, &bases, seed).unwrap());
        for (i, term) in neighbours[..n - 1].iter().enumerate() {
            for (pos, c) in term.chars().enumerate() {
                if pos == i || pos == i + 1 {
                    prop_assert!(allowed.contains(&c));
                } else {
                    prop_assert_eq!(c, 'I');
                }
            }
        }

        let pairs = strings(&summed_pairs(n, &bases, seed).unwrap());
        let mut k = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                for (pos, c) in pairs[k].chars().enumerate() {
                    if pos == i || pos == j {
                        prop_assert!(allowed.contains(&c));
                    } else {
                        prop_assert_eq!(c, 'I');
                    }
                }
                k += 1;
            }
        }

        let singles = strings(&summed_singles(n, &bases, seed).unwrap());
        for (i, term) in singles[..n].iter().enumerate() {
            for (pos, c) in term.chars().enumerate() {
                prop_assert_eq!(pos == i, c != 'I');
                if pos == i {
                    prop_assert!(allowed.contains(&c));
                }
            }
        }
    }

    #[test]
    fn groups_partition_terms(n in 2usize..6, bases in bases_strategy(), seed in any::<u64>()) {
        let obs = summed_pairs(n, &bases, seed).unwrap();
        let labels = obs.symbolic_operator().unwrap().labels();
        let groups = group_qubit_wise_commuting(&labels).unwrap();

        let mut seen: Vec<usize> = groups.iter().flat_map(|g| g.term_indices().to_vec()).collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..labels.len()).collect::<Vec<_>>());

        for group in &groups {
            for a in group.labels() {
                for b in group.labels() {
                    prop_assert!(a.qubit_wise_commutes(b));
                }
            }
        }
    }
}

#[test]
fn different_seeds_eventually_differ() {
    let bases = [Pauli::X, Pauli::Y, Pauli::Z];
    let reference = summed_pairs(5, &bases, 0).unwrap();
    let differs = (1..20).any(|seed| summed_pairs(5, &bases, seed).unwrap() != reference);
    assert!(differs);
}

#[test]
fn expectation_of_all_z_observable() {
    let obs = summed_singles(2, &[Pauli::Z], 0).unwrap();
    let op = obs
        .get_operator(&[0.5.into(), 2.0.into(), (-1.0).into()])
        .unwrap();

    let mut circuit = Circuit::new("x1", 2);
    circuit.x(QubitId(1)).unwrap();
    let state = Statevector::from_circuit(&circuit).unwrap();

    // 0.5·⟨Z₀⟩ + 2·⟨Z₁⟩ − 1 = 0.5 − 2 − 1
    let value = op.expectation(&state).unwrap();
    assert!((value + 2.5).abs() < 1e-12);

    let symbolic = obs.symbolic_operator().unwrap();
    assert!(symbolic.expectation(&state).is_err());
}
