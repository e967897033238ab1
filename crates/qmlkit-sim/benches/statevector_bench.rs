//! Benchmarks for statevector simulation
//!
//! Run with: cargo bench -p qmlkit-sim

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qmlkit_ir::{Circuit, QubitId};
use qmlkit_sim::Statevector;

fn layered_circuit(num_qubits: u32, layers: usize) -> Circuit {
    let mut circuit = Circuit::new("bench", num_qubits);
    for layer in 0..layers {
        for q in 0..num_qubits {
            circuit.ry(0.1 * (layer as f64 + 1.0), QubitId(q)).unwrap();
        }
        for q in 0..num_qubits.saturating_sub(1) {
            circuit.cx(QubitId(q), QubitId(q + 1)).unwrap();
        }
    }
    circuit
}

fn bench_from_circuit(c: &mut Criterion) {
    let mut group = c.benchmark_group("statevector_from_circuit");
    for num_qubits in [4u32, 8, 12, 16] {
        let circuit = layered_circuit(num_qubits, 4);
        group.bench_with_input(
            BenchmarkId::from_parameter(num_qubits),
            &circuit,
            |b, circuit| b.iter(|| Statevector::from_circuit(black_box(circuit)).unwrap()),
        );
    }
    group.finish();
}

fn bench_bloch_vectors(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloch_vectors");
    for num_qubits in [4u32, 8, 12] {
        let state = Statevector::from_circuit(&layered_circuit(num_qubits, 2)).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(num_qubits),
            &state,
            |b, state| {
                b.iter(|| {
                    (0..state.num_qubits())
                        .map(|q| state.bloch_vector(q).unwrap())
                        .collect::<Vec<_>>()
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_from_circuit, bench_bloch_vectors);
criterion_main!(benches);
