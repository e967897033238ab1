//! OpenQASM 3 emitter.
//!
//! Measurement circuits carry registers named after Pauli labels
//! (`XZ+ZX`), which are not valid QASM identifiers. Such registers are
//! emitted as `c0`, `c1`, ... with the original name kept in a trailing
//! comment.

use std::f64::consts::PI;
use std::fmt::Write;

use crate::circuit::Circuit;
use crate::instruction::{Instruction, InstructionKind};
use crate::parameter::ParameterExpression;
use crate::qubit::ClbitId;

/// Emit a circuit as OpenQASM 3 source.
pub fn emit(circuit: &Circuit) -> String {
    let mut emitter = Emitter::new(circuit);
    emitter.emit_circuit(circuit);
    emitter.output
}

struct Emitter {
    output: String,
    clbit_names: Vec<String>,
}

impl Emitter {
    fn new(circuit: &Circuit) -> Self {
        Self {
            output: String::new(),
            clbit_names: vec![String::new(); circuit.num_clbits()],
        }
    }

    fn emit_circuit(&mut self, circuit: &Circuit) {
        self.writeln("OPENQASM 3.0;");
        self.writeln("include \"stdgates.inc\";");
        self.writeln("");

        if circuit.num_qubits() > 0 {
            self.writeln(&format!("qubit[{}] q;", circuit.num_qubits()));
        }

        let loose: Vec<ClbitId> = circuit
            .clbits()
            .iter()
            .filter(|c| c.register.is_none())
            .map(|c| c.id)
            .collect();
        if !loose.is_empty() {
            self.writeln(&format!("bit[{}] c;", loose.len()));
            for (i, id) in loose.iter().enumerate() {
                self.clbit_names[id.0 as usize] = format!("c[{i}]");
            }
        }

        for (k, creg) in circuit.cregs().iter().enumerate() {
            let ident = if is_identifier(&creg.name) && creg.name != "q" && creg.name != "c" {
                self.writeln(&format!("bit[{}] {};", creg.size(), creg.name));
                creg.name.clone()
            } else {
                let ident = format!("c{k}");
                self.writeln(&format!("bit[{}] {ident}; // {}", creg.size(), creg.name));
                ident
            };
            for (i, id) in creg.bits.iter().enumerate() {
                self.clbit_names[id.0 as usize] = format!("{ident}[{i}]");
            }
        }
        self.writeln("");

        for instruction in circuit.instructions() {
            self.emit_instruction(instruction);
        }
    }

    fn emit_instruction(&mut self, instruction: &Instruction) {
        let qubits = instruction
            .qubits
            .iter()
            .map(|q| format!("q[{}]", q.0))
            .collect::<Vec<_>>()
            .join(", ");

        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let params = gate
                    .parameters()
                    .into_iter()
                    .map(emit_param)
                    .collect::<Vec<_>>()
                    .join(", ");
                if params.is_empty() {
                    self.writeln(&format!("{} {qubits};", gate.name()));
                } else {
                    self.writeln(&format!("{}({params}) {qubits};", gate.name()));
                }
            }
            InstructionKind::Measure => {
                for (q, c) in instruction.qubits.iter().zip(&instruction.clbits) {
                    let target = self.clbit_names[c.0 as usize].clone();
                    self.writeln(&format!("{target} = measure q[{}];", q.0));
                }
            }
            InstructionKind::Barrier => {
                if qubits.is_empty() {
                    self.writeln("barrier;");
                } else {
                    self.writeln(&format!("barrier {qubits};"));
                }
            }
        }
    }

    fn writeln(&mut self, line: &str) {
        let _ = writeln!(self.output, "{line}");
    }
}

fn emit_param(param: &ParameterExpression) -> String {
    match param {
        ParameterExpression::Constant(v) => emit_constant(*v),
        // Symbols such as `x[0]` are emitted verbatim; they read as array
        // accesses on an `input array[float, n] x` declaration.
        ParameterExpression::Symbol(name) => name.clone(),
        ParameterExpression::Pi => "pi".into(),
        ParameterExpression::Neg(e) => format!("-({})", emit_param(e)),
        ParameterExpression::Add(a, b) => format!("({} + {})", emit_param(a), emit_param(b)),
        ParameterExpression::Sub(a, b) => format!("({} - {})", emit_param(a), emit_param(b)),
        ParameterExpression::Mul(a, b) => format!("({} * {})", emit_param(a), emit_param(b)),
        ParameterExpression::Div(a, b) => format!("({} / {})", emit_param(a), emit_param(b)),
    }
}

fn emit_constant(v: f64) -> String {
    const FRACTIONS: [(f64, &str); 6] = [
        (PI, "pi"),
        (PI / 2.0, "pi/2"),
        (PI / 4.0, "pi/4"),
        (-PI, "-pi"),
        (-PI / 2.0, "-pi/2"),
        (-PI / 4.0, "-pi/4"),
    ];
    FRACTIONS
        .iter()
        .find(|(value, _)| (v - value).abs() < 1e-10)
        .map_or_else(|| format!("{v:.6}"), |(_, text)| (*text).to_string())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qubit::QubitId;

    #[test]
    fn test_emit_bell_state() {
        let mut circuit = Circuit::with_size("bell", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap();
        let qasm = emit(&circuit);

        assert!(qasm.contains("OPENQASM 3.0;"));
        assert!(qasm.contains("qubit[2] q;"));
        assert!(qasm.contains("bit[2] c;"));
        assert!(qasm.contains("h q[0];"));
        assert!(qasm.contains("cx q[0], q[1];"));
        assert!(qasm.contains("c[0] = measure q[0];"));
    }

    #[test]
    fn test_emit_pauli_named_register() {
        let mut circuit = Circuit::new("meas", 2);
        let bits = circuit.add_creg("XZ+ZX", 2).unwrap();
        circuit.measure(QubitId(1), bits[1]).unwrap();
        let qasm = emit(&circuit);

        assert!(qasm.contains("bit[2] c0; // XZ+ZX"));
        assert!(qasm.contains("c0[1] = measure q[1];"));
    }

    #[test]
    fn test_emit_parameters() {
        let mut circuit = Circuit::new("enc", 1);
        circuit.rx(PI / 2.0, QubitId(0)).unwrap();
        circuit
            .rz(ParameterExpression::symbol("x[0]") * 2.0, QubitId(0))
            .unwrap();
        let qasm = emit(&circuit);

        assert!(qasm.contains("rx(pi/2) q[0];"));
        assert!(qasm.contains("rz((x[0] * 2.000000)) q[0];"));
    }
}
