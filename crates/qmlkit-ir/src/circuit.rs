//! High-level circuit builder API.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::parameter::ParameterExpression;
use crate::qubit::{ClassicalRegister, Clbit, ClbitId, QubitId};

/// A quantum circuit: a fixed set of qubits, classical bits grouped in
/// named registers, and an ordered instruction list.
///
/// Every instruction pushed through the builder is validated against the
/// circuit's wires, so a `Circuit` never references a missing qubit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    name: String,
    num_qubits: u32,
    clbits: Vec<Clbit>,
    cregs: Vec<ClassicalRegister>,
    instructions: Vec<Instruction>,
}

macro_rules! fixed_gates {
    ($( $(#[$doc:meta])* $method:ident => $gate:ident ( $($q:ident),+ ) ;)+) => {
        $(
            $(#[$doc])*
            pub fn $method(&mut self, $($q: QubitId),+) -> IrResult<&mut Self> {
                self.apply(Instruction::gate(StandardGate::$gate, [$($q),+]))
            }
        )+
    };
}

macro_rules! rotation_gates {
    ($( $(#[$doc:meta])* $method:ident => $gate:ident ( $($q:ident),+ ) ;)+) => {
        $(
            $(#[$doc])*
            pub fn $method(
                &mut self,
                theta: impl Into<ParameterExpression>,
                $($q: QubitId),+
            ) -> IrResult<&mut Self> {
                self.apply(Instruction::gate(StandardGate::$gate(theta.into()), [$($q),+]))
            }
        )+
    };
}

impl Circuit {
    /// Create a circuit over `num_qubits` qubits with no classical bits.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            clbits: vec![],
            cregs: vec![],
            instructions: vec![],
        }
    }

    /// Create a circuit with loose classical bits `c0..c{num_clbits}`.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name, num_qubits);
        for _ in 0..num_clbits {
            circuit.add_clbit();
        }
        circuit
    }

    /// Add a single classical bit outside any register.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.clbits.len() as u32);
        self.clbits.push(Clbit::new(id));
        id
    }

    /// Add a named classical register of `size` bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> IrResult<Vec<ClbitId>> {
        let name = name.into();
        if self.cregs.iter().any(|r| r.name == name) {
            return Err(IrError::DuplicateRegister(name));
        }
        let start = self.clbits.len() as u32;
        let bits: Vec<_> = (start..start + size).map(ClbitId).collect();
        for (i, &id) in bits.iter().enumerate() {
            self.clbits.push(Clbit::with_register(id, &name, i as u32));
        }
        self.cregs.push(ClassicalRegister {
            name,
            bits: bits.clone(),
        });
        Ok(bits)
    }

    /// Append an instruction after validating its operands.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        let gate_name = instruction.as_gate().map(|g| g.name().to_string());

        if let InstructionKind::Gate(gate) = &instruction.kind {
            let expected = gate.num_qubits();
            let got = instruction.qubits.len();
            if expected != got {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected,
                    got,
                });
            }
        }
        if instruction.is_measure() && instruction.qubits.len() != instruction.clbits.len() {
            return Err(IrError::MeasureArity {
                qubits: instruction.qubits.len(),
                clbits: instruction.clbits.len(),
            });
        }

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }
        for &clbit in &instruction.clbits {
            if clbit.0 as usize >= self.clbits.len() {
                return Err(IrError::ClbitNotFound { clbit, gate_name });
            }
        }

        self.instructions.push(instruction);
        Ok(self)
    }

    // =========================================================================
    // Gates
    // =========================================================================

    fixed_gates! {
        /// Apply Hadamard gate.
        h => H(qubit);
        /// Apply Pauli-X gate.
        x => X(qubit);
        /// Apply Pauli-Y gate.
        y => Y(qubit);
        /// Apply Pauli-Z gate.
        z => Z(qubit);
        /// Apply S gate.
        s => S(qubit);
        /// Apply S-dagger gate.
        sdg => Sdg(qubit);
        /// Apply T gate.
        t => T(qubit);
        /// Apply T-dagger gate.
        tdg => Tdg(qubit);
        /// Apply sqrt(X) gate.
        sx => SX(qubit);
        /// Apply CNOT (CX) gate.
        cx => CX(control, target);
        /// Apply CY gate.
        cy => CY(control, target);
        /// Apply CZ gate.
        cz => CZ(control, target);
        /// Apply controlled-Hadamard gate.
        ch => CH(control, target);
        /// Apply SWAP gate.
        swap => Swap(q1, q2);
        /// Apply iSWAP gate.
        iswap => ISwap(q1, q2);
    }

    rotation_gates! {
        /// Apply Rx rotation gate.
        rx => Rx(qubit);
        /// Apply Ry rotation gate.
        ry => Ry(qubit);
        /// Apply Rz rotation gate.
        rz => Rz(qubit);
        /// Apply phase gate.
        p => P(qubit);
        /// Apply controlled-Rx gate.
        crx => CRx(control, target);
        /// Apply controlled-Ry gate.
        cry => CRy(control, target);
        /// Apply controlled-Rz gate.
        crz => CRz(control, target);
        /// Apply controlled-phase gate.
        cp => CP(control, target);
        /// Apply RXX (XX rotation) gate.
        rxx => RXX(q1, q2);
        /// Apply RYY (YY rotation) gate.
        ryy => RYY(q1, q2);
        /// Apply RZZ (ZZ rotation) gate.
        rzz => RZZ(q1, q2);
    }

    /// Apply universal U gate.
    pub fn u(
        &mut self,
        theta: impl Into<ParameterExpression>,
        phi: impl Into<ParameterExpression>,
        lambda: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(
            StandardGate::U(theta.into(), phi.into(), lambda.into()),
            [qubit],
        ))
    }

    /// Apply phased RX gate (IQM native).
    pub fn prx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        phi: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(
            StandardGate::PRX(theta.into(), phi.into()),
            [qubit],
        ))
    }

    /// Apply any standard gate.
    pub fn gate(
        &mut self,
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, qubits))
    }

    // =========================================================================
    // Non-unitary operations
    // =========================================================================

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubit, clbit))
    }

    /// Measure every qubit into a fresh register named `meas`.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        let bits = self.add_creg("meas", self.num_qubits)?;
        for (q, c) in (0..self.num_qubits).zip(bits) {
            self.measure(QubitId(q), c)?;
        }
        Ok(self)
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(qubits))
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(self.qubits()))
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Names of all unbound symbols, in natural order (`x[2]` before `x[10]`).
    pub fn parameters(&self) -> Vec<String> {
        let mut set = BTreeSet::new();
        for gate in self.instructions.iter().filter_map(Instruction::as_gate) {
            for p in gate.parameters() {
                p.collect_symbols(&mut set);
            }
        }
        let mut names: Vec<_> = set.into_iter().collect();
        names.sort_by(|a, b| natural_key(a).cmp(&natural_key(b)));
        names
    }

    /// Number of distinct unbound symbols.
    pub fn num_parameters(&self) -> usize {
        self.parameters().len()
    }

    /// Return a copy with the given symbols replaced by values.
    ///
    /// Symbols absent from `values` stay symbolic.
    #[must_use]
    pub fn bind(&self, values: &FxHashMap<String, f64>) -> Self {
        let mut bound = self.clone();
        for inst in &mut bound.instructions {
            if let InstructionKind::Gate(gate) = &inst.kind {
                inst.kind = InstructionKind::Gate(gate.map_parameters(|p| p.bind_all(values)));
            }
        }
        bound
    }

    /// Bind every parameter, failing on the first symbol left unbound.
    pub fn bind_strict(&self, values: &FxHashMap<String, f64>) -> IrResult<Self> {
        let bound = self.bind(values);
        match bound.parameters().into_iter().next() {
            Some(name) => Err(IrError::UnboundParameter(name)),
            None => Ok(bound),
        }
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Number of operations, not counting barriers.
    pub fn size(&self) -> usize {
        self.instructions.iter().filter(|i| !i.is_barrier()).count()
    }

    /// Length of the critical path over qubit and clbit wires.
    ///
    /// Barriers do not add a layer.
    pub fn depth(&self) -> usize {
        let mut qubit_level = vec![0usize; self.num_qubits as usize];
        let mut clbit_level = vec![0usize; self.clbits.len()];
        let mut max_depth = 0;

        for inst in &self.instructions {
            let front = inst
                .qubits
                .iter()
                .map(|q| qubit_level[q.index()])
                .chain(inst.clbits.iter().map(|c| clbit_level[c.0 as usize]))
                .max()
                .unwrap_or(0);
            let level = if inst.is_barrier() { front } else { front + 1 };
            for q in &inst.qubits {
                qubit_level[q.index()] = level;
            }
            for c in &inst.clbits {
                clbit_level[c.0 as usize] = level;
            }
            max_depth = max_depth.max(level);
        }

        max_depth
    }

    /// Operation counts by name, most frequent first.
    ///
    /// Ties keep the order in which the operations first appear.
    pub fn count_ops(&self) -> Vec<(&'static str, usize)> {
        let mut counts: Vec<(&'static str, usize)> = Vec::new();
        for inst in &self.instructions {
            let name = inst.name();
            match counts.iter_mut().find(|(n, _)| *n == name) {
                Some((_, count)) => *count += 1,
                None => counts.push((name, 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    /// Number of gates acting on two or more qubits.
    pub fn num_nonlocal_gates(&self) -> usize {
        self.instructions
            .iter()
            .filter_map(Instruction::as_gate)
            .filter(|g| g.num_qubits() > 1)
            .count()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the circuit.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Iterate over qubit ids.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + use<> {
        (0..self.num_qubits).map(QubitId)
    }

    /// Get the classical bits in the circuit.
    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }

    /// Named classical registers in creation order.
    pub fn cregs(&self) -> &[ClassicalRegister] {
        &self.cregs
    }

    /// Look up a classical register by name.
    pub fn creg(&self, name: &str) -> Option<&ClassicalRegister> {
        self.cregs.iter().find(|r| r.name == name)
    }

    /// Instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Replace the instruction list, revalidating every instruction.
    ///
    /// The circuit is left unchanged on error.
    pub fn set_instructions(&mut self, instructions: Vec<Instruction>) -> IrResult<()> {
        let mut rebuilt = Self {
            instructions: Vec::with_capacity(instructions.len()),
            ..self.clone_shell()
        };
        for inst in instructions {
            rebuilt.apply(inst)?;
        }
        *self = rebuilt;
        Ok(())
    }

    /// Widen the circuit to at least `num_qubits` qubits.
    pub fn expand_qubits(&mut self, num_qubits: u32) {
        self.num_qubits = self.num_qubits.max(num_qubits);
    }

    /// Same wires and registers, no instructions.
    pub fn clone_shell(&self) -> Self {
        Self {
            name: self.name.clone(),
            num_qubits: self.num_qubits,
            clbits: self.clbits.clone(),
            cregs: self.cregs.clone(),
            instructions: vec![],
        }
    }
}

/// Sort key splitting `name[index]` so indices compare numerically.
fn natural_key(name: &str) -> (&str, Option<u64>, &str) {
    if let Some(open) = name.rfind('[') {
        if let Some(stripped) = name[open + 1..].strip_suffix(']') {
            if let Ok(idx) = stripped.parse() {
                return (&name[..open], Some(idx), "");
            }
        }
    }
    (name, None, name)
}
