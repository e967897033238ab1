//! Named device presets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CompileError;
use crate::property::{BasisGates, CouplingMap, PropertySet};

/// Heavy-hex 27-qubit Falcon layout.
const FALCON_27_EDGES: [(u32, u32); 28] = [
    (0, 1),
    (1, 2),
    (1, 4),
    (2, 3),
    (3, 5),
    (4, 7),
    (5, 8),
    (6, 7),
    (7, 10),
    (8, 9),
    (8, 11),
    (10, 12),
    (11, 14),
    (12, 13),
    (12, 15),
    (13, 14),
    (14, 16),
    (15, 18),
    (16, 19),
    (17, 18),
    (18, 21),
    (19, 20),
    (19, 22),
    (21, 23),
    (22, 25),
    (23, 24),
    (24, 25),
    (25, 26),
];

/// 5-qubit T-shaped layout.
const IBM_5_EDGES: [(u32, u32); 4] = [(0, 1), (1, 2), (1, 3), (3, 4)];

/// 20-qubit square lattice.
const IQM_20_EDGES: [(u32, u32); 30] = [
    (0, 1),
    (0, 3),
    (1, 4),
    (2, 3),
    (2, 7),
    (3, 4),
    (3, 8),
    (4, 5),
    (4, 9),
    (5, 6),
    (5, 10),
    (6, 11),
    (7, 8),
    (7, 12),
    (8, 9),
    (8, 13),
    (9, 10),
    (9, 14),
    (10, 11),
    (10, 15),
    (11, 16),
    (12, 13),
    (13, 14),
    (13, 17),
    (14, 15),
    (14, 18),
    (15, 16),
    (15, 19),
    (17, 18),
    (18, 19),
];

/// A transpilation target: device connectivity plus native gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// 5-qubit IBM device, T-shaped coupling.
    Ibm5,
    /// 27-qubit IBM Falcon, heavy-hex coupling.
    Ibm27,
    /// 5-qubit IQM device, star coupling around qubit 2.
    Iqm5,
    /// 20-qubit IQM device, square lattice.
    Iqm20,
    /// Ideal simulator: any connectivity, any standard gate.
    Simulator,
}

impl Target {
    /// Every preset, in display order.
    pub const ALL: [Target; 5] = [
        Target::Ibm5,
        Target::Ibm27,
        Target::Iqm5,
        Target::Iqm20,
        Target::Simulator,
    ];

    /// Preset name as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Target::Ibm5 => "ibm5",
            Target::Ibm27 => "ibm27",
            Target::Iqm5 => "iqm5",
            Target::Iqm20 => "iqm20",
            Target::Simulator => "simulator",
        }
    }

    /// Device qubit count, `None` for the simulator.
    pub fn num_qubits(self) -> Option<u32> {
        match self {
            Target::Ibm5 | Target::Iqm5 => Some(5),
            Target::Ibm27 => Some(27),
            Target::Iqm20 => Some(20),
            Target::Simulator => None,
        }
    }

    /// Connectivity, `None` for the simulator.
    pub fn coupling_map(self) -> Option<CouplingMap> {
        match self {
            Target::Ibm5 => Some(CouplingMap::from_edges(5, &IBM_5_EDGES)),
            Target::Ibm27 => Some(CouplingMap::from_edges(27, &FALCON_27_EDGES)),
            Target::Iqm5 => Some(CouplingMap::from_edges(
                5,
                &[(0, 2), (1, 2), (3, 2), (4, 2)],
            )),
            Target::Iqm20 => Some(CouplingMap::from_edges(20, &IQM_20_EDGES)),
            Target::Simulator => None,
        }
    }

    /// Native gates.
    pub fn basis_gates(self) -> BasisGates {
        match self {
            Target::Ibm5 | Target::Ibm27 => BasisGates::ibm(),
            Target::Iqm5 | Target::Iqm20 => BasisGates::iqm(),
            Target::Simulator => BasisGates::universal(),
        }
    }

    /// Properties to seed a pass-manager run with.
    pub fn properties(self) -> PropertySet {
        PropertySet {
            coupling_map: self.coupling_map(),
            basis_gates: Some(self.basis_gates()),
            layout: None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ibm" | "ibm5" => Ok(Target::Ibm5),
            "ibm27" => Ok(Target::Ibm27),
            "iqm" | "iqm5" => Ok(Target::Iqm5),
            "iqm20" => Ok(Target::Iqm20),
            "simulator" | "sim" => Ok(Target::Simulator),
            _ => Err(CompileError::UnknownTarget(s.to_string())),
        }
    }
}
