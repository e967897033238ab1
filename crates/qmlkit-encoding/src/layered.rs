//! Encoding circuits described by a layer string.
//!
//! A layer string is a `-`-separated list of layers, e.g. `H-Ry(x)-cx-Rz(p)`.
//! Names are case-insensitive standard gate names:
//!
//! - a single-qubit gate is applied to every qubit
//! - a two-qubit gate is applied to each neighbouring pair `(i, i+1)`
//! - a rotation takes `(x)` for a feature or `(p)` for a trainable parameter
//!
//! Features are assigned round-robin: the k-th feature gate of the circuit
//! reads `x[k mod num_features]`. Every parameter gate gets a fresh `p[k]`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use qmlkit_ir::{Circuit, Instruction, ParameterExpression, QubitId, StandardGate};

use crate::encoding::{EncodingCircuit, check_counts};
use crate::error::{EncodingError, EncodingResult, circuit_width};

/// What a rotation angle is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerArgument {
    /// The next feature, `x`.
    Feature,
    /// A fresh trainable parameter, `p`.
    Parameter,
}

/// One layer of a [`LayeredEncodingCircuit`].
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Gate with a placeholder angle for rotations.
    gate: StandardGate,
    argument: Option<LayerArgument>,
}

impl Layer {
    /// Gate kind applied by this layer.
    pub fn gate(&self) -> &StandardGate {
        &self.gate
    }

    /// Angle binding, `None` for fixed gates.
    pub fn argument(&self) -> Option<LayerArgument> {
        self.argument
    }

    /// Whether the layer acts on neighbouring pairs.
    pub fn is_entangling(&self) -> bool {
        self.gate.num_qubits() == 2
    }

    /// Gates this layer places on `num_qubits` qubits.
    pub fn num_gates(&self, num_qubits: usize) -> usize {
        if self.is_entangling() {
            num_qubits.saturating_sub(1)
        } else {
            num_qubits
        }
    }

    fn operands(&self, num_qubits: u32) -> Vec<Vec<QubitId>> {
        if self.is_entangling() {
            (1..num_qubits)
                .map(|q| vec![QubitId(q - 1), QubitId(q)])
                .collect()
        } else {
            (0..num_qubits).map(|q| vec![QubitId(q)]).collect()
        }
    }
}

impl FromStr for Layer {
    type Err = EncodingError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| EncodingError::InvalidLayer {
            layer: token.to_string(),
            reason: reason.to_string(),
        };

        let token = token.trim();
        let (name, argument) = match token.split_once('(') {
            Some((name, rest)) => {
                let arg = rest
                    .strip_suffix(')')
                    .ok_or_else(|| invalid("missing closing parenthesis"))?;
                let argument = match arg.trim() {
                    "x" | "X" => LayerArgument::Feature,
                    "p" | "P" => LayerArgument::Parameter,
                    _ => return Err(invalid("argument must be 'x' or 'p'")),
                };
                (name.trim(), Some(argument))
            }
            None => (token, None),
        };

        let name = name.to_ascii_lowercase();
        let placeholder = [ParameterExpression::constant(0.0)];
        let params: &[ParameterExpression] = if argument.is_some() { &placeholder } else { &[] };
        let gate = StandardGate::from_name(&name, params).ok_or_else(|| {
            if StandardGate::from_name(&name, if argument.is_some() { &[] } else { &placeholder })
                .is_some()
            {
                invalid(if argument.is_some() {
                    "gate takes no argument"
                } else {
                    "rotation needs an '(x)' or '(p)' argument"
                })
            } else {
                invalid("unknown or unsupported gate")
            }
        })?;
        if gate.num_qubits() > 2 {
            return Err(invalid("only one- and two-qubit gates form layers"));
        }
        Ok(Layer { gate, argument })
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.gate.name();
        let name = if self.is_entangling() {
            name.to_string()
        } else {
            // Single-qubit layers read best capitalized: `H`, `Ry(x)`.
            let mut chars = name.chars();
            chars
                .next()
                .map(|c| c.to_ascii_uppercase().to_string() + chars.as_str())
                .unwrap_or_default()
        };
        match self.argument {
            Some(LayerArgument::Feature) => write!(f, "{name}(x)"),
            Some(LayerArgument::Parameter) => write!(f, "{name}(p)"),
            None => write!(f, "{name}"),
        }
    }
}

/// An encoding circuit built from a layer string.
///
/// ```rust
/// use qmlkit_encoding::{EncodingCircuit, LayeredEncodingCircuit};
///
/// let enc = LayeredEncodingCircuit::parse("H-Ry(x)-cx-Rz(p)", 3, 2).unwrap();
/// assert_eq!(enc.num_parameters(), 3);
/// let circuit = enc.symbolic_circuit().unwrap();
/// assert_eq!(circuit.size(), 3 + 3 + 2 + 3);
/// assert_eq!(circuit.parameters(), vec!["p[0]", "p[1]", "p[2]", "x[0]", "x[1]"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredEncodingCircuit {
    num_qubits: usize,
    width: u32,
    num_features: usize,
    layers: Vec<Layer>,
}

impl LayeredEncodingCircuit {
    /// Parse a layer string for `num_qubits` qubits and `num_features` features.
    pub fn parse(layers: &str, num_qubits: usize, num_features: usize) -> EncodingResult<Self> {
        let layers = layers
            .split('-')
            .filter(|t| !t.trim().is_empty())
            .map(str::parse)
            .collect::<EncodingResult<Vec<Layer>>>()?;
        Self::from_layers(layers, num_qubits, num_features)
    }

    /// Build from parsed layers.
    pub fn from_layers(layers: Vec<Layer>, num_qubits: usize, num_features: usize) -> EncodingResult<Self> {
        let width = circuit_width(num_qubits)?;
        if layers.is_empty() {
            return Err(EncodingError::EmptyLayers);
        }
        let uses_features = layers
            .iter()
            .any(|l| l.argument == Some(LayerArgument::Feature));
        if uses_features && num_features == 0 {
            return Err(EncodingError::ZeroFeatures);
        }
        let encoding = Self {
            num_qubits,
            width,
            num_features,
            layers,
        };
        debug!(
            layers = %encoding,
            num_qubits,
            num_features,
            num_parameters = encoding.num_parameters(),
            "built layered encoding circuit"
        );
        Ok(encoding)
    }

    /// The parsed layers.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Number of layers.
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Feature gates in the circuit; every feature is encoded at least once
    /// when this is at least [`num_features`](EncodingCircuit::num_features).
    pub fn num_feature_gates(&self) -> usize {
        self.count_gates(LayerArgument::Feature)
    }

    fn count_gates(&self, argument: LayerArgument) -> usize {
        self.layers
            .iter()
            .filter(|l| l.argument == Some(argument))
            .map(|l| l.num_gates(self.num_qubits))
            .sum()
    }
}

impl EncodingCircuit for LayeredEncodingCircuit {
    fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    fn num_features(&self) -> usize {
        self.num_features
    }

    fn num_parameters(&self) -> usize {
        self.count_gates(LayerArgument::Parameter)
    }

    fn get_circuit(
        &self,
        features: &[ParameterExpression],
        parameters: &[ParameterExpression],
    ) -> EncodingResult<Circuit> {
        check_counts(self, features.len(), parameters.len())?;

        let mut circuit = Circuit::new("LayeredEncodingCircuit", self.width);
        let (mut next_feature, mut next_parameter) = (0usize, 0usize);
        for layer in &self.layers {
            for qubits in layer.operands(self.width) {
                let angle = match layer.argument {
                    Some(LayerArgument::Feature) => {
                        let x = features[next_feature % features.len()].clone();
                        next_feature += 1;
                        Some(x)
                    }
                    Some(LayerArgument::Parameter) => {
                        let p = parameters[next_parameter].clone();
                        next_parameter += 1;
                        Some(p)
                    }
                    None => None,
                };
                let gate = match angle {
                    Some(angle) => layer.gate.map_parameters(|_| angle.clone()),
                    None => layer.gate.clone(),
                };
                circuit.apply(Instruction::gate(gate, qubits))?;
            }
        }
        Ok(circuit)
    }
}

impl fmt::Display for LayeredEncodingCircuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layers: Vec<String> = self.layers.iter().map(ToString::to_string).collect();
        write!(f, "{}", layers.join("-"))
    }
}
