//! The pass interface.

use qmlkit_ir::Circuit;

use crate::error::CompileResult;
use crate::property::PropertySet;

/// What a pass is allowed to touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Reads the circuit, writes to the [`PropertySet`].
    Analysis,
    /// Rewrites the circuit.
    Transformation,
}

/// A compilation step over a circuit.
///
/// Passes communicate through the [`PropertySet`]: a layout pass stores the
/// qubit mapping that routing later consumes, for example.
pub trait Pass: Send + Sync {
    /// Name shown in logs.
    fn name(&self) -> &str;

    /// Analysis or transformation.
    fn kind(&self) -> PassKind;

    /// Run the pass.
    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()>;

    /// Whether the pass applies in the current state. Defaults to `true`.
    fn should_run(&self, _circuit: &Circuit, _properties: &PropertySet) -> bool {
        true
    }
}
