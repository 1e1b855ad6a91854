//! Entry-Point Functions
//!
//! A [`Function`] is the hardware-agnostic description of a stage's entry
//! point: its stage-interface inputs and outputs plus an opaque body of
//! statements that writers emit verbatim.

use serde::{Deserialize, Serialize};

use super::types::{ParameterType, Semantic};

/// A stage-interface variable (vertex attribute, varying or stage output).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShaderParameter {
    pub name: String,
    pub ty: ParameterType,
    pub semantic: Semantic,
    pub index: u32,
}

impl ShaderParameter {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: ParameterType, semantic: Semantic, index: u32) -> Self {
        Self {
            name: name.into(),
            ty,
            semantic,
            index,
        }
    }

    /// Whether both variables occupy the same interface slot.
    #[inline]
    #[must_use]
    pub fn same_slot(&self, other: &ShaderParameter) -> bool {
        self.semantic == other.semantic && self.index == other.index
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    name: String,
    description: String,
    inputs: Vec<ShaderParameter>,
    outputs: Vec<ShaderParameter>,
    body: Vec<String>,
}

impl Function {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn inputs(&self) -> &[ShaderParameter] {
        &self.inputs
    }

    #[must_use]
    pub fn outputs(&self) -> &[ShaderParameter] {
        &self.outputs
    }

    pub fn inputs_mut(&mut self) -> &mut Vec<ShaderParameter> {
        &mut self.inputs
    }

    pub fn outputs_mut(&mut self) -> &mut Vec<ShaderParameter> {
        &mut self.outputs
    }

    #[must_use]
    pub fn body(&self) -> &[String] {
        &self.body
    }

    /// Adds an input, or returns the existing input occupying the same slot.
    pub fn resolve_input(&mut self, param: ShaderParameter) -> &ShaderParameter {
        let pos = match self.inputs.iter().position(|p| p.same_slot(&param)) {
            Some(pos) => pos,
            None => {
                self.inputs.push(param);
                self.inputs.len() - 1
            }
        };
        &self.inputs[pos]
    }

    /// Adds an output, or returns the existing output occupying the same slot.
    pub fn resolve_output(&mut self, param: ShaderParameter) -> &ShaderParameter {
        let pos = match self.outputs.iter().position(|p| p.same_slot(&param)) {
            Some(pos) => pos,
            None => {
                self.outputs.push(param);
                self.outputs.len() - 1
            }
        };
        &self.outputs[pos]
    }

    pub fn push_statement(&mut self, statement: impl Into<String>) {
        self.body.push(statement.into());
    }

    /// Rebuilds this function's inputs so they mirror `other`'s outputs.
    ///
    /// Inputs come out in the order of `other`'s outputs. An existing input on
    /// the same slot keeps its name (the body may reference it) but takes the
    /// upstream type; slots the upstream stage does not write are added.
    /// Inputs with no upstream counterpart are kept after the mirrored ones.
    pub fn synchronize_input_params_to(&mut self, other: &Function) {
        let mut remaining = std::mem::take(&mut self.inputs);
        let mut synced = Vec::with_capacity(other.outputs.len() + remaining.len());

        for output in &other.outputs {
            match remaining.iter().position(|p| p.same_slot(output)) {
                Some(pos) => {
                    let mut input = remaining.remove(pos);
                    input.ty = output.ty;
                    synced.push(input);
                }
                None => synced.push(output.clone()),
            }
        }

        synced.extend(remaining);
        self.inputs = synced;
    }
}
