//! Shader pipeline
//!
//! Source preprocessing, declaration-based reflection, uniform setter
//! dispatch and the `ShaderProgram` pass/draw state machine.

pub mod preprocessor;
pub mod reflection;
pub mod uniform;
pub mod program;

pub use preprocessor::preprocess;
pub use reflection::{
    reflect, strip_comments, check_generation, scan_attributes, scan_uniforms,
    GlslType, ShaderVariable, AttributeInfo, UniformInfo, Declaration, ProgramReflection,
};
pub use uniform::{UniformValue, UniformSetter};
pub use program::{ShaderProgram, ProgramDesc, PassBindings, DrawState, IndexBinding};
