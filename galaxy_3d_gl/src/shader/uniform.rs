/// Uniform values and type-dispatched setters

use std::fmt;

use crate::context::{GraphicsContext, UniformLocation};
use crate::error::{Error, Result};
use crate::shader::GlslType;

// ===== VALUES =====

/// Value supplied for a uniform
///
/// Scalars are stored as `f64` and narrowed by the setter (truncated for
/// `int`). Vectors and matrices are flat `f32` sequences; matrices are
/// column-major.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Scalar(f64),
    Sequence(Vec<f32>),
}

impl fmt::Display for UniformValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniformValue::Scalar(value) => write!(f, "{}", value),
            UniformValue::Sequence(values) => write!(f, "{:?}", values),
        }
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        UniformValue::Scalar(value as f64)
    }
}

impl From<f64> for UniformValue {
    fn from(value: f64) -> Self {
        UniformValue::Scalar(value)
    }
}

impl From<i32> for UniformValue {
    fn from(value: i32) -> Self {
        UniformValue::Scalar(value as f64)
    }
}

impl From<u32> for UniformValue {
    fn from(value: u32) -> Self {
        UniformValue::Scalar(value as f64)
    }
}

impl From<Vec<f32>> for UniformValue {
    fn from(values: Vec<f32>) -> Self {
        UniformValue::Sequence(values)
    }
}

impl From<&[f32]> for UniformValue {
    fn from(values: &[f32]) -> Self {
        UniformValue::Sequence(values.to_vec())
    }
}

impl<const N: usize> From<[f32; N]> for UniformValue {
    fn from(values: [f32; N]) -> Self {
        UniformValue::Sequence(values.to_vec())
    }
}

impl From<glam::Vec2> for UniformValue {
    fn from(value: glam::Vec2) -> Self {
        UniformValue::Sequence(value.to_array().to_vec())
    }
}

impl From<glam::Vec3> for UniformValue {
    fn from(value: glam::Vec3) -> Self {
        UniformValue::Sequence(value.to_array().to_vec())
    }
}

impl From<glam::Vec4> for UniformValue {
    fn from(value: glam::Vec4) -> Self {
        UniformValue::Sequence(value.to_array().to_vec())
    }
}

impl From<glam::Mat4> for UniformValue {
    fn from(value: glam::Mat4) -> Self {
        UniformValue::Sequence(value.to_cols_array().to_vec())
    }
}

impl From<&[glam::Mat4]> for UniformValue {
    fn from(values: &[glam::Mat4]) -> Self {
        UniformValue::Sequence(bytemuck::cast_slice::<glam::Mat4, f32>(values).to_vec())
    }
}

// ===== SETTERS =====

/// Setter selected for a (declared type, value) pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformSetter<'a> {
    Int(i32),
    Float(f32),
    FloatArray(&'a [f32]),
    Vec2(&'a [f32]),
    Vec3(&'a [f32]),
    Vec4(&'a [f32]),
    Mat4(&'a [f32]),
}

impl<'a> UniformSetter<'a> {
    /// Pick the setter for `value` assigned to a uniform declared as `glsl_type`
    ///
    /// # Errors
    ///
    /// - `Error::UnsupportedUniform` if no setter handles the pair
    /// - `Error::UniformLength` if a vector/matrix sequence is empty or not a
    ///   multiple of the component count
    pub fn select(name: &str, glsl_type: &GlslType, value: &'a UniformValue) -> Result<Self> {
        let setter = match (glsl_type, value) {
            (GlslType::Int, UniformValue::Scalar(v)) => UniformSetter::Int(*v as i32),
            (GlslType::Float, UniformValue::Scalar(v)) => UniformSetter::Float(*v as f32),
            (GlslType::Float, UniformValue::Sequence(v)) => UniformSetter::FloatArray(v),
            (GlslType::Vec2, UniformValue::Sequence(v)) => UniformSetter::Vec2(check_length(name, v, 2)?),
            (GlslType::Vec3, UniformValue::Sequence(v)) => UniformSetter::Vec3(check_length(name, v, 3)?),
            (GlslType::Vec4, UniformValue::Sequence(v)) => UniformSetter::Vec4(check_length(name, v, 4)?),
            (GlslType::Mat4, UniformValue::Sequence(v)) => UniformSetter::Mat4(check_length(name, v, 16)?),
            (glsl_type, value) => {
                return Err(Error::UnsupportedUniform {
                    name: name.to_string(),
                    glsl_type: glsl_type.as_str().to_string(),
                    value: value.to_string(),
                });
            }
        };
        Ok(setter)
    }

    /// Issue the setter call
    pub fn apply(&self, context: &dyn GraphicsContext, location: UniformLocation) {
        match *self {
            UniformSetter::Int(v) => context.uniform_1_i32(location, v),
            UniformSetter::Float(v) => context.uniform_1_f32(location, v),
            UniformSetter::FloatArray(v) => context.uniform_1_f32_slice(location, v),
            UniformSetter::Vec2(v) => context.uniform_2_f32_slice(location, v),
            UniformSetter::Vec3(v) => context.uniform_3_f32_slice(location, v),
            UniformSetter::Vec4(v) => context.uniform_4_f32_slice(location, v),
            UniformSetter::Mat4(v) => context.uniform_matrix_4_f32_slice(location, false, v),
        }
    }
}

fn check_length<'a>(name: &str, values: &'a [f32], components: usize) -> Result<&'a [f32]> {
    if values.is_empty() || values.len() % components != 0 {
        return Err(Error::UniformLength {
            name: name.to_string(),
            components,
            len: values.len(),
        });
    }
    Ok(values)
}

#[cfg(test)]
#[path = "uniform_tests.rs"]
mod tests;
