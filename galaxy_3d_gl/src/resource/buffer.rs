/// Vertex and index buffers
///
/// A `DataBuffer` holds one attribute stream (`components_per_vertex` scalars
/// per vertex) together with the topology it is meant to be drawn with. An
/// `IndexBuffer` holds element indices for indexed draws. Both upload their
/// data once at construction with static usage.

use std::rc::Rc;

use crate::context::{
    GraphicsContext, InstancedArrays, BufferId, BufferTarget, BufferUsage, ScalarType, Topology,
};
use crate::error::{Error, Result};
use crate::{engine_bail, engine_err, engine_trace};

const SOURCE: &str = "galaxy3d::gl::DataBuffer";

// ===== SCALAR TYPES =====

/// Element type accepted in a vertex buffer
pub trait VertexScalar: bytemuck::Pod {
    /// Matching API scalar type
    const SCALAR_TYPE: ScalarType;
}

/// Element type accepted in an index buffer (unsigned integers only)
pub trait IndexScalar: VertexScalar {}

macro_rules! impl_vertex_scalar {
    ($($ty:ty => $scalar:ident),* $(,)?) => {
        $(impl VertexScalar for $ty {
            const SCALAR_TYPE: ScalarType = ScalarType::$scalar;
        })*
    };
}

impl_vertex_scalar! {
    f32 => Float,
    i8 => Byte,
    u8 => UnsignedByte,
    i16 => Short,
    u16 => UnsignedShort,
    i32 => Int,
    u32 => UnsignedInt,
}

impl IndexScalar for u8 {}
impl IndexScalar for u16 {}
impl IndexScalar for u32 {}

// ===== DATA BUFFER =====

/// Attribute data buffer
pub struct DataBuffer {
    context: Rc<dyn GraphicsContext>,
    buffer: Option<BufferId>,
    vertex_count: u32,
    components_per_vertex: u32,
    scalar_type: ScalarType,
    topology: Topology,
    per_instance: bool,
    instancing: Option<Rc<dyn InstancedArrays>>,
}

impl DataBuffer {
    /// Create a per-vertex buffer and upload `data`
    ///
    /// # Arguments
    ///
    /// * `context` - Graphics context
    /// * `data` - Interleaved-free attribute data, `components_per_vertex` scalars per vertex
    /// * `components_per_vertex` - Number of scalars per vertex (1 to 4)
    /// * `topology` - Topology this buffer is drawn with
    ///
    /// # Errors
    ///
    /// - `Error::InvalidResource` if `components_per_vertex` is zero or does not divide `data.len()`
    /// - `Error::BackendError` if the native buffer cannot be created
    pub fn new<T: VertexScalar>(
        context: Rc<dyn GraphicsContext>,
        data: &[T],
        components_per_vertex: u32,
        topology: Topology,
    ) -> Result<Self> {
        Self::create(context, data, components_per_vertex, topology, false)
    }

    /// Create a buffer that advances once per instance instead of once per vertex
    ///
    /// # Errors
    ///
    /// Same as `new`, plus `Error::InitializationFailed` if the context has
    /// no instancing support.
    pub fn new_per_instance<T: VertexScalar>(
        context: Rc<dyn GraphicsContext>,
        data: &[T],
        components_per_vertex: u32,
        topology: Topology,
    ) -> Result<Self> {
        Self::create(context, data, components_per_vertex, topology, true)
    }

    fn create<T: VertexScalar>(
        context: Rc<dyn GraphicsContext>,
        data: &[T],
        components_per_vertex: u32,
        topology: Topology,
        per_instance: bool,
    ) -> Result<Self> {
        if components_per_vertex == 0 {
            engine_bail!(SOURCE, Error::InvalidResource(
                "components_per_vertex must be non-zero".to_string()
            ));
        }
        if data.len() % components_per_vertex as usize != 0 {
            engine_bail!(SOURCE, Error::InvalidResource(format!(
                "Data length {} is not a multiple of {} components per vertex",
                data.len(), components_per_vertex
            )));
        }

        let instancing = context.instanced_arrays();
        if per_instance && instancing.is_none() {
            engine_bail!(SOURCE, Error::InitializationFailed(
                "Per-instance buffer requires instanced arrays support".to_string()
            ));
        }

        let buffer = context.create_buffer()
            .map_err(|e| engine_err!(SOURCE, "Could not create data buffer: {}", e))?;
        context.bind_buffer(BufferTarget::Array, Some(buffer));
        context.buffer_data(BufferTarget::Array, bytemuck::cast_slice(data), BufferUsage::StaticDraw);

        let vertex_count = (data.len() / components_per_vertex as usize) as u32;
        engine_trace!(SOURCE, "Uploaded {} vertices ({} x {:?})",
            vertex_count, components_per_vertex, T::SCALAR_TYPE);

        Ok(Self {
            context,
            buffer: Some(buffer),
            vertex_count,
            components_per_vertex,
            scalar_type: T::SCALAR_TYPE,
            topology,
            per_instance,
            instancing,
        })
    }

    /// Attach this buffer to an attribute location of the current program
    ///
    /// Sets the vertex attribute pointer with a tightly packed stride and,
    /// when instancing is available, the step rate (1 per instance, 0 per vertex).
    pub fn bind_to_attribute(&self, location: u32) -> Result<()> {
        let buffer = self.handle()?;
        let ctx = &self.context;

        ctx.bind_buffer(BufferTarget::Array, Some(buffer));
        ctx.enable_vertex_attrib_array(location);
        ctx.vertex_attrib_pointer(
            location,
            self.components_per_vertex as i32,
            self.scalar_type,
            false,
            self.stride() as i32,
            0,
        );

        if let Some(instancing) = &self.instancing {
            instancing.vertex_attrib_divisor(location, if self.per_instance { 1 } else { 0 });
        }
        Ok(())
    }

    /// Release the native buffer (no-op when already deleted)
    pub fn delete(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.context.delete_buffer(buffer);
        }
    }

    fn handle(&self) -> Result<BufferId> {
        self.buffer.ok_or_else(|| engine_err!(SOURCE, Error::InvalidResource(
            "Data buffer has been deleted".to_string()
        )))
    }

    /// Number of vertices (or instances for a per-instance buffer)
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn components_per_vertex(&self) -> u32 {
        self.components_per_vertex
    }

    pub fn scalar_type(&self) -> ScalarType {
        self.scalar_type
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn is_per_instance(&self) -> bool {
        self.per_instance
    }

    /// Byte distance between two consecutive vertices
    pub fn stride(&self) -> u32 {
        self.components_per_vertex * self.scalar_type.size_bytes()
    }

    /// Native handle (None once deleted)
    pub fn id(&self) -> Option<BufferId> {
        self.buffer
    }
}

impl Drop for DataBuffer {
    fn drop(&mut self) {
        self.delete();
    }
}

// ===== INDEX BUFFER =====

/// Element index buffer
pub struct IndexBuffer {
    context: Rc<dyn GraphicsContext>,
    buffer: Option<BufferId>,
    element_count: u32,
    index_type: ScalarType,
    topology: Topology,
}

impl IndexBuffer {
    /// Create an index buffer and upload `indices`
    ///
    /// # Errors
    ///
    /// `Error::BackendError` if the native buffer cannot be created
    pub fn new<T: IndexScalar>(
        context: Rc<dyn GraphicsContext>,
        indices: &[T],
        topology: Topology,
    ) -> Result<Self> {
        let buffer = context.create_buffer()
            .map_err(|e| engine_err!("galaxy3d::gl::IndexBuffer", "Could not create index buffer: {}", e))?;
        context.bind_buffer(BufferTarget::ElementArray, Some(buffer));
        context.buffer_data(BufferTarget::ElementArray, bytemuck::cast_slice(indices), BufferUsage::StaticDraw);

        Ok(Self {
            context,
            buffer: Some(buffer),
            element_count: indices.len() as u32,
            index_type: T::SCALAR_TYPE,
            topology,
        })
    }

    /// Bind to the element array target for the next indexed draw
    pub fn bind(&self) -> Result<()> {
        let buffer = self.buffer.ok_or_else(|| engine_err!(
            "galaxy3d::gl::IndexBuffer",
            Error::InvalidResource("Index buffer has been deleted".to_string())
        ))?;
        self.context.bind_buffer(BufferTarget::ElementArray, Some(buffer));
        Ok(())
    }

    /// Release the native buffer (no-op when already deleted)
    pub fn delete(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.context.delete_buffer(buffer);
        }
    }

    pub fn element_count(&self) -> u32 {
        self.element_count
    }

    pub fn index_type(&self) -> ScalarType {
        self.index_type
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn id(&self) -> Option<BufferId> {
        self.buffer
    }
}

impl Drop for IndexBuffer {
    fn drop(&mut self) {
        self.delete();
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
