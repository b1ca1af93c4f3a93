/// Instanced arrays over glow
///
/// glow routes `vertex_attrib_divisor` and the instanced draws to the core
/// entry points on GLES 3 / WebGL 2 and to the extension ones on legacy
/// contexts, so both paths share one implementation. The extension name is
/// kept for logs.

use std::rc::Rc;

use galaxy_3d_gl::galaxy3d::context::{InstancedArrays, ScalarType, Topology};
use glow::HasContext;

use crate::glow_format::{scalar_type_to_gl, topology_to_gl};

/// Extensions exposing instanced arrays on legacy contexts, by preference
pub(crate) const INSTANCING_EXTENSIONS: [&str; 4] = [
    "ANGLE_instanced_arrays",
    "GL_ANGLE_instanced_arrays",
    "GL_EXT_instanced_arrays",
    "GL_ARB_instanced_arrays",
];

pub struct GlowInstancing {
    gl: Rc<glow::Context>,
    /// `None` when the entry points are core
    extension: Option<&'static str>,
}

impl GlowInstancing {
    pub(crate) fn native(gl: Rc<glow::Context>) -> Self {
        Self { gl, extension: None }
    }

    pub(crate) fn extension(gl: Rc<glow::Context>, name: &'static str) -> Self {
        Self { gl, extension: Some(name) }
    }

    /// Extension providing the entry points (None when core)
    pub fn extension_name(&self) -> Option<&'static str> {
        self.extension
    }
}

impl InstancedArrays for GlowInstancing {
    fn vertex_attrib_divisor(&self, location: u32, divisor: u32) {
        unsafe { self.gl.vertex_attrib_divisor(location, divisor) }
    }

    fn draw_arrays_instanced(&self, topology: Topology, first: i32, count: i32, instance_count: i32) {
        unsafe {
            self.gl.draw_arrays_instanced(topology_to_gl(topology), first, count, instance_count)
        }
    }

    fn draw_elements_instanced(
        &self,
        topology: Topology,
        count: i32,
        index_type: ScalarType,
        offset: i32,
        instance_count: i32,
    ) {
        unsafe {
            self.gl.draw_elements_instanced(
                topology_to_gl(topology),
                count,
                scalar_type_to_gl(index_type),
                offset,
                instance_count,
            )
        }
    }
}
