//! The backend adapter: translates abstract draw/clear/resource operations
//! into device calls and selects shader programs through the cache.

use smallvec::SmallVec;

use crate::caps::{Capabilities, DeviceLimits};
use crate::errors::Result;
use crate::resources::ResourceGroup;
use crate::shader::{ProgramCache, ShaderKey};
use crate::state::{ArrayPointer, PipelineState, ScalarType};

use super::{AttributeBinding, AttributeSource, ClearFlags, Device, Primitive, RasterState};

/// Names the shader generator declares for the fixed attribute slots.
static TEXCOORD_ATTRIBUTES: [&str; 8] = [
    "a_TexCoord0",
    "a_TexCoord1",
    "a_TexCoord2",
    "a_TexCoord3",
    "a_TexCoord4",
    "a_TexCoord5",
    "a_TexCoord6",
    "a_TexCoord7",
];

/// The element range of one draw.
#[derive(Debug, Clone, Copy)]
pub enum DrawRange {
    Arrays {
        first: i32,
        count: i32,
    },
    Elements {
        buffer: u32,
        ty: ScalarType,
        offset: usize,
        count: i32,
    },
}

/// One adapter instance per context, owning the boxed device. The draw
/// sequence is: resolve the fingerprint, fetch or build its program, bind
/// it, sync uniforms, bind samplers, gather vertex attributes, apply the
/// raster state, issue the native draw.
pub struct Adapter {
    device: Box<dyn Device>,
}

impl Adapter {
    pub fn new(device: Box<dyn Device>) -> Self {
        Adapter { device }
    }

    #[inline]
    pub fn limits(&self) -> DeviceLimits {
        self.device.limits()
    }

    #[inline]
    pub fn device_mut(&mut self) -> &mut dyn Device {
        self.device.as_mut()
    }

    pub fn clear(&mut self, state: &PipelineState, flags: ClearFlags) -> Result<()> {
        self.device.apply_raster_state(&RasterState::from(state))?;

        let color = if flags.contains(ClearFlags::COLOR) {
            Some(state.color_buffer.clear_color)
        } else {
            None
        };
        let depth = if flags.contains(ClearFlags::DEPTH) {
            Some(state.depth_buffer.clear_depth)
        } else {
            None
        };
        let stencil = if flags.contains(ClearFlags::STENCIL) {
            Some(state.stencil_buffer.clear_stencil)
        } else {
            None
        };

        self.device.clear(color, depth, stencil)
    }

    pub fn draw(
        &mut self,
        state: &PipelineState,
        resources: &ResourceGroup,
        caps: &Capabilities,
        cache: &mut ProgramCache,
        primitive: Primitive,
        range: DrawRange,
    ) -> Result<()> {
        let key = ShaderKey::derive(state, resources, caps);
        let program = cache.get_or_build(&key, self.device.as_mut());

        self.device.bind_program(program)?;
        cache.sync_uniforms(program, &key, state, caps, self.device.as_mut())?;

        for (i, _) in key.sampling_units() {
            self.device.bind_texture(i, state.texture_units[i].binding)?;
        }

        let attributes = gather_attributes(state, &key);
        self.device.apply_raster_state(&RasterState::from(state))?;

        match range {
            DrawRange::Arrays { first, count } => {
                self.device
                    .draw_arrays(program, primitive, &attributes, first, count)
            }
            DrawRange::Elements {
                buffer,
                ty,
                offset,
                count,
            } => self.device.draw_elements(
                program,
                primitive,
                &attributes,
                buffer,
                ty,
                offset,
                count,
            ),
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        self.device.flush()
    }

    pub fn finish(&mut self) -> Result<()> {
        self.device.finish()
    }
}

fn array_source(pointer: &ArrayPointer, normalized: bool) -> AttributeSource {
    AttributeSource::Array {
        buffer: pointer.buffer,
        size: pointer.size,
        ty: pointer.ty,
        normalized,
        stride: pointer.stride,
        offset: pointer.offset,
    }
}

/// Integer arrays are normalized exactly where the legacy pipeline fixes
/// it: always for colors and normals, never for positions, texture
/// coordinates or point sizes.
fn integer_normalized(ty: ScalarType) -> bool {
    match ty {
        ScalarType::Float | ScalarType::Fixed => false,
        _ => true,
    }
}

fn gather_attributes(state: &PipelineState, key: &ShaderKey) -> SmallVec<[AttributeBinding; 8]> {
    let arrays = &state.arrays;
    let mut attributes = SmallVec::new();

    attributes.push(AttributeBinding {
        name: "a_Position",
        source: array_source(&arrays.vertex, false),
    });

    if key.lighting {
        let source = if arrays.normal.enabled && arrays.normal.buffer != 0 {
            array_source(&arrays.normal, integer_normalized(arrays.normal.ty))
        } else {
            let n = state.current.normal;
            AttributeSource::Constant([n[0], n[1], n[2], 0.0])
        };
        attributes.push(AttributeBinding {
            name: "a_Normal",
            source,
        });
    }

    if !key.lighting || key.color_material {
        let source = if arrays.color.enabled && arrays.color.buffer != 0 {
            array_source(&arrays.color, integer_normalized(arrays.color.ty))
        } else {
            AttributeSource::Constant(state.current.color)
        };
        attributes.push(AttributeBinding {
            name: "a_Color",
            source,
        });
    }

    for (i, _) in key.sampling_units() {
        let pointer = &arrays.tex_coords[i];
        let source = if pointer.enabled && pointer.buffer != 0 {
            array_source(pointer, false)
        } else {
            AttributeSource::Constant(state.current.tex_coords[i])
        };
        attributes.push(AttributeBinding {
            name: TEXCOORD_ATTRIBUTES[i],
            source,
        });
    }

    if key.point_size_array {
        attributes.push(AttributeBinding {
            name: "a_PointSize",
            source: array_source(&arrays.point_size, false),
        });
    }

    attributes
}
