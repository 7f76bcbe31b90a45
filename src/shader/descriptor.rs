//! The shader fingerprint: a minimal projection of the pipeline state onto
//! exactly the fields that influence synthesized shader text.
//!
//! Two states that disagree only in numeric values (matrix entries,
//! colors, scales) but agree on this reduced field set map to the same
//! key, and therefore to the same cached program.

use smallvec::SmallVec;

use crate::caps::Capabilities;
use crate::resources::{ResourceGroup, TexFormat};
use crate::state::{
    CombineFunc, CombineOp, CombineSrc, Comparison, FogMode, PipelineState, ShadeModel, TexEnvMode,
};

/// The code-selecting half of a unit's COMBINE configuration; the scales
/// are numeric and travel as uniforms instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CombineKey {
    pub rgb_func: CombineFunc,
    pub alpha_func: CombineFunc,
    pub rgb_src: [CombineSrc; 3],
    pub alpha_src: [CombineSrc; 3],
    pub rgb_op: [CombineOp; 3],
    pub alpha_op: [CombineOp; 3],
}

/// One texture unit as the generator sees it. `format` is the base format
/// of the bound texture's level 0 image, which selects the env-mode code
/// path of the legacy function tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TexUnitKey {
    pub mode: TexEnvMode,
    pub format: TexFormat,
    pub combine: Option<CombineKey>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShaderKey {
    pub shade_model: ShadeModel,
    pub lighting: bool,
    pub two_sided: bool,
    pub color_material: bool,
    pub normalize: bool,
    /// Bit `i` set when light `i` is enabled.
    pub light_mask: u32,
    /// Bit `i` set when clip plane `i` is enabled.
    pub clip_mask: u32,
    /// Present exactly when fog is enabled.
    pub fog: Option<FogMode>,
    /// Present exactly when the alpha test is enabled.
    pub alpha_test: Option<Comparison>,
    pub point_size_array: bool,
    /// One entry per texture unit; `None` when the unit does not sample.
    pub units: SmallVec<[Option<TexUnitKey>; 4]>,
}

impl ShaderKey {
    /// Pure, deterministic, total projection of the current configuration.
    /// The resource group participates only through the base format of the
    /// textures bound to enabled units.
    pub fn derive(
        state: &PipelineState,
        resources: &ResourceGroup,
        caps: &Capabilities,
    ) -> ShaderKey {
        let lighting = &state.lighting;

        let mut light_mask = 0u32;
        for (i, light) in lighting.lights.iter().enumerate() {
            if light.enabled {
                light_mask |= 1 << i;
            }
        }

        let mut clip_mask = 0u32;
        for (i, plane) in state.clip_planes.iter().enumerate() {
            if plane.enabled {
                clip_mask |= 1 << i;
            }
        }

        let units = state
            .texture_units
            .iter()
            .map(|unit| {
                if !unit.enabled || unit.binding == 0 {
                    return None;
                }

                // An incomplete texture never samples; treat the unit as
                // disabled rather than synthesizing a dead lookup.
                let texture = resources.textures.get(unit.binding)?;
                if !texture.is_complete() {
                    return None;
                }

                let combine = if unit.env.mode == TexEnvMode::Combine {
                    let c = &unit.env.combine;
                    Some(CombineKey {
                        rgb_func: c.rgb_func,
                        alpha_func: c.alpha_func,
                        rgb_src: c.rgb_src,
                        alpha_src: c.alpha_src,
                        rgb_op: c.rgb_op,
                        alpha_op: c.alpha_op,
                    })
                } else {
                    None
                };

                Some(TexUnitKey {
                    mode: unit.env.mode,
                    format: texture.base_format()?,
                    combine,
                })
            })
            .collect();

        debug_assert!(caps.max_lights <= 32 && caps.max_clip_planes <= 32);

        ShaderKey {
            shade_model: lighting.shade_model,
            lighting: lighting.enabled,
            two_sided: lighting.two_sided,
            color_material: lighting.color_material,
            normalize: lighting.normalize || lighting.rescale_normal,
            light_mask,
            clip_mask,
            fog: if state.fog.enabled {
                Some(state.fog.mode)
            } else {
                None
            },
            alpha_test: if state.alpha_test.enabled {
                Some(state.alpha_test.func)
            } else {
                None
            },
            point_size_array: state.arrays.point_size.enabled,
            units,
        }
    }

    /// Indices of the enabled lights, in order.
    pub fn lights(&self) -> impl Iterator<Item = usize> + '_ {
        let mask = self.light_mask;
        (0..32).filter(move |i| mask & (1 << i) != 0)
    }

    /// Indices of the enabled clip planes, in order.
    pub fn clip_planes(&self) -> impl Iterator<Item = usize> + '_ {
        let mask = self.clip_mask;
        (0..32).filter(move |i| mask & (1 << i) != 0)
    }

    /// Indices of the sampling texture units paired with their keys.
    pub fn sampling_units(&self) -> impl Iterator<Item = (usize, &TexUnitKey)> {
        self.units
            .iter()
            .enumerate()
            .filter_map(|(i, unit)| unit.as_ref().map(|key| (i, key)))
    }
}
