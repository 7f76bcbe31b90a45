//! Lighting model state: shade model, materials and the per-light
//! parameter blocks that feed the synthesized vertex-stage equation.

use crate::api::types::*;
use crate::caps::Capabilities;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadeModel {
    Flat,
    Smooth,
}

impl ShadeModel {
    pub fn from_gl(v: GLenum) -> Option<ShadeModel> {
        match v {
            FLAT => Some(ShadeModel::Flat),
            SMOOTH => Some(ShadeModel::Smooth),
            _ => None,
        }
    }

    pub fn as_gl(self) -> GLenum {
        match self {
            ShadeModel::Flat => FLAT,
            ShadeModel::Smooth => SMOOTH,
        }
    }
}

/// Surface material. The legacy API updates front and back together
/// (`FRONT_AND_BACK` is the only accepted face), so one block suffices.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub emission: [f32; 4],
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Material {
            ambient: [0.2, 0.2, 0.2, 1.0],
            diffuse: [0.8, 0.8, 0.8, 1.0],
            specular: [0.0, 0.0, 0.0, 1.0],
            emission: [0.0, 0.0, 0.0, 1.0],
            shininess: 0.0,
        }
    }
}

/// One light source. `position` is stored in eye coordinates (transformed
/// by the modelview top at specification time, as the legacy spec rules);
/// `w == 0` marks a directional light.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub enabled: bool,
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub position: [f32; 4],
    pub spot_direction: [f32; 3],
    pub spot_exponent: f32,
    pub spot_cutoff: f32,
    pub attenuation: [f32; 3],
}

impl Light {
    /// Defaults for light `index`; only light 0 defaults to white diffuse
    /// and specular.
    pub fn new(index: usize) -> Self {
        let chroma = if index == 0 {
            [1.0, 1.0, 1.0, 1.0]
        } else {
            [0.0, 0.0, 0.0, 1.0]
        };

        Light {
            enabled: false,
            ambient: [0.0, 0.0, 0.0, 1.0],
            diffuse: chroma,
            specular: chroma,
            position: [0.0, 0.0, 1.0, 0.0],
            spot_direction: [0.0, 0.0, -1.0],
            spot_exponent: 0.0,
            spot_cutoff: 180.0,
            attenuation: [1.0, 0.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightingState {
    pub enabled: bool,
    pub shade_model: ShadeModel,
    /// `COLOR_MATERIAL`: ambient and diffuse track the current color.
    pub color_material: bool,
    pub two_sided: bool,
    pub model_ambient: [f32; 4],
    pub normalize: bool,
    pub rescale_normal: bool,
    pub material: Material,
    pub lights: Vec<Light>,
}

impl LightingState {
    pub fn new(caps: &Capabilities) -> Self {
        LightingState {
            enabled: false,
            shade_model: ShadeModel::Smooth,
            color_material: false,
            two_sided: false,
            model_ambient: [0.2, 0.2, 0.2, 1.0],
            normalize: false,
            rescale_normal: false,
            material: Material::default(),
            lights: (0..caps.max_lights).map(Light::new).collect(),
        }
    }
}
