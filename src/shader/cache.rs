//! The structural program cache and the per-draw uniform sync.

use cgmath::{Matrix, Matrix3, SquareMatrix};

use crate::caps::Capabilities;
use crate::device::{Device, ProgramId, UniformValue};
use crate::errors::Result;
use crate::state::PipelineState;
use crate::utils::hash::FastHashMap;

use super::descriptor::ShaderKey;
use super::source;

/// Caches one compiled program per distinct [`ShaderKey`]. An entry, once
/// built, is never rebuilt for the same key value, and entries persist for
/// the lifetime of the owning context; the key space is bounded by what an
/// application actually toggles.
pub struct ProgramCache {
    programs: FastHashMap<ShaderKey, ProgramId>,
    next_id: ProgramId,
}

impl Default for ProgramCache {
    fn default() -> Self {
        ProgramCache::new()
    }
}

impl ProgramCache {
    pub fn new() -> Self {
        ProgramCache {
            programs: FastHashMap::default(),
            next_id: 1,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Looks the key up by structural equality; on a miss, synthesizes the
    /// source pair and compiles it through the device.
    ///
    /// The key-to-source mapping is implementation-controlled, not user
    /// input, so a compile or link failure is an internal defect: it is
    /// logged and escalated as a panic, never surfaced as a legacy error
    /// code.
    pub fn get_or_build(&mut self, key: &ShaderKey, device: &mut dyn Device) -> ProgramId {
        if let Some(&program) = self.programs.get(key) {
            return program;
        }

        let vs = source::vertex(key);
        let fs = source::fragment(key);

        let program = self.next_id;
        self.next_id += 1;

        if let Err(err) = device.create_program(program, &vs, &fs) {
            error!("synthesized program {} failed to compile: {}", program, err);
            panic!("internal defect: synthesized shader failed to compile/link: {}", err);
        }
        debug!(
            "synthesized program {} ({} lights, {} sampling units)",
            program,
            key.lights().count(),
            key.sampling_units().count()
        );

        self.programs.insert(key.clone(), program);
        program
    }

    /// Pushes the numeric half of the state (everything the fingerprint
    /// deliberately leaves out) into the bound program's uniform slots.
    /// Independent of compilation; called before every draw.
    pub fn sync_uniforms(
        &self,
        program: ProgramId,
        key: &ShaderKey,
        state: &PipelineState,
        caps: &Capabilities,
        device: &mut dyn Device,
    ) -> Result<()> {
        let modelview = *state.matrices.modelview.top();
        let projection = *state.matrices.projection.top();

        device.set_uniform(program, "u_ModelView", UniformValue::Matrix4(modelview.into()))?;
        device.set_uniform(
            program,
            "u_Projection",
            UniformValue::Matrix4(projection.into()),
        )?;

        if key.lighting {
            let m3 = Matrix3::from_cols(
                modelview.x.truncate(),
                modelview.y.truncate(),
                modelview.z.truncate(),
            );
            // Inverse-transpose where invertible; a singular modelview
            // falls back to the raw upper 3x3, matching native drivers.
            let normal = m3.invert().map(|inv| inv.transpose()).unwrap_or(m3);
            device.set_uniform(program, "u_NormalMatrix", UniformValue::Matrix3(normal.into()))?;

            let lighting = &state.lighting;
            let material = &lighting.material;
            device.set_uniform(
                program,
                "u_SceneAmbient",
                UniformValue::Vec4(lighting.model_ambient),
            )?;
            device.set_uniform(
                program,
                "u_MaterialAmbient",
                UniformValue::Vec4(material.ambient),
            )?;
            device.set_uniform(
                program,
                "u_MaterialDiffuse",
                UniformValue::Vec4(material.diffuse),
            )?;
            device.set_uniform(
                program,
                "u_MaterialSpecular",
                UniformValue::Vec4(material.specular),
            )?;
            device.set_uniform(
                program,
                "u_MaterialEmission",
                UniformValue::Vec4(material.emission),
            )?;
            device.set_uniform(
                program,
                "u_MaterialShininess",
                UniformValue::Float(material.shininess),
            )?;

            for i in key.lights() {
                let light = &lighting.lights[i];
                let set = |device: &mut dyn Device, field: &str, value: UniformValue| {
                    device.set_uniform(program, &source::light_uniform(i, field), value)
                };

                set(device, "Ambient", UniformValue::Vec4(light.ambient))?;
                set(device, "Diffuse", UniformValue::Vec4(light.diffuse))?;
                set(device, "Specular", UniformValue::Vec4(light.specular))?;
                set(device, "Position", UniformValue::Vec4(light.position))?;
                set(
                    device,
                    "SpotDirection",
                    UniformValue::Vec3(light.spot_direction),
                )?;
                set(
                    device,
                    "SpotExponent",
                    UniformValue::Float(light.spot_exponent),
                )?;
                set(device, "SpotCutoff", UniformValue::Float(light.spot_cutoff))?;
                set(device, "Attenuation", UniformValue::Vec3(light.attenuation))?;
            }
        }

        for (i, unit_key) in key.sampling_units() {
            let unit = &state.texture_units[i];
            let matrix = *state.matrices.texture[i].top();

            device.set_uniform(
                program,
                &source::unit_uniform(i, "Sampler"),
                UniformValue::Int(i as i32),
            )?;
            device.set_uniform(
                program,
                &source::unit_uniform(i, "TexMatrix"),
                UniformValue::Matrix4(matrix.into()),
            )?;
            device.set_uniform(
                program,
                &source::unit_uniform(i, "TexEnvColor"),
                UniformValue::Vec4(unit.env.color),
            )?;
            if unit_key.combine.is_some() {
                device.set_uniform(
                    program,
                    &source::unit_uniform(i, "TexEnvScale"),
                    UniformValue::Vec2([unit.env.combine.rgb_scale, unit.env.combine.alpha_scale]),
                )?;
            }
        }

        for i in key.clip_planes() {
            device.set_uniform(
                program,
                &source::clip_plane_uniform(i),
                UniformValue::Vec4(state.clip_planes[i].equation),
            )?;
        }

        if key.fog.is_some() {
            device.set_uniform(program, "u_FogColor", UniformValue::Vec4(state.fog.color))?;
            device.set_uniform(
                program,
                "u_FogParams",
                UniformValue::Vec3([state.fog.density, state.fog.start, state.fog.end]),
            )?;
        }

        match key.alpha_test {
            None | Some(crate::state::Comparison::Never) | Some(crate::state::Comparison::Always) => {}
            Some(_) => {
                device.set_uniform(
                    program,
                    "u_AlphaRef",
                    UniformValue::Float(state.alpha_test.reference.max(0.0).min(1.0)),
                )?;
            }
        }

        if !key.point_size_array {
            device.set_uniform(program, "u_PointSize", UniformValue::Float(state.point.size))?;
        }
        device.set_uniform(
            program,
            "u_PointAttenuation",
            UniformValue::Vec3(state.point.distance_attenuation),
        )?;
        device.set_uniform(
            program,
            "u_PointSizeClamp",
            UniformValue::Vec2([
                state.point.size_min,
                state.point.size_max.min(caps.point_size_range.1),
            ]),
        )?;

        Ok(())
    }
}
