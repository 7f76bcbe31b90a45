//! Synthesizes GLSL ES 3.00 source text from a [`ShaderKey`]. The
//! generated pair reproduces the legacy fixed-function behaviour for the
//! exact feature combination the key encodes: the full per-vertex lighting
//! equation, per-format texture environment tables including COMBINE
//! arithmetic, fog, alpha test and user clip planes.

use crate::resources::TexFormat;
use crate::state::{CombineFunc, CombineOp, CombineSrc, Comparison, FogMode, ShadeModel, TexEnvMode};

use super::descriptor::{ShaderKey, TexUnitKey};

/// Uniform names are the contract between the generator and
/// `ProgramCache::sync_uniforms`; build them in one place.
pub fn light_uniform(index: usize, field: &str) -> String {
    format!("u_Light{}{}", index, field)
}

pub fn unit_uniform(index: usize, field: &str) -> String {
    format!("u_{}{}", field, index)
}

pub fn clip_plane_uniform(index: usize) -> String {
    format!("u_ClipPlane{}", index)
}

fn interp_qualifier(key: &ShaderKey) -> &'static str {
    match key.shade_model {
        ShadeModel::Flat => "flat ",
        ShadeModel::Smooth => "",
    }
}

pub fn vertex(key: &ShaderKey) -> String {
    let mut out = String::with_capacity(2048);
    let flat = interp_qualifier(key);

    out.push_str("#version 300 es\n\n");
    out.push_str("in vec4 a_Position;\n");
    if key.lighting {
        out.push_str("in vec3 a_Normal;\n");
    }
    if !key.lighting || key.color_material {
        out.push_str("in vec4 a_Color;\n");
    }
    for (i, _) in key.sampling_units() {
        out.push_str(&format!("in vec4 a_TexCoord{};\n", i));
    }
    if key.point_size_array {
        out.push_str("in float a_PointSize;\n");
    }

    out.push_str("\nuniform mat4 u_ModelView;\n");
    out.push_str("uniform mat4 u_Projection;\n");
    if key.lighting {
        out.push_str("uniform mat3 u_NormalMatrix;\n");
    }
    for (i, _) in key.sampling_units() {
        out.push_str(&format!("uniform mat4 {};\n", unit_uniform(i, "TexMatrix")));
    }
    if !key.point_size_array {
        out.push_str("uniform float u_PointSize;\n");
    }
    out.push_str("uniform vec3 u_PointAttenuation;\n");
    out.push_str("uniform vec2 u_PointSizeClamp;\n");

    if key.lighting {
        out.push_str("uniform vec4 u_SceneAmbient;\n");
        out.push_str("uniform vec4 u_MaterialAmbient;\n");
        out.push_str("uniform vec4 u_MaterialDiffuse;\n");
        out.push_str("uniform vec4 u_MaterialSpecular;\n");
        out.push_str("uniform vec4 u_MaterialEmission;\n");
        out.push_str("uniform float u_MaterialShininess;\n");

        for i in key.lights() {
            out.push_str(&format!("uniform vec4 {};\n", light_uniform(i, "Ambient")));
            out.push_str(&format!("uniform vec4 {};\n", light_uniform(i, "Diffuse")));
            out.push_str(&format!("uniform vec4 {};\n", light_uniform(i, "Specular")));
            out.push_str(&format!("uniform vec4 {};\n", light_uniform(i, "Position")));
            out.push_str(&format!(
                "uniform vec3 {};\n",
                light_uniform(i, "SpotDirection")
            ));
            out.push_str(&format!(
                "uniform float {};\n",
                light_uniform(i, "SpotExponent")
            ));
            out.push_str(&format!(
                "uniform float {};\n",
                light_uniform(i, "SpotCutoff")
            ));
            out.push_str(&format!(
                "uniform vec3 {};\n",
                light_uniform(i, "Attenuation")
            ));
        }
    }

    for i in key.clip_planes() {
        out.push_str(&format!("uniform vec4 {};\n", clip_plane_uniform(i)));
    }

    out.push('\n');
    out.push_str(&format!("{}out vec4 v_FrontColor;\n", flat));
    if key.lighting && key.two_sided {
        out.push_str(&format!("{}out vec4 v_BackColor;\n", flat));
    }
    for (i, _) in key.sampling_units() {
        out.push_str(&format!("out vec4 v_TexCoord{};\n", i));
    }
    if key.fog.is_some() {
        out.push_str("out float v_EyeDistance;\n");
    }
    for i in key.clip_planes() {
        out.push_str(&format!("out float v_ClipDistance{};\n", i));
    }

    if key.lighting {
        out.push_str("\nvec4 lit(vec3 n, vec3 eye, vec4 acm, vec4 dcm) {\n");
        out.push_str("    vec3 acc = u_MaterialEmission.rgb + acm.rgb * u_SceneAmbient.rgb;\n");
        for i in key.lights() {
            let pos = light_uniform(i, "Position");
            let att = light_uniform(i, "Attenuation");
            let cutoff = light_uniform(i, "SpotCutoff");
            out.push_str("    {\n");
            out.push_str(&format!(
                "        vec3 toLight = {}.xyz - eye * {}.w;\n",
                pos, pos
            ));
            out.push_str("        float dist = length(toLight);\n");
            out.push_str("        vec3 l = toLight / max(dist, 1e-6);\n");
            out.push_str("        float att = 1.0;\n");
            out.push_str(&format!("        if ({}.w != 0.0) {{\n", pos));
            out.push_str(&format!(
                "            att = 1.0 / ({}.x + {}.y * dist + {}.z * dist * dist);\n",
                att, att, att
            ));
            out.push_str("        }\n");
            out.push_str(&format!("        if ({} < 180.0) {{\n", cutoff));
            out.push_str(&format!(
                "            float sd = dot(-l, normalize({}));\n",
                light_uniform(i, "SpotDirection")
            ));
            out.push_str(&format!(
                "            att *= sd >= cos(radians({})) ? pow(max(sd, 0.0), {}) : 0.0;\n",
                cutoff,
                light_uniform(i, "SpotExponent")
            ));
            out.push_str("        }\n");
            out.push_str("        float ndotl = max(dot(n, l), 0.0);\n");
            out.push_str(&format!(
                "        vec3 contrib = acm.rgb * {}.rgb + ndotl * dcm.rgb * {}.rgb;\n",
                light_uniform(i, "Ambient"),
                light_uniform(i, "Diffuse")
            ));
            out.push_str("        if (ndotl > 0.0) {\n");
            out.push_str("            vec3 h = normalize(l + vec3(0.0, 0.0, 1.0));\n");
            out.push_str(&format!(
                "            contrib += pow(max(dot(n, h), 0.0), u_MaterialShininess) * u_MaterialSpecular.rgb * {}.rgb;\n",
                light_uniform(i, "Specular")
            ));
            out.push_str("        }\n");
            out.push_str("        acc += att * contrib;\n");
            out.push_str("    }\n");
        }
        out.push_str("    return vec4(acc, dcm.a);\n");
        out.push_str("}\n");
    }

    out.push_str("\nvoid main() {\n");
    out.push_str("    vec4 eye = u_ModelView * a_Position;\n");
    out.push_str("    gl_Position = u_Projection * eye;\n");

    for (i, _) in key.sampling_units() {
        out.push_str(&format!(
            "    v_TexCoord{} = {} * a_TexCoord{};\n",
            i,
            unit_uniform(i, "TexMatrix"),
            i
        ));
    }

    for i in key.clip_planes() {
        out.push_str(&format!(
            "    v_ClipDistance{} = dot(eye, {});\n",
            i,
            clip_plane_uniform(i)
        ));
    }

    if key.fog.is_some() {
        out.push_str("    v_EyeDistance = length(eye.xyz);\n");
    }

    if key.lighting {
        out.push_str("    vec3 n = u_NormalMatrix * a_Normal;\n");
        if key.normalize {
            out.push_str("    n = normalize(n);\n");
        }
        let (acm, dcm) = if key.color_material {
            ("a_Color", "a_Color")
        } else {
            ("u_MaterialAmbient", "u_MaterialDiffuse")
        };
        out.push_str(&format!(
            "    v_FrontColor = clamp(lit(n, eye.xyz, {}, {}), 0.0, 1.0);\n",
            acm, dcm
        ));
        if key.two_sided {
            out.push_str(&format!(
                "    v_BackColor = clamp(lit(-n, eye.xyz, {}, {}), 0.0, 1.0);\n",
                acm, dcm
            ));
        }
    } else {
        out.push_str("    v_FrontColor = a_Color;\n");
    }

    let size = if key.point_size_array {
        "a_PointSize"
    } else {
        "u_PointSize"
    };
    out.push_str("    float eyeDist = length(eye.xyz);\n");
    out.push_str(&format!(
        "    float pointSize = {} * inversesqrt(u_PointAttenuation.x + u_PointAttenuation.y * eyeDist + u_PointAttenuation.z * eyeDist * eyeDist);\n",
        size
    ));
    out.push_str("    gl_PointSize = clamp(pointSize, u_PointSizeClamp.x, u_PointSizeClamp.y);\n");
    out.push_str("}\n");

    out
}

pub fn fragment(key: &ShaderKey) -> String {
    let mut out = String::with_capacity(2048);
    let flat = interp_qualifier(key);

    out.push_str("#version 300 es\n");
    out.push_str("precision mediump float;\n\n");

    out.push_str(&format!("{}in vec4 v_FrontColor;\n", flat));
    if key.lighting && key.two_sided {
        out.push_str(&format!("{}in vec4 v_BackColor;\n", flat));
    }
    for (i, _) in key.sampling_units() {
        out.push_str(&format!("in vec4 v_TexCoord{};\n", i));
    }
    if key.fog.is_some() {
        out.push_str("in float v_EyeDistance;\n");
    }
    for i in key.clip_planes() {
        out.push_str(&format!("in float v_ClipDistance{};\n", i));
    }

    out.push('\n');
    for (i, unit) in key.sampling_units() {
        out.push_str(&format!(
            "uniform sampler2D {};\n",
            unit_uniform(i, "Sampler")
        ));
        out.push_str(&format!(
            "uniform vec4 {};\n",
            unit_uniform(i, "TexEnvColor")
        ));
        if unit.combine.is_some() {
            out.push_str(&format!(
                "uniform vec2 {};\n",
                unit_uniform(i, "TexEnvScale")
            ));
        }
    }
    if key.fog.is_some() {
        out.push_str("uniform vec4 u_FogColor;\n");
        // density, start, end
        out.push_str("uniform vec3 u_FogParams;\n");
    }
    if needs_alpha_ref(key) {
        out.push_str("uniform float u_AlphaRef;\n");
    }

    out.push_str("\nout vec4 o_FragColor;\n");

    out.push_str("\nvoid main() {\n");
    for i in key.clip_planes() {
        out.push_str(&format!(
            "    if (v_ClipDistance{} < 0.0) discard;\n",
            i
        ));
    }

    if key.lighting && key.two_sided {
        out.push_str("    vec4 color = gl_FrontFacing ? v_FrontColor : v_BackColor;\n");
    } else {
        out.push_str("    vec4 color = v_FrontColor;\n");
    }
    if key.sampling_units().next().is_some() {
        out.push_str("    vec4 primary = color;\n");
    }

    for (i, unit) in key.sampling_units() {
        out.push_str("    {\n");
        out.push_str(&format!(
            "        vec4 tex = textureProj({}, v_TexCoord{});\n",
            unit_uniform(i, "Sampler"),
            i
        ));
        push_env_mode(&mut out, i, unit);
        out.push_str("    }\n");
    }

    push_alpha_test(&mut out, key);
    push_fog(&mut out, key);

    out.push_str("    o_FragColor = color;\n");
    out.push_str("}\n");

    out
}

fn needs_alpha_ref(key: &ShaderKey) -> bool {
    match key.alpha_test {
        None | Some(Comparison::Never) | Some(Comparison::Always) => false,
        _ => true,
    }
}

/// The legacy env-mode function tables: which components of the sample
/// participate depends on both the mode and the base format.
fn push_env_mode(out: &mut String, index: usize, unit: &TexUnitKey) {
    use self::TexFormat::*;

    let env_color = unit_uniform(index, "TexEnvColor");

    match unit.mode {
        TexEnvMode::Replace => match unit.format {
            Alpha => out.push_str("        color.a = tex.a;\n"),
            Luminance | Rgb => out.push_str("        color.rgb = tex.rgb;\n"),
            LuminanceAlpha | Rgba => out.push_str("        color = tex;\n"),
        },
        TexEnvMode::Modulate => match unit.format {
            Alpha => out.push_str("        color.a *= tex.a;\n"),
            Luminance | Rgb => out.push_str("        color.rgb *= tex.rgb;\n"),
            LuminanceAlpha | Rgba => out.push_str("        color *= tex;\n"),
        },
        TexEnvMode::Decal => match unit.format {
            Rgb => out.push_str("        color.rgb = tex.rgb;\n"),
            Rgba => {
                out.push_str("        color.rgb = mix(color.rgb, tex.rgb, tex.a);\n");
            }
            // Undefined by the legacy spec for the remaining formats; the
            // fragment passes through unchanged.
            _ => {}
        },
        TexEnvMode::Blend => match unit.format {
            Alpha => out.push_str("        color.a *= tex.a;\n"),
            Luminance | Rgb => out.push_str(&format!(
                "        color.rgb = color.rgb * (vec3(1.0) - tex.rgb) + {}.rgb * tex.rgb;\n",
                env_color
            )),
            LuminanceAlpha | Rgba => {
                out.push_str(&format!(
                    "        color.rgb = color.rgb * (vec3(1.0) - tex.rgb) + {}.rgb * tex.rgb;\n",
                    env_color
                ));
                out.push_str("        color.a *= tex.a;\n");
            }
        },
        TexEnvMode::Add => match unit.format {
            Alpha => out.push_str("        color.a *= tex.a;\n"),
            Luminance | Rgb => out.push_str("        color.rgb += tex.rgb;\n"),
            LuminanceAlpha | Rgba => {
                out.push_str("        color.rgb += tex.rgb;\n");
                out.push_str("        color.a *= tex.a;\n");
            }
        },
        TexEnvMode::Combine => push_combine(out, index, unit),
    }
}

fn combine_source(src: CombineSrc, env_color: &str) -> String {
    match src {
        CombineSrc::Texture => "tex".into(),
        CombineSrc::Constant => env_color.into(),
        CombineSrc::PrimaryColor => "primary".into(),
        CombineSrc::Previous => "color".into(),
    }
}

fn combine_rgb_arg(src: CombineSrc, op: CombineOp, env_color: &str) -> String {
    let source = combine_source(src, env_color);
    match op {
        CombineOp::SrcColor => format!("{}.rgb", source),
        CombineOp::OneMinusSrcColor => format!("(vec3(1.0) - {}.rgb)", source),
        CombineOp::SrcAlpha => format!("vec3({}.a)", source),
        CombineOp::OneMinusSrcAlpha => format!("vec3(1.0 - {}.a)", source),
    }
}

fn combine_alpha_arg(src: CombineSrc, op: CombineOp, env_color: &str) -> String {
    let source = combine_source(src, env_color);
    match op {
        CombineOp::SrcAlpha => format!("{}.a", source),
        CombineOp::OneMinusSrcAlpha => format!("(1.0 - {}.a)", source),
        // RGB-only operands are rejected during validation.
        CombineOp::SrcColor | CombineOp::OneMinusSrcColor => unreachable!(),
    }
}

fn combine_expr(func: CombineFunc, args: &[String], vector: bool) -> String {
    let half = if vector { "vec3(0.5)" } else { "0.5" };
    let one = if vector { "vec3(1.0)" } else { "1.0" };

    match func {
        CombineFunc::Replace => args[0].clone(),
        CombineFunc::Modulate => format!("({} * {})", args[0], args[1]),
        CombineFunc::Add => format!("({} + {})", args[0], args[1]),
        CombineFunc::AddSigned => format!("({} + {} - {})", args[0], args[1], half),
        CombineFunc::Interpolate => format!(
            "({} * {} + {} * ({} - {}))",
            args[0], args[2], args[1], one, args[2]
        ),
        CombineFunc::Subtract => format!("({} - {})", args[0], args[1]),
        CombineFunc::Dot3Rgb | CombineFunc::Dot3Rgba => format!(
            "vec3(4.0 * dot({} - vec3(0.5), {} - vec3(0.5)))",
            args[0], args[1]
        ),
    }
}

fn push_combine(out: &mut String, index: usize, unit: &TexUnitKey) {
    let combine = unit
        .combine
        .as_ref()
        .expect("COMBINE mode carries its configuration");
    let env_color = unit_uniform(index, "TexEnvColor");
    let scale = unit_uniform(index, "TexEnvScale");

    let rgb_args: Vec<String> = (0..combine.rgb_func.arity())
        .map(|j| combine_rgb_arg(combine.rgb_src[j], combine.rgb_op[j], &env_color))
        .collect();
    let rgb = combine_expr(combine.rgb_func, &rgb_args, true);

    if combine.rgb_func == CombineFunc::Dot3Rgba {
        // DOT3_RGBA replicates the dot product into all four components
        // and ignores the alpha half entirely.
        out.push_str(&format!(
            "        float dotResult = 4.0 * dot({} - vec3(0.5), {} - vec3(0.5));\n",
            rgb_args[0], rgb_args[1]
        ));
        out.push_str(&format!(
            "        color = clamp(vec4(dotResult) * {}.x, 0.0, 1.0);\n",
            scale
        ));
        return;
    }

    let alpha_args: Vec<String> = (0..combine.alpha_func.arity())
        .map(|j| combine_alpha_arg(combine.alpha_src[j], combine.alpha_op[j], &env_color))
        .collect();
    let alpha = combine_expr(combine.alpha_func, &alpha_args, false);

    out.push_str(&format!(
        "        vec3 combinedRgb = clamp({} * {}.x, 0.0, 1.0);\n",
        rgb, scale
    ));
    out.push_str(&format!(
        "        float combinedAlpha = clamp({} * {}.y, 0.0, 1.0);\n",
        alpha, scale
    ));
    out.push_str("        color = vec4(combinedRgb, combinedAlpha);\n");
}

fn push_alpha_test(out: &mut String, key: &ShaderKey) {
    let func = match key.alpha_test {
        None => return,
        Some(v) => v,
    };

    match func {
        Comparison::Always => {}
        Comparison::Never => out.push_str("    discard;\n"),
        _ => {
            let op = match func {
                Comparison::Less => "<",
                Comparison::Equal => "==",
                Comparison::LessOrEqual => "<=",
                Comparison::Greater => ">",
                Comparison::NotEqual => "!=",
                Comparison::GreaterOrEqual => ">=",
                Comparison::Never | Comparison::Always => unreachable!(),
            };
            out.push_str(&format!(
                "    if (!(color.a {} u_AlphaRef)) discard;\n",
                op
            ));
        }
    }
}

fn push_fog(out: &mut String, key: &ShaderKey) {
    let mode = match key.fog {
        None => return,
        Some(v) => v,
    };

    match mode {
        FogMode::Exp => {
            out.push_str("    float fog = exp(-u_FogParams.x * v_EyeDistance);\n");
        }
        FogMode::Exp2 => {
            out.push_str("    float fogExp = u_FogParams.x * v_EyeDistance;\n");
            out.push_str("    float fog = exp(-fogExp * fogExp);\n");
        }
        FogMode::Linear => {
            out.push_str(
                "    float fog = (u_FogParams.z - v_EyeDistance) / (u_FogParams.z - u_FogParams.y);\n",
            );
        }
    }
    out.push_str("    fog = clamp(fog, 0.0, 1.0);\n");
    out.push_str("    color.rgb = mix(u_FogColor.rgb, color.rgb, fog);\n");
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::caps::{Capabilities, DeviceLimits};
    use crate::resources::ResourceGroup;
    use crate::shader::descriptor::ShaderKey;
    use crate::state::PipelineState;

    fn base_key() -> ShaderKey {
        let caps = Capabilities::from_limits(&DeviceLimits::default());
        let state = PipelineState::new(&caps);
        let resources = ResourceGroup::new();
        ShaderKey::derive(&state, &resources, &caps)
    }

    #[test]
    fn plain_key_generates_passthrough() {
        let key = base_key();
        let vs = vertex(&key);
        let fs = fragment(&key);

        assert!(vs.contains("u_Projection * eye"));
        assert!(vs.contains("v_FrontColor = a_Color;"));
        assert!(!vs.contains("u_NormalMatrix"));
        assert!(!fs.contains("textureProj"));
        assert!(!fs.contains("discard"));
    }

    #[test]
    fn lighting_key_unrolls_enabled_lights() {
        let mut key = base_key();
        key.lighting = true;
        key.light_mask = 0b101;

        let vs = vertex(&key);
        assert!(vs.contains("u_Light0Diffuse"));
        assert!(vs.contains("u_Light2Diffuse"));
        assert!(!vs.contains("u_Light1Diffuse"));
        assert!(vs.contains("u_MaterialShininess"));
    }

    #[test]
    fn fog_and_alpha_test_reach_the_fragment_stage() {
        let mut key = base_key();
        key.fog = Some(FogMode::Linear);
        key.alpha_test = Some(Comparison::Greater);

        let fs = fragment(&key);
        assert!(fs.contains("u_FogParams"));
        assert!(fs.contains("color.a > u_AlphaRef"));
    }
}
