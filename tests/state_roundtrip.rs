//! Setting a state field and reading it back yields exactly the value
//! set, for every getter/setter pair the surface exposes.

extern crate env_logger;
extern crate fixie;

use fixie::prelude::*;

fn setup() -> ContextId {
    let _ = env_logger::try_init();
    let id = fixie::create_context(Box::new(HeadlessDevice::new()));
    assert!(fixie::make_current(Some(id)));
    id
}

fn integer(pname: GLenum) -> GLint {
    let mut out = [0];
    api::get_integerv(pname, &mut out);
    out[0]
}

fn float(pname: GLenum) -> GLfloat {
    let mut out = [0.0];
    api::get_floatv(pname, &mut out);
    out[0]
}

#[test]
fn color_and_depth_buffer_state() {
    setup();

    api::clear_colorf(0.1, 0.2, 0.3, 0.4);
    let mut color = [0.0f32; 4];
    api::get_floatv(COLOR_CLEAR_VALUE, &mut color);
    assert_eq!(color, [0.1, 0.2, 0.3, 0.4]);

    api::clear_depthf(0.25);
    assert_eq!(float(DEPTH_CLEAR_VALUE), 0.25);

    api::depth_func(GEQUAL);
    assert_eq!(integer(DEPTH_FUNC) as GLenum, GEQUAL);

    api::depth_mask(GL_FALSE);
    assert_eq!(integer(DEPTH_WRITEMASK), 0);

    api::color_mask(GL_TRUE, GL_FALSE, GL_TRUE, GL_FALSE);
    let mut mask = [0 as GLboolean; 4];
    api::get_booleanv(COLOR_WRITEMASK, &mut mask);
    assert_eq!(mask, [GL_TRUE, GL_FALSE, GL_TRUE, GL_FALSE]);

    api::blend_func(SRC_ALPHA, ONE_MINUS_SRC_ALPHA);
    assert_eq!(integer(BLEND_SRC) as GLenum, SRC_ALPHA);
    assert_eq!(integer(BLEND_DST) as GLenum, ONE_MINUS_SRC_ALPHA);

    assert_eq!(api::get_error(), NO_ERROR);
    fixie::terminate();
}

#[test]
fn stencil_and_alpha_state() {
    setup();

    api::stencil_func(EQUAL, 3, 0xF0);
    api::stencil_op(KEEP, INCR, REPLACE);
    api::stencil_mask(0x0F);
    api::clear_stencil(7);

    assert_eq!(integer(STENCIL_FUNC) as GLenum, EQUAL);
    assert_eq!(integer(STENCIL_REF), 3);
    assert_eq!(integer(STENCIL_VALUE_MASK), 0xF0);
    assert_eq!(integer(STENCIL_FAIL) as GLenum, KEEP);
    assert_eq!(integer(STENCIL_PASS_DEPTH_FAIL) as GLenum, INCR);
    assert_eq!(integer(STENCIL_PASS_DEPTH_PASS) as GLenum, REPLACE);
    assert_eq!(integer(STENCIL_WRITEMASK), 0x0F);
    assert_eq!(integer(STENCIL_CLEAR_VALUE), 7);

    api::alpha_funcf(GREATER, 0.5);
    assert_eq!(integer(ALPHA_TEST_FUNC) as GLenum, GREATER);
    assert_eq!(float(ALPHA_TEST_REF), 0.5);

    assert_eq!(api::get_error(), NO_ERROR);
    fixie::terminate();
}

#[test]
fn raster_and_viewport_state() {
    setup();

    api::viewport(10, 20, 300, 400);
    let mut vp = [0; 4];
    api::get_integerv(VIEWPORT, &mut vp);
    assert_eq!(vp, [10, 20, 300, 400]);

    api::scissor(1, 2, 3, 4);
    let mut sb = [0; 4];
    api::get_integerv(SCISSOR_BOX, &mut sb);
    assert_eq!(sb, [1, 2, 3, 4]);

    api::depth_rangef(0.1, 0.9);
    let mut range = [0.0f32; 2];
    api::get_floatv(DEPTH_RANGE, &mut range);
    assert_eq!(range, [0.1, 0.9]);

    api::line_widthf(2.0);
    assert_eq!(float(LINE_WIDTH), 2.0);

    api::point_sizef(4.0);
    assert_eq!(float(POINT_SIZE), 4.0);

    api::cull_face(FRONT);
    api::front_face(CW);
    assert_eq!(integer(CULL_FACE_MODE) as GLenum, FRONT);
    assert_eq!(integer(FRONT_FACE) as GLenum, CW);

    api::polygon_offsetf(1.5, 2.5);
    assert_eq!(float(POLYGON_OFFSET_FACTOR), 1.5);
    assert_eq!(float(POLYGON_OFFSET_UNITS), 2.5);

    assert_eq!(api::get_error(), NO_ERROR);
    fixie::terminate();
}

#[test]
fn fog_lighting_and_hints() {
    setup();

    api::fogf(FOG_MODE, LINEAR as GLfloat);
    api::fogf(FOG_DENSITY, 0.5);
    api::fogf(FOG_START, 1.0);
    api::fogf(FOG_END, 10.0);
    api::fogfv(FOG_COLOR, &[0.5, 0.25, 0.125, 1.0]);

    assert_eq!(integer(FOG_MODE) as GLenum, LINEAR);
    assert_eq!(float(FOG_DENSITY), 0.5);
    assert_eq!(float(FOG_START), 1.0);
    assert_eq!(float(FOG_END), 10.0);
    let mut fog_color = [0.0f32; 4];
    api::get_floatv(FOG_COLOR, &mut fog_color);
    assert_eq!(fog_color, [0.5, 0.25, 0.125, 1.0]);

    api::light_modelfv(LIGHT_MODEL_AMBIENT, &[0.3, 0.3, 0.3, 1.0]);
    let mut ambient = [0.0f32; 4];
    api::get_floatv(LIGHT_MODEL_AMBIENT, &mut ambient);
    assert_eq!(ambient, [0.3, 0.3, 0.3, 1.0]);

    api::lightfv(LIGHT2, DIFFUSE, &[0.9, 0.8, 0.7, 1.0]);
    let mut diffuse = [0.0f32; 4];
    api::get_lightfv(LIGHT2, DIFFUSE, &mut diffuse);
    assert_eq!(diffuse, [0.9, 0.8, 0.7, 1.0]);

    api::lightf(LIGHT0, SPOT_CUTOFF, 45.0);
    let mut cutoff = [0.0f32];
    api::get_lightfv(LIGHT0, SPOT_CUTOFF, &mut cutoff);
    assert_eq!(cutoff[0], 45.0);

    api::materialfv(FRONT_AND_BACK, SPECULAR, &[0.1, 0.2, 0.3, 1.0]);
    let mut specular = [0.0f32; 4];
    api::get_materialfv(FRONT, SPECULAR, &mut specular);
    assert_eq!(specular, [0.1, 0.2, 0.3, 1.0]);

    api::materialf(FRONT_AND_BACK, SHININESS, 32.0);
    let mut shininess = [0.0f32];
    api::get_materialfv(BACK, SHININESS, &mut shininess);
    assert_eq!(shininess[0], 32.0);

    api::hint(FOG_HINT, NICEST);
    assert_eq!(integer(FOG_HINT) as GLenum, NICEST);

    api::shade_model(FLAT);
    assert_eq!(integer(SHADE_MODEL) as GLenum, FLAT);

    assert_eq!(api::get_error(), NO_ERROR);
    fixie::terminate();
}

#[test]
fn clip_planes_roundtrip_through_an_identity_modelview() {
    setup();

    api::clip_planef(CLIP_PLANE0, &[0.0, 1.0, 0.0, 2.0]);
    let mut eqn = [0.0f32; 4];
    api::get_clip_planef(CLIP_PLANE0, &mut eqn);
    assert_eq!(eqn, [0.0, 1.0, 0.0, 2.0]);

    assert_eq!(api::get_error(), NO_ERROR);
    fixie::terminate();
}

#[test]
fn texture_environment_state() {
    setup();

    api::tex_envi(TEXTURE_ENV, TEXTURE_ENV_MODE, DECAL as GLint);
    let mut mode = [0];
    api::get_tex_enviv(TEXTURE_ENV, TEXTURE_ENV_MODE, &mut mode);
    assert_eq!(mode[0] as GLenum, DECAL);

    api::tex_envfv(TEXTURE_ENV, TEXTURE_ENV_COLOR, &[0.25, 0.5, 0.75, 1.0]);
    let mut color = [0.0f32; 4];
    api::get_tex_envfv(TEXTURE_ENV, TEXTURE_ENV_COLOR, &mut color);
    assert_eq!(color, [0.25, 0.5, 0.75, 1.0]);

    api::tex_envi(TEXTURE_ENV, COMBINE_RGB, INTERPOLATE as GLint);
    api::tex_envi(TEXTURE_ENV, SRC1_RGB, CONSTANT as GLint);
    api::tex_envi(TEXTURE_ENV, OPERAND2_RGB, ONE_MINUS_SRC_ALPHA as GLint);
    api::tex_envf(TEXTURE_ENV, RGB_SCALE, 2.0);

    let mut v = [0];
    api::get_tex_enviv(TEXTURE_ENV, COMBINE_RGB, &mut v);
    assert_eq!(v[0] as GLenum, INTERPOLATE);
    api::get_tex_enviv(TEXTURE_ENV, SRC1_RGB, &mut v);
    assert_eq!(v[0] as GLenum, CONSTANT);
    api::get_tex_enviv(TEXTURE_ENV, OPERAND2_RGB, &mut v);
    assert_eq!(v[0] as GLenum, ONE_MINUS_SRC_ALPHA);
    api::get_tex_enviv(TEXTURE_ENV, RGB_SCALE, &mut v);
    assert_eq!(v[0], 2);

    // Scales only accept 1, 2 and 4.
    api::tex_envf(TEXTURE_ENV, ALPHA_SCALE, 3.0);
    assert_eq!(api::get_error(), INVALID_VALUE);

    fixie::terminate();
}

#[test]
fn enable_flags_roundtrip() {
    setup();

    let caps = [
        ALPHA_TEST,
        BLEND,
        COLOR_LOGIC_OP,
        CULL_FACE,
        DEPTH_TEST,
        FOG,
        LIGHTING,
        LIGHT0,
        LIGHT3,
        NORMALIZE,
        POINT_SMOOTH,
        POLYGON_OFFSET_FILL,
        RESCALE_NORMAL,
        SCISSOR_TEST,
        STENCIL_TEST,
        TEXTURE_2D,
        CLIP_PLANE0,
    ];

    for &cap in caps.iter() {
        assert_eq!(api::is_enabled(cap), GL_FALSE, "cap 0x{:04X}", cap);
        api::enable(cap);
        assert_eq!(api::is_enabled(cap), GL_TRUE, "cap 0x{:04X}", cap);
        api::disable(cap);
        assert_eq!(api::is_enabled(cap), GL_FALSE, "cap 0x{:04X}", cap);
    }

    // Dither is the one capability that starts enabled.
    assert_eq!(api::is_enabled(DITHER), GL_TRUE);

    assert_eq!(api::get_error(), NO_ERROR);
    fixie::terminate();
}

#[test]
fn fixed_point_variants_share_the_float_bodies() {
    setup();

    api::clear_colorx(
        api::float_to_fixed(0.5),
        api::float_to_fixed(0.25),
        0,
        api::float_to_fixed(1.0),
    );
    let mut color = [0.0f32; 4];
    api::get_floatv(COLOR_CLEAR_VALUE, &mut color);
    assert_eq!(color, [0.5, 0.25, 0.0, 1.0]);

    api::fogx(FOG_MODE, EXP2 as GLfixed);
    let mut mode = [0];
    api::get_integerv(FOG_MODE, &mut mode);
    assert_eq!(mode[0] as GLenum, EXP2);

    api::line_widthx(api::float_to_fixed(3.0));
    let mut width = [0];
    api::get_fixedv(LINE_WIDTH, &mut width);
    assert_eq!(width[0], api::float_to_fixed(3.0));

    assert_eq!(api::get_error(), NO_ERROR);
    fixie::terminate();
}
