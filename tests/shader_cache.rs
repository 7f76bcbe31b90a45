//! Descriptor/cache identity: states agreeing on the reduced field set
//! share one compiled program; states differing in any reduced field get
//! their own.

extern crate env_logger;
extern crate fixie;

use std::cell::RefCell;
use std::rc::Rc;

use fixie::device::headless::HeadlessStats;
use fixie::prelude::*;

fn setup() -> Rc<RefCell<HeadlessStats>> {
    let _ = env_logger::try_init();
    let device = HeadlessDevice::new();
    let stats = device.stats();
    let id = fixie::create_context(Box::new(device));
    assert!(fixie::make_current(Some(id)));
    stats
}

/// A minimal buffer-backed triangle so draws actually reach the adapter.
fn setup_geometry() {
    let mut buffers = [0];
    api::gen_buffers(1, &mut buffers);
    api::bind_buffer(ARRAY_BUFFER, buffers[0]);

    let vertices = [0u8; 9 * 4];
    api::buffer_data(ARRAY_BUFFER, vertices.len() as GLsizeiptr, Some(&vertices), STATIC_DRAW);
    api::vertex_pointer(3, FLOAT, 0, 0);
    api::enable_client_state(VERTEX_ARRAY);
}

#[test]
fn numeric_changes_share_one_program() {
    let stats = setup();
    setup_geometry();

    api::draw_arrays(TRIANGLES, 0, 3);
    assert_eq!(stats.borrow().programs.len(), 1);

    // Numeric-only changes: matrices, colors, clear state.
    api::translatef(1.0, 2.0, 3.0);
    api::color4f(0.5, 0.5, 0.5, 1.0);
    api::clear_colorf(0.1, 0.1, 0.1, 1.0);
    api::draw_arrays(TRIANGLES, 0, 3);

    assert_eq!(stats.borrow().programs.len(), 1);
    assert_eq!(stats.borrow().draw_calls, 2);

    assert_eq!(api::get_error(), NO_ERROR);
    fixie::terminate();
}

#[test]
fn each_reduced_field_change_compiles_a_new_program() {
    let stats = setup();
    setup_geometry();

    api::draw_arrays(TRIANGLES, 0, 3);
    assert_eq!(stats.borrow().programs.len(), 1);

    api::enable(FOG);
    api::draw_arrays(TRIANGLES, 0, 3);
    assert_eq!(stats.borrow().programs.len(), 2);

    api::enable(LIGHTING);
    api::enable(LIGHT0);
    api::draw_arrays(TRIANGLES, 0, 3);
    assert_eq!(stats.borrow().programs.len(), 3);

    api::enable(LIGHT1);
    api::draw_arrays(TRIANGLES, 0, 3);
    assert_eq!(stats.borrow().programs.len(), 4);

    api::shade_model(FLAT);
    api::draw_arrays(TRIANGLES, 0, 3);
    assert_eq!(stats.borrow().programs.len(), 5);

    // Returning to an already seen combination hits the cache.
    api::shade_model(SMOOTH);
    api::draw_arrays(TRIANGLES, 0, 3);
    assert_eq!(stats.borrow().programs.len(), 5);

    assert_eq!(api::get_error(), NO_ERROR);
    fixie::terminate();
}

#[test]
fn lighting_program_carries_the_full_equation() {
    let stats = setup();
    setup_geometry();

    api::enable(LIGHTING);
    api::enable(LIGHT0);
    api::enable(LIGHT2);
    api::lightf(LIGHT2, SPOT_CUTOFF, 30.0);
    api::draw_arrays(TRIANGLES, 0, 3);

    let stats = stats.borrow();
    let (_, vs, _) = &stats.programs[0];
    assert!(vs.contains("u_Light0Diffuse"));
    assert!(vs.contains("u_Light2SpotCutoff"));
    assert!(!vs.contains("u_Light1Diffuse"));
    assert!(vs.contains("u_MaterialEmission"));
    assert!(vs.contains("u_SceneAmbient"));

    fixie::terminate();
}

#[test]
fn enabled_complete_texture_unit_reaches_the_fragment_stage() {
    let stats = setup();
    setup_geometry();

    let mut textures = [0];
    api::gen_textures(1, &mut textures);
    api::bind_texture(TEXTURE_2D, textures[0]);
    api::tex_parameteri(TEXTURE_2D, TEXTURE_MIN_FILTER, LINEAR as GLint);

    let texels = [255u8; 4 * 4 * 4];
    api::tex_image_2d(
        TEXTURE_2D,
        0,
        RGBA as GLint,
        4,
        4,
        0,
        RGBA,
        UNSIGNED_BYTE,
        Some(&texels),
    );
    assert_eq!(api::get_error(), NO_ERROR);

    // Unit enabled but the env untouched: MODULATE chaining.
    api::enable(TEXTURE_2D);
    api::draw_arrays(TRIANGLES, 0, 3);

    {
        let stats = stats.borrow();
        let (_, _, fs) = &stats.programs[0];
        assert!(fs.contains("textureProj(u_Sampler0, v_TexCoord0)"));
        assert!(fs.contains("color *= tex;"));
    }

    // Same state, same program; switching the env mode recompiles.
    api::draw_arrays(TRIANGLES, 0, 3);
    assert_eq!(stats.borrow().programs.len(), 1);

    api::tex_envi(TEXTURE_ENV, TEXTURE_ENV_MODE, COMBINE as GLint);
    api::tex_envi(TEXTURE_ENV, COMBINE_RGB, DOT3_RGB as GLint);
    api::draw_arrays(TRIANGLES, 0, 3);
    assert_eq!(stats.borrow().programs.len(), 2);

    {
        let stats = stats.borrow();
        let (_, _, fs) = &stats.programs[1];
        assert!(fs.contains("4.0 * dot("));
        assert!(fs.contains("u_TexEnvScale0"));
    }

    assert_eq!(api::get_error(), NO_ERROR);
    fixie::terminate();
}

#[test]
fn incomplete_textures_never_sample() {
    let stats = setup();
    setup_geometry();

    let mut textures = [0];
    api::gen_textures(1, &mut textures);
    api::bind_texture(TEXTURE_2D, textures[0]);
    // Default min filter needs mipmaps and only level 0 exists, so the
    // texture is incomplete and the unit must stay inert.
    let texels = [0u8; 4 * 4 * 4];
    api::tex_image_2d(TEXTURE_2D, 0, RGBA as GLint, 4, 4, 0, RGBA, UNSIGNED_BYTE, Some(&texels));
    api::enable(TEXTURE_2D);

    api::draw_arrays(TRIANGLES, 0, 3);
    let stats_ref = stats.borrow();
    let (_, _, fs) = &stats_ref.programs[0];
    assert!(!fs.contains("textureProj"));

    fixie::terminate();
}

#[test]
fn uniforms_sync_on_every_draw() {
    let stats = setup();
    setup_geometry();

    api::draw_arrays(TRIANGLES, 0, 3);
    let first = stats.borrow().uniforms_set;
    assert!(first > 0);

    api::draw_arrays(TRIANGLES, 0, 3);
    assert!(stats.borrow().uniforms_set >= first * 2);

    fixie::terminate();
}
