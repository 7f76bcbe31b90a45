//! End-to-end scenarios of the emulated pipeline contract.

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

#[test]
fn fresh_context_defaults() {
    setup();

    let mut clear = [9.0f32; 4];
    api::get_floatv(COLOR_CLEAR_VALUE, &mut clear);
    assert_eq!(clear, [0.0, 0.0, 0.0, 0.0]);

    assert_eq!(integer(MATRIX_MODE) as GLenum, MODELVIEW);
    assert_eq!(integer(MODELVIEW_STACK_DEPTH), 1);
    assert_eq!(integer(PROJECTION_STACK_DEPTH), 1);
    assert_eq!(integer(TEXTURE_STACK_DEPTH), 1);

    let identity = [
        1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0f32,
    ];
    let mut matrix = [0.0f32; 16];
    api::get_floatv(MODELVIEW_MATRIX, &mut matrix);
    assert_eq!(matrix, identity);
    api::get_floatv(PROJECTION_MATRIX, &mut matrix);
    assert_eq!(matrix, identity);
    api::get_floatv(TEXTURE_MATRIX, &mut matrix);
    assert_eq!(matrix, identity);

    // Light 0 is white, the rest are black.
    let mut diffuse = [0.0f32; 4];
    api::get_lightfv(LIGHT0, DIFFUSE, &mut diffuse);
    assert_eq!(diffuse, [1.0, 1.0, 1.0, 1.0]);

    let lights = integer(MAX_LIGHTS);
    assert!(lights >= 8);
    for light in 1..lights as GLenum {
        api::get_lightfv(LIGHT0 + light, DIFFUSE, &mut diffuse);
        assert_eq!(diffuse, [0.0, 0.0, 0.0, 1.0]);
    }

    let mut color = [0.0f32; 4];
    api::get_floatv(CURRENT_COLOR, &mut color);
    assert_eq!(color, [1.0, 1.0, 1.0, 1.0]);
    let mut normal = [0.0f32; 3];
    api::get_floatv(CURRENT_NORMAL, &mut normal);
    assert_eq!(normal, [0.0, 0.0, 1.0]);

    assert_eq!(api::get_error(), NO_ERROR);
    fixie::terminate();
}

#[test]
fn gen_delete_gen_reuses_freed_names() {
    setup();

    let mut textures = [0; 3];
    api::gen_textures(3, &mut textures);
    for &t in &textures {
        assert_eq!(api::is_texture(t), GL_TRUE);
    }

    api::delete_textures(3, &textures);
    for &t in &textures {
        assert_eq!(api::is_texture(t), GL_FALSE);
    }

    let mut fresh = [0; 3];
    api::gen_textures(3, &mut fresh);
    assert!(fresh.iter().any(|name| textures.contains(name)));

    assert_eq!(api::get_error(), NO_ERROR);
    fixie::terminate();
}

#[test]
fn bad_enum_bind_leaves_bindings_untouched() {
    setup();

    let mut textures = [0];
    api::gen_textures(1, &mut textures);
    api::bind_texture(TEXTURE_2D, textures[0]);
    assert_eq!(integer(TEXTURE_BINDING_2D) as GLuint, textures[0]);

    api::bind_texture(0xBAD0, 0);
    assert_eq!(api::get_error(), INVALID_ENUM);
    assert_eq!(integer(TEXTURE_BINDING_2D) as GLuint, textures[0]);

    fixie::terminate();
}

#[test]
fn sticky_error_keeps_the_first() {
    setup();

    api::enable(0xFFFF);
    assert_eq!(api::get_error(), INVALID_ENUM);
    assert_eq!(api::get_error(), NO_ERROR);

    api::enable(0xFFFF);
    api::line_widthf(-1.0);
    // The second failure must not overwrite the first.
    assert_eq!(api::get_error(), INVALID_ENUM);
    assert_eq!(api::get_error(), NO_ERROR);

    fixie::terminate();
}

#[test]
fn failed_calls_have_no_side_effects() {
    setup();

    api::line_widthf(2.0);
    api::line_widthf(-3.0);
    assert_eq!(api::get_error(), INVALID_VALUE);

    let mut width = [0.0f32];
    api::get_floatv(LINE_WIDTH, &mut width);
    assert_eq!(width[0], 2.0);

    api::viewport(0, 0, -1, 100);
    assert_eq!(api::get_error(), INVALID_VALUE);

    fixie::terminate();
}

#[test]
fn strings_expose_the_embedded_profile() {
    setup();

    assert_eq!(api::get_string(VERSION), "OpenGL ES-CM 1.1");
    assert!(!api::get_string(VENDOR).is_empty());
    assert!(!api::get_string(RENDERER).is_empty());

    let extensions = api::get_string(EXTENSIONS);
    assert!(extensions.contains("GL_OES_framebuffer_object"));
    assert!(extensions.contains("GL_OES_vertex_array_object"));

    api::get_string(0x1234);
    assert_eq!(api::get_error(), INVALID_ENUM);

    fixie::terminate();
}

#[test]
fn entry_points_without_a_context_fall_back_benignly() {
    let _ = env_logger::try_init();
    assert!(fixie::make_current(None));

    assert_eq!(api::get_error(), NO_ERROR);
    assert_eq!(api::is_texture(1), GL_FALSE);
    assert_eq!(api::get_string(VERSION), "");
    api::enable(LIGHTING);
    api::push_matrix();
}

#[test]
fn shared_contexts_share_textures_but_not_state() {
    let _ = env_logger::try_init();

    let first = fixie::create_context(Box::new(HeadlessDevice::new()));
    let second = fixie::create_shared_context(Box::new(HeadlessDevice::new()), first)
        .expect("parent context is live");

    fixie::make_current(Some(first));
    let mut textures = [0];
    api::gen_textures(1, &mut textures);
    api::clear_colorf(1.0, 0.0, 0.0, 1.0);

    fixie::make_current(Some(second));
    // The texture namespace is shared...
    assert_eq!(api::is_texture(textures[0]), GL_TRUE);
    // ...but state is not.
    let mut clear = [9.0f32; 4];
    api::get_floatv(COLOR_CLEAR_VALUE, &mut clear);
    assert_eq!(clear, [0.0, 0.0, 0.0, 0.0]);

    // Unrelated contexts see a private namespace.
    let third = fixie::create_context(Box::new(HeadlessDevice::new()));
    fixie::make_current(Some(third));
    assert_eq!(api::is_texture(textures[0]), GL_FALSE);

    assert!(fixie::destroy_context(first));
    fixie::make_current(Some(second));
    assert_eq!(api::is_texture(textures[0]), GL_TRUE);

    fixie::terminate();
}

#[test]
fn destroying_the_current_context_deselects_it() {
    let id = setup();

    assert_eq!(fixie::current_context(), Some(id));
    assert!(fixie::destroy_context(id));
    assert_eq!(fixie::current_context(), None);
    assert!(!fixie::destroy_context(id));

    // Calls after destruction stay benign.
    api::clear(COLOR_BUFFER_BIT);
    assert_eq!(api::get_error(), NO_ERROR);
}

#[test]
fn debug_callback_observes_recorded_errors() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let id = setup();
    let seen: Rc<RefCell<Vec<ErrorCode>>> = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&seen);
    assert!(fixie::set_debug_callback(
        id,
        Some(Box::new(move |code, _| sink.borrow_mut().push(code))),
    ));

    api::enable(0xFFFF);
    api::line_widthf(-1.0);

    // Both failures are reported even though only the first sticks.
    assert_eq!(
        *seen.borrow(),
        vec![ErrorCode::InvalidEnum, ErrorCode::InvalidValue]
    );
    assert_eq!(api::get_error(), INVALID_ENUM);

    fixie::terminate();
}
