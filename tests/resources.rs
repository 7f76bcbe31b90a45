//! Resource object semantics: create/bind/delete, delete-while-bound,
//! framebuffer completeness, vertex-array-set capture.

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
fn buffer_lifecycle() {
    setup();

    let mut buffers = [0; 2];
    api::gen_buffers(2, &mut buffers);
    assert!(buffers[0] != 0 && buffers[1] != 0);
    assert!(buffers[0] != buffers[1]);

    assert_eq!(api::is_buffer(buffers[0]), GL_TRUE);

    api::bind_buffer(ARRAY_BUFFER, buffers[0]);
    assert_eq!(integer(ARRAY_BUFFER_BINDING) as GLuint, buffers[0]);

    api::buffer_data(ARRAY_BUFFER, 64, None, DYNAMIC_DRAW);
    let mut size = [0];
    api::get_buffer_parameteriv(ARRAY_BUFFER, BUFFER_SIZE, &mut size);
    assert_eq!(size[0], 64);
    let mut usage = [0];
    api::get_buffer_parameteriv(ARRAY_BUFFER, BUFFER_USAGE, &mut usage);
    assert_eq!(usage[0] as GLenum, DYNAMIC_DRAW);

    api::buffer_sub_data(ARRAY_BUFFER, 32, &[0u8; 32]);
    assert_eq!(api::get_error(), NO_ERROR);

    // Out-of-range replacement leaves the store alone.
    api::buffer_sub_data(ARRAY_BUFFER, 48, &[0u8; 32]);
    assert_eq!(api::get_error(), INVALID_VALUE);

    // Deleting the bound buffer unbinds it.
    api::delete_buffers(2, &buffers);
    assert_eq!(integer(ARRAY_BUFFER_BINDING), 0);
    assert_eq!(api::is_buffer(buffers[0]), GL_FALSE);

    fixie::terminate();
}

#[test]
fn buffer_data_without_binding_is_an_operation_error() {
    setup();

    api::buffer_data(ARRAY_BUFFER, 16, None, STATIC_DRAW);
    assert_eq!(api::get_error(), INVALID_OPERATION);

    api::buffer_data(ARRAY_BUFFER, 16, None, 0xBEEF);
    assert_eq!(api::get_error(), INVALID_ENUM);

    fixie::terminate();
}

#[test]
fn binding_an_ungenerated_texture_name_creates_it() {
    setup();

    assert_eq!(api::is_texture(7), GL_FALSE);
    api::bind_texture(TEXTURE_2D, 7);
    assert_eq!(api::is_texture(7), GL_TRUE);
    assert_eq!(integer(TEXTURE_BINDING_2D), 7);

    // A later gen must not hand the conjured name out again.
    let mut fresh = [0; 8];
    api::gen_textures(8, &mut fresh);
    assert!(fresh.iter().all(|&t| t != 7));

    fixie::terminate();
}

#[test]
fn texture_upload_validation() {
    setup();

    let mut textures = [0];
    api::gen_textures(1, &mut textures);
    api::bind_texture(TEXTURE_2D, textures[0]);

    // internalformat must match format.
    api::tex_image_2d(TEXTURE_2D, 0, RGB as GLint, 4, 4, 0, RGBA, UNSIGNED_BYTE, None);
    assert_eq!(api::get_error(), INVALID_OPERATION);

    // Packed 16-bit types are format-specific.
    api::tex_image_2d(TEXTURE_2D, 0, RGB as GLint, 4, 4, 0, RGB, UNSIGNED_SHORT_4_4_4_4, None);
    assert_eq!(api::get_error(), INVALID_OPERATION);

    // Borders do not exist in the embedded profile.
    api::tex_image_2d(TEXTURE_2D, 0, RGBA as GLint, 4, 4, 1, RGBA, UNSIGNED_BYTE, None);
    assert_eq!(api::get_error(), INVALID_VALUE);

    // Non-power-of-two extents are rejected.
    api::tex_image_2d(TEXTURE_2D, 0, RGBA as GLint, 3, 4, 0, RGBA, UNSIGNED_BYTE, None);
    assert_eq!(api::get_error(), INVALID_VALUE);

    api::tex_image_2d(TEXTURE_2D, 0, RGBA as GLint, 4, 4, 0, RGBA, UNSIGNED_BYTE, None);
    assert_eq!(api::get_error(), NO_ERROR);

    // Sub-rectangles must stay inside the level image.
    api::tex_sub_image_2d(TEXTURE_2D, 0, 2, 2, 4, 4, RGBA, UNSIGNED_BYTE, &[0u8; 64]);
    assert_eq!(api::get_error(), INVALID_VALUE);

    api::tex_sub_image_2d(TEXTURE_2D, 0, 1, 1, 2, 2, RGBA, UNSIGNED_BYTE, &[0u8; 16]);
    assert_eq!(api::get_error(), NO_ERROR);

    fixie::terminate();
}

#[test]
fn renderbuffer_and_framebuffer_completeness() {
    setup();

    // The default framebuffer always reports complete.
    assert_eq!(api::check_framebuffer_status_oes(FRAMEBUFFER_OES), FRAMEBUFFER_COMPLETE_OES);

    let mut fbs = [0];
    api::gen_framebuffers_oes(1, &mut fbs);
    api::bind_framebuffer_oes(FRAMEBUFFER_OES, fbs[0]);
    assert_eq!(integer(FRAMEBUFFER_BINDING_OES) as GLuint, fbs[0]);

    assert_eq!(
        api::check_framebuffer_status_oes(FRAMEBUFFER_OES),
        FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT_OES
    );

    let mut rbs = [0; 2];
    api::gen_renderbuffers_oes(2, &mut rbs);
    api::bind_renderbuffer_oes(RENDERBUFFER_OES, rbs[0]);
    api::renderbuffer_storage_oes(RENDERBUFFER_OES, RGB565_OES, 64, 64);
    api::framebuffer_renderbuffer_oes(
        FRAMEBUFFER_OES,
        COLOR_ATTACHMENT0_OES,
        RENDERBUFFER_OES,
        rbs[0],
    );
    assert_eq!(
        api::check_framebuffer_status_oes(FRAMEBUFFER_OES),
        FRAMEBUFFER_COMPLETE_OES
    );

    // A depth attachment with mismatched dimensions breaks completeness.
    api::bind_renderbuffer_oes(RENDERBUFFER_OES, rbs[1]);
    api::renderbuffer_storage_oes(RENDERBUFFER_OES, DEPTH_COMPONENT16_OES, 32, 32);
    api::framebuffer_renderbuffer_oes(
        FRAMEBUFFER_OES,
        DEPTH_ATTACHMENT_OES,
        RENDERBUFFER_OES,
        rbs[1],
    );
    assert_eq!(
        api::check_framebuffer_status_oes(FRAMEBUFFER_OES),
        FRAMEBUFFER_INCOMPLETE_DIMENSIONS_OES
    );

    // A color-format renderbuffer on the depth point is incompatible.
    api::renderbuffer_storage_oes(RENDERBUFFER_OES, RGBA4_OES, 64, 64);
    assert_eq!(
        api::check_framebuffer_status_oes(FRAMEBUFFER_OES),
        FRAMEBUFFER_INCOMPLETE_ATTACHMENT_OES
    );

    // Clearing while incomplete is a framebuffer-operation error.
    api::clear(COLOR_BUFFER_BIT);
    assert_eq!(api::get_error(), INVALID_FRAMEBUFFER_OPERATION_OES);

    // Detach and recover.
    api::framebuffer_renderbuffer_oes(FRAMEBUFFER_OES, DEPTH_ATTACHMENT_OES, RENDERBUFFER_OES, 0);
    assert_eq!(
        api::check_framebuffer_status_oes(FRAMEBUFFER_OES),
        FRAMEBUFFER_COMPLETE_OES
    );

    let mut name = [0];
    api::get_framebuffer_attachment_parameteriv_oes(
        FRAMEBUFFER_OES,
        COLOR_ATTACHMENT0_OES,
        FRAMEBUFFER_ATTACHMENT_OBJECT_NAME_OES,
        &mut name,
    );
    assert_eq!(name[0] as GLuint, rbs[0]);

    // Deleting an attached renderbuffer detaches it everywhere.
    api::delete_renderbuffers_oes(1, &rbs[..1]);
    assert_eq!(
        api::check_framebuffer_status_oes(FRAMEBUFFER_OES),
        FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT_OES
    );

    assert_eq!(api::get_error(), NO_ERROR);
    fixie::terminate();
}

#[test]
fn framebuffer_texture_attachments() {
    setup();

    let mut textures = [0];
    api::gen_textures(1, &mut textures);
    api::bind_texture(TEXTURE_2D, textures[0]);
    api::tex_image_2d(TEXTURE_2D, 0, RGBA as GLint, 8, 8, 0, RGBA, UNSIGNED_BYTE, None);

    let mut fbs = [0];
    api::gen_framebuffers_oes(1, &mut fbs);
    api::bind_framebuffer_oes(FRAMEBUFFER_OES, fbs[0]);

    // Only level 0 may be attached.
    api::framebuffer_texture_2d_oes(FRAMEBUFFER_OES, COLOR_ATTACHMENT0_OES, TEXTURE_2D, textures[0], 1);
    assert_eq!(api::get_error(), INVALID_VALUE);

    api::framebuffer_texture_2d_oes(FRAMEBUFFER_OES, COLOR_ATTACHMENT0_OES, TEXTURE_2D, textures[0], 0);
    assert_eq!(
        api::check_framebuffer_status_oes(FRAMEBUFFER_OES),
        FRAMEBUFFER_COMPLETE_OES
    );

    // Textures cannot back the depth attachment point.
    api::framebuffer_texture_2d_oes(FRAMEBUFFER_OES, DEPTH_ATTACHMENT_OES, TEXTURE_2D, textures[0], 0);
    assert_eq!(
        api::check_framebuffer_status_oes(FRAMEBUFFER_OES),
        FRAMEBUFFER_INCOMPLETE_ATTACHMENT_OES
    );

    assert_eq!(api::get_error(), NO_ERROR);
    fixie::terminate();
}

#[test]
fn vertex_array_sets_capture_and_restore() {
    setup();

    let mut buffers = [0; 2];
    api::gen_buffers(2, &mut buffers);

    let mut sets = [0];
    api::gen_vertex_arrays_oes(1, &mut sets);

    // Configure the default set.
    api::bind_buffer(ARRAY_BUFFER, buffers[0]);
    api::vertex_pointer(3, FLOAT, 0, 0);
    api::enable_client_state(VERTEX_ARRAY);

    // Configure the named set differently.
    api::bind_vertex_array_oes(sets[0]);
    assert_eq!(integer(VERTEX_ARRAY_SIZE), 4);
    api::bind_buffer(ARRAY_BUFFER, buffers[1]);
    api::vertex_pointer(2, SHORT, 8, 16);
    assert_eq!(integer(VERTEX_ARRAY_SIZE), 2);
    assert_eq!(integer(VERTEX_ARRAY_TYPE) as GLenum, SHORT);

    // Swapping back restores the captured block.
    api::bind_vertex_array_oes(0);
    assert_eq!(integer(VERTEX_ARRAY_SIZE), 3);
    assert_eq!(integer(VERTEX_ARRAY_TYPE) as GLenum, FLOAT);
    assert_eq!(api::is_enabled(VERTEX_ARRAY), GL_TRUE);

    // And forward again.
    api::bind_vertex_array_oes(sets[0]);
    assert_eq!(integer(VERTEX_ARRAY_SIZE), 2);

    // Binding a never-generated name is an operation error.
    api::bind_vertex_array_oes(42);
    assert_eq!(api::get_error(), INVALID_OPERATION);

    // Deleting the bound set falls back to the default one.
    api::delete_vertex_arrays_oes(1, &sets);
    assert_eq!(integer(VERTEX_ARRAY_BINDING_OES), 0);
    assert_eq!(api::is_vertex_array_oes(sets[0]), GL_FALSE);
    assert_eq!(integer(VERTEX_ARRAY_SIZE), 3);

    assert_eq!(api::get_error(), NO_ERROR);
    fixie::terminate();
}

#[test]
fn fences_follow_the_queue() {
    setup();

    let mut fences = [0];
    api::gen_fences(1, &mut fences);
    assert_eq!(api::is_fence(fences[0]), GL_TRUE);

    api::set_fence(fences[0], ALL_COMPLETED_NV);
    assert_eq!(api::test_fence(fences[0]), GL_TRUE);

    api::set_fence(fences[0], ALL_COMPLETED_NV);
    api::finish_fence(fences[0]);
    assert_eq!(api::test_fence(fences[0]), GL_TRUE);

    api::set_fence(fences[0], 0xBAD);
    assert_eq!(api::get_error(), INVALID_ENUM);

    api::delete_fences(1, &fences);
    assert_eq!(api::is_fence(fences[0]), GL_FALSE);

    fixie::terminate();
}
