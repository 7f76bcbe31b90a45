extern crate env_logger;
extern crate fixie;

use fixie::prelude::*;

fn setup() -> ContextId {
    let _ = env_logger::try_init();
    let id = fixie::create_context(Box::new(HeadlessDevice::new()));
    assert!(fixie::make_current(Some(id)));
    id
}

#[test]
fn push_to_the_limit_then_overflow_exactly_once() {
    setup();

    let mut depth = [0];
    api::get_integerv(MAX_MODELVIEW_STACK_DEPTH, &mut depth);
    let max = depth[0];
    assert!(max >= 16);

    // The stack starts with one entry, so max - 1 pushes fit.
    for _ in 0..max - 1 {
        api::push_matrix();
        assert_eq!(api::get_error(), NO_ERROR);
    }

    let mut current = [0];
    api::get_integerv(MODELVIEW_STACK_DEPTH, &mut current);
    assert_eq!(current[0], max);

    api::push_matrix();
    assert_eq!(api::get_error(), STACK_OVERFLOW);
    // Reported exactly once.
    assert_eq!(api::get_error(), NO_ERROR);

    api::get_integerv(MODELVIEW_STACK_DEPTH, &mut current);
    assert_eq!(current[0], max);

    fixie::terminate();
}

#[test]
fn pop_on_bottom_underflows_and_preserves_the_top() {
    setup();

    api::translatef(1.0, 2.0, 3.0);
    let mut before = [0.0f32; 16];
    api::get_floatv(MODELVIEW_MATRIX, &mut before);

    api::pop_matrix();
    assert_eq!(api::get_error(), STACK_UNDERFLOW);

    let mut after = [0.0f32; 16];
    api::get_floatv(MODELVIEW_MATRIX, &mut after);
    assert_eq!(before, after);

    fixie::terminate();
}

#[test]
fn texture_stacks_are_per_unit() {
    setup();

    api::matrix_mode(TEXTURE);
    api::active_texture(TEXTURE1);
    api::translatef(0.5, 0.0, 0.0);

    let mut unit1 = [0.0f32; 16];
    api::get_floatv(TEXTURE_MATRIX, &mut unit1);
    assert_eq!(unit1[12], 0.5);

    api::active_texture(TEXTURE0);
    let mut unit0 = [0.0f32; 16];
    api::get_floatv(TEXTURE_MATRIX, &mut unit0);
    assert_eq!(unit0[12], 0.0);

    assert_eq!(api::get_error(), NO_ERROR);
    fixie::terminate();
}

#[test]
fn frustum_rejects_degenerate_volumes() {
    setup();

    api::frustumf(-1.0, -1.0, -1.0, 1.0, 1.0, 10.0);
    assert_eq!(api::get_error(), INVALID_VALUE);

    api::frustumf(-1.0, 1.0, -1.0, 1.0, -1.0, 10.0);
    assert_eq!(api::get_error(), INVALID_VALUE);

    api::orthof(0.0, 0.0, -1.0, 1.0, -1.0, 1.0);
    assert_eq!(api::get_error(), INVALID_VALUE);

    fixie::terminate();
}
