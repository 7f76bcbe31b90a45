//! Scalar type aliases and the enumerant table of the emulated API.
//!
//! Numeric values are bit-for-bit those of the OpenGL ES 1.1 specification
//! (plus the OES/NV extension tokens this crate implements); existing
//! callers depend on them verbatim.

#![allow(clippy::unreadable_literal)]

pub type GLenum = u32;
pub type GLboolean = u8;
pub type GLbitfield = u32;
pub type GLbyte = i8;
pub type GLshort = i16;
pub type GLint = i32;
pub type GLsizei = i32;
pub type GLubyte = u8;
pub type GLushort = u16;
pub type GLuint = u32;
pub type GLfloat = f32;
pub type GLclampf = f32;
pub type GLfixed = i32;
pub type GLclampx = i32;
pub type GLintptr = isize;
pub type GLsizeiptr = isize;

pub const GL_FALSE: GLboolean = 0;
pub const GL_TRUE: GLboolean = 1;
pub const NONE: GLenum = 0;

// Errors.
pub const NO_ERROR: GLenum = 0;
pub const INVALID_ENUM: GLenum = 0x0500;
pub const INVALID_VALUE: GLenum = 0x0501;
pub const INVALID_OPERATION: GLenum = 0x0502;
pub const STACK_OVERFLOW: GLenum = 0x0503;
pub const STACK_UNDERFLOW: GLenum = 0x0504;
pub const OUT_OF_MEMORY: GLenum = 0x0505;

// Clear mask bits.
pub const DEPTH_BUFFER_BIT: GLbitfield = 0x0000_0100;
pub const STENCIL_BUFFER_BIT: GLbitfield = 0x0000_0400;
pub const COLOR_BUFFER_BIT: GLbitfield = 0x0000_4000;

// Primitives.
pub const POINTS: GLenum = 0x0000;
pub const LINES: GLenum = 0x0001;
pub const LINE_LOOP: GLenum = 0x0002;
pub const LINE_STRIP: GLenum = 0x0003;
pub const TRIANGLES: GLenum = 0x0004;
pub const TRIANGLE_STRIP: GLenum = 0x0005;
pub const TRIANGLE_FAN: GLenum = 0x0006;

// Comparison functions.
pub const NEVER: GLenum = 0x0200;
pub const LESS: GLenum = 0x0201;
pub const EQUAL: GLenum = 0x0202;
pub const LEQUAL: GLenum = 0x0203;
pub const GREATER: GLenum = 0x0204;
pub const NOTEQUAL: GLenum = 0x0205;
pub const GEQUAL: GLenum = 0x0206;
pub const ALWAYS: GLenum = 0x0207;

// Blend factors.
pub const ZERO: GLenum = 0;
pub const ONE: GLenum = 1;
pub const SRC_COLOR: GLenum = 0x0300;
pub const ONE_MINUS_SRC_COLOR: GLenum = 0x0301;
pub const SRC_ALPHA: GLenum = 0x0302;
pub const ONE_MINUS_SRC_ALPHA: GLenum = 0x0303;
pub const DST_ALPHA: GLenum = 0x0304;
pub const ONE_MINUS_DST_ALPHA: GLenum = 0x0305;
pub const DST_COLOR: GLenum = 0x0306;
pub const ONE_MINUS_DST_COLOR: GLenum = 0x0307;
pub const SRC_ALPHA_SATURATE: GLenum = 0x0308;

// Faces and orientation.
pub const FRONT: GLenum = 0x0404;
pub const BACK: GLenum = 0x0405;
pub const FRONT_AND_BACK: GLenum = 0x0408;
pub const CW: GLenum = 0x0900;
pub const CCW: GLenum = 0x0901;

// Server-side capabilities.
pub const POINT_SMOOTH: GLenum = 0x0B10;
pub const LINE_SMOOTH: GLenum = 0x0B20;
pub const CULL_FACE: GLenum = 0x0B44;
pub const LIGHTING: GLenum = 0x0B50;
pub const COLOR_MATERIAL: GLenum = 0x0B57;
pub const FOG: GLenum = 0x0B60;
pub const DEPTH_TEST: GLenum = 0x0B71;
pub const STENCIL_TEST: GLenum = 0x0B90;
pub const NORMALIZE: GLenum = 0x0BA1;
pub const ALPHA_TEST: GLenum = 0x0BC0;
pub const DITHER: GLenum = 0x0BD0;
pub const BLEND: GLenum = 0x0BE2;
pub const COLOR_LOGIC_OP: GLenum = 0x0BF2;
pub const SCISSOR_TEST: GLenum = 0x0C11;
pub const TEXTURE_2D: GLenum = 0x0DE1;
pub const POLYGON_OFFSET_FILL: GLenum = 0x8037;
pub const RESCALE_NORMAL: GLenum = 0x803A;
pub const MULTISAMPLE: GLenum = 0x809D;
pub const SAMPLE_ALPHA_TO_COVERAGE: GLenum = 0x809E;
pub const SAMPLE_ALPHA_TO_ONE: GLenum = 0x809F;
pub const SAMPLE_COVERAGE: GLenum = 0x80A0;

// Client-side capabilities.
pub const VERTEX_ARRAY: GLenum = 0x8074;
pub const NORMAL_ARRAY: GLenum = 0x8075;
pub const COLOR_ARRAY: GLenum = 0x8076;
pub const TEXTURE_COORD_ARRAY: GLenum = 0x8078;
pub const POINT_SIZE_ARRAY_OES: GLenum = 0x8B9C;

// Simple-state queries.
pub const CURRENT_COLOR: GLenum = 0x0B00;
pub const CURRENT_NORMAL: GLenum = 0x0B02;
pub const CURRENT_TEXTURE_COORDS: GLenum = 0x0B03;
pub const POINT_SIZE: GLenum = 0x0B11;
pub const SMOOTH_POINT_SIZE_RANGE: GLenum = 0x0B12;
pub const LINE_WIDTH: GLenum = 0x0B21;
pub const SMOOTH_LINE_WIDTH_RANGE: GLenum = 0x0B22;
pub const CULL_FACE_MODE: GLenum = 0x0B45;
pub const FRONT_FACE: GLenum = 0x0B46;
pub const LIGHT_MODEL_TWO_SIDE: GLenum = 0x0B52;
pub const LIGHT_MODEL_AMBIENT: GLenum = 0x0B53;
pub const SHADE_MODEL: GLenum = 0x0B54;
pub const FOG_HINT: GLenum = 0x0C54;
pub const DEPTH_RANGE: GLenum = 0x0B70;
pub const DEPTH_WRITEMASK: GLenum = 0x0B72;
pub const DEPTH_CLEAR_VALUE: GLenum = 0x0B73;
pub const DEPTH_FUNC: GLenum = 0x0B74;
pub const STENCIL_CLEAR_VALUE: GLenum = 0x0B91;
pub const STENCIL_FUNC: GLenum = 0x0B92;
pub const STENCIL_VALUE_MASK: GLenum = 0x0B93;
pub const STENCIL_FAIL: GLenum = 0x0B94;
pub const STENCIL_PASS_DEPTH_FAIL: GLenum = 0x0B95;
pub const STENCIL_PASS_DEPTH_PASS: GLenum = 0x0B96;
pub const STENCIL_REF: GLenum = 0x0B97;
pub const STENCIL_WRITEMASK: GLenum = 0x0B98;
pub const MATRIX_MODE: GLenum = 0x0BA0;
pub const VIEWPORT: GLenum = 0x0BA2;
pub const MODELVIEW_STACK_DEPTH: GLenum = 0x0BA3;
pub const PROJECTION_STACK_DEPTH: GLenum = 0x0BA4;
pub const TEXTURE_STACK_DEPTH: GLenum = 0x0BA5;
pub const MODELVIEW_MATRIX: GLenum = 0x0BA6;
pub const PROJECTION_MATRIX: GLenum = 0x0BA7;
pub const TEXTURE_MATRIX: GLenum = 0x0BA8;
pub const ALPHA_TEST_FUNC: GLenum = 0x0BC1;
pub const ALPHA_TEST_REF: GLenum = 0x0BC2;
pub const BLEND_DST: GLenum = 0x0BE0;
pub const BLEND_SRC: GLenum = 0x0BE1;
pub const LOGIC_OP_MODE: GLenum = 0x0BF0;
pub const SCISSOR_BOX: GLenum = 0x0C10;
pub const COLOR_CLEAR_VALUE: GLenum = 0x0C22;
pub const COLOR_WRITEMASK: GLenum = 0x0C23;
pub const UNPACK_ALIGNMENT: GLenum = 0x0CF5;
pub const PACK_ALIGNMENT: GLenum = 0x0D05;
pub const PERSPECTIVE_CORRECTION_HINT: GLenum = 0x0C50;
pub const POINT_SMOOTH_HINT: GLenum = 0x0C51;
pub const LINE_SMOOTH_HINT: GLenum = 0x0C52;
pub const POLYGON_OFFSET_FACTOR: GLenum = 0x8038;
pub const POLYGON_OFFSET_UNITS: GLenum = 0x2A00;
pub const SAMPLE_COVERAGE_VALUE: GLenum = 0x80AA;
pub const SAMPLE_COVERAGE_INVERT: GLenum = 0x80AB;
pub const ALIASED_POINT_SIZE_RANGE: GLenum = 0x846D;
pub const ALIASED_LINE_WIDTH_RANGE: GLenum = 0x846E;
pub const POINT_SIZE_MIN: GLenum = 0x8126;
pub const POINT_SIZE_MAX: GLenum = 0x8127;
pub const POINT_FADE_THRESHOLD_SIZE: GLenum = 0x8128;
pub const POINT_DISTANCE_ATTENUATION: GLenum = 0x8129;

// Implementation limits.
pub const MAX_LIGHTS: GLenum = 0x0D31;
pub const MAX_CLIP_PLANES: GLenum = 0x0D32;
pub const MAX_TEXTURE_SIZE: GLenum = 0x0D33;
pub const MAX_MODELVIEW_STACK_DEPTH: GLenum = 0x0D36;
pub const MAX_PROJECTION_STACK_DEPTH: GLenum = 0x0D38;
pub const MAX_TEXTURE_STACK_DEPTH: GLenum = 0x0D39;
pub const MAX_VIEWPORT_DIMS: GLenum = 0x0D3A;
pub const MAX_TEXTURE_UNITS: GLenum = 0x84E2;
pub const SUBPIXEL_BITS: GLenum = 0x0D50;

// Hints.
pub const DONT_CARE: GLenum = 0x1100;
pub const FASTEST: GLenum = 0x1101;
pub const NICEST: GLenum = 0x1102;
pub const GENERATE_MIPMAP_HINT: GLenum = 0x8192;

// Scalar data types.
pub const BYTE: GLenum = 0x1400;
pub const UNSIGNED_BYTE: GLenum = 0x1401;
pub const SHORT: GLenum = 0x1402;
pub const UNSIGNED_SHORT: GLenum = 0x1403;
pub const FLOAT: GLenum = 0x1406;
pub const FIXED: GLenum = 0x140C;

// Matrix modes.
pub const MODELVIEW: GLenum = 0x1700;
pub const PROJECTION: GLenum = 0x1701;
pub const TEXTURE: GLenum = 0x1702;

// Pixel formats and types.
pub const ALPHA: GLenum = 0x1906;
pub const RGB: GLenum = 0x1907;
pub const RGBA: GLenum = 0x1908;
pub const LUMINANCE: GLenum = 0x1909;
pub const LUMINANCE_ALPHA: GLenum = 0x190A;
pub const UNSIGNED_SHORT_4_4_4_4: GLenum = 0x8033;
pub const UNSIGNED_SHORT_5_5_5_1: GLenum = 0x8034;
pub const UNSIGNED_SHORT_5_6_5: GLenum = 0x8363;

// Shading model.
pub const FLAT: GLenum = 0x1D00;
pub const SMOOTH: GLenum = 0x1D01;

// Logic ops.
pub const CLEAR: GLenum = 0x1500;
pub const AND: GLenum = 0x1501;
pub const AND_REVERSE: GLenum = 0x1502;
pub const COPY: GLenum = 0x1503;
pub const AND_INVERTED: GLenum = 0x1504;
pub const NOOP: GLenum = 0x1505;
pub const XOR: GLenum = 0x1506;
pub const OR: GLenum = 0x1507;
pub const NOR: GLenum = 0x1508;
pub const EQUIV: GLenum = 0x1509;
pub const INVERT: GLenum = 0x150A;
pub const OR_REVERSE: GLenum = 0x150B;
pub const COPY_INVERTED: GLenum = 0x150C;
pub const OR_INVERTED: GLenum = 0x150D;
pub const NAND: GLenum = 0x150E;
pub const SET: GLenum = 0x150F;

// Stencil ops (KEEP/REPLACE/INCR/DECR; ZERO and INVERT shared above).
pub const KEEP: GLenum = 0x1E00;
pub const REPLACE: GLenum = 0x1E01;
pub const INCR: GLenum = 0x1E02;
pub const DECR: GLenum = 0x1E03;

// Fog.
pub const FOG_DENSITY: GLenum = 0x0B62;
pub const FOG_START: GLenum = 0x0B63;
pub const FOG_END: GLenum = 0x0B64;
pub const FOG_MODE: GLenum = 0x0B65;
pub const FOG_COLOR: GLenum = 0x0B66;
pub const EXP: GLenum = 0x0800;
pub const EXP2: GLenum = 0x0801;
pub const LINEAR: GLenum = 0x2601;

// Lights and materials.
pub const LIGHT0: GLenum = 0x4000;
pub const LIGHT1: GLenum = 0x4001;
pub const LIGHT2: GLenum = 0x4002;
pub const LIGHT3: GLenum = 0x4003;
pub const LIGHT4: GLenum = 0x4004;
pub const LIGHT5: GLenum = 0x4005;
pub const LIGHT6: GLenum = 0x4006;
pub const LIGHT7: GLenum = 0x4007;
pub const AMBIENT: GLenum = 0x1200;
pub const DIFFUSE: GLenum = 0x1201;
pub const SPECULAR: GLenum = 0x1202;
pub const POSITION: GLenum = 0x1203;
pub const SPOT_DIRECTION: GLenum = 0x1204;
pub const SPOT_EXPONENT: GLenum = 0x1205;
pub const SPOT_CUTOFF: GLenum = 0x1206;
pub const CONSTANT_ATTENUATION: GLenum = 0x1207;
pub const LINEAR_ATTENUATION: GLenum = 0x1208;
pub const QUADRATIC_ATTENUATION: GLenum = 0x1209;
pub const EMISSION: GLenum = 0x1600;
pub const SHININESS: GLenum = 0x1601;
pub const AMBIENT_AND_DIFFUSE: GLenum = 0x1602;

// Clip planes.
pub const CLIP_PLANE0: GLenum = 0x3000;
pub const CLIP_PLANE1: GLenum = 0x3001;
pub const CLIP_PLANE2: GLenum = 0x3002;
pub const CLIP_PLANE3: GLenum = 0x3003;
pub const CLIP_PLANE4: GLenum = 0x3004;
pub const CLIP_PLANE5: GLenum = 0x3005;

// Texture parameters and environments.
pub const NEAREST: GLenum = 0x2600;
// LINEAR is shared with fog mode above.
pub const NEAREST_MIPMAP_NEAREST: GLenum = 0x2700;
pub const LINEAR_MIPMAP_NEAREST: GLenum = 0x2701;
pub const NEAREST_MIPMAP_LINEAR: GLenum = 0x2702;
pub const LINEAR_MIPMAP_LINEAR: GLenum = 0x2703;
pub const TEXTURE_MAG_FILTER: GLenum = 0x2800;
pub const TEXTURE_MIN_FILTER: GLenum = 0x2801;
pub const TEXTURE_WRAP_S: GLenum = 0x2802;
pub const TEXTURE_WRAP_T: GLenum = 0x2803;
pub const REPEAT: GLenum = 0x2901;
pub const CLAMP_TO_EDGE: GLenum = 0x812F;
pub const GENERATE_MIPMAP: GLenum = 0x8191;
pub const TEXTURE_ENV_MODE: GLenum = 0x2200;
pub const TEXTURE_ENV_COLOR: GLenum = 0x2201;
pub const TEXTURE_ENV: GLenum = 0x2300;
pub const MODULATE: GLenum = 0x2100;
pub const DECAL: GLenum = 0x2101;
pub const ADD: GLenum = 0x0104;
pub const COMBINE: GLenum = 0x8570;
pub const COMBINE_RGB: GLenum = 0x8571;
pub const COMBINE_ALPHA: GLenum = 0x8572;
pub const RGB_SCALE: GLenum = 0x8573;
pub const ADD_SIGNED: GLenum = 0x8574;
pub const INTERPOLATE: GLenum = 0x8575;
pub const CONSTANT: GLenum = 0x8576;
pub const PRIMARY_COLOR: GLenum = 0x8577;
pub const PREVIOUS: GLenum = 0x8578;
pub const SUBTRACT: GLenum = 0x84E7;
pub const DOT3_RGB: GLenum = 0x86AE;
pub const DOT3_RGBA: GLenum = 0x86AF;
pub const SRC0_RGB: GLenum = 0x8580;
pub const SRC1_RGB: GLenum = 0x8581;
pub const SRC2_RGB: GLenum = 0x8582;
pub const SRC0_ALPHA: GLenum = 0x8588;
pub const SRC1_ALPHA: GLenum = 0x8589;
pub const SRC2_ALPHA: GLenum = 0x858A;
pub const OPERAND0_RGB: GLenum = 0x8590;
pub const OPERAND1_RGB: GLenum = 0x8591;
pub const OPERAND2_RGB: GLenum = 0x8592;
pub const OPERAND0_ALPHA: GLenum = 0x8598;
pub const OPERAND1_ALPHA: GLenum = 0x8599;
pub const OPERAND2_ALPHA: GLenum = 0x859A;
pub const ALPHA_SCALE: GLenum = 0x0D1C;

// Texture units.
pub const TEXTURE0: GLenum = 0x84C0;
pub const TEXTURE1: GLenum = 0x84C1;
pub const TEXTURE2: GLenum = 0x84C2;
pub const TEXTURE3: GLenum = 0x84C3;
pub const TEXTURE4: GLenum = 0x84C4;
pub const TEXTURE5: GLenum = 0x84C5;
pub const TEXTURE6: GLenum = 0x84C6;
pub const TEXTURE7: GLenum = 0x84C7;
pub const ACTIVE_TEXTURE: GLenum = 0x84E0;
pub const CLIENT_ACTIVE_TEXTURE: GLenum = 0x84E1;
pub const TEXTURE_BINDING_2D: GLenum = 0x8069;

// Point sprites (OES_point_sprite).
pub const POINT_SPRITE_OES: GLenum = 0x8861;
pub const COORD_REPLACE_OES: GLenum = 0x8862;

// Buffer objects.
pub const ARRAY_BUFFER: GLenum = 0x8892;
pub const ELEMENT_ARRAY_BUFFER: GLenum = 0x8893;
pub const ARRAY_BUFFER_BINDING: GLenum = 0x8894;
pub const ELEMENT_ARRAY_BUFFER_BINDING: GLenum = 0x8895;
pub const STATIC_DRAW: GLenum = 0x88E4;
pub const DYNAMIC_DRAW: GLenum = 0x88E8;
pub const BUFFER_SIZE: GLenum = 0x8764;
pub const BUFFER_USAGE: GLenum = 0x8765;

// Vertex array queries.
pub const VERTEX_ARRAY_SIZE: GLenum = 0x807A;
pub const VERTEX_ARRAY_TYPE: GLenum = 0x807B;
pub const VERTEX_ARRAY_STRIDE: GLenum = 0x807C;
pub const NORMAL_ARRAY_TYPE: GLenum = 0x807E;
pub const NORMAL_ARRAY_STRIDE: GLenum = 0x807F;
pub const COLOR_ARRAY_SIZE: GLenum = 0x8081;
pub const COLOR_ARRAY_TYPE: GLenum = 0x8082;
pub const COLOR_ARRAY_STRIDE: GLenum = 0x8083;
pub const TEXTURE_COORD_ARRAY_SIZE: GLenum = 0x8088;
pub const TEXTURE_COORD_ARRAY_TYPE: GLenum = 0x8089;
pub const TEXTURE_COORD_ARRAY_STRIDE: GLenum = 0x808A;

// Strings.
pub const VENDOR: GLenum = 0x1F00;
pub const RENDERER: GLenum = 0x1F01;
pub const VERSION: GLenum = 0x1F02;
pub const EXTENSIONS: GLenum = 0x1F03;

// OES_framebuffer_object.
pub const FRAMEBUFFER_OES: GLenum = 0x8D40;
pub const RENDERBUFFER_OES: GLenum = 0x8D41;
pub const RGBA4_OES: GLenum = 0x8056;
pub const RGB5_A1_OES: GLenum = 0x8057;
pub const RGB565_OES: GLenum = 0x8D62;
pub const DEPTH_COMPONENT16_OES: GLenum = 0x81A5;
pub const STENCIL_INDEX8_OES: GLenum = 0x8D48;
pub const RENDERBUFFER_WIDTH_OES: GLenum = 0x8D42;
pub const RENDERBUFFER_HEIGHT_OES: GLenum = 0x8D43;
pub const RENDERBUFFER_INTERNAL_FORMAT_OES: GLenum = 0x8D44;
pub const COLOR_ATTACHMENT0_OES: GLenum = 0x8CE0;
pub const DEPTH_ATTACHMENT_OES: GLenum = 0x8D00;
pub const STENCIL_ATTACHMENT_OES: GLenum = 0x8D20;
pub const FRAMEBUFFER_ATTACHMENT_OBJECT_TYPE_OES: GLenum = 0x8CD0;
pub const FRAMEBUFFER_ATTACHMENT_OBJECT_NAME_OES: GLenum = 0x8CD1;
pub const FRAMEBUFFER_ATTACHMENT_TEXTURE_LEVEL_OES: GLenum = 0x8CD2;
pub const FRAMEBUFFER_COMPLETE_OES: GLenum = 0x8CD5;
pub const FRAMEBUFFER_INCOMPLETE_ATTACHMENT_OES: GLenum = 0x8CD6;
pub const FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT_OES: GLenum = 0x8CD7;
pub const FRAMEBUFFER_INCOMPLETE_DIMENSIONS_OES: GLenum = 0x8CD9;
pub const FRAMEBUFFER_UNSUPPORTED_OES: GLenum = 0x8CDD;
pub const FRAMEBUFFER_BINDING_OES: GLenum = 0x8CA6;
pub const RENDERBUFFER_BINDING_OES: GLenum = 0x8CA7;
pub const MAX_RENDERBUFFER_SIZE_OES: GLenum = 0x84E8;
pub const INVALID_FRAMEBUFFER_OPERATION_OES: GLenum = 0x0506;

// OES_vertex_array_object.
pub const VERTEX_ARRAY_BINDING_OES: GLenum = 0x85B5;

// NV_fence.
pub const ALL_COMPLETED_NV: GLenum = 0x84F2;
pub const FENCE_STATUS_NV: GLenum = 0x84F3;
pub const FENCE_CONDITION_NV: GLenum = 0x84F4;
