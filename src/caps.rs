//! Immutable backend limits, queried from the device exactly once at
//! context creation. Contrary to the state, these values never change, and
//! every array-shaped piece of state is sized from them.

/// Raw limits reported by a device implementation, before clamping.
#[derive(Debug, Clone)]
pub struct DeviceLimits {
    pub vendor: String,
    pub renderer: String,
    pub max_lights: usize,
    pub max_clip_planes: usize,
    pub max_texture_units: usize,
    pub max_modelview_stack_depth: usize,
    pub max_projection_stack_depth: usize,
    pub max_texture_stack_depth: usize,
    pub max_texture_size: u32,
    pub max_renderbuffer_size: u32,
    pub max_viewport_dims: (u32, u32),
    pub point_size_range: (f32, f32),
    pub line_width_range: (f32, f32),
    pub has_framebuffer_object: bool,
    pub has_vertex_array_object: bool,
    pub has_point_sprite: bool,
    pub has_fence: bool,
}

impl Default for DeviceLimits {
    fn default() -> Self {
        DeviceLimits {
            vendor: "fixie".into(),
            renderer: "unknown".into(),
            max_lights: 8,
            max_clip_planes: 6,
            max_texture_units: 4,
            max_modelview_stack_depth: 32,
            max_projection_stack_depth: 4,
            max_texture_stack_depth: 4,
            max_texture_size: 4096,
            max_renderbuffer_size: 4096,
            max_viewport_dims: (4096, 4096),
            point_size_range: (1.0, 64.0),
            line_width_range: (1.0, 8.0),
            has_framebuffer_object: true,
            has_vertex_array_object: true,
            has_point_sprite: true,
            has_fence: true,
        }
    }
}

/// The capability descriptor of one context: device limits clamped up to
/// the minima the legacy specification guarantees to callers.
#[derive(Debug, Clone)]
pub struct Capabilities {
    pub vendor: String,
    pub renderer: String,
    pub version: &'static str,
    pub max_lights: usize,
    pub max_clip_planes: usize,
    pub max_texture_units: usize,
    pub max_modelview_stack_depth: usize,
    pub max_projection_stack_depth: usize,
    pub max_texture_stack_depth: usize,
    pub max_texture_size: u32,
    pub max_renderbuffer_size: u32,
    pub max_viewport_dims: (u32, u32),
    pub point_size_range: (f32, f32),
    pub line_width_range: (f32, f32),
    pub has_framebuffer_object: bool,
    pub has_vertex_array_object: bool,
    pub has_point_sprite: bool,
    pub has_fence: bool,
}

impl Capabilities {
    pub fn from_limits(limits: &DeviceLimits) -> Self {
        use std::cmp::max;

        Capabilities {
            vendor: limits.vendor.clone(),
            renderer: limits.renderer.clone(),
            version: "OpenGL ES-CM 1.1",
            max_lights: max(limits.max_lights, 8).min(32),
            max_clip_planes: max(limits.max_clip_planes, 1).min(32),
            // The vertex attribute table caps fixed-function units at 8.
            max_texture_units: max(limits.max_texture_units, 2).min(8),
            max_modelview_stack_depth: max(limits.max_modelview_stack_depth, 16),
            max_projection_stack_depth: max(limits.max_projection_stack_depth, 2),
            max_texture_stack_depth: max(limits.max_texture_stack_depth, 2),
            max_texture_size: max(limits.max_texture_size, 64),
            max_renderbuffer_size: max(limits.max_renderbuffer_size, 1),
            max_viewport_dims: limits.max_viewport_dims,
            point_size_range: limits.point_size_range,
            line_width_range: limits.line_width_range,
            has_framebuffer_object: limits.has_framebuffer_object,
            has_vertex_array_object: limits.has_vertex_array_object,
            has_point_sprite: limits.has_point_sprite,
            has_fence: limits.has_fence,
        }
    }

    /// The space-separated extension list assembled from the flags.
    pub fn extensions(&self) -> String {
        let mut names = Vec::new();

        if self.has_framebuffer_object {
            names.push("GL_OES_framebuffer_object");
        }
        if self.has_vertex_array_object {
            names.push("GL_OES_vertex_array_object");
        }
        if self.has_point_sprite {
            names.push("GL_OES_point_sprite");
            names.push("GL_OES_point_size_array");
        }
        if self.has_fence {
            names.push("GL_NV_fence");
        }

        names.join(" ")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clamps_to_spec_minima() {
        let limits = DeviceLimits {
            max_lights: 2,
            max_texture_units: 1,
            max_modelview_stack_depth: 4,
            ..Default::default()
        };

        let caps = Capabilities::from_limits(&limits);
        assert_eq!(caps.max_lights, 8);
        assert_eq!(caps.max_texture_units, 2);
        assert_eq!(caps.max_modelview_stack_depth, 16);
    }

    #[test]
    fn extension_list_follows_flags() {
        let caps = Capabilities::from_limits(&DeviceLimits {
            has_fence: false,
            ..Default::default()
        });

        let extensions = caps.extensions();
        assert!(extensions.contains("GL_OES_framebuffer_object"));
        assert!(!extensions.contains("GL_NV_fence"));
    }
}
