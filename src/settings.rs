//! Context Settings
//!
//! Configuration consumed once by [`GpuContext::new`](crate::GpuContext::new)
//! to set up the GPU device and the window surface.

/// Global configuration for GPU context initialization.
///
/// | Field               | Description                               | Default           |
/// |---------------------|-------------------------------------------|-------------------|
/// | `vsync`             | Vertical sync enabled                     | `true`            |
/// | `power_preference`  | Adapter fallback selection strategy       | `HighPerformance` |
/// | `clear_color`       | Default framebuffer clear color           | Dark gray         |
/// | `required_features` | Required wgpu features                    | Empty             |
/// | `required_limits`   | Required wgpu limits                      | Default           |
/// | `depth_format`      | Depth buffer texture format               | `Depth24Plus`     |
#[derive(Debug, Clone)]
pub struct ContextSettings {
    /// Enable vertical synchronization.
    ///
    /// When `true`, presentation is capped to the display refresh rate.
    pub vsync: bool,

    /// Adapter selection preference for the fallback `request_adapter` path.
    ///
    /// The primary selection strategy enumerates adapters directly and
    /// prefers discrete GPUs; this preference only applies when enumeration
    /// returns nothing.
    pub power_preference: wgpu::PowerPreference,

    /// Background clear color for the main render target.
    pub clear_color: wgpu::Color,

    /// Required wgpu features. Initialization fails if unavailable.
    pub required_features: wgpu::Features,

    /// Required wgpu limits (max buffer sizes, binding counts, etc.).
    pub required_limits: wgpu::Limits,

    /// Depth buffer texture format.
    pub depth_format: wgpu::TextureFormat,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            vsync: true,
            power_preference: wgpu::PowerPreference::HighPerformance,
            clear_color: wgpu::Color {
                r: 0.05,
                g: 0.05,
                b: 0.05,
                a: 1.0,
            },
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            depth_format: wgpu::TextureFormat::Depth24Plus,
        }
    }
}
