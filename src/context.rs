//! GPU Context
//!
//! The [`GpuContext`] holds core GPU handles: device, queue, surface, and
//! config. It selects an adapter (discrete GPUs preferred), owns the depth
//! buffer, and handles resize and per-frame surface acquisition.

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::errors::{PrismError, Result};
use crate::settings::ContextSettings;

/// An acquired surface frame.
///
/// Present by dropping `surface_texture` after submitting, via
/// [`wgpu::SurfaceTexture::present`].
pub struct Frame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
}

/// Core wgpu context holding GPU handles.
///
/// Owns the fundamental resources needed for rendering:
/// - `device`: GPU device for resource creation
/// - `queue`: Command submission queue
/// - `surface`: Window surface for presentation
/// - `config`: Surface configuration (format, present mode, etc.)
///
/// It also manages the depth buffer texture which is recreated on resize.
pub struct GpuContext {
    /// The wgpu device for GPU operations
    pub device: wgpu::Device,
    /// The command queue for submitting work
    pub queue: wgpu::Queue,
    /// The window surface for presentation
    pub surface: wgpu::Surface<'static>,
    /// Surface configuration
    pub config: wgpu::SurfaceConfiguration,

    /// Depth buffer format
    pub depth_format: wgpu::TextureFormat,
    /// Depth buffer texture view (recreated on resize)
    pub depth_texture_view: wgpu::TextureView,
    /// Clear color for the frame
    pub clear_color: wgpu::Color,
}

impl GpuContext {
    pub async fn new<W>(
        window: W,
        settings: &ContextSettings,
        width: u32,
        height: u32,
    ) -> Result<Self>
    where
        W: HasWindowHandle + HasDisplayHandle + Send + Sync + 'static,
    {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;

        let adapter = select_adapter(&instance, &surface, settings).await?;
        log_adapter(&adapter);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: settings.required_features,
                required_limits: settings.required_limits.clone(),
                memory_hints: wgpu::MemoryHints::Performance,
                ..Default::default()
            })
            .await?;

        let mut config = surface
            .get_default_config(&adapter, width, height)
            .ok_or_else(|| {
                PrismError::AdapterRequestFailed("Surface not supported by adapter".to_string())
            })?;

        config.present_mode = if settings.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        surface.configure(&device, &config);
        log::info!(
            "Surface configured: {:?} {}x{} ({:?})",
            config.format,
            config.width,
            config.height,
            config.present_mode
        );

        let depth_texture_view = Self::create_depth_texture(&device, &config, settings.depth_format);

        Ok(Self {
            device,
            queue,
            surface,
            config,
            depth_format: settings.depth_format,
            depth_texture_view,
            clear_color: settings.clear_color,
        })
    }

    /// Reconfigures the surface and recreates the depth buffer.
    ///
    /// Zero-sized dimensions (minimized window) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture_view =
                Self::create_depth_texture(&self.device, &self.config, self.depth_format);
        }
    }

    /// Acquires the next surface frame.
    ///
    /// Returns `Ok(None)` when the frame should be skipped: a lost or
    /// outdated surface is reconfigured first, a timeout just skips.
    /// Out-of-memory and driver errors are terminal.
    pub fn acquire_frame(&mut self) -> Result<Option<Frame>> {
        match self.surface.get_current_texture() {
            Ok(surface_texture) => {
                let view = surface_texture
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                Ok(Some(Frame {
                    surface_texture,
                    view,
                }))
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                Ok(None)
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface acquire timed out, skipping frame");
                Ok(None)
            }
            Err(e @ (wgpu::SurfaceError::OutOfMemory | wgpu::SurfaceError::Other)) => {
                Err(PrismError::SurfaceError(e.to_string()))
            }
        }
    }

    pub fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        format: wgpu::TextureFormat,
    ) -> wgpu::TextureView {
        let size = wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        };
        let desc = wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        };
        let texture = device.create_texture(&desc);
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Returns the surface color format.
    #[must_use]
    pub fn color_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the depth texture view.
    ///
    /// The depth texture is automatically recreated on resize.
    #[inline]
    #[must_use]
    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_texture_view
    }

    /// Returns the current surface dimensions.
    #[inline]
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }
}

/// Picks an adapter for the surface: discrete first, then integrated, then
/// whatever comes first (with a warning). Falls back to `request_adapter`
/// when enumeration yields no compatible adapter.
async fn select_adapter(
    instance: &wgpu::Instance,
    surface: &wgpu::Surface<'_>,
    settings: &ContextSettings,
) -> Result<wgpu::Adapter> {
    let compatible: Vec<wgpu::Adapter> = instance
        .enumerate_adapters(wgpu::Backends::all())
        .await
        .into_iter()
        .filter(|adapter| !surface.get_capabilities(adapter).formats.is_empty())
        .collect();

    for wanted in [wgpu::DeviceType::DiscreteGpu, wgpu::DeviceType::IntegratedGpu] {
        if let Some(adapter) = compatible
            .iter()
            .find(|a| a.get_info().device_type == wanted)
        {
            return Ok(adapter.clone());
        }
    }

    if let Some(adapter) = compatible.into_iter().next() {
        log::warn!(
            "No discrete or integrated GPU found, using \"{}\"",
            adapter.get_info().name
        );
        return Ok(adapter);
    }

    instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: settings.power_preference,
            compatible_surface: Some(surface),
            force_fallback_adapter: false,
        })
        .await
        .map_err(|e| PrismError::AdapterRequestFailed(e.to_string()))
}

/// Logs the adapter identity and the device limits that matter for the
/// toolkit's resource builders.
fn log_adapter(adapter: &wgpu::Adapter) {
    let info = adapter.get_info();
    log::info!(
        "Adapter: \"{}\" ({:?}, {:?})",
        info.name,
        info.device_type,
        info.backend
    );
    log::info!("Driver: {} {}", info.driver, info.driver_info);

    let limits = adapter.limits();
    log::info!("  max_texture_dimension_2d: {}", limits.max_texture_dimension_2d);
    log::info!("  max_texture_array_layers: {}", limits.max_texture_array_layers);
    log::info!("  max_bind_groups: {}", limits.max_bind_groups);
    log::info!(
        "  max_bindings_per_bind_group: {}",
        limits.max_bindings_per_bind_group
    );
    log::info!(
        "  max_dynamic_uniform_buffers_per_pipeline_layout: {}",
        limits.max_dynamic_uniform_buffers_per_pipeline_layout
    );
    log::info!(
        "  max_sampled_textures_per_shader_stage: {}",
        limits.max_sampled_textures_per_shader_stage
    );
    log::info!(
        "  max_samplers_per_shader_stage: {}",
        limits.max_samplers_per_shader_stage
    );
    log::info!(
        "  max_uniform_buffers_per_shader_stage: {}",
        limits.max_uniform_buffers_per_shader_stage
    );
    log::info!(
        "  max_uniform_buffer_binding_size: {}",
        limits.max_uniform_buffer_binding_size
    );
    log::info!(
        "  max_storage_buffer_binding_size: {}",
        limits.max_storage_buffer_binding_size
    );
    log::info!("  max_buffer_size: {}", limits.max_buffer_size);
    log::info!("  max_vertex_buffers: {}", limits.max_vertex_buffers);
    log::info!("  max_vertex_attributes: {}", limits.max_vertex_attributes);
    log::info!(
        "  max_vertex_buffer_array_stride: {}",
        limits.max_vertex_buffer_array_stride
    );
    log::info!("  max_color_attachments: {}", limits.max_color_attachments);
    log::info!(
        "  min_uniform_buffer_offset_alignment: {}",
        limits.min_uniform_buffer_offset_alignment
    );
}
