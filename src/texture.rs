//! Textures
//!
//! [`Texture`] wraps a `wgpu::Texture` with a default view. Creation paths
//! cover decoded images, image files, and single-color placeholders. The
//! base level is uploaded with one `write_texture`; further levels come
//! from [`MipmapGenerator`](crate::mipmap::MipmapGenerator).

use std::path::Path;

use crate::errors::Result;
use crate::mipmap::MipmapGenerator;

/// Options for texture creation.
#[derive(Debug, Clone)]
pub struct TextureOptions {
    pub label: Option<&'static str>,
    pub format: wgpu::TextureFormat,
    /// Allocate and fill the full mip chain.
    pub generate_mipmaps: bool,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            label: None,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            generate_mipmaps: false,
        }
    }
}

/// A 2D texture with its default view.
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub size: wgpu::Extent3d,
    pub format: wgpu::TextureFormat,
    pub mip_level_count: u32,
}

impl Texture {
    /// Creates a texture from a decoded image.
    ///
    /// When `options.generate_mipmaps` is set, the full chain is allocated
    /// and filled on the GPU before returning.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        mipmaps: &mut MipmapGenerator,
        image: &image::DynamicImage,
        options: &TextureOptions,
    ) -> Result<Self> {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba8(device, queue, mipmaps, &rgba, width, height, options)
    }

    /// Creates a texture from an image file (png or jpeg).
    pub fn from_path(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        mipmaps: &mut MipmapGenerator,
        path: impl AsRef<Path>,
        options: &TextureOptions,
    ) -> Result<Self> {
        let image = image::open(path.as_ref())?;
        log::info!(
            "Loaded image {:?} ({}x{})",
            path.as_ref(),
            image.width(),
            image.height()
        );
        Self::from_image(device, queue, mipmaps, &image, options)
    }

    /// Creates a 1x1 texture of a single color.
    pub fn solid_color(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        mipmaps: &mut MipmapGenerator,
        rgba: [u8; 4],
    ) -> Result<Self> {
        Self::from_rgba8(
            device,
            queue,
            mipmaps,
            &rgba,
            1,
            1,
            &TextureOptions::default(),
        )
    }

    fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        mipmaps: &mut MipmapGenerator,
        pixels: &[u8],
        width: u32,
        height: u32,
        options: &TextureOptions,
    ) -> Result<Self> {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let mip_level_count = if options.generate_mipmaps {
            mip_chain_len(width, height)
        } else {
            1
        };

        let mut usage = wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST;
        if mip_level_count > 1 {
            // The generator renders into each level in turn.
            usage |= wgpu::TextureUsages::RENDER_ATTACHMENT;
        }

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: options.label,
            size,
            mip_level_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: options.format,
            usage,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        if mip_level_count > 1 {
            let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Mipmap Encoder"),
            });
            mipmaps.generate(device, &mut encoder, &texture)?;
            queue.submit(Some(encoder.finish()));
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(Self {
            texture,
            view,
            size,
            format: options.format,
            mip_level_count,
        })
    }

    /// A trilinear sampler with repeat addressing.
    #[must_use]
    pub fn default_sampler(device: &wgpu::Device) -> wgpu::Sampler {
        device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Default Sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Linear,
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            ..Default::default()
        })
    }

    /// A trilinear sampler clamped to the texture edge.
    #[must_use]
    pub fn linear_clamp_sampler(device: &wgpu::Device) -> wgpu::Sampler {
        device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Linear Clamp Sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Linear,
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            ..Default::default()
        })
    }
}

/// Number of mip levels for a full chain down to 1x1.
#[must_use]
pub fn mip_chain_len(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mip_chain_length() {
        assert_eq!(mip_chain_len(1, 1), 1);
        assert_eq!(mip_chain_len(2, 2), 2);
        assert_eq!(mip_chain_len(256, 256), 9);
        assert_eq!(mip_chain_len(512, 256), 10);
        // Non-power-of-two rounds down per level
        assert_eq!(mip_chain_len(100, 60), 7);
    }
}
