//! Mipmap Generation
//!
//! Fills a texture's mip chain by blitting each level from the one above
//! it with a fullscreen triangle, using the toolkit's own layout, pass,
//! and pipeline builders. Blit pipelines are cached per texture format.

use rustc_hash::FxHashMap;

use crate::binding::{BindGroupBuilder, BindGroupLayoutBuilder, create_pipeline_layout};
use crate::errors::Result;
use crate::pass::RenderPass;
use crate::pipeline::RenderPipelineBuilder;
use crate::texture::Texture;

const BLIT_SHADER: &str = r"
struct BlitOut {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> BlitOut {
    var out: BlitOut;
    let uv = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
    out.position = vec4<f32>(uv * 2.0 - 1.0, 0.0, 1.0);
    out.uv = vec2<f32>(uv.x, 1.0 - uv.y);
    return out;
}

@group(0) @binding(0) var src: texture_2d<f32>;
@group(0) @binding(1) var src_sampler: sampler;

@fragment
fn fs_main(in: BlitOut) -> @location(0) vec4<f32> {
    return textureSample(src, src_sampler, in.uv);
}
";

/// The blit bind group layout: source texture then sampler, both
/// fragment-visible, matching `BLIT_SHADER`'s group 0.
fn blit_layout() -> BindGroupLayoutBuilder<'static> {
    BindGroupLayoutBuilder::new()
        .label("Blit Layout")
        .texture(wgpu::ShaderStages::FRAGMENT)
        .sampler(wgpu::ShaderStages::FRAGMENT)
}

/// A single-level view of one texture layer.
fn mip_view(
    texture: &wgpu::Texture,
    label: &'static str,
    level: u32,
    layer: u32,
    usage: wgpu::TextureUsages,
) -> wgpu::TextureView {
    texture.create_view(&wgpu::TextureViewDescriptor {
        label: Some(label),
        dimension: Some(wgpu::TextureViewDimension::D2),
        base_mip_level: level,
        mip_level_count: Some(1),
        base_array_layer: layer,
        array_layer_count: Some(1),
        usage: Some(usage),
        ..Default::default()
    })
}

/// Generates mip chains by rendering each level from the previous one.
pub struct MipmapGenerator {
    shader: wgpu::ShaderModule,
    layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    sampler: wgpu::Sampler,
    pipelines: FxHashMap<wgpu::TextureFormat, wgpu::RenderPipeline>,
}

impl MipmapGenerator {
    #[must_use]
    pub fn new(device: &wgpu::Device) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Blit Shader"),
            source: wgpu::ShaderSource::Wgsl(BLIT_SHADER.into()),
        });

        let layout = blit_layout().build(device);
        let pipeline_layout =
            create_pipeline_layout(device, Some("Blit Pipeline Layout"), &[&layout]);

        Self {
            shader,
            layout,
            pipeline_layout,
            sampler: Texture::linear_clamp_sampler(device),
            pipelines: FxHashMap::default(),
        }
    }

    /// Returns the cached blit pipeline for `format`, building it on first
    /// use.
    fn pipeline_for(
        &mut self,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
    ) -> Result<&wgpu::RenderPipeline> {
        if !self.pipelines.contains_key(&format) {
            log::info!("Building blit pipeline for {format:?}");
            let pipeline = RenderPipelineBuilder::new()
                .label("Blit Pipeline")
                .shader(&self.shader)
                .pipeline_layout(&self.pipeline_layout)
                .color_target(format)
                .build(device)?;
            self.pipelines.insert(format, pipeline);
        }
        Ok(&self.pipelines[&format])
    }

    /// Generates all mip levels of `texture` from its base level.
    ///
    /// The texture must have been created with `RENDER_ATTACHMENT` usage.
    /// Does nothing for single-level textures.
    pub fn generate(
        &mut self,
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        texture: &wgpu::Texture,
    ) -> Result<()> {
        let mip_count = texture.mip_level_count();
        if mip_count < 2 {
            return Ok(());
        }
        let pipeline = self.pipeline_for(device, texture.format())?.clone();

        for layer in 0..texture.depth_or_array_layers() {
            for target in 1..mip_count {
                let source = mip_view(
                    texture,
                    "Blit Source",
                    target - 1,
                    layer,
                    wgpu::TextureUsages::TEXTURE_BINDING,
                );
                let destination = mip_view(
                    texture,
                    "Blit Target",
                    target,
                    layer,
                    wgpu::TextureUsages::RENDER_ATTACHMENT,
                );

                let bind_group = BindGroupBuilder::new()
                    .label("Blit Bind Group")
                    .texture_view(&source)
                    .sampler(&self.sampler)
                    .build(device, &self.layout);

                let mut pass = RenderPass::new()
                    .label("Blit Pass")
                    .set_targets(&destination, None)
                    .begin(encoder)?;
                pass.set_pipeline(&pipeline);
                pass.set_bind_group(0, &bind_group, &[]);
                pass.draw(0..3, 0..1);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blit_layout_is_texture_then_sampler() {
        let builder = blit_layout();
        let entries = builder.entries();
        assert_eq!(entries.len(), 2);
        assert!(matches!(entries[0].ty, wgpu::BindingType::Texture { .. }));
        assert!(matches!(entries[1].ty, wgpu::BindingType::Sampler(_)));
        assert!(
            entries
                .iter()
                .all(|e| e.visibility == wgpu::ShaderStages::FRAGMENT)
        );
    }
}
