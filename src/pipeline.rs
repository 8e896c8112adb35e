//! Render Pipeline Builder
//!
//! [`RenderPipelineBuilder`] accumulates pipeline state with sensible
//! defaults (triangle list, CCW front face, no culling, `vs_main` /
//! `fs_main` entry points, opaque target, no depth testing) and assembles
//! the full `wgpu::RenderPipelineDescriptor` at build time.
//!
//! Depth/stencil state is an [`Option`]: a pipeline tests depth iff a
//! depth state was explicitly set. There is no sentinel format.

use crate::errors::{PrismError, Result};
use crate::vertex::VertexLayout;

/// The standard alpha blend used by the tutorial pipelines:
/// color `SrcAlpha / OneMinusSrcAlpha / Add`, alpha `Zero / One / Add`.
pub const STANDARD_ALPHA_BLEND: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::Zero,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

/// Builder for a [`wgpu::RenderPipeline`].
pub struct RenderPipelineBuilder<'a> {
    label: Option<&'a str>,
    layout: Option<&'a wgpu::PipelineLayout>,
    module: Option<&'a wgpu::ShaderModule>,
    vs_entry: &'a str,
    fs_entry: &'a str,
    color_format: Option<wgpu::TextureFormat>,
    blend: Option<wgpu::BlendState>,
    write_mask: wgpu::ColorWrites,
    primitive: wgpu::PrimitiveState,
    depth_stencil: Option<wgpu::DepthStencilState>,
    vertex_layouts: Vec<VertexLayout>,
    multisample: wgpu::MultisampleState,
}

impl<'a> Default for RenderPipelineBuilder<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> RenderPipelineBuilder<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            label: None,
            layout: None,
            module: None,
            vs_entry: "vs_main",
            fs_entry: "fs_main",
            color_format: None,
            blend: None,
            write_mask: wgpu::ColorWrites::ALL,
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            vertex_layouts: Vec::new(),
            multisample: wgpu::MultisampleState::default(),
        }
    }

    #[must_use]
    pub fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    /// Sets an explicit pipeline layout.
    ///
    /// Without one, wgpu derives the layout from the shader.
    #[must_use]
    pub fn pipeline_layout(mut self, layout: &'a wgpu::PipelineLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Sets the shader module used for both vertex and fragment stages.
    #[must_use]
    pub fn shader(mut self, module: &'a wgpu::ShaderModule) -> Self {
        self.module = Some(module);
        self
    }

    #[must_use]
    pub fn vertex_entry(mut self, entry: &'a str) -> Self {
        self.vs_entry = entry;
        self
    }

    #[must_use]
    pub fn fragment_entry(mut self, entry: &'a str) -> Self {
        self.fs_entry = entry;
        self
    }

    /// Sets the color target format (usually the surface format).
    #[must_use]
    pub fn color_target(mut self, format: wgpu::TextureFormat) -> Self {
        self.color_format = Some(format);
        self
    }

    /// Enables the standard alpha blend ([`STANDARD_ALPHA_BLEND`]).
    #[must_use]
    pub fn alpha_blend(mut self) -> Self {
        self.blend = Some(STANDARD_ALPHA_BLEND);
        self
    }

    /// Sets an arbitrary blend state.
    #[must_use]
    pub fn blend(mut self, blend: wgpu::BlendState) -> Self {
        self.blend = Some(blend);
        self
    }

    #[must_use]
    pub fn write_mask(mut self, mask: wgpu::ColorWrites) -> Self {
        self.write_mask = mask;
        self
    }

    #[must_use]
    pub fn topology(mut self, topology: wgpu::PrimitiveTopology) -> Self {
        self.primitive.topology = topology;
        self
    }

    /// Index format for strip topologies.
    #[must_use]
    pub fn strip_index_format(mut self, format: wgpu::IndexFormat) -> Self {
        self.primitive.strip_index_format = Some(format);
        self
    }

    #[must_use]
    pub fn front_face(mut self, front_face: wgpu::FrontFace) -> Self {
        self.primitive.front_face = front_face;
        self
    }

    #[must_use]
    pub fn cull_mode(mut self, cull_mode: Option<wgpu::Face>) -> Self {
        self.primitive.cull_mode = cull_mode;
        self
    }

    /// Enables the standard depth test: compare `Less`, writes enabled,
    /// default stencil and bias.
    #[must_use]
    pub fn depth_stencil(mut self, format: wgpu::TextureFormat) -> Self {
        self.depth_stencil = Some(wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });
        self
    }

    /// Sets a fully custom depth/stencil state.
    #[must_use]
    pub fn depth_stencil_state(mut self, state: wgpu::DepthStencilState) -> Self {
        self.depth_stencil = Some(state);
        self
    }

    /// Appends one vertex buffer slot.
    ///
    /// Empty layouts are remembered but contribute no slot at build time,
    /// so a pipeline that reads no vertex buffers can be described with an
    /// untouched [`VertexLayout`].
    #[must_use]
    pub fn vertex_layout(mut self, layout: &VertexLayout) -> Self {
        self.vertex_layouts.push(layout.clone());
        self
    }

    /// Appends several vertex buffer slots at once.
    #[must_use]
    pub fn vertex_layouts(mut self, layouts: &[VertexLayout]) -> Self {
        self.vertex_layouts.extend_from_slice(layouts);
        self
    }

    /// Number of vertex buffer slots the built pipeline will consume.
    #[must_use]
    pub fn vertex_buffer_count(&self) -> usize {
        self.vertex_layouts.iter().filter(|l| !l.is_empty()).count()
    }

    /// Whether the built pipeline will have a depth/stencil state.
    #[must_use]
    pub fn has_depth_stencil(&self) -> bool {
        self.depth_stencil.is_some()
    }

    /// Builds the pipeline.
    ///
    /// Fails with [`PrismError::PipelineIncomplete`] when the shader module
    /// or the color target format is missing.
    pub fn build(&self, device: &wgpu::Device) -> Result<wgpu::RenderPipeline> {
        let module = self
            .module
            .ok_or_else(|| PrismError::PipelineIncomplete("no shader module set".into()))?;
        let color_format = self
            .color_format
            .ok_or_else(|| PrismError::PipelineIncomplete("no color target format set".into()))?;

        let buffers: Vec<wgpu::VertexBufferLayout> = self
            .vertex_layouts
            .iter()
            .filter(|l| !l.is_empty())
            .map(VertexLayout::as_wgpu)
            .collect();

        Ok(device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: self.label,
            layout: self.layout,
            vertex: wgpu::VertexState {
                module,
                entry_point: Some(self.vs_entry),
                buffers: &buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module,
                entry_point: Some(self.fs_entry),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: self.blend,
                    write_mask: self.write_mask,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: self.primitive,
            depth_stencil: self.depth_stencil.clone(),
            multisample: self.multisample,
            multiview_mask: None,
            cache: None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_triangle_list_ccw_no_cull() {
        let builder = RenderPipelineBuilder::new();
        assert_eq!(
            builder.primitive.topology,
            wgpu::PrimitiveTopology::TriangleList
        );
        assert_eq!(builder.primitive.front_face, wgpu::FrontFace::Ccw);
        assert_eq!(builder.primitive.cull_mode, None);
        assert_eq!(builder.vs_entry, "vs_main");
        assert_eq!(builder.fs_entry, "fs_main");
    }

    #[test]
    fn depth_stencil_present_iff_set() {
        let builder = RenderPipelineBuilder::new();
        assert!(!builder.has_depth_stencil());

        let builder = builder.depth_stencil(wgpu::TextureFormat::Depth24Plus);
        assert!(builder.has_depth_stencil());
    }

    #[test]
    fn empty_layout_contributes_no_slot() {
        let empty = VertexLayout::with_stride(16);
        let builder = RenderPipelineBuilder::new().vertex_layout(&empty);
        assert_eq!(builder.vertex_buffer_count(), 0);
    }

    #[test]
    fn two_layouts_give_two_slots() {
        let mut positions = VertexLayout::with_stride(12);
        positions.attribute(wgpu::VertexFormat::Float32x3, 0);
        let mut colors = VertexLayout::with_stride(16);
        colors.attribute_at(1, wgpu::VertexFormat::Float32x4, 0);

        let builder = RenderPipelineBuilder::new()
            .vertex_layout(&positions)
            .vertex_layout(&colors);
        assert_eq!(builder.vertex_buffer_count(), 2);
        assert_eq!(builder.vertex_layouts[0].stride(), 12);
        assert_eq!(builder.vertex_layouts[1].stride(), 16);
    }

    #[test]
    fn standard_alpha_blend_components() {
        assert_eq!(
            STANDARD_ALPHA_BLEND.color.src_factor,
            wgpu::BlendFactor::SrcAlpha
        );
        assert_eq!(
            STANDARD_ALPHA_BLEND.color.dst_factor,
            wgpu::BlendFactor::OneMinusSrcAlpha
        );
        assert_eq!(STANDARD_ALPHA_BLEND.alpha.src_factor, wgpu::BlendFactor::Zero);
        assert_eq!(STANDARD_ALPHA_BLEND.alpha.dst_factor, wgpu::BlendFactor::One);
    }
}
