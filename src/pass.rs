//! Render Passes
//!
//! [`RenderPass`] is the attachment configuration for one pass: a color
//! target, an optional depth target, and the clear values. [`begin`]
//! (RenderPass::begin) assembles the descriptor — the depth-stencil
//! attachment is included iff a depth view was set — and returns a
//! [`PassEncoder`] that records commands until it is dropped.

use crate::buffer::Buffer;
use crate::errors::{PrismError, Result};

/// Attachment configuration for a single render pass.
pub struct RenderPass<'a> {
    label: Option<&'a str>,
    color_view: Option<&'a wgpu::TextureView>,
    depth_view: Option<&'a wgpu::TextureView>,
    clear_color: wgpu::Color,
    load_color: bool,
    depth_clear: f32,
    stencil_clear: u32,
}

impl<'a> Default for RenderPass<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> RenderPass<'a> {
    /// Creates a pass that clears to a dark gray, depth 1.0, stencil 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            label: None,
            color_view: None,
            depth_view: None,
            clear_color: wgpu::Color {
                r: 0.05,
                g: 0.05,
                b: 0.05,
                a: 1.0,
            },
            load_color: false,
            depth_clear: 1.0,
            stencil_clear: 0,
        }
    }

    #[must_use]
    pub fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    /// Sets the color target and, optionally, the depth target.
    ///
    /// A pass without a depth view gets no depth-stencil attachment at all,
    /// matching pipelines built without a depth state.
    #[must_use]
    pub fn set_targets(
        mut self,
        color: &'a wgpu::TextureView,
        depth: Option<&'a wgpu::TextureView>,
    ) -> Self {
        self.color_view = Some(color);
        self.depth_view = depth;
        self
    }

    #[must_use]
    pub fn clear_color(mut self, color: wgpu::Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Loads the previous color contents instead of clearing.
    #[must_use]
    pub fn load_color(mut self) -> Self {
        self.load_color = true;
        self
    }

    #[must_use]
    pub fn depth_clear(mut self, value: f32) -> Self {
        self.depth_clear = value;
        self
    }

    /// Whether the pass will carry a depth-stencil attachment.
    #[must_use]
    pub fn has_depth_target(&self) -> bool {
        self.depth_view.is_some()
    }

    /// Color load/store operations for this configuration.
    #[must_use]
    pub fn color_ops(&self) -> wgpu::Operations<wgpu::Color> {
        wgpu::Operations {
            load: if self.load_color {
                wgpu::LoadOp::Load
            } else {
                wgpu::LoadOp::Clear(self.clear_color)
            },
            store: wgpu::StoreOp::Store,
        }
    }

    /// Depth clear/store operations for this configuration.
    #[must_use]
    pub fn depth_ops(&self) -> wgpu::Operations<f32> {
        wgpu::Operations {
            load: wgpu::LoadOp::Clear(self.depth_clear),
            store: wgpu::StoreOp::Store,
        }
    }

    /// Stencil clear/store operations for this configuration.
    #[must_use]
    pub fn stencil_ops(&self) -> wgpu::Operations<u32> {
        wgpu::Operations {
            load: wgpu::LoadOp::Clear(self.stencil_clear),
            store: wgpu::StoreOp::Store,
        }
    }

    /// Begins the pass on the given encoder.
    ///
    /// Fails with [`PrismError::PassIncomplete`] when no color target has
    /// been set.
    pub fn begin<'e>(&self, encoder: &'e mut wgpu::CommandEncoder) -> Result<PassEncoder<'e>> {
        let color_view = self
            .color_view
            .ok_or_else(|| PrismError::PassIncomplete("no color target set".into()))?;

        let depth_stencil_attachment =
            self.depth_view
                .map(|view| wgpu::RenderPassDepthStencilAttachment {
                    view,
                    depth_ops: Some(self.depth_ops()),
                    stencil_ops: Some(self.stencil_ops()),
                });

        let pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: self.label,
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: self.color_ops(),
                depth_slice: None,
            })],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        Ok(PassEncoder { pass })
    }
}

/// Records commands into an open render pass.
///
/// The pass ends when the encoder is dropped.
pub struct PassEncoder<'e> {
    pass: wgpu::RenderPass<'e>,
}

impl<'e> PassEncoder<'e> {
    pub fn set_viewport(&mut self, x: f32, y: f32, w: f32, h: f32, min_depth: f32, max_depth: f32) {
        self.pass.set_viewport(x, y, w, h, min_depth, max_depth);
    }

    pub fn set_scissor_rect(&mut self, x: u32, y: u32, w: u32, h: u32) {
        self.pass.set_scissor_rect(x, y, w, h);
    }

    pub fn set_pipeline(&mut self, pipeline: &wgpu::RenderPipeline) {
        self.pass.set_pipeline(pipeline);
    }

    pub fn set_bind_group(
        &mut self,
        index: u32,
        bind_group: &wgpu::BindGroup,
        dynamic_offsets: &[u32],
    ) {
        self.pass.set_bind_group(index, bind_group, dynamic_offsets);
    }

    pub fn set_vertex_buffer(&mut self, slot: u32, buffer: &Buffer) {
        self.pass.set_vertex_buffer(slot, buffer.slice());
    }

    pub fn set_index_buffer(&mut self, buffer: &Buffer, format: wgpu::IndexFormat) {
        self.pass.set_index_buffer(buffer.slice(), format);
    }

    pub fn set_blend_constant(&mut self, color: wgpu::Color) {
        self.pass.set_blend_constant(color);
    }

    pub fn set_stencil_reference(&mut self, reference: u32) {
        self.pass.set_stencil_reference(reference);
    }

    pub fn draw(&mut self, vertices: std::ops::Range<u32>, instances: std::ops::Range<u32>) {
        self.pass.draw(vertices, instances);
    }

    pub fn draw_indexed(
        &mut self,
        indices: std::ops::Range<u32>,
        base_vertex: i32,
        instances: std::ops::Range<u32>,
    ) {
        self.pass.draw_indexed(indices, base_vertex, instances);
    }

    /// Replays pre-recorded render bundles.
    ///
    /// Only single-bundle batches are supported; larger batches are
    /// rejected with [`PrismError::BundleBatchTooLarge`] rather than being
    /// partially replayed.
    pub fn execute_bundles(&mut self, bundles: &[wgpu::RenderBundle]) -> Result<()> {
        check_bundle_count(bundles.len())?;
        self.pass.execute_bundles(bundles.iter());
        Ok(())
    }
}

fn check_bundle_count(count: usize) -> Result<()> {
    if count > 1 {
        return Err(PrismError::BundleBatchTooLarge { count });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_clear_values() {
        let pass = RenderPass::new();
        assert!((pass.depth_clear - 1.0).abs() < f32::EPSILON);
        assert_eq!(pass.stencil_clear, 0);
        assert!(matches!(pass.color_ops().load, wgpu::LoadOp::Clear(_)));
        assert!(matches!(pass.depth_ops().load, wgpu::LoadOp::Clear(v) if (v - 1.0).abs() < f32::EPSILON));
        assert!(matches!(pass.stencil_ops().load, wgpu::LoadOp::Clear(0)));
    }

    #[test]
    fn depth_attachment_iff_depth_view() {
        let pass = RenderPass::new();
        assert!(!pass.has_depth_target());
    }

    #[test]
    fn load_color_keeps_previous_contents() {
        let pass = RenderPass::new().load_color();
        assert!(matches!(pass.color_ops().load, wgpu::LoadOp::Load));
    }

    #[test]
    fn bundle_batches_larger_than_one_are_rejected() {
        assert!(check_bundle_count(0).is_ok());
        assert!(check_bundle_count(1).is_ok());
        assert!(matches!(
            check_bundle_count(2),
            Err(PrismError::BundleBatchTooLarge { count: 2 })
        ));
    }
}
