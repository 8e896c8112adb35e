//! Builder and Layout Tests
//!
//! Tests for:
//! - Vertex layout attribute sequencing and wgpu conversion
//! - Bind group layout builder binding assignment
//! - Render pipeline builder defaults and depth handling
//! - Render pass configuration defaults
//! - Buffer sizing helpers and usage flags

use wgpu::VertexFormat;

use prism::buffer::byte_size;
use prism::pipeline::STANDARD_ALPHA_BLEND;
use prism::prelude::*;

// ============================================================================
// VertexLayout Tests
// ============================================================================

#[test]
fn vertex_layout_interleaved_mesh() {
    // position3 + normal3 + uv2, tightly packed
    let mut layout = VertexLayout::with_stride(32);
    layout
        .attribute(VertexFormat::Float32x3, 0)
        .attribute(VertexFormat::Float32x3, 12)
        .attribute(VertexFormat::Float32x2, 24);

    let attrs = layout.attributes();
    assert_eq!(attrs.len(), 3);
    assert_eq!(attrs[0].shader_location, 0);
    assert_eq!(attrs[1].shader_location, 1);
    assert_eq!(attrs[2].shader_location, 2);
    assert_eq!(attrs[1].offset, 12);
    assert_eq!(attrs[2].format, VertexFormat::Float32x2);
}

#[test]
fn vertex_layout_split_streams() {
    // Positions and colors in separate buffers, colors bound at an
    // explicit location so the shader sees 0 and 1.
    let mut positions = VertexLayout::with_stride(12);
    positions.attribute(VertexFormat::Float32x3, 0);

    let mut colors = VertexLayout::with_stride(16);
    colors.attribute_at(1, VertexFormat::Float32x4, 0);

    assert_eq!(positions.attributes()[0].shader_location, 0);
    assert_eq!(colors.attributes()[0].shader_location, 1);
    assert_eq!(colors.stride(), 16);
}

#[test]
fn vertex_layout_instance_step_mode() {
    let mut layout = VertexLayout::with_stride(64);
    layout.per_instance().attribute(VertexFormat::Float32x4, 0);

    let wgpu_layout = layout.as_wgpu();
    assert_eq!(wgpu_layout.step_mode, wgpu::VertexStepMode::Instance);
    assert_eq!(wgpu_layout.array_stride, 64);
    assert_eq!(wgpu_layout.attributes.len(), 1);
}

#[test]
fn vertex_layout_empty_is_skipped_by_pipeline() {
    let layout = VertexLayout::new();
    assert!(layout.is_empty());

    let mut filled = VertexLayout::with_stride(12);
    filled.attribute(VertexFormat::Float32x3, 0);

    let builder = RenderPipelineBuilder::new()
        .vertex_layout(&layout)
        .vertex_layout(&filled);
    assert_eq!(builder.vertex_buffer_count(), 1);
}

// ============================================================================
// BindGroupLayoutBuilder Tests
// ============================================================================

#[test]
fn bind_group_layout_binding_sequence() {
    let builder = BindGroupLayoutBuilder::new()
        .uniform(wgpu::ShaderStages::VERTEX)
        .texture(wgpu::ShaderStages::FRAGMENT)
        .sampler(wgpu::ShaderStages::FRAGMENT);

    let entries = builder.entries();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].binding, 0);
    assert_eq!(entries[1].binding, 1);
    assert_eq!(entries[2].binding, 2);
    assert_eq!(entries[0].visibility, wgpu::ShaderStages::VERTEX);
    assert!(matches!(
        entries[1].ty,
        wgpu::BindingType::Texture { .. }
    ));
    assert!(matches!(
        entries[2].ty,
        wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering)
    ));
}

#[test]
fn bind_group_layout_dynamic_uniform() {
    let stride = std::num::NonZeroU64::new(64).unwrap();
    let builder =
        BindGroupLayoutBuilder::new().dynamic_uniform(wgpu::ShaderStages::VERTEX, stride);

    let entry = &builder.entries()[0];
    match entry.ty {
        wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset,
            min_binding_size,
        } => {
            assert!(has_dynamic_offset);
            assert_eq!(min_binding_size, Some(stride));
        }
        _ => panic!("expected a uniform buffer binding"),
    }
}

#[test]
fn bind_group_layout_storage_entry() {
    let builder = BindGroupLayoutBuilder::new().storage(wgpu::ShaderStages::FRAGMENT, true);

    assert!(matches!(
        builder.entries()[0].ty,
        wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only: true },
            ..
        }
    ));
}

// ============================================================================
// RenderPipelineBuilder Tests
// ============================================================================

#[test]
fn pipeline_builder_mixed_depth_and_blend() {
    // A translucent overlay pipeline: one vertex stream, alpha blending,
    // no depth writes wanted so no depth state at all.
    let mut layout = VertexLayout::with_stride(20);
    layout
        .attribute(VertexFormat::Float32x3, 0)
        .attribute(VertexFormat::Float32x2, 12);

    let builder = RenderPipelineBuilder::new()
        .color_target(wgpu::TextureFormat::Bgra8UnormSrgb)
        .blend(STANDARD_ALPHA_BLEND)
        .vertex_layout(&layout);

    assert!(!builder.has_depth_stencil());
    assert_eq!(builder.vertex_buffer_count(), 1);

    let opaque = RenderPipelineBuilder::new()
        .color_target(wgpu::TextureFormat::Bgra8UnormSrgb)
        .depth_stencil(wgpu::TextureFormat::Depth24Plus);
    assert!(opaque.has_depth_stencil());
}

// ============================================================================
// RenderPass Tests
// ============================================================================

#[test]
fn render_pass_clear_defaults() {
    let pass = RenderPass::new();
    let color = pass.color_ops();
    assert!(matches!(color.load, wgpu::LoadOp::Clear(_)));
    assert_eq!(color.store, wgpu::StoreOp::Store);

    assert!(matches!(
        pass.depth_ops().load,
        wgpu::LoadOp::Clear(d) if (d - 1.0).abs() < f32::EPSILON
    ));
    assert!(matches!(pass.stencil_ops().load, wgpu::LoadOp::Clear(0)));
    assert!(!pass.has_depth_target());
}

#[test]
fn render_pass_load_preserves_color() {
    let pass = RenderPass::new().load_color();
    assert!(matches!(pass.color_ops().load, wgpu::LoadOp::Load));
}

// ============================================================================
// Buffer Helper Tests
// ============================================================================

#[test]
fn byte_size_multiplies_stride() {
    assert_eq!(byte_size(4, 12), 48);
    assert_eq!(byte_size(0, 12), 0);
    assert_eq!(byte_size(36, 40), 1440);
}

#[test]
fn buffer_kind_usages() {
    assert!(
        BufferKind::Vertex
            .usages()
            .contains(wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST)
    );
    assert!(
        BufferKind::Uniform
            .usages()
            .contains(wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST)
    );
    assert!(!BufferKind::Index.usages().contains(wgpu::BufferUsages::VERTEX));
}
