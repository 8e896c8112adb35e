//! A square drawn as a triangle strip from two separate vertex buffers:
//! one for positions, one for colors.

use std::sync::Arc;

use prism::prelude::*;

const SHADER: &str = r"
struct VsOut {
    @builtin(position) position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
) -> VsOut {
    var out: VsOut;
    out.position = vec4<f32>(position, 1.0);
    out.color = color;
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    return in.color;
}
";

const POSITIONS: [[f32; 3]; 4] = [
    [-0.5, -0.5, 0.0],
    [0.5, -0.5, 0.0],
    [-0.5, 0.5, 0.0],
    [0.5, 0.5, 0.0],
];

const COLORS: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 1.0],
    [1.0, 1.0, 0.0, 1.0],
];

struct Square {
    pipeline: wgpu::RenderPipeline,
    positions: Buffer,
    colors: Buffer,
}

impl AppHandler for Square {
    fn init(ctx: &mut GpuContext, _window: &Arc<Window>) -> Result<Self> {
        let shader = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Square Shader"),
                source: wgpu::ShaderSource::Wgsl(SHADER.into()),
            });

        let positions = Buffer::vertex(&ctx.device, &ctx.queue, &POSITIONS)?;
        let colors = Buffer::vertex(&ctx.device, &ctx.queue, &COLORS)?;

        let mut position_layout = VertexLayout::with_stride(12);
        position_layout.attribute(wgpu::VertexFormat::Float32x3, 0);

        // Second buffer slot, explicit shader location.
        let mut color_layout = VertexLayout::with_stride(16);
        color_layout.attribute_at(1, wgpu::VertexFormat::Float32x4, 0);

        let pipeline = RenderPipelineBuilder::new()
            .label("Square Pipeline")
            .shader(&shader)
            .topology(wgpu::PrimitiveTopology::TriangleStrip)
            .vertex_layout(&position_layout)
            .vertex_layout(&color_layout)
            .color_target(ctx.color_format())
            .build(&ctx.device)?;

        Ok(Self {
            pipeline,
            positions,
            colors,
        })
    }

    fn render(&mut self, ctx: &mut GpuContext) -> Result<()> {
        let Some(frame) = ctx.acquire_frame()? else {
            return Ok(());
        };

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });
        {
            let mut pass = RenderPass::new()
                .label("Square Pass")
                .clear_color(ctx.clear_color)
                .set_targets(&frame.view, None)
                .begin(&mut encoder)?;
            pass.set_pipeline(&self.pipeline);
            pass.set_vertex_buffer(0, &self.positions);
            pass.set_vertex_buffer(1, &self.colors);
            pass.draw(0..4, 0..1);
        }

        ctx.queue.submit(Some(encoder.finish()));
        frame.surface_texture.present();
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();
    App::new().with_title("02 - Square").run::<Square>()
}
