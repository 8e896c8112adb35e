//! The smallest possible program: a fullscreen gradient built from six
//! hardcoded vertices, no vertex buffers, no depth buffer.

use std::sync::Arc;

use prism::prelude::*;

const SHADER: &str = r"
struct VsOut {
    @builtin(position) position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> VsOut {
    var positions = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0), vec2<f32>(1.0, -1.0), vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, -1.0), vec2<f32>(1.0, 1.0), vec2<f32>(-1.0, 1.0),
    );
    let p = positions[index];
    var out: VsOut;
    out.position = vec4<f32>(p, 0.0, 1.0);
    out.color = vec4<f32>(p * 0.5 + 0.5, 0.4, 1.0);
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    return in.color;
}
";

struct Minimal {
    pipeline: wgpu::RenderPipeline,
}

impl AppHandler for Minimal {
    fn init(ctx: &mut GpuContext, _window: &Arc<Window>) -> Result<Self> {
        let shader = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Gradient Shader"),
                source: wgpu::ShaderSource::Wgsl(SHADER.into()),
            });

        let pipeline = RenderPipelineBuilder::new()
            .label("Gradient Pipeline")
            .shader(&shader)
            .color_target(ctx.color_format())
            .build(&ctx.device)?;

        Ok(Self { pipeline })
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
                .label("Gradient Pass")
                .set_targets(&frame.view, None)
                .begin(&mut encoder)?;
            pass.set_pipeline(&self.pipeline);
            pass.draw(0..6, 0..1);
        }

        ctx.queue.submit(Some(encoder.finish()));
        frame.surface_texture.present();
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();
    App::new().with_title("01 - Minimal").run::<Minimal>()
}
