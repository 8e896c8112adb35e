//! An indexed triangle transformed by a camera uniform, rendered with a
//! depth buffer.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use prism::camera::{Camera, CameraKind};
use prism::prelude::*;

const SHADER: &str = r"
struct Uniforms {
    mvp: mat4x4<f32>,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

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
    out.position = uniforms.mvp * vec4<f32>(position, 1.0);
    out.color = color;
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    return in.color;
}
";

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct TriangleVertex {
    position: [f32; 3],
    color: [f32; 4],
}

const VERTICES: [TriangleVertex; 3] = [
    TriangleVertex {
        position: [0.0, 0.6, 0.0],
        color: [1.0, 0.0, 0.0, 1.0],
    },
    TriangleVertex {
        position: [-0.6, -0.6, 0.0],
        color: [0.0, 1.0, 0.0, 1.0],
    },
    TriangleVertex {
        position: [0.6, -0.6, 0.0],
        color: [0.0, 0.0, 1.0, 1.0],
    },
];

const INDICES: [u32; 3] = [0, 1, 2];

struct Triangle {
    pipeline: wgpu::RenderPipeline,
    vertices: Buffer,
    indices: Buffer,
    uniforms: Buffer,
    bind_group: wgpu::BindGroup,
    camera: Camera,
    angle: f32,
}

impl AppHandler for Triangle {
    fn init(ctx: &mut GpuContext, _window: &Arc<Window>) -> Result<Self> {
        let shader = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Triangle Shader"),
                source: wgpu::ShaderSource::Wgsl(SHADER.into()),
            });

        let vertices = Buffer::vertex(&ctx.device, &ctx.queue, &VERTICES)?;
        let indices = Buffer::index(&ctx.device, &ctx.queue, &INDICES)?;

        let mut camera = Camera::new(CameraKind::LookAt);
        camera.set_position(Vec3::new(0.0, 0.0, -2.5));
        camera.set_perspective(60.0, ctx.aspect_ratio(), 0.1, 100.0);

        let mvp = camera.view_proj();
        let uniforms = Buffer::uniform(&ctx.device, &ctx.queue, &mvp)?;

        let layout = BindGroupLayoutBuilder::new()
            .label("Triangle Layout")
            .uniform(wgpu::ShaderStages::VERTEX)
            .build(&ctx.device);

        let bind_group = BindGroupBuilder::new()
            .label("Triangle BG")
            .buffer(&uniforms)
            .build(&ctx.device, &layout);

        let pipeline_layout = create_pipeline_layout(&ctx.device, None, &[&layout]);

        let mut vertex_layout = VertexLayout::with_stride(28);
        vertex_layout
            .attribute(wgpu::VertexFormat::Float32x3, 0)
            .attribute(wgpu::VertexFormat::Float32x4, 12);

        let pipeline = RenderPipelineBuilder::new()
            .label("Triangle Pipeline")
            .shader(&shader)
            .pipeline_layout(&pipeline_layout)
            .vertex_layout(&vertex_layout)
            .color_target(ctx.color_format())
            .depth_stencil(ctx.depth_format)
            .build(&ctx.device)?;

        Ok(Self {
            pipeline,
            vertices,
            indices,
            uniforms,
            bind_group,
            camera,
            angle: 0.0,
        })
    }

    fn update(&mut self, ctx: &mut GpuContext, frame: &FrameState) {
        self.angle += frame.dt * 45.0;
        let model = Mat4::from_rotation_y(self.angle.to_radians());
        let mvp = self.camera.view_proj() * model;
        if let Err(e) = self
            .uniforms
            .write(&ctx.queue, 0, bytemuck::bytes_of(&mvp))
        {
            log::warn!("Uniform update failed: {e}");
        }
    }

    fn resize(&mut self, ctx: &mut GpuContext, _width: u32, _height: u32) {
        self.camera
            .set_perspective(60.0, ctx.aspect_ratio(), 0.1, 100.0);
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
                .label("Triangle Pass")
                .clear_color(ctx.clear_color)
                .set_targets(&frame.view, Some(ctx.depth_view()))
                .begin(&mut encoder)?;
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.set_vertex_buffer(0, &self.vertices);
            pass.set_index_buffer(&self.indices, wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..3, 0, 0..1);
        }

        ctx.queue.submit(Some(encoder.finish()));
        frame.surface_texture.present();
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();
    App::new().with_title("03 - Triangle").run::<Triangle>()
}
