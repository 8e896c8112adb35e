//! One pipeline, two bind groups: two cubes that differ only in the
//! texture and uniform buffer their bind group carries.

use std::sync::Arc;

use prism::camera::{Camera, CameraKind};
use prism::geometry::{self, ColorVertex};
use prism::prelude::*;

const SHADER: &str = r"
struct Uniforms {
    mvp: mat4x4<f32>,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;
@group(0) @binding(1) var color_map: texture_2d<f32>;
@group(0) @binding(2) var color_sampler: sampler;

struct VsOut {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec4<f32>,
    @location(1) uv: vec2<f32>,
) -> VsOut {
    var out: VsOut;
    out.position = uniforms.mvp * position;
    out.uv = uv;
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    return textureSample(color_map, color_sampler, in.uv);
}
";

struct CubeDraw {
    uniforms: Buffer,
    bind_group: wgpu::BindGroup,
    offset_x: f32,
    spin: f32,
}

struct BindGroups {
    pipeline: wgpu::RenderPipeline,
    vertices: Buffer,
    cubes: Vec<CubeDraw>,
    camera: Camera,
    angle: f32,
}

impl AppHandler for BindGroups {
    fn init(ctx: &mut GpuContext, _window: &Arc<Window>) -> Result<Self> {
        let shader = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Bind Groups Shader"),
                source: wgpu::ShaderSource::Wgsl(SHADER.into()),
            });

        let cube = geometry::cube();
        let vertices = Buffer::vertex(&ctx.device, &ctx.queue, &cube)?;

        let mut mipmaps = MipmapGenerator::new(&ctx.device);
        let sampler = Texture::default_sampler(&ctx.device);

        let layout = BindGroupLayoutBuilder::new()
            .label("Bind Groups Layout")
            .uniform(wgpu::ShaderStages::VERTEX)
            .texture(wgpu::ShaderStages::FRAGMENT)
            .sampler(wgpu::ShaderStages::FRAGMENT)
            .build(&ctx.device);

        let mut camera = Camera::new(CameraKind::LookAt);
        camera.set_position(Vec3::new(0.0, 0.0, -8.0));
        camera.set_perspective(60.0, ctx.aspect_ratio(), 0.1, 100.0);

        let mut cubes = Vec::new();
        for (offset_x, spin, color) in [
            (-2.0, 1.0, [220u8, 80, 80, 255]),
            (2.0, -1.0, [80u8, 200, 120, 255]),
        ] {
            let texture = Texture::solid_color(&ctx.device, &ctx.queue, &mut mipmaps, color)?;
            let uniforms = Buffer::uniform(&ctx.device, &ctx.queue, &camera.view_proj())?;
            let bind_group = BindGroupBuilder::new()
                .buffer(&uniforms)
                .texture_view(&texture.view)
                .sampler(&sampler)
                .build(&ctx.device, &layout);
            cubes.push(CubeDraw {
                uniforms,
                bind_group,
                offset_x,
                spin,
            });
        }

        let pipeline_layout = create_pipeline_layout(&ctx.device, None, &[&layout]);

        let mut vertex_layout = VertexLayout::with_stride(ColorVertex::STRIDE);
        vertex_layout
            .attribute(wgpu::VertexFormat::Float32x4, ColorVertex::POSITION_OFFSET)
            .attribute(wgpu::VertexFormat::Float32x2, ColorVertex::UV_OFFSET);

        let pipeline = RenderPipelineBuilder::new()
            .label("Bind Groups Pipeline")
            .shader(&shader)
            .pipeline_layout(&pipeline_layout)
            .vertex_layout(&vertex_layout)
            .color_target(ctx.color_format())
            .cull_mode(Some(wgpu::Face::Back))
            .depth_stencil(ctx.depth_format)
            .build(&ctx.device)?;

        Ok(Self {
            pipeline,
            vertices,
            cubes,
            camera,
            angle: 0.0,
        })
    }

    fn update(&mut self, ctx: &mut GpuContext, frame: &FrameState) {
        self.angle += frame.dt * 50.0;
        let view_proj = self.camera.view_proj();
        for cube in &self.cubes {
            let spin = self.angle.to_radians() * cube.spin;
            let model = Mat4::from_translation(Vec3::new(cube.offset_x, 0.0, 0.0))
                * Mat4::from_rotation_y(spin);
            let mvp = view_proj * model;
            if let Err(e) = cube.uniforms.write(&ctx.queue, 0, bytemuck::bytes_of(&mvp)) {
                log::warn!("Uniform update failed: {e}");
            }
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
                .label("Bind Groups Pass")
                .clear_color(ctx.clear_color)
                .set_targets(&frame.view, Some(ctx.depth_view()))
                .begin(&mut encoder)?;
            pass.set_pipeline(&self.pipeline);
            pass.set_vertex_buffer(0, &self.vertices);
            for cube in &self.cubes {
                pass.set_bind_group(0, &cube.bind_group, &[]);
                pass.draw(0..36, 0..1);
            }
        }

        ctx.queue.submit(Some(encoder.finish()));
        frame.surface_texture.present();
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();
    App::new()
        .with_title("06 - Bind Groups")
        .run::<BindGroups>()
}
