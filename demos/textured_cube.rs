//! An indexed cube sampling a procedurally generated checkerboard texture
//! with a full GPU-generated mip chain.

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

fn checkerboard(size: u32, cells: u32) -> image::DynamicImage {
    let cell = (size / cells).max(1);
    let img = image::RgbaImage::from_fn(size, size, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            image::Rgba([230, 230, 230, 255])
        } else {
            image::Rgba([40, 90, 160, 255])
        }
    });
    image::DynamicImage::ImageRgba8(img)
}

struct TexturedCube {
    pipeline: wgpu::RenderPipeline,
    vertices: Buffer,
    indices: Buffer,
    index_count: u32,
    uniforms: Buffer,
    bind_group: wgpu::BindGroup,
    camera: Camera,
    angle: f32,
}

impl AppHandler for TexturedCube {
    fn init(ctx: &mut GpuContext, _window: &Arc<Window>) -> Result<Self> {
        let shader = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Textured Cube Shader"),
                source: wgpu::ShaderSource::Wgsl(SHADER.into()),
            });

        let (cube_vertices, cube_indices) = geometry::cube_indexed();
        let vertices = Buffer::vertex(&ctx.device, &ctx.queue, &cube_vertices)?;
        let indices = Buffer::index(&ctx.device, &ctx.queue, &cube_indices)?;

        let mut mipmaps = MipmapGenerator::new(&ctx.device);
        let texture = Texture::from_image(
            &ctx.device,
            &ctx.queue,
            &mut mipmaps,
            &checkerboard(512, 8),
            &TextureOptions {
                label: Some("Checkerboard"),
                generate_mipmaps: true,
                ..Default::default()
            },
        )?;
        let sampler = Texture::default_sampler(&ctx.device);

        let mut camera = Camera::new(CameraKind::LookAt);
        camera.set_position(Vec3::new(0.0, 0.0, -6.0));
        camera.set_perspective(60.0, ctx.aspect_ratio(), 0.1, 100.0);

        let uniforms = Buffer::uniform(&ctx.device, &ctx.queue, &camera.view_proj())?;

        let layout = BindGroupLayoutBuilder::new()
            .label("Textured Cube Layout")
            .uniform(wgpu::ShaderStages::VERTEX)
            .texture(wgpu::ShaderStages::FRAGMENT)
            .sampler(wgpu::ShaderStages::FRAGMENT)
            .build(&ctx.device);

        let bind_group = BindGroupBuilder::new()
            .label("Textured Cube BG")
            .buffer(&uniforms)
            .texture_view(&texture.view)
            .sampler(&sampler)
            .build(&ctx.device, &layout);

        let pipeline_layout = create_pipeline_layout(&ctx.device, None, &[&layout]);

        let mut vertex_layout = VertexLayout::with_stride(ColorVertex::STRIDE);
        vertex_layout
            .attribute(wgpu::VertexFormat::Float32x4, ColorVertex::POSITION_OFFSET)
            .attribute(wgpu::VertexFormat::Float32x2, ColorVertex::UV_OFFSET);

        let pipeline = RenderPipelineBuilder::new()
            .label("Textured Cube Pipeline")
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
            indices,
            index_count: cube_indices.len() as u32,
            uniforms,
            bind_group,
            camera,
            angle: 0.0,
        })
    }

    fn update(&mut self, ctx: &mut GpuContext, frame: &FrameState) {
        self.angle += frame.dt * 40.0;
        let model = Mat4::from_rotation_y(self.angle.to_radians())
            * Mat4::from_rotation_x(self.angle.to_radians() * 0.4);
        let mvp = self.camera.view_proj() * model;
        if let Err(e) = self.uniforms.write(&ctx.queue, 0, bytemuck::bytes_of(&mvp)) {
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
                .label("Textured Cube Pass")
                .clear_color(ctx.clear_color)
                .set_targets(&frame.view, Some(ctx.depth_view()))
                .begin(&mut encoder)?;
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.set_vertex_buffer(0, &self.vertices);
            pass.set_index_buffer(&self.indices, wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..self.index_count, 0, 0..1);
        }

        ctx.queue.submit(Some(encoder.finish()));
        frame.surface_texture.present();
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();
    App::new()
        .with_title("05 - Textured Cube")
        .run::<TexturedCube>()
}
