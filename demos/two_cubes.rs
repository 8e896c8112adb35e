//! Two rotating cubes driven by one uniform buffer with 256-byte-aligned
//! dynamic offsets. Draw commands are recorded once into a render bundle
//! and replayed every frame.

use std::num::NonZeroU64;
use std::sync::Arc;

use prism::camera::{Camera, CameraKind};
use prism::geometry::{self, ColorVertex};
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
    @location(0) position: vec4<f32>,
    @location(1) color: vec4<f32>,
) -> VsOut {
    var out: VsOut;
    out.position = uniforms.mvp * position;
    out.color = color;
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    return in.color;
}
";

/// Per-draw uniform slices must respect the device's uniform offset
/// alignment; 256 is the universal baseline.
const UNIFORM_STRIDE: u64 = 256;
const MVP_SIZE: u64 = 64;

struct TwoCubes {
    uniforms: Buffer,
    bundle: wgpu::RenderBundle,
    camera: Camera,
    angle: f32,
}

impl AppHandler for TwoCubes {
    fn init(ctx: &mut GpuContext, _window: &Arc<Window>) -> Result<Self> {
        let shader = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Cube Shader"),
                source: wgpu::ShaderSource::Wgsl(SHADER.into()),
            });

        let cube = geometry::cube();
        let vertices = Buffer::vertex(&ctx.device, &ctx.queue, &cube)?;
        let uniforms = Buffer::uniform_sized(&ctx.device, &ctx.queue, 2 * UNIFORM_STRIDE)?;

        let mvp_size = NonZeroU64::new(MVP_SIZE).expect("nonzero");
        let layout = BindGroupLayoutBuilder::new()
            .label("Cube Layout")
            .dynamic_uniform(wgpu::ShaderStages::VERTEX, mvp_size)
            .build(&ctx.device);

        let bind_group = BindGroupBuilder::new()
            .label("Cube BG")
            .buffer_range(&uniforms, 0, mvp_size)
            .build(&ctx.device, &layout);

        let pipeline_layout = create_pipeline_layout(&ctx.device, None, &[&layout]);

        let mut vertex_layout = VertexLayout::with_stride(ColorVertex::STRIDE);
        vertex_layout
            .attribute(wgpu::VertexFormat::Float32x4, ColorVertex::POSITION_OFFSET)
            .attribute(wgpu::VertexFormat::Float32x4, ColorVertex::COLOR_OFFSET);

        let pipeline = RenderPipelineBuilder::new()
            .label("Cube Pipeline")
            .shader(&shader)
            .pipeline_layout(&pipeline_layout)
            .vertex_layout(&vertex_layout)
            .color_target(ctx.color_format())
            .cull_mode(Some(wgpu::Face::Back))
            .depth_stencil(ctx.depth_format)
            .build(&ctx.device)?;

        // Record both draws once; only the uniform contents change per frame.
        let mut bundle_encoder =
            ctx.device
                .create_render_bundle_encoder(&wgpu::RenderBundleEncoderDescriptor {
                    label: Some("Cubes Bundle"),
                    color_formats: &[Some(ctx.color_format())],
                    depth_stencil: Some(wgpu::RenderBundleDepthStencil {
                        format: ctx.depth_format,
                        depth_read_only: false,
                        stencil_read_only: false,
                    }),
                    sample_count: 1,
                    multiview: None,
                });
        bundle_encoder.set_pipeline(&pipeline);
        bundle_encoder.set_vertex_buffer(0, vertices.slice());
        for cube_index in 0..2u32 {
            bundle_encoder.set_bind_group(0, &bind_group, &[cube_index * UNIFORM_STRIDE as u32]);
            bundle_encoder.draw(0..36, 0..1);
        }
        let bundle = bundle_encoder.finish(&wgpu::RenderBundleDescriptor {
            label: Some("Cubes Bundle"),
        });

        let mut camera = Camera::new(CameraKind::LookAt);
        camera.set_position(Vec3::new(0.0, 0.0, -8.0));
        camera.set_perspective(60.0, ctx.aspect_ratio(), 0.1, 100.0);

        Ok(Self {
            uniforms,
            bundle,
            camera,
            angle: 0.0,
        })
    }

    fn update(&mut self, ctx: &mut GpuContext, frame: &FrameState) {
        self.angle += frame.dt * 60.0;
        let view_proj = self.camera.view_proj();

        for (i, x) in [-2.0f32, 2.0].into_iter().enumerate() {
            let spin = self.angle.to_radians() * if i == 0 { 1.0 } else { -1.0 };
            let model = Mat4::from_translation(Vec3::new(x, 0.0, 0.0))
                * Mat4::from_rotation_y(spin)
                * Mat4::from_rotation_x(spin * 0.5);
            let mvp = view_proj * model;
            if let Err(e) = self.uniforms.write(
                &ctx.queue,
                i as u64 * UNIFORM_STRIDE,
                bytemuck::bytes_of(&mvp),
            ) {
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
                .label("Cubes Pass")
                .clear_color(ctx.clear_color)
                .set_targets(&frame.view, Some(ctx.depth_view()))
                .begin(&mut encoder)?;
            pass.execute_bundles(std::slice::from_ref(&self.bundle))?;
        }

        ctx.queue.submit(Some(encoder.finish()));
        frame.surface_texture.present();
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();
    App::new().with_title("04 - Two Cubes").run::<TwoCubes>()
}
