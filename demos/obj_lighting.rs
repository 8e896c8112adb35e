//! A Wavefront OBJ gem next to a generated sphere, both lit by a single
//! directional light. Two pipelines share one shader module through
//! separate vertex entry points.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use prism::camera::{Camera, CameraKind};
use prism::geometry::{self, MeshVertex};
use prism::obj::{self, ObjVertex};
use prism::prelude::*;

const SHADER: &str = r"
struct Uniforms {
    mvp: mat4x4<f32>,
    model: mat4x4<f32>,
    light_dir: vec4<f32>,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

struct VsOut {
    @builtin(position) position: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) color: vec3<f32>,
};

@vertex
fn vs_obj(
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec3<f32>,
) -> VsOut {
    var out: VsOut;
    out.position = uniforms.mvp * vec4<f32>(position, 1.0);
    out.normal = (uniforms.model * vec4<f32>(normal, 0.0)).xyz;
    out.color = color;
    return out;
}

@vertex
fn vs_mesh(
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
) -> VsOut {
    var out: VsOut;
    out.position = uniforms.mvp * vec4<f32>(position, 1.0);
    out.normal = (uniforms.model * vec4<f32>(normal, 0.0)).xyz;
    out.color = vec3<f32>(0.4, 0.6, 0.9);
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let n = normalize(in.normal);
    let diffuse = max(dot(n, -uniforms.light_dir.xyz), 0.0);
    let lit = in.color * (0.15 + 0.85 * diffuse);
    return vec4<f32>(lit, 1.0);
}
";

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct Uniforms {
    mvp: Mat4,
    model: Mat4,
    light_dir: Vec4,
}

struct Drawable {
    pipeline: wgpu::RenderPipeline,
    vertices: Buffer,
    indices: Option<Buffer>,
    count: u32,
    uniforms: Buffer,
    bind_group: wgpu::BindGroup,
    offset: Vec3,
}

struct ObjLighting {
    drawables: Vec<Drawable>,
    camera: Camera,
    light_dir: Vec4,
    angle: f32,
}

impl ObjLighting {
    fn uniforms_for(&self, drawable: &Drawable) -> Uniforms {
        let model = Mat4::from_translation(drawable.offset)
            * Mat4::from_rotation_y(self.angle.to_radians());
        Uniforms {
            mvp: self.camera.view_proj() * model,
            model,
            light_dir: self.light_dir,
        }
    }
}

impl AppHandler for ObjLighting {
    fn init(ctx: &mut GpuContext, _window: &Arc<Window>) -> Result<Self> {
        let shader = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Lighting Shader"),
                source: wgpu::ShaderSource::Wgsl(SHADER.into()),
            });

        let layout = BindGroupLayoutBuilder::new()
            .label("Lighting Layout")
            .uniform(wgpu::ShaderStages::VERTEX_FRAGMENT)
            .build(&ctx.device);
        let pipeline_layout = create_pipeline_layout(&ctx.device, None, &[&layout]);

        let mut camera = Camera::new(CameraKind::LookAt);
        camera.set_position(Vec3::new(0.0, -0.5, -7.0));
        camera.set_perspective(60.0, ctx.aspect_ratio(), 0.1, 100.0);

        let light_dir = Vec4::new(-0.5, -1.0, 0.3, 0.0).normalize();
        let initial = Uniforms {
            mvp: Mat4::IDENTITY,
            model: Mat4::IDENTITY,
            light_dir,
        };

        let mut obj_layout = VertexLayout::with_stride(ObjVertex::STRIDE);
        obj_layout
            .attribute(wgpu::VertexFormat::Float32x3, 0)
            .attribute(wgpu::VertexFormat::Float32x3, 12)
            .attribute(wgpu::VertexFormat::Float32x3, 24);

        let mut mesh_layout = VertexLayout::with_stride(MeshVertex::STRIDE);
        mesh_layout
            .attribute(wgpu::VertexFormat::Float32x3, 0)
            .attribute(wgpu::VertexFormat::Float32x3, 12)
            .attribute(wgpu::VertexFormat::Float32x2, 24);

        let gem = obj::load("demos/assets/gem.obj")?;
        let gem_pipeline = RenderPipelineBuilder::new()
            .label("Gem Pipeline")
            .shader(&shader)
            .vertex_entry("vs_obj")
            .pipeline_layout(&pipeline_layout)
            .vertex_layout(&obj_layout)
            .color_target(ctx.color_format())
            .cull_mode(Some(wgpu::Face::Back))
            .depth_stencil(ctx.depth_format)
            .build(&ctx.device)?;
        let gem_uniforms = Buffer::uniform(&ctx.device, &ctx.queue, &initial)?;
        let gem_bind_group = BindGroupBuilder::new()
            .buffer(&gem_uniforms)
            .build(&ctx.device, &layout);
        let gem_count = gem.len() as u32;

        let (sphere_vertices, sphere_indices) = geometry::sphere(1.1, 32, 16);
        let sphere_pipeline = RenderPipelineBuilder::new()
            .label("Sphere Pipeline")
            .shader(&shader)
            .vertex_entry("vs_mesh")
            .pipeline_layout(&pipeline_layout)
            .vertex_layout(&mesh_layout)
            .color_target(ctx.color_format())
            .cull_mode(Some(wgpu::Face::Back))
            .depth_stencil(ctx.depth_format)
            .build(&ctx.device)?;
        let sphere_uniforms = Buffer::uniform(&ctx.device, &ctx.queue, &initial)?;
        let sphere_bind_group = BindGroupBuilder::new()
            .buffer(&sphere_uniforms)
            .build(&ctx.device, &layout);
        let sphere_count = sphere_indices.len() as u32;

        let drawables = vec![
            Drawable {
                pipeline: gem_pipeline,
                vertices: Buffer::vertex(&ctx.device, &ctx.queue, &gem)?,
                indices: None,
                count: gem_count,
                uniforms: gem_uniforms,
                bind_group: gem_bind_group,
                offset: Vec3::new(-1.8, 0.0, 0.0),
            },
            Drawable {
                pipeline: sphere_pipeline,
                vertices: Buffer::vertex(&ctx.device, &ctx.queue, &sphere_vertices)?,
                indices: Some(Buffer::index(&ctx.device, &ctx.queue, &sphere_indices)?),
                count: sphere_count,
                uniforms: sphere_uniforms,
                bind_group: sphere_bind_group,
                offset: Vec3::new(1.8, 0.0, 0.0),
            },
        ];

        Ok(Self {
            drawables,
            camera,
            light_dir,
            angle: 0.0,
        })
    }

    fn update(&mut self, ctx: &mut GpuContext, frame: &FrameState) {
        self.angle += frame.dt * 40.0;
        for i in 0..self.drawables.len() {
            let uniforms = self.uniforms_for(&self.drawables[i]);
            let buffer = &self.drawables[i].uniforms;
            if let Err(e) = buffer.write(&ctx.queue, 0, bytemuck::bytes_of(&uniforms)) {
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
                .label("Lighting Pass")
                .clear_color(ctx.clear_color)
                .set_targets(&frame.view, Some(ctx.depth_view()))
                .begin(&mut encoder)?;
            for drawable in &self.drawables {
                pass.set_pipeline(&drawable.pipeline);
                pass.set_bind_group(0, &drawable.bind_group, &[]);
                pass.set_vertex_buffer(0, &drawable.vertices);
                if let Some(indices) = &drawable.indices {
                    pass.set_index_buffer(indices, wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..drawable.count, 0, 0..1);
                } else {
                    pass.draw(0..drawable.count, 0..1);
                }
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
        .with_title("07 - OBJ Lighting")
        .run::<ObjLighting>()
}
