#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

//! Prism — a compact wgpu rendering toolkit.
//!
//! Typed buffers, owned vertex layouts, and builder-style bind groups,
//! pipelines, and render passes over raw wgpu, plus the context and
//! windowing plumbing needed to put pixels on screen.

pub mod app;
pub mod binding;
pub mod buffer;
pub mod camera;
pub mod context;
pub mod errors;
pub mod geometry;
pub mod mipmap;
pub mod obj;
pub mod pass;
pub mod pipeline;
pub mod settings;
pub mod texture;
pub mod vertex;

pub use app::{App, AppHandler, FrameState};
pub use binding::{BindGroupBuilder, BindGroupLayoutBuilder, create_pipeline_layout};
pub use buffer::{Buffer, BufferKind};
pub use camera::{Camera, CameraKind};
pub use context::{Frame, GpuContext};
pub use errors::PrismError;
pub use mipmap::MipmapGenerator;
pub use pass::{PassEncoder, RenderPass};
pub use pipeline::RenderPipelineBuilder;
pub use settings::ContextSettings;
pub use texture::{Texture, TextureOptions};
pub use vertex::VertexLayout;

/// One-stop imports for application code.
pub mod prelude {
    pub use crate::app::{App, AppHandler, FrameState, Window};
    pub use crate::binding::{BindGroupBuilder, BindGroupLayoutBuilder, create_pipeline_layout};
    pub use crate::buffer::{Buffer, BufferKind};
    pub use crate::camera::{Camera, CameraKind};
    pub use crate::context::{Frame, GpuContext};
    pub use crate::errors::Result;
    pub use crate::mipmap::MipmapGenerator;
    pub use crate::pass::{PassEncoder, RenderPass};
    pub use crate::pipeline::RenderPipelineBuilder;
    pub use crate::settings::ContextSettings;
    pub use crate::texture::{Texture, TextureOptions};
    pub use crate::vertex::VertexLayout;

    pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
}
