//! Bind Group Builders
//!
//! Builders for bind group layouts and bind groups. Binding indices are
//! assigned sequentially from 0 in the order entries are added, so the
//! layout and the group stay in sync when built with matching calls.

use std::num::NonZeroU64;

use crate::buffer::Buffer;

/// Builder for a [`wgpu::BindGroupLayout`].
pub struct BindGroupLayoutBuilder<'a> {
    label: Option<&'a str>,
    entries: Vec<wgpu::BindGroupLayoutEntry>,
    next_binding: u32,
}

impl<'a> Default for BindGroupLayoutBuilder<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> BindGroupLayoutBuilder<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            label: None,
            entries: Vec::new(),
            next_binding: 0,
        }
    }

    #[must_use]
    pub fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    /// Adds a uniform buffer binding.
    #[must_use]
    pub fn uniform(self, visibility: wgpu::ShaderStages) -> Self {
        self.buffer_entry(visibility, wgpu::BufferBindingType::Uniform, false, None)
    }

    /// Adds a uniform buffer binding with a dynamic offset.
    ///
    /// `min_size` is the per-draw slice size; offsets must respect the
    /// device's uniform offset alignment (typically 256 bytes).
    #[must_use]
    pub fn dynamic_uniform(self, visibility: wgpu::ShaderStages, min_size: NonZeroU64) -> Self {
        self.buffer_entry(
            visibility,
            wgpu::BufferBindingType::Uniform,
            true,
            Some(min_size),
        )
    }

    /// Adds a storage buffer binding.
    #[must_use]
    pub fn storage(self, visibility: wgpu::ShaderStages, read_only: bool) -> Self {
        self.buffer_entry(
            visibility,
            wgpu::BufferBindingType::Storage { read_only },
            false,
            None,
        )
    }

    /// Adds a filterable 2D float texture binding.
    #[must_use]
    pub fn texture(mut self, visibility: wgpu::ShaderStages) -> Self {
        self.entries.push(wgpu::BindGroupLayoutEntry {
            binding: self.next_binding,
            visibility,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        });
        self.next_binding += 1;
        self
    }

    /// Adds a filtering sampler binding.
    #[must_use]
    pub fn sampler(mut self, visibility: wgpu::ShaderStages) -> Self {
        self.entries.push(wgpu::BindGroupLayoutEntry {
            binding: self.next_binding,
            visibility,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        });
        self.next_binding += 1;
        self
    }

    fn buffer_entry(
        mut self,
        visibility: wgpu::ShaderStages,
        ty: wgpu::BufferBindingType,
        has_dynamic_offset: bool,
        min_binding_size: Option<NonZeroU64>,
    ) -> Self {
        self.entries.push(wgpu::BindGroupLayoutEntry {
            binding: self.next_binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty,
                has_dynamic_offset,
                min_binding_size,
            },
            count: None,
        });
        self.next_binding += 1;
        self
    }

    /// The entries accumulated so far.
    #[must_use]
    pub fn entries(&self) -> &[wgpu::BindGroupLayoutEntry] {
        &self.entries
    }

    #[must_use]
    pub fn build(&self, device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: self.label,
            entries: &self.entries,
        })
    }
}

/// Builder for a [`wgpu::BindGroup`].
///
/// Add resources in the same order their entries were added to the layout.
pub struct BindGroupBuilder<'a> {
    label: Option<&'a str>,
    entries: Vec<wgpu::BindGroupEntry<'a>>,
    next_binding: u32,
}

impl<'a> Default for BindGroupBuilder<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> BindGroupBuilder<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            label: None,
            entries: Vec::new(),
            next_binding: 0,
        }
    }

    #[must_use]
    pub fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    /// Binds a whole buffer.
    #[must_use]
    pub fn buffer(mut self, buffer: &'a Buffer) -> Self {
        self.entries.push(wgpu::BindGroupEntry {
            binding: self.next_binding,
            resource: buffer.raw().as_entire_binding(),
        });
        self.next_binding += 1;
        self
    }

    /// Binds a sub-range of a buffer.
    ///
    /// Used for dynamically-offset uniforms, where `size` is the per-draw
    /// slice and the offset is supplied at `set_bind_group` time.
    #[must_use]
    pub fn buffer_range(mut self, buffer: &'a Buffer, offset: u64, size: NonZeroU64) -> Self {
        self.entries.push(wgpu::BindGroupEntry {
            binding: self.next_binding,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: buffer.raw(),
                offset,
                size: Some(size),
            }),
        });
        self.next_binding += 1;
        self
    }

    /// Binds a texture view.
    #[must_use]
    pub fn texture_view(mut self, view: &'a wgpu::TextureView) -> Self {
        self.entries.push(wgpu::BindGroupEntry {
            binding: self.next_binding,
            resource: wgpu::BindingResource::TextureView(view),
        });
        self.next_binding += 1;
        self
    }

    /// Binds a sampler.
    #[must_use]
    pub fn sampler(mut self, sampler: &'a wgpu::Sampler) -> Self {
        self.entries.push(wgpu::BindGroupEntry {
            binding: self.next_binding,
            resource: wgpu::BindingResource::Sampler(sampler),
        });
        self.next_binding += 1;
        self
    }

    /// The entries accumulated so far.
    #[must_use]
    pub fn entries(&self) -> &[wgpu::BindGroupEntry<'a>] {
        &self.entries
    }

    #[must_use]
    pub fn build(&self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: self.label,
            layout,
            entries: &self.entries,
        })
    }
}

/// Creates a pipeline layout over the given bind group layouts.
#[must_use]
pub fn create_pipeline_layout(
    device: &wgpu::Device,
    label: Option<&str>,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
) -> wgpu::PipelineLayout {
    device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label,
        bind_group_layouts,
        immediate_size: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_bindings_count_from_zero() {
        let builder = BindGroupLayoutBuilder::new()
            .uniform(wgpu::ShaderStages::VERTEX)
            .texture(wgpu::ShaderStages::FRAGMENT)
            .sampler(wgpu::ShaderStages::FRAGMENT);

        let bindings: Vec<u32> = builder.entries().iter().map(|e| e.binding).collect();
        assert_eq!(bindings, vec![0, 1, 2]);
    }

    #[test]
    fn uniform_entry_shape() {
        let builder = BindGroupLayoutBuilder::new().uniform(wgpu::ShaderStages::VERTEX);
        let entry = &builder.entries()[0];
        assert_eq!(entry.visibility, wgpu::ShaderStages::VERTEX);
        assert!(matches!(
            entry.ty,
            wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                ..
            }
        ));
    }

    #[test]
    fn dynamic_uniform_entry_has_dynamic_offset() {
        let min_size = NonZeroU64::new(64).unwrap();
        let builder =
            BindGroupLayoutBuilder::new().dynamic_uniform(wgpu::ShaderStages::VERTEX, min_size);
        assert!(matches!(
            builder.entries()[0].ty,
            wgpu::BindingType::Buffer {
                has_dynamic_offset: true,
                ..
            }
        ));
    }
}
