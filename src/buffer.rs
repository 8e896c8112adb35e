//! GPU Buffers
//!
//! [`Buffer`] wraps a `wgpu::Buffer` together with its size and role.
//! Creation optionally uploads initial contents through the queue; an
//! initialized buffer receives exactly one full-size write.

use crate::errors::{PrismError, Result};

/// The role a buffer plays in the pipeline.
///
/// Each kind maps to a fixed usage set; `COPY_DST` is always included so
/// contents can be updated through the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    Vertex,
    Index,
    Uniform,
    Storage,
}

impl BufferKind {
    /// Returns the wgpu usage flags for this kind.
    #[must_use]
    pub fn usages(self) -> wgpu::BufferUsages {
        let base = match self {
            Self::Vertex => wgpu::BufferUsages::VERTEX,
            Self::Index => wgpu::BufferUsages::INDEX,
            Self::Uniform => wgpu::BufferUsages::UNIFORM,
            Self::Storage => wgpu::BufferUsages::STORAGE,
        };
        base | wgpu::BufferUsages::COPY_DST
    }
}

/// A GPU buffer with a known size and role.
#[derive(Debug)]
pub struct Buffer {
    buffer: wgpu::Buffer,
    size: u64,
    kind: BufferKind,
}

impl Buffer {
    /// Creates a buffer of exactly `size` bytes.
    ///
    /// When `data` is `Some`, its length must equal `size` and the contents
    /// are uploaded with a single queue write. When `None`, the buffer is
    /// left zeroed and no write is issued.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        kind: BufferKind,
        size: u64,
        data: Option<&[u8]>,
    ) -> Result<Self> {
        Self::validate_init(size, data)?;

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: None,
            size,
            usage: kind.usages(),
            mapped_at_creation: false,
        });

        if let Some(contents) = data {
            queue.write_buffer(&buffer, 0, contents);
        }

        Ok(Self { buffer, size, kind })
    }

    /// Creates a buffer sized as `count * stride` bytes.
    pub fn with_stride(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        kind: BufferKind,
        count: u64,
        stride: u64,
        data: Option<&[u8]>,
    ) -> Result<Self> {
        Self::new(device, queue, kind, byte_size(count, stride), data)
    }

    /// Creates a vertex buffer from a POD slice.
    pub fn vertex<T: bytemuck::Pod>(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        vertices: &[T],
    ) -> Result<Self> {
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        Self::new(
            device,
            queue,
            BufferKind::Vertex,
            bytes.len() as u64,
            Some(bytes),
        )
    }

    /// Creates an index buffer from a POD slice (`u16` or `u32` indices).
    pub fn index<T: bytemuck::Pod>(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        indices: &[T],
    ) -> Result<Self> {
        let bytes: &[u8] = bytemuck::cast_slice(indices);
        Self::new(
            device,
            queue,
            BufferKind::Index,
            bytes.len() as u64,
            Some(bytes),
        )
    }

    /// Creates a uniform buffer initialized from a POD value.
    pub fn uniform<T: bytemuck::Pod>(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        value: &T,
    ) -> Result<Self> {
        let bytes = bytemuck::bytes_of(value);
        Self::new(
            device,
            queue,
            BufferKind::Uniform,
            bytes.len() as u64,
            Some(bytes),
        )
    }

    /// Creates an uninitialized uniform buffer of `size` bytes.
    ///
    /// Useful for dynamically-offset uniforms where per-draw slices are
    /// written later.
    pub fn uniform_sized(device: &wgpu::Device, queue: &wgpu::Queue, size: u64) -> Result<Self> {
        Self::new(device, queue, BufferKind::Uniform, size, None)
    }

    /// Writes `data` at `offset`, bounds-checked against the buffer size.
    pub fn write(&self, queue: &wgpu::Queue, offset: u64, data: &[u8]) -> Result<()> {
        let len = data.len() as u64;
        if offset.checked_add(len).is_none_or(|end| end > self.size) {
            return Err(PrismError::BufferWriteOutOfBounds {
                offset,
                len,
                size: self.size,
            });
        }
        queue.write_buffer(&self.buffer, offset, data);
        Ok(())
    }

    #[must_use]
    pub fn raw(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[must_use]
    pub fn kind(&self) -> BufferKind {
        self.kind
    }

    /// Returns a slice over the whole buffer, for binding.
    #[must_use]
    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }

    fn validate_init(size: u64, data: Option<&[u8]>) -> Result<()> {
        match data {
            Some(contents) if contents.len() as u64 != size => {
                Err(PrismError::BufferSizeMismatch {
                    expected: size,
                    actual: contents.len() as u64,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Total byte size of `count` elements of `stride` bytes each.
#[must_use]
pub fn byte_size(count: u64, stride: u64) -> u64 {
    count * stride
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_size_of_four_vec3_vertices() {
        // 4 vertices of 3 f32 components each
        assert_eq!(byte_size(4, 3 * 4), 48);
    }

    #[test]
    fn kind_usages_include_copy_dst() {
        for kind in [
            BufferKind::Vertex,
            BufferKind::Index,
            BufferKind::Uniform,
            BufferKind::Storage,
        ] {
            assert!(kind.usages().contains(wgpu::BufferUsages::COPY_DST));
        }
        assert!(BufferKind::Vertex.usages().contains(wgpu::BufferUsages::VERTEX));
        assert!(BufferKind::Index.usages().contains(wgpu::BufferUsages::INDEX));
        assert!(BufferKind::Uniform.usages().contains(wgpu::BufferUsages::UNIFORM));
        assert!(BufferKind::Storage.usages().contains(wgpu::BufferUsages::STORAGE));
    }

    #[test]
    fn init_data_must_match_declared_size() {
        let data = [0u8; 40];
        assert!(Buffer::validate_init(48, Some(&data)).is_err());
        assert!(Buffer::validate_init(40, Some(&data)).is_ok());
        assert!(Buffer::validate_init(48, None).is_ok());
    }
}
