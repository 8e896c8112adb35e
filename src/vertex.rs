//! Vertex Buffer Layouts
//!
//! [`VertexLayout`] owns the attribute storage for a single vertex buffer
//! slot and hands out a borrowed [`wgpu::VertexBufferLayout`] on demand.
//! Shader locations are assigned sequentially from 0 in insertion order
//! unless an explicit location is given.

/// Owned description of one vertex buffer slot.
///
/// The wgpu descriptor borrows its attribute slice, so something has to own
/// that storage for as long as a pipeline is being built. `VertexLayout`
/// plays that role; call [`as_wgpu`](Self::as_wgpu) at descriptor-assembly
/// time.
#[derive(Debug, Clone)]
pub struct VertexLayout {
    stride: u64,
    step_mode: wgpu::VertexStepMode,
    attributes: Vec<wgpu::VertexAttribute>,
}

impl Default for VertexLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexLayout {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stride: 0,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: Vec::new(),
        }
    }

    /// Creates a layout with the given byte stride between elements.
    #[must_use]
    pub fn with_stride(stride: u64) -> Self {
        let mut layout = Self::new();
        layout.stride = stride;
        layout
    }

    /// Sets the byte stride between consecutive elements.
    pub fn set_stride(&mut self, stride: u64) -> &mut Self {
        self.stride = stride;
        self
    }

    /// Advances this buffer per instance rather than per vertex.
    pub fn per_instance(&mut self) -> &mut Self {
        self.step_mode = wgpu::VertexStepMode::Instance;
        self
    }

    /// Appends an attribute with an auto-assigned shader location.
    ///
    /// Locations count up from 0 in insertion order.
    pub fn attribute(&mut self, format: wgpu::VertexFormat, offset: u64) -> &mut Self {
        let location = self.attributes.len() as u32;
        self.attribute_at(location, format, offset)
    }

    /// Appends an attribute with an explicit shader location.
    pub fn attribute_at(
        &mut self,
        shader_location: u32,
        format: wgpu::VertexFormat,
        offset: u64,
    ) -> &mut Self {
        self.attributes.push(wgpu::VertexAttribute {
            format,
            offset,
            shader_location,
        });
        self
    }

    /// Returns `true` when no attributes have been added.
    ///
    /// Empty layouts contribute no vertex buffer slot to a pipeline.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    #[must_use]
    pub fn stride(&self) -> u64 {
        self.stride
    }

    #[must_use]
    pub fn step_mode(&self) -> wgpu::VertexStepMode {
        self.step_mode
    }

    #[must_use]
    pub fn attributes(&self) -> &[wgpu::VertexAttribute] {
        &self.attributes
    }

    /// Borrows this layout as a wgpu descriptor.
    ///
    /// The returned value borrows the internal attribute storage; keep the
    /// layout alive until pipeline creation is done.
    #[must_use]
    pub fn as_wgpu(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride,
            step_mode: self.step_mode,
            attributes: &self.attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_locations_count_from_zero() {
        let mut layout = VertexLayout::with_stride(32);
        layout
            .attribute(wgpu::VertexFormat::Float32x3, 0)
            .attribute(wgpu::VertexFormat::Float32x3, 12)
            .attribute(wgpu::VertexFormat::Float32x2, 24);

        let locations: Vec<u32> = layout
            .attributes()
            .iter()
            .map(|a| a.shader_location)
            .collect();
        assert_eq!(locations, vec![0, 1, 2]);
    }

    #[test]
    fn explicit_location_is_kept() {
        let mut layout = VertexLayout::with_stride(16);
        layout.attribute_at(5, wgpu::VertexFormat::Float32x4, 0);
        assert_eq!(layout.attributes()[0].shader_location, 5);
    }

    #[test]
    fn empty_iff_no_attributes() {
        let mut layout = VertexLayout::with_stride(12);
        assert!(layout.is_empty());
        layout.attribute(wgpu::VertexFormat::Float32x3, 0);
        assert!(!layout.is_empty());
    }

    #[test]
    fn as_wgpu_mirrors_state() {
        let mut layout = VertexLayout::with_stride(24);
        layout.per_instance();
        layout.attribute(wgpu::VertexFormat::Float32x4, 0);

        let desc = layout.as_wgpu();
        assert_eq!(desc.array_stride, 24);
        assert_eq!(desc.step_mode, wgpu::VertexStepMode::Instance);
        assert_eq!(desc.attributes.len(), 1);
    }
}
