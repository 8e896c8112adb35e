//! Error Types
//!
//! The main error type [`PrismError`] covers all failure modes: GPU
//! bootstrap, resource creation, asset decoding, and the window system.
//! Public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, PrismError>`.

use thiserror::Error;

/// The main error type for the toolkit.
#[derive(Error, Debug)]
pub enum PrismError {
    // ========================================================================
    // GPU Bootstrap Errors
    // ========================================================================
    /// Failed to request a compatible GPU adapter.
    #[error("Failed to request WGPU adapter: {0}")]
    AdapterRequestFailed(String),

    /// Failed to create the GPU device.
    #[error("Failed to create WGPU device: {0}")]
    DeviceCreateFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create the rendering surface for a window.
    #[error("Failed to create surface: {0}")]
    SurfaceCreateFailed(#[from] wgpu::CreateSurfaceError),

    /// The surface is in an unrecoverable state.
    #[error("Surface error: {0}")]
    SurfaceError(String),

    /// Event loop error (winit).
    #[error("Event loop error: {0}")]
    EventLoopError(#[from] winit::error::EventLoopError),

    // ========================================================================
    // Resource Errors
    // ========================================================================
    /// Buffer initial data does not match the declared buffer size.
    #[error("Buffer size mismatch: declared {expected} bytes, got {actual} bytes of data")]
    BufferSizeMismatch {
        /// Declared buffer size in bytes
        expected: u64,
        /// Length of the supplied data
        actual: u64,
    },

    /// A buffer write would land outside the buffer.
    #[error("Buffer write out of bounds: offset {offset} + {len} bytes exceeds size {size}")]
    BufferWriteOutOfBounds {
        /// Write offset in bytes
        offset: u64,
        /// Length of the data being written
        len: u64,
        /// Total buffer size
        size: u64,
    },

    /// A render pipeline was built without a required piece of state.
    #[error("Incomplete pipeline description: {0}")]
    PipelineIncomplete(String),

    /// A render pass was begun without a required attachment.
    #[error("Incomplete render pass description: {0}")]
    PassIncomplete(String),

    /// More render bundles were submitted at once than the encoder supports.
    #[error("Render bundle batches of {count} are not supported (maximum is 1)")]
    BundleBatchTooLarge {
        /// Number of bundles in the rejected batch
        count: usize,
    },

    // ========================================================================
    // Asset Errors
    // ========================================================================
    /// Image decoding error.
    #[error("Image decode error: {0}")]
    ImageDecodeError(String),

    /// Wavefront OBJ parsing or loading error.
    #[error("OBJ load error: {0}")]
    ObjLoadError(String),
}

impl From<image::ImageError> for PrismError {
    fn from(err: image::ImageError) -> Self {
        PrismError::ImageDecodeError(err.to_string())
    }
}

impl From<tobj::LoadError> for PrismError {
    fn from(err: tobj::LoadError) -> Self {
        PrismError::ObjLoadError(err.to_string())
    }
}

/// Alias for `Result<T, PrismError>`.
pub type Result<T> = std::result::Result<T, PrismError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_the_numbers() {
        let err = PrismError::BufferSizeMismatch {
            expected: 48,
            actual: 40,
        };
        assert_eq!(
            err.to_string(),
            "Buffer size mismatch: declared 48 bytes, got 40 bytes of data"
        );

        let err = PrismError::BufferWriteOutOfBounds {
            offset: 32,
            len: 64,
            size: 48,
        };
        assert!(err.to_string().contains("32 + 64"));

        let err = PrismError::BundleBatchTooLarge { count: 3 };
        assert!(err.to_string().contains("maximum is 1"));
    }
}
