//! Headless drawables backed by an offscreen colour target.

use super::{AcquireError, Drawable, DrawableSource};
use crate::gpu::textures::{ReadbackBuffer, RenderTarget};
use crate::gpu::{GpuContext, GpuError};
use std::path::Path;
use std::sync::Arc;
use wgpu::{Device, Queue, TextureFormat, TextureView};

/// Errors that can occur while saving a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Offscreen target has no size yet")]
    Unsized,
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Offscreen drawable source.
///
/// Every acquire hands out the same target, sized by the last non-zero
/// [`DrawableSource::resize`]. Hosts can [`withhold`](Self::withhold)
/// drawables to mimic a surface with nothing ready.
pub struct OffscreenDrawables {
    device: Arc<Device>,
    queue: Arc<Queue>,
    format: TextureFormat,
    target: Option<RenderTarget>,
    withheld: bool,
}

/// One frame's view of the offscreen target.
pub struct OffscreenFrame {
    view: TextureView,
}

impl Drawable for OffscreenFrame {
    fn view(&self) -> &TextureView {
        &self.view
    }

    fn present(self) {}
}

impl OffscreenDrawables {
    /// Create an unsized source producing RGBA8 drawables.
    pub fn new(ctx: &GpuContext) -> Self {
        Self::with_format(ctx, TextureFormat::Rgba8Unorm)
    }

    /// `format` must have 4-byte texels for [`read_pixels`](Self::read_pixels).
    pub fn with_format(ctx: &GpuContext, format: TextureFormat) -> Self {
        Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            format,
            target: None,
            withheld: false,
        }
    }

    /// Stop (or resume) handing out drawables.
    pub fn withhold(&mut self, withheld: bool) {
        self.withheld = withheld;
    }

    /// Current target size, if sized.
    pub fn size(&self) -> Option<(u32, u32)> {
        self.target.as_ref().map(RenderTarget::size)
    }

    /// Copy the target's pixels back to the CPU (blocking).
    ///
    /// Returns `None` while unsized.
    pub fn read_pixels(&self) -> Result<Option<Vec<u8>>, GpuError> {
        let Some(target) = &self.target else {
            return Ok(None);
        };
        let (width, height) = target.size();
        let readback = ReadbackBuffer::new(&self.device, width, height);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("offscreen_readback_encoder"),
            });
        readback.copy_from(&mut encoder, target);
        self.queue.submit(std::iter::once(encoder.finish()));

        readback.read_pixels(&self.device).map(Some)
    }

    /// Save the target's current pixels as a PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        let (width, height) = self.size().ok_or(SnapshotError::Unsized)?;
        let pixels = self.read_pixels()?.ok_or(SnapshotError::Unsized)?;
        image::save_buffer(path, &pixels, width, height, image::ColorType::Rgba8)?;
        Ok(())
    }
}

impl DrawableSource for OffscreenDrawables {
    type Drawable = OffscreenFrame;

    fn format(&self) -> TextureFormat {
        self.format
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("Ignoring offscreen resize to {}x{}", width, height);
            return;
        }
        if self.size() == Some((width, height)) {
            return;
        }
        self.target = Some(RenderTarget::for_output(
            &self.device,
            "offscreen_drawable",
            width,
            height,
            self.format,
        ));
    }

    fn acquire(&mut self) -> Result<OffscreenFrame, AcquireError> {
        if self.withheld {
            return Err(AcquireError::Withheld);
        }
        let target = self.target.as_ref().ok_or(AcquireError::Unsized)?;
        Ok(OffscreenFrame {
            view: target.view().clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unsized_source_has_no_drawable() {
        let Ok(ctx) = GpuContext::new().await else {
            return;
        };
        let mut drawables = OffscreenDrawables::new(&ctx);
        assert_eq!(drawables.acquire().err(), Some(AcquireError::Unsized));
        drawables.resize(0, 10);
        assert_eq!(drawables.size(), None);
        assert!(drawables.read_pixels().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_withheld_source_refuses() {
        let Ok(ctx) = GpuContext::new().await else {
            return;
        };
        let mut drawables = OffscreenDrawables::new(&ctx);
        drawables.resize(16, 8);
        assert!(drawables.acquire().is_ok());

        drawables.withhold(true);
        assert_eq!(drawables.acquire().err(), Some(AcquireError::Withheld));
        drawables.withhold(false);
        assert!(drawables.acquire().is_ok());
    }

    #[tokio::test]
    async fn test_save_png_requires_size() {
        let Ok(ctx) = GpuContext::new().await else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.png");

        let mut drawables = OffscreenDrawables::new(&ctx);
        assert!(matches!(drawables.save_png(&path), Err(SnapshotError::Unsized)));

        drawables.resize(24, 12);
        drawables.save_png(&path).unwrap();
        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (24, 12));
    }

    #[tokio::test]
    async fn test_read_pixels_size() {
        let Ok(ctx) = GpuContext::new().await else {
            return;
        };
        let mut drawables = OffscreenDrawables::new(&ctx);
        drawables.resize(70, 5);
        let pixels = drawables.read_pixels().unwrap().unwrap();
        assert_eq!(pixels.len(), 70 * 5 * 4);
    }
}
