//! Presentation: drawable sources and the two host-facing drivers.
//!
//! - [`DrawableSource`] hands out one presentable target per frame. Two
//!   implementations: [`SurfaceDrawables`] for an owned `wgpu::Surface`, and
//!   [`OffscreenDrawables`] for headless targets that can be read back.
//! - [`ManualDriver`] is ticked by the host (timer, event loop) and never
//!   waits on the GPU.
//! - [`ManagedDriver`] is a [`ViewDelegate`] for hosts that schedule redraws
//!   themselves; it waits for each frame to finish before returning.
//!
//! Both drivers funnel into [`PlotRenderer::render_once`](crate::gpu::PlotRenderer::render_once).

pub mod managed;
pub mod manual;
pub mod offscreen;
pub mod surface;

pub use managed::{ManagedDriver, ViewDelegate};
pub use manual::ManualDriver;
pub use offscreen::{OffscreenDrawables, OffscreenFrame, SnapshotError};
pub use surface::{SurfaceDrawables, SurfaceFrame};

use wgpu::{TextureFormat, TextureView};

/// Why a presentable target could not be acquired this frame.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AcquireError {
    #[error("surface has no size yet")]
    Unsized,
    #[error("no drawable available")]
    Withheld,
    #[error("timed out waiting for a drawable")]
    Timeout,
    #[error("surface was outdated and has been reconfigured")]
    Outdated,
    #[error("surface was lost and has been reconfigured")]
    Lost,
    #[error("out of memory acquiring a drawable")]
    OutOfMemory,
    #[error("drawable acquisition failed: {0}")]
    Other(String),
}

/// A target that can be rendered into once and then shown.
pub trait Drawable {
    fn view(&self) -> &TextureView;

    /// Hand the rendered image to the display. Call after submitting.
    fn present(self);
}

/// Supplies presentable targets, one per frame.
pub trait DrawableSource {
    type Drawable: Drawable;

    /// Colour format of the drawables handed out.
    fn format(&self) -> TextureFormat;

    /// Track a new surface size in pixels. Zero sizes are ignored.
    fn resize(&mut self, width: u32, height: u32);

    /// Acquire the next drawable. Failures are transient: skip the frame.
    fn acquire(&mut self) -> Result<Self::Drawable, AcquireError>;
}

/// Whether a frame waits for the GPU before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSync {
    /// Submit and return; the surface serialises drawable reuse.
    Detached,
    /// Block until the GPU has executed the frame.
    WaitForCompletion,
}

/// Result of one frame tick. Never an error from the host's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoDrawable(AcquireError),
    /// The drawables' colour format differs from the renderer's pipeline.
    IncompatibleTarget {
        target: TextureFormat,
        pipeline: TextureFormat,
    },
    /// The GPU rejected the frame's commands; nothing was submitted.
    EncodingFailed(String),
}

impl FrameOutcome {
    pub fn is_presented(&self) -> bool {
        matches!(self, FrameOutcome::Presented)
    }
}
