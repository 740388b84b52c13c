//! Host-ticked driver that owns its drawable source.

use super::{DrawableSource, FrameOutcome, FrameSync};
use crate::audio::SampleSource;
use crate::gpu::PlotRenderer;

/// Driver for hosts that call [`render_frame`](Self::render_frame) from a
/// timer or event loop.
///
/// Owns the drawable source and the sample source. Frames are submitted
/// without waiting for the GPU.
pub struct ManualDriver<D, S> {
    renderer: PlotRenderer,
    drawables: D,
    source: S,
}

impl<D, S> ManualDriver<D, S>
where
    D: DrawableSource,
    S: SampleSource,
{
    pub fn new(renderer: PlotRenderer, drawables: D, source: S) -> Self {
        Self {
            renderer,
            drawables,
            source,
        }
    }

    /// The host surface now measures `width` x `height` pixels.
    pub fn notify_size_changed(&mut self, width: u32, height: u32) {
        self.drawables.resize(width, height);
        self.renderer.notify_size_changed(width, height);
    }

    /// Render and present one frame.
    pub fn render_frame(&mut self) -> FrameOutcome {
        self.renderer
            .render_once(&mut self.drawables, &mut self.source, FrameSync::Detached)
    }

    pub fn renderer(&self) -> &PlotRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut PlotRenderer {
        &mut self.renderer
    }

    pub fn drawables(&self) -> &D {
        &self.drawables
    }

    pub fn drawables_mut(&mut self) -> &mut D {
        &mut self.drawables
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
