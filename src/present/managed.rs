//! Delegate-driven mode for host views that schedule their own redraws.

use super::{DrawableSource, FrameOutcome, FrameSync};
use crate::audio::SampleSource;
use crate::gpu::PlotRenderer;

/// Callbacks a managed host view makes into its delegate.
///
/// The view owns its drawables and resizes them itself before calling
/// [`drawable_size_will_change`](Self::drawable_size_will_change).
pub trait ViewDelegate<V: DrawableSource> {
    fn drawable_size_will_change(&mut self, view: &mut V, width: u32, height: u32);

    fn draw(&mut self, view: &mut V) -> FrameOutcome;
}

/// Plot delegate for managed views.
///
/// Each draw blocks until the GPU has finished the frame, which is what
/// synchronous redraw callbacks expect.
pub struct ManagedDriver<S> {
    renderer: PlotRenderer,
    source: S,
}

impl<S: SampleSource> ManagedDriver<S> {
    pub fn new(renderer: PlotRenderer, source: S) -> Self {
        Self { renderer, source }
    }

    pub fn renderer(&self) -> &PlotRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut PlotRenderer {
        &mut self.renderer
    }
}

impl<S, V> ViewDelegate<V> for ManagedDriver<S>
where
    S: SampleSource,
    V: DrawableSource,
{
    fn drawable_size_will_change(&mut self, _view: &mut V, width: u32, height: u32) {
        self.renderer.notify_size_changed(width, height);
    }

    fn draw(&mut self, view: &mut V) -> FrameOutcome {
        self.renderer
            .render_once(view, &mut self.source, FrameSync::WaitForCompletion)
    }
}
