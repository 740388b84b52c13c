//! Plot renderer: per-frame pull, upload, encode, submit, present.

use super::context::{GpuContext, GpuError};
use super::encoder::{encode_frame, EncodedFrame};
use super::pipeline::PlotPipeline;
use super::style::StyleDescriptor;
use super::textures::TextureManager;
use crate::audio::SampleSource;
use crate::present::{Drawable, DrawableSource, FrameOutcome, FrameSync, SkipReason};
use std::sync::Arc;
use wgpu::{Device, Queue, TextureFormat};

/// Lifecycle of a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// No size reported yet; frames clear to transparent.
    Uninitialized,
    /// Texture allocated, no frame presented since the last resize.
    Sized,
    /// Presenting frames.
    Rendering,
}

/// Renders a live sample snapshot as a plot into drawables.
///
/// One instance per surface. All calls happen on the owning thread, in frame
/// order; nothing here locks.
pub struct PlotRenderer {
    device: Arc<Device>,
    queue: Arc<Queue>,
    pipeline: PlotPipeline,
    textures: TextureManager,
    style: StyleDescriptor,
    state: DriverState,
    frames_presented: u64,
    frames_skipped: u64,
}

impl PlotRenderer {
    /// Create a renderer drawing into targets of `format`.
    pub fn new(ctx: &GpuContext, format: TextureFormat, style: StyleDescriptor) -> Self {
        let pipeline = PlotPipeline::new(&ctx.device, format);
        let textures = TextureManager::new(ctx.max_texture_width());

        Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            pipeline,
            textures,
            style,
            state: DriverState::Uninitialized,
            frames_presented: 0,
            frames_skipped: 0,
        }
    }

    pub fn style(&self) -> &StyleDescriptor {
        &self.style
    }

    /// Replace the style; takes effect on the next frame.
    pub fn set_style(&mut self, style: StyleDescriptor) {
        self.style = style;
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Current waveform width in texels (0 until sized).
    pub fn texture_width(&self) -> u32 {
        self.textures.width()
    }

    pub fn textures(&self) -> &TextureManager {
        &self.textures
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped
    }

    /// The surface now measures `width` x `height` pixels.
    pub fn notify_size_changed(&mut self, width: u32, height: u32) {
        log::debug!("Surface size changed to {}x{}", width, height);
        self.resize(width);
    }

    /// Size the waveform texture to `width` texels.
    ///
    /// Zero is ignored. Any non-zero width moves the renderer back to
    /// [`DriverState::Sized`]; the texture is only reallocated when the width
    /// actually changes.
    pub fn resize(&mut self, width: u32) -> bool {
        if width == 0 {
            log::debug!("Ignoring zero-width resize");
            return false;
        }
        let reallocated = self.textures.resize(&self.device, &self.pipeline, width);
        self.state = DriverState::Sized;
        reallocated
    }

    /// Resample `samples` onto the waveform texture.
    pub fn upload(&mut self, samples: &[f32]) -> bool {
        self.textures.upload(&self.queue, samples)
    }

    /// Run one frame: pull samples, upload, acquire, encode, submit, present.
    ///
    /// With [`FrameSync::WaitForCompletion`] the call returns only after the
    /// GPU has finished the frame. A missing drawable skips the frame without
    /// submitting anything; the next tick tries again. So does a target whose
    /// format the pipeline cannot draw into, or commands the GPU rejects.
    pub fn render_once<D, S>(
        &mut self,
        drawables: &mut D,
        source: &mut S,
        sync: FrameSync,
    ) -> FrameOutcome
    where
        D: DrawableSource,
        S: SampleSource + ?Sized,
    {
        let samples = source.pull();
        self.upload(&samples);

        let target_format = drawables.format();
        if target_format != self.pipeline.format() {
            log::warn!(
                "Skipping frame: target format {:?} does not match pipeline format {:?}",
                target_format,
                self.pipeline.format()
            );
            return self.skip(SkipReason::IncompatibleTarget {
                target: target_format,
                pipeline: self.pipeline.format(),
            });
        }

        let drawable = match drawables.acquire() {
            Ok(drawable) => drawable,
            Err(err) => {
                log::debug!("Skipping frame: {}", err);
                return self.skip(SkipReason::NoDrawable(err));
            }
        };

        let error_scope = self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("plot_encoder"),
            });
        let encoded = encode_frame(
            &self.queue,
            &mut encoder,
            drawable.view(),
            &self.pipeline,
            &self.style,
            self.textures.texture(),
        );
        let commands = encoder.finish();

        if let Some(err) = pollster::block_on(error_scope.pop()) {
            log::error!("Skipping frame: encoding failed: {}", err);
            return self.skip(SkipReason::EncodingFailed(err.to_string()));
        }

        self.queue.submit(std::iter::once(commands));
        drawable.present();

        if sync == FrameSync::WaitForCompletion {
            if let Err(err) = self.device.poll(wgpu::PollType::wait_indefinitely()) {
                log::error!("Waiting for frame completion failed: {}", err);
            }
        }

        if encoded == EncodedFrame::Drawn {
            self.state = DriverState::Rendering;
        }
        self.frames_presented += 1;
        FrameOutcome::Presented
    }

    fn skip(&mut self, reason: SkipReason) -> FrameOutcome {
        self.frames_skipped += 1;
        FrameOutcome::Skipped(reason)
    }

    /// Read the waveform texture back (blocking). `None` while unsized.
    pub fn read_waveform(&self) -> Result<Option<Vec<f32>>, GpuError> {
        self.textures.read_back(&self.device, &self.queue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::OffscreenDrawables;

    fn rgba_renderer(ctx: &GpuContext) -> PlotRenderer {
        PlotRenderer::new(ctx, TextureFormat::Rgba8Unorm, StyleDescriptor::default())
    }

    #[tokio::test]
    async fn test_renderer_starts_uninitialized() {
        let Ok(ctx) = GpuContext::new().await else {
            return;
        };
        let renderer = rgba_renderer(&ctx);
        assert_eq!(renderer.state(), DriverState::Uninitialized);
        assert_eq!(renderer.texture_width(), 0);
        assert!(renderer.read_waveform().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resize_transitions_to_sized() {
        let Ok(ctx) = GpuContext::new().await else {
            return;
        };
        let mut renderer = rgba_renderer(&ctx);

        assert!(!renderer.resize(0));
        assert_eq!(renderer.state(), DriverState::Uninitialized);

        renderer.notify_size_changed(320, 200);
        assert_eq!(renderer.state(), DriverState::Sized);
        assert_eq!(renderer.texture_width(), 320);
    }

    #[tokio::test]
    async fn test_set_style_replaces_style() {
        let Ok(ctx) = GpuContext::new().await else {
            return;
        };
        let mut renderer = rgba_renderer(&ctx);
        let style = StyleDescriptor {
            is_filled: true,
            ..Default::default()
        };
        renderer.set_style(style);
        assert_eq!(renderer.style(), &style);
    }

    #[tokio::test]
    async fn test_mismatched_format_skips_before_acquire() {
        let Ok(ctx) = GpuContext::new().await else {
            return;
        };
        let mut renderer = rgba_renderer(&ctx);
        let mut drawables = OffscreenDrawables::with_format(&ctx, TextureFormat::Bgra8Unorm);
        drawables.resize(16, 8);
        renderer.notify_size_changed(16, 8);

        let mut source = || vec![0.0f32; 16];
        let outcome = renderer.render_once(&mut drawables, &mut source, FrameSync::Detached);
        assert_eq!(
            outcome,
            FrameOutcome::Skipped(SkipReason::IncompatibleTarget {
                target: TextureFormat::Bgra8Unorm,
                pipeline: TextureFormat::Rgba8Unorm,
            })
        );
        assert_eq!(renderer.frames_skipped(), 1);
        assert_eq!(renderer.frames_presented(), 0);
        assert_eq!(renderer.state(), DriverState::Sized);
    }
}
