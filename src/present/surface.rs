//! Drawables from an owned `wgpu::Surface`.

use super::{AcquireError, Drawable, DrawableSource};
use crate::gpu::{GpuContext, GpuError};
use std::sync::Arc;
use wgpu::{Device, Surface, SurfaceConfiguration, SurfaceTexture, TextureFormat, TextureView};

/// Swapchain-backed drawable source.
pub struct SurfaceDrawables {
    surface: Surface<'static>,
    device: Arc<Device>,
    config: SurfaceConfiguration,
    configured: bool,
}

/// An acquired swapchain image.
pub struct SurfaceFrame {
    texture: SurfaceTexture,
    view: TextureView,
}

impl Drawable for SurfaceFrame {
    fn view(&self) -> &TextureView {
        &self.view
    }

    fn present(self) {
        self.texture.present();
    }
}

impl SurfaceDrawables {
    /// Configure `surface` for presentation at `width` x `height`.
    ///
    /// A zero size leaves the surface unconfigured until the first real
    /// resize. Fails if the adapter cannot present to the surface at all.
    pub fn new(
        ctx: &GpuContext,
        surface: Surface<'static>,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<Self, GpuError> {
        let caps = surface.get_capabilities(&ctx.adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|format| !format.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or(GpuError::UnsupportedSurface)?;

        let present_mode = if vsync {
            wgpu::PresentMode::Fifo
        } else {
            [wgpu::PresentMode::Mailbox, wgpu::PresentMode::Immediate]
                .into_iter()
                .find(|mode| caps.present_modes.contains(mode))
                .unwrap_or(wgpu::PresentMode::Fifo)
        };
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode,
            desired_maximum_frame_latency: 2,
            alpha_mode,
            view_formats: vec![],
        };

        let mut drawables = Self {
            surface,
            device: ctx.device.clone(),
            config,
            configured: false,
        };
        drawables.resize(width, height);
        Ok(drawables)
    }

    fn configure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        self.configured = true;
    }

    pub fn config(&self) -> &SurfaceConfiguration {
        &self.config
    }
}

impl DrawableSource for SurfaceDrawables {
    type Drawable = SurfaceFrame;

    fn format(&self) -> TextureFormat {
        self.config.format
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("Ignoring surface resize to {}x{}", width, height);
            return;
        }
        if self.configured && self.config.width == width && self.config.height == height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.configure();
    }

    fn acquire(&mut self) -> Result<SurfaceFrame, AcquireError> {
        if !self.configured {
            return Err(AcquireError::Unsized);
        }

        match self.surface.get_current_texture() {
            Ok(texture) => {
                if texture.suboptimal {
                    log::debug!("Acquired suboptimal drawable");
                }
                let view = texture
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                Ok(SurfaceFrame { texture, view })
            }
            Err(wgpu::SurfaceError::Timeout) => Err(AcquireError::Timeout),
            Err(wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface outdated, reconfiguring");
                self.configure();
                Err(AcquireError::Outdated)
            }
            Err(wgpu::SurfaceError::Lost) => {
                log::warn!("Surface lost, reconfiguring");
                self.configure();
                Err(AcquireError::Lost)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => Err(AcquireError::OutOfMemory),
            #[allow(unreachable_patterns)]
            Err(other) => Err(AcquireError::Other(other.to_string())),
        }
    }
}
