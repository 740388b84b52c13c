//! Texture management for the plot.
//!
//! - [`TextureManager`] owns the waveform texture (one row of `R32Float`
//!   texels, one per surface pixel column) and is the only writer of its
//!   contents.
//! - [`RenderTarget`] and [`ReadbackBuffer`] back offscreen drawables.

use super::context::GpuError;
use super::pipeline::PlotPipeline;
use crate::audio::resample_into;
use wgpu::{BindGroup, Device, Queue, Texture, TextureFormat, TextureUsages, TextureView};

/// Texel format of the waveform texture.
pub const WAVEFORM_FORMAT: TextureFormat = TextureFormat::R32Float;

/// A sized waveform texture with the bind group that exposes it to the shader.
pub struct AllocatedWaveform {
    texture: Texture,
    bind_group: BindGroup,
    width: u32,
}

impl AllocatedWaveform {
    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn bind_group(&self) -> &BindGroup {
        &self.bind_group
    }

    pub fn width(&self) -> u32 {
        self.width
    }
}

/// The waveform texture slot. Empty until the surface reports a width.
pub enum WaveformTexture {
    Unallocated,
    Allocated(AllocatedWaveform),
}

impl WaveformTexture {
    pub fn width(&self) -> u32 {
        match self {
            WaveformTexture::Unallocated => 0,
            WaveformTexture::Allocated(allocated) => allocated.width(),
        }
    }

    pub fn is_allocated(&self) -> bool {
        matches!(self, WaveformTexture::Allocated(_))
    }
}

/// Owns the waveform texture and keeps it in step with the surface width.
pub struct TextureManager {
    slot: WaveformTexture,
    scratch: Vec<f32>,
    max_width: u32,
    allocations: u64,
}

impl TextureManager {
    /// Create an empty manager; widths above `max_width` are clamped.
    pub fn new(max_width: u32) -> Self {
        Self {
            slot: WaveformTexture::Unallocated,
            scratch: Vec::new(),
            max_width: max_width.max(1),
            allocations: 0,
        }
    }

    pub fn texture(&self) -> &WaveformTexture {
        &self.slot
    }

    /// Current width in texels; 0 until the first non-zero resize.
    pub fn width(&self) -> u32 {
        self.slot.width()
    }

    /// How many textures have been allocated over the manager's lifetime.
    pub fn allocations(&self) -> u64 {
        self.allocations
    }

    /// Reallocate the texture for `width` texels.
    ///
    /// A zero width or an unchanged width keeps the current texture. Returns
    /// `true` if a new texture was allocated.
    pub fn resize(&mut self, device: &Device, pipeline: &PlotPipeline, width: u32) -> bool {
        if width == 0 {
            log::debug!("Ignoring zero-width resize, keeping {} texels", self.width());
            return false;
        }

        let width = if width > self.max_width {
            log::warn!(
                "Surface width {} exceeds the texture size limit, clamping to {}",
                width,
                self.max_width
            );
            self.max_width
        } else {
            width
        };

        if width == self.width() {
            return false;
        }

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("waveform_texture"),
            size: wgpu::Extent3d {
                width,
                height: 1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: WAVEFORM_FORMAT,
            usage: TextureUsages::TEXTURE_BINDING
                | TextureUsages::COPY_DST
                | TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = pipeline.create_bind_group(device, &view);

        log::info!("Allocated waveform texture: {} texels", width);

        // wgpu keeps the previous texture alive until in-flight work using it retires.
        self.slot = WaveformTexture::Allocated(AllocatedWaveform {
            texture,
            bind_group,
            width,
        });
        self.scratch.clear();
        self.scratch.resize(width as usize, 0.0);
        self.allocations += 1;
        true
    }

    /// Resample `samples` onto the texture.
    ///
    /// Does nothing (and keeps the previous contents) when no texture is
    /// allocated yet or when `samples` is empty. Returns `true` if the
    /// texture was written.
    pub fn upload(&mut self, queue: &Queue, samples: &[f32]) -> bool {
        let WaveformTexture::Allocated(allocated) = &self.slot else {
            log::debug!("Skipping upload: waveform texture not allocated yet");
            return false;
        };

        if !resample_into(samples, &mut self.scratch) {
            log::debug!("Skipping upload: empty sample snapshot, holding last frame");
            return false;
        }

        let width = allocated.width();
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: allocated.texture(),
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(&self.scratch),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: None,
            },
            wgpu::Extent3d {
                width,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
        true
    }

    /// Copy the texture contents back to the CPU.
    ///
    /// Blocks until the GPU has finished. Returns `None` while unallocated.
    pub fn read_back(&self, device: &Device, queue: &Queue) -> Result<Option<Vec<f32>>, GpuError> {
        let WaveformTexture::Allocated(allocated) = &self.slot else {
            return Ok(None);
        };

        let width = allocated.width();
        let row_bytes = width * 4;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_row_bytes = row_bytes.div_ceil(align) * align;

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("waveform_readback"),
            size: padded_row_bytes as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("waveform_readback_encoder"),
        });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: allocated.texture(),
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row_bytes),
                    rows_per_image: None,
                },
            },
            wgpu::Extent3d {
                width,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
        queue.submit(std::iter::once(encoder.finish()));

        map_blocking(device, &buffer)?;
        let texels = {
            let data = buffer.slice(..).get_mapped_range();
            bytemuck::cast_slice::<u8, f32>(&data[..row_bytes as usize]).to_vec()
        };
        buffer.unmap();
        Ok(Some(texels))
    }
}

/// A render target that owns both texture and view.
/// The texture must outlive its view, so we keep them together.
pub struct RenderTarget {
    texture: Texture,
    view: TextureView,
    width: u32,
    height: u32,
}

impl RenderTarget {
    /// Create a colour target that can be rendered into and copied to CPU.
    pub fn for_output(
        device: &Device,
        label: &str,
        width: u32,
        height: u32,
        format: TextureFormat,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: TextureUsages::RENDER_ATTACHMENT | TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            width,
            height,
        }
    }

    /// Get the texture view for rendering.
    pub fn view(&self) -> &TextureView {
        &self.view
    }

    /// Get the underlying texture (for copy operations).
    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Readback buffer for copying an RGBA8 target to CPU.
pub struct ReadbackBuffer {
    buffer: wgpu::Buffer,
    width: u32,
    height: u32,
    padded_row_bytes: u32,
    unpadded_row_bytes: u32,
}

impl ReadbackBuffer {
    /// Create a new readback buffer sized for the given dimensions.
    pub fn new(device: &Device, width: u32, height: u32) -> Self {
        let bytes_per_pixel = 4u32;
        let unpadded_row_bytes = width * bytes_per_pixel;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_row_bytes = unpadded_row_bytes.div_ceil(align) * align;

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("readback_buffer"),
            size: (padded_row_bytes * height) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            width,
            height,
            padded_row_bytes,
            unpadded_row_bytes,
        }
    }

    /// Record a copy of `target` into this buffer.
    pub fn copy_from(&self, encoder: &mut wgpu::CommandEncoder, target: &RenderTarget) {
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: target.texture(),
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &self.buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(self.padded_row_bytes),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Get the padded bytes per row (for texture copy).
    pub fn padded_row_bytes(&self) -> u32 {
        self.padded_row_bytes
    }

    /// Read pixels from the mapped buffer, removing row padding.
    pub fn read_pixels(&self, device: &Device) -> Result<Vec<u8>, GpuError> {
        map_blocking(device, &self.buffer)?;

        let mut pixels = Vec::with_capacity((self.width * self.height * 4) as usize);
        {
            let data = self.buffer.slice(..).get_mapped_range();
            for row in 0..self.height {
                let start = (row * self.padded_row_bytes) as usize;
                let end = start + self.unpadded_row_bytes as usize;
                pixels.extend_from_slice(&data[start..end]);
            }
        }
        self.buffer.unmap();
        Ok(pixels)
    }
}

fn map_blocking(device: &Device, buffer: &wgpu::Buffer) -> Result<(), GpuError> {
    let (sender, receiver) = std::sync::mpsc::channel();
    buffer.slice(..).map_async(wgpu::MapMode::Read, move |result| {
        let _ = sender.send(result);
    });
    device
        .poll(wgpu::PollType::wait_indefinitely())
        .map_err(|err| GpuError::Readback(err.to_string()))?;
    receiver
        .recv()
        .map_err(|err| GpuError::Readback(err.to_string()))?
        .map_err(|err| GpuError::Readback(err.to_string()))
}
