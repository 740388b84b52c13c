//! Bind group layout builders for the plot pipeline.

use std::num::NonZeroU64;
use wgpu::{BindGroupLayout, BindGroupLayoutEntry, Device, ShaderStages};

/// Builder for bind group layouts.
pub struct BindGroupLayoutBuilder {
    label: Option<&'static str>,
    entries: Vec<BindGroupLayoutEntry>,
}

impl BindGroupLayoutBuilder {
    pub fn new(label: &'static str) -> Self {
        Self {
            label: Some(label),
            entries: Vec::new(),
        }
    }

    /// Add a uniform buffer entry of exactly `size` bytes.
    ///
    /// Pipeline creation fails validation if the shader's struct disagrees.
    pub fn uniform_sized(mut self, binding: u32, visibility: ShaderStages, size: u64) -> Self {
        self.entries.push(BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: NonZeroU64::new(size),
            },
            count: None,
        });
        self
    }

    /// Add a float texture read with `textureLoad` (no sampler).
    pub fn texture_2d_unfilterable(mut self, binding: u32, visibility: ShaderStages) -> Self {
        self.entries.push(BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: false },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        });
        self
    }

    pub fn build(self, device: &Device) -> BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: self.label,
            entries: &self.entries,
        })
    }
}

/// Layout for the plot: waveform texture at 0, style block at 1.
pub fn create_plot_layout(device: &Device, style_size: u64) -> BindGroupLayout {
    BindGroupLayoutBuilder::new("plot_bind_group_layout")
        .texture_2d_unfilterable(0, ShaderStages::FRAGMENT)
        .uniform_sized(1, ShaderStages::FRAGMENT, style_size)
        .build(device)
}
