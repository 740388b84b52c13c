//! Plot rendering pipeline.
//!
//! Built once per renderer and reused for its whole lifetime. The vertex
//! stage generates the quad itself, so the pipeline has no vertex buffers.

use super::layouts::create_plot_layout;
use super::style::{StyleDescriptor, STYLE_BLOCK_SIZE};
use wgpu::{
    BindGroup, BindGroupLayout, Buffer, Device, Queue, RenderPipeline, TextureFormat, TextureView,
};

/// Vertices in the full-surface triangle strip.
pub const QUAD_VERTICES: u32 = 4;

/// Plot rendering pipeline and its style uniform.
pub struct PlotPipeline {
    pub pipeline: RenderPipeline,
    pub bind_group_layout: BindGroupLayout,
    pub style_buffer: Buffer,
    format: TextureFormat,
}

impl PlotPipeline {
    /// Create the pipeline for render targets of `format`.
    pub fn new(device: &Device, format: TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("plot_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/plot.wgsl").into()),
        });

        let bind_group_layout = create_plot_layout(device, STYLE_BLOCK_SIZE as u64);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("plot_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("plot_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let style_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("plot_style"),
            size: STYLE_BLOCK_SIZE as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            pipeline,
            bind_group_layout,
            style_buffer,
            format,
        }
    }

    /// Bind group pairing a waveform texture view with the style uniform.
    pub fn create_bind_group(&self, device: &Device, waveform: &TextureView) -> BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("plot_bind_group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(waveform),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: self.style_buffer.as_entire_binding(),
                },
            ],
        })
    }

    /// Stage `style` for the next submitted frame.
    pub fn write_style(&self, queue: &Queue, style: &StyleDescriptor) {
        queue.write_buffer(&self.style_buffer, 0, style.to_block().as_bytes());
    }

    /// Colour format of the targets this pipeline renders into.
    pub fn format(&self) -> TextureFormat {
        self.format
    }
}
