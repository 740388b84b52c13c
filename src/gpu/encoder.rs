//! Per-frame command encoding.

use super::pipeline::{PlotPipeline, QUAD_VERTICES};
use super::style::StyleDescriptor;
use super::textures::WaveformTexture;
use wgpu::{CommandEncoder, Queue, TextureView};

/// What the encoder recorded for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodedFrame {
    /// The plot quad was drawn.
    Drawn,
    /// No waveform texture yet; the target was cleared to transparent.
    Cleared,
}

/// Record one plot frame into `encoder`, targeting `target`.
///
/// Stages the style block, binds the pipeline and waveform texture, and
/// draws the 4-vertex quad. While the texture is unallocated only the clear
/// is recorded.
pub fn encode_frame(
    queue: &Queue,
    encoder: &mut CommandEncoder,
    target: &TextureView,
    pipeline: &PlotPipeline,
    style: &StyleDescriptor,
    waveform: &WaveformTexture,
) -> EncodedFrame {
    pipeline.write_style(queue, style);

    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("plot_pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            depth_slice: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });

    match waveform {
        WaveformTexture::Unallocated => EncodedFrame::Cleared,
        WaveformTexture::Allocated(allocated) => {
            render_pass.set_pipeline(&pipeline.pipeline);
            render_pass.set_bind_group(0, allocated.bind_group(), &[]);
            render_pass.draw(0..QUAD_VERTICES, 0..1);
            EncodedFrame::Drawn
        }
    }
}
