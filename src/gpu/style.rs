//! Visual parameters handed to the plot shader.

use serde::{Deserialize, Serialize};

/// Byte size of the style block the plot shader declares.
pub const STYLE_BLOCK_SIZE: usize = 48;

/// Per-frame styling for the plot.
///
/// Colours are straight (non-premultiplied) RGBA. The flags select how the
/// shader interprets the texture: spectrum vs. waveform, centred baseline,
/// filled area vs. stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleDescriptor {
    pub foreground_color: [f32; 4],
    pub background_color: [f32; 4],
    pub is_frequency_domain: bool,
    pub is_centered: bool,
    pub is_filled: bool,
}

impl Default for StyleDescriptor {
    fn default() -> Self {
        Self {
            foreground_color: [0.0, 1.0, 0.53, 1.0],
            background_color: [0.0, 0.0, 0.0, 1.0],
            is_frequency_domain: false,
            is_centered: true,
            is_filled: false,
        }
    }
}

impl StyleDescriptor {
    /// GPU layout of this style.
    pub fn to_block(&self) -> StyleBlock {
        StyleBlock {
            foreground_color: self.foreground_color,
            background_color: self.background_color,
            is_frequency_domain: self.is_frequency_domain as u32,
            is_centered: self.is_centered as u32,
            is_filled: self.is_filled as u32,
            _padding: 0,
        }
    }
}

/// Uniform data matching the shader's `Style` struct, byte for byte.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StyleBlock {
    pub foreground_color: [f32; 4],
    pub background_color: [f32; 4],
    pub is_frequency_domain: u32,
    pub is_centered: u32,
    pub is_filled: u32,
    pub _padding: u32,
}

const _: () = assert!(std::mem::size_of::<StyleBlock>() == STYLE_BLOCK_SIZE);

impl StyleBlock {
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_is_48_bytes_for_any_style() {
        let styles = [
            StyleDescriptor::default(),
            StyleDescriptor {
                foreground_color: [1.0, 0.0, 0.0, 0.5],
                background_color: [0.1, 0.2, 0.3, 0.0],
                is_frequency_domain: true,
                is_centered: false,
                is_filled: true,
            },
        ];
        for style in styles {
            assert_eq!(style.to_block().as_bytes().len(), STYLE_BLOCK_SIZE);
        }
    }

    #[test]
    fn test_block_field_offsets() {
        let style = StyleDescriptor {
            foreground_color: [1.0, 2.0, 3.0, 4.0],
            background_color: [5.0, 6.0, 7.0, 8.0],
            is_frequency_domain: true,
            is_centered: false,
            is_filled: true,
        };
        let block = style.to_block();
        let bytes = block.as_bytes();
        let word =
            |offset: usize| u32::from_ne_bytes(bytes[offset..offset + 4].try_into().unwrap());

        assert_eq!(f32::from_bits(word(0)), 1.0);
        assert_eq!(f32::from_bits(word(16)), 5.0);
        assert_eq!(word(32), 1);
        assert_eq!(word(36), 0);
        assert_eq!(word(40), 1);
        assert_eq!(word(44), 0);
    }
}
