/// Bytes per block (texel for uncompressed formats) of `format`.
pub fn bytes_per_block(format: wgpu::TextureFormat) -> u32 {
    use wgpu::TextureFormat::*;
    match format {
        // Depth aspects have no defined copy size; use their storage cost.
        Stencil8 => 1,
        Depth16Unorm => 2,
        Depth24Plus | Depth24PlusStencil8 | Depth32Float => 4,
        Depth32FloatStencil8 => 8,
        f => f.block_copy_size(None).unwrap_or(4),
    }
}

/// Blocks along each axis for a `width` x `height` image.
pub fn block_counts(format: wgpu::TextureFormat, width: u32, height: u32) -> (u32, u32) {
    let (bw, bh) = format.block_dimensions();
    (width.div_ceil(bw), height.div_ceil(bh))
}

/// Size of one mip level of a 2D texture.
pub fn texture_byte_size(format: wgpu::TextureFormat, width: u32, height: u32) -> u64 {
    let (bx, by) = block_counts(format, width, height);
    u64::from(bx) * u64::from(by) * u64::from(bytes_per_block(format))
}

/// `len` rounded up to the buffer copy alignment.
#[inline]
pub fn aligned_buffer_size(len: u64) -> u64 {
    len.div_ceil(wgpu::COPY_BUFFER_ALIGNMENT) * wgpu::COPY_BUFFER_ALIGNMENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat;

    #[test]
    fn uncompressed_sizes() {
        assert_eq!(texture_byte_size(TextureFormat::Rgba8Unorm, 256, 256), 262_144);
        assert_eq!(texture_byte_size(TextureFormat::R8Unorm, 3, 3), 9);
        assert_eq!(texture_byte_size(TextureFormat::Rgba16Float, 2, 2), 32);
        assert_eq!(texture_byte_size(TextureFormat::Rgba8Unorm, 0, 16), 0);
    }

    #[test]
    fn compressed_sizes_round_up_to_blocks() {
        assert_eq!(texture_byte_size(TextureFormat::Bc1RgbaUnorm, 10, 10), 72);
        assert_eq!(texture_byte_size(TextureFormat::Bc3RgbaUnorm, 4, 4), 16);
        let astc = TextureFormat::Astc {
            block: wgpu::AstcBlock::B8x8,
            channel: wgpu::AstcChannel::Unorm,
        };
        assert_eq!(texture_byte_size(astc, 17, 17), 144);
    }

    #[test]
    fn depth_sizes() {
        assert_eq!(texture_byte_size(TextureFormat::Depth16Unorm, 4, 4), 32);
        assert_eq!(texture_byte_size(TextureFormat::Depth24PlusStencil8, 4, 4), 64);
        assert_eq!(texture_byte_size(TextureFormat::Depth32FloatStencil8, 1, 1), 8);
    }

    #[test]
    fn buffer_alignment() {
        assert_eq!(aligned_buffer_size(0), 0);
        assert_eq!(aligned_buffer_size(1), 4);
        assert_eq!(aligned_buffer_size(4), 4);
        assert_eq!(aligned_buffer_size(13), 16);
    }
}
