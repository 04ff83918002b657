/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Client-side images: the slices uploaded into textures.
//!
//! An [Image] is immutable once constructed. Texture creation techniques hold
//! images through [Rc], so one image can be shared by several textures; the
//! pixel buffer is freed when the last holder lets go of it.
//!
//! PNG decoding is done with the `image` crate and always produces 8-bit
//! RGBA with rows in top-to-bottom order.
//!
//! [Rc]: std::rc::Rc

use crate::gl::gl33core_raw::types::GLint;
use crate::texture::PixelFormat;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image has zero width or height ({width}x{height})")]
    ZeroSize { width: u32, height: u32 },
    #[error("image has no pixel format")]
    NoFormat,
    #[error("stride {stride} is shorter than a row of {row_bytes} bytes")]
    StrideTooShort { stride: usize, row_bytes: usize },
    #[error("stride {stride} is not a whole number of {bytes_per_pixel}-byte pixels")]
    StrideNotWholePixels { stride: usize, bytes_per_pixel: usize },
    #[error("pixel buffer has {actual} bytes, at least {needed} needed")]
    BufferTooShort { needed: usize, actual: usize },
    #[error("couldn't decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Candidate values for `GL_UNPACK_ALIGNMENT`, largest first.
const UNPACK_ALIGNMENTS: [usize; 4] = [8, 4, 2, 1];

/// The largest valid `GL_UNPACK_ALIGNMENT` that evenly divides `stride`.
///
/// Every stride is divisible by 1, so this always finds a value.
pub fn unpack_alignment_for_stride(stride: usize) -> GLint {
    let alignment = UNPACK_ALIGNMENTS
        .into_iter()
        .find(|&alignment| stride % alignment == 0)
        .unwrap_or(1);
    alignment as GLint
}

fn align_up(value: usize, alignment: usize) -> usize {
    value.div_ceil(alignment) * alignment
}

pub struct Image {
    width: u32,
    height: u32,
    format: PixelFormat,
    stride: usize,
    pixels: Vec<u8>,
}

impl Image {
    /// Wrap a pixel buffer. `stride` is the distance in bytes between the
    /// starts of consecutive rows.
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        stride: usize,
        pixels: Vec<u8>,
    ) -> Result<Image, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::ZeroSize { width, height });
        }
        let Some(bytes_per_pixel) = format.bytes_per_pixel() else {
            return Err(ImageError::NoFormat);
        };
        let row_bytes = width as usize * bytes_per_pixel;
        if stride < row_bytes {
            return Err(ImageError::StrideTooShort { stride, row_bytes });
        }
        // Strides that unpack alignment can't express need a row length,
        // which is counted in pixels.
        let aligned = align_up(row_bytes, unpack_alignment_for_stride(stride) as usize);
        if aligned != stride && stride % bytes_per_pixel != 0 {
            return Err(ImageError::StrideNotWholePixels {
                stride,
                bytes_per_pixel,
            });
        }
        let needed = stride * (height as usize - 1) + row_bytes;
        if pixels.len() < needed {
            return Err(ImageError::BufferTooShort {
                needed,
                actual: pixels.len(),
            });
        }
        Ok(Image {
            width,
            height,
            format,
            stride,
            pixels,
        })
    }

    /// Wrap tightly-packed 8-bit RGBA pixels.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Image, ImageError> {
        Image::new(width, height, PixelFormat::RGBA8, width as usize * 4, pixels)
    }

    /// Decode a PNG file into 8-bit RGBA.
    pub fn from_png_bytes(bytes: &[u8]) -> Result<Image, ImageError> {
        let decoded = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)?;
        let decoded = decoded.to_rgba8();
        let (width, height) = decoded.dimensions();
        Image::from_rgba8(width, height, decoded.into_raw())
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Raw pixel data, `stride` bytes per row.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// See [unpack_alignment_for_stride].
    pub fn unpack_alignment(&self) -> GLint {
        unpack_alignment_for_stride(self.stride)
    }

    /// The `GL_UNPACK_ROW_LENGTH` needed to upload this image, or [None] if
    /// [Self::unpack_alignment] alone describes the row layout.
    pub fn unpack_row_length(&self) -> Option<GLint> {
        // Image::new checked this is Some.
        let bytes_per_pixel = self.format.bytes_per_pixel()?;
        let row_bytes = self.width as usize * bytes_per_pixel;
        let aligned = align_up(row_bytes, self.unpack_alignment() as usize);
        if aligned == self.stride {
            None
        } else {
            Some((self.stride / bytes_per_pixel) as GLint)
        }
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Image ({}x{} {:?}, stride {})",
            self.width, self.height, self.format, self.stride
        )
    }
}

impl Drop for Image {
    fn drop(&mut self) {
        log_dbg!("Freeing {:?}", self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_for_stride() {
        assert_eq!(unpack_alignment_for_stride(12), 4);
        assert_eq!(unpack_alignment_for_stride(16), 8);
        assert_eq!(unpack_alignment_for_stride(7), 1);
        assert_eq!(unpack_alignment_for_stride(6), 2);
        assert_eq!(unpack_alignment_for_stride(1), 1);
    }

    #[test]
    fn construction_checks() {
        assert!(matches!(
            Image::new(0, 1, PixelFormat::R8, 1, vec![0]),
            Err(ImageError::ZeroSize { .. })
        ));
        assert!(matches!(
            Image::new(1, 1, PixelFormat::None, 1, vec![0]),
            Err(ImageError::NoFormat)
        ));
        assert!(matches!(
            Image::new(4, 1, PixelFormat::RGBA8, 15, vec![0; 16]),
            Err(ImageError::StrideTooShort { .. })
        ));
        // The last row doesn't need padding.
        assert!(Image::new(3, 2, PixelFormat::R8, 7, vec![0; 10]).is_ok());
        assert!(matches!(
            Image::new(3, 2, PixelFormat::R8, 7, vec![0; 9]),
            Err(ImageError::BufferTooShort {
                needed: 10,
                actual: 9
            })
        ));
    }

    #[test]
    fn row_length() {
        // 5 RGB pixels = 15 bytes, padded to 16 by an alignment of 8.
        let image = Image::new(5, 1, PixelFormat::RGB8, 16, vec![0; 16]).unwrap();
        assert_eq!(image.unpack_alignment(), 8);
        assert_eq!(image.unpack_row_length(), None);

        // 2 RGBA pixels = 8 bytes, but rows are 16 bytes apart.
        let image = Image::new(2, 2, PixelFormat::RGBA8, 16, vec![0; 24]).unwrap();
        assert_eq!(image.unpack_alignment(), 8);
        assert_eq!(image.unpack_row_length(), Some(4));

        // 1 RGB pixel, rows 16 bytes apart: not a whole number of pixels.
        assert!(matches!(
            Image::new(1, 2, PixelFormat::RGB8, 16, vec![0; 19]),
            Err(ImageError::StrideNotWholePixels { .. })
        ));
    }

    #[test]
    fn png_decoding() {
        assert!(matches!(
            Image::from_png_bytes(b"not a png"),
            Err(ImageError::Decode(_))
        ));

        let mut png = Vec::new();
        let source = image::RgbaImage::from_raw(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 128]).unwrap();
        source
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let decoded = Image::from_png_bytes(&png).unwrap();
        assert_eq!(decoded.dimensions(), (2, 1));
        assert_eq!(decoded.format(), PixelFormat::RGBA8);
        assert_eq!(decoded.stride(), 8);
        assert_eq!(decoded.pixels(), &[255, 0, 0, 255, 0, 0, 255, 128]);
    }
}
