/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Pixel formats and their OpenGL equivalents.

use super::Capabilities;
use crate::gl::gl21compat_raw as gl21; // constants only
use crate::gl::gl33core_raw as gl; // constants only
use crate::gl::gl33core_raw::types::GLenum;

/// Layout of a pixel, both in client memory and (roughly) in texture storage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// No format. Never valid for a texture or an image; this is what an
    /// undefined [super::Texture] reports.
    None,
    R8,
    RG8,
    RGB8,
    RGBA8,
    /// 8-bit RGB stored in BGR order in client memory.
    BGR8,
    /// 8-bit RGBA stored in BGRA order in client memory.
    BGRA8,
    R32F,
    RGBA32F,
    /// Legacy single-channel luminance. Compatibility profile only.
    Luminance8,
}

/// What [PixelFormat] means to the driver: `internalformat` for
/// `glTexImage*`, and `format`/`type` for the client-side data.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NativeFormat {
    pub internal_format: GLenum,
    pub format: GLenum,
    pub type_: GLenum,
}

impl PixelFormat {
    pub const ALL: &'static [PixelFormat] = &[
        PixelFormat::R8,
        PixelFormat::RG8,
        PixelFormat::RGB8,
        PixelFormat::RGBA8,
        PixelFormat::BGR8,
        PixelFormat::BGRA8,
        PixelFormat::R32F,
        PixelFormat::RGBA32F,
        PixelFormat::Luminance8,
    ];

    /// Convert from short name used for command-line arguments. Returns [Err]
    /// if name is not recognized.
    pub fn from_short_name(name: &str) -> Result<Self, ()> {
        PixelFormat::ALL
            .iter()
            .copied()
            .find(|format| format.short_name() == name)
            .ok_or(())
    }

    pub fn short_name(self) -> &'static str {
        match self {
            PixelFormat::None => "none",
            PixelFormat::R8 => "r8",
            PixelFormat::RG8 => "rg8",
            PixelFormat::RGB8 => "rgb8",
            PixelFormat::RGBA8 => "rgba8",
            PixelFormat::BGR8 => "bgr8",
            PixelFormat::BGRA8 => "bgra8",
            PixelFormat::R32F => "r32f",
            PixelFormat::RGBA32F => "rgba32f",
            PixelFormat::Luminance8 => "luminance8",
        }
    }

    /// Size of one pixel in client memory. [None] for [PixelFormat::None].
    pub fn bytes_per_pixel(self) -> Option<usize> {
        Some(match self {
            PixelFormat::None => return None,
            PixelFormat::R8 | PixelFormat::Luminance8 => 1,
            PixelFormat::RG8 => 2,
            PixelFormat::RGB8 | PixelFormat::BGR8 => 3,
            PixelFormat::RGBA8 | PixelFormat::BGRA8 | PixelFormat::R32F => 4,
            PixelFormat::RGBA32F => 16,
        })
    }

    /// The native formats for this pixel format, regardless of whether the
    /// context supports them. [None] for [PixelFormat::None].
    pub fn native(self) -> Option<NativeFormat> {
        let (internal_format, format, type_) = match self {
            PixelFormat::None => return None,
            PixelFormat::R8 => (gl::R8, gl::RED, gl::UNSIGNED_BYTE),
            PixelFormat::RG8 => (gl::RG8, gl::RG, gl::UNSIGNED_BYTE),
            PixelFormat::RGB8 => (gl::RGB8, gl::RGB, gl::UNSIGNED_BYTE),
            PixelFormat::RGBA8 => (gl::RGBA8, gl::RGBA, gl::UNSIGNED_BYTE),
            PixelFormat::BGR8 => (gl::RGB8, gl::BGR, gl::UNSIGNED_BYTE),
            PixelFormat::BGRA8 => (gl::RGBA8, gl::BGRA, gl::UNSIGNED_BYTE),
            PixelFormat::R32F => (gl::R32F, gl::RED, gl::FLOAT),
            PixelFormat::RGBA32F => (gl::RGBA32F, gl::RGBA, gl::FLOAT),
            PixelFormat::Luminance8 => (gl21::LUMINANCE8, gl21::LUMINANCE, gl::UNSIGNED_BYTE),
        };
        Some(NativeFormat {
            internal_format,
            format,
            type_,
        })
    }

    /// The native formats for this pixel format, if the context described by
    /// `caps` supports it.
    pub fn native_for(self, caps: &Capabilities) -> Option<NativeFormat> {
        let supported = match self {
            PixelFormat::None => false,
            PixelFormat::RGB8 | PixelFormat::RGBA8 => true,
            PixelFormat::R8 | PixelFormat::RG8 => {
                caps.version_at_least(3, 0) || caps.has_extension("GL_ARB_texture_rg")
            }
            PixelFormat::BGR8 | PixelFormat::BGRA8 => {
                caps.version_at_least(1, 2) || caps.has_extension("GL_EXT_bgra")
            }
            PixelFormat::R32F => {
                caps.version_at_least(3, 0)
                    || (caps.has_extension("GL_ARB_texture_float")
                        && caps.has_extension("GL_ARB_texture_rg"))
            }
            PixelFormat::RGBA32F => {
                caps.version_at_least(3, 0) || caps.has_extension("GL_ARB_texture_float")
            }
            PixelFormat::Luminance8 => !caps.core_profile,
        };
        if supported {
            self.native()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_round_trip() {
        for &format in PixelFormat::ALL {
            assert_eq!(PixelFormat::from_short_name(format.short_name()), Ok(format));
        }
        assert_eq!(PixelFormat::from_short_name("none"), Err(()));
        assert_eq!(PixelFormat::from_short_name("RGBA8"), Err(()));
    }

    #[test]
    fn every_real_format_has_a_size_and_native_format() {
        for &format in PixelFormat::ALL {
            assert!(format.bytes_per_pixel().is_some());
            assert!(format.native().is_some());
        }
        assert_eq!(PixelFormat::None.bytes_per_pixel(), None);
        assert_eq!(PixelFormat::None.native(), None);
    }

    #[test]
    fn bgra_uses_rgba_storage() {
        let native = PixelFormat::BGRA8.native().unwrap();
        assert_eq!(native.internal_format, gl::RGBA8);
        assert_eq!(native.format, gl::BGRA);
    }
}
