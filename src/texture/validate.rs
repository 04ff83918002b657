/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Checking texture creation requests before anything is allocated.
//!
//! The checks come in two tiers. [check_request] needs no context and only
//! rejects requests that could never be valid. [validate] checks a request
//! against a context's [Capabilities]. Neither has side effects.

use super::{Capabilities, Extents, NativeFormat, PixelFormat, TextureError, TextureTarget};
use crate::gl::gl33core_raw::types::GLsizei;

/// Checks that don't need a context: non-zero extents that fit in a
/// [GLsizei], a real format, and the shape rules of `target`.
pub fn check_request(
    target: TextureTarget,
    extents: Extents,
    format: PixelFormat,
) -> Result<(), TextureError> {
    let Extents {
        width,
        height,
        depth,
    } = extents;
    if width == 0 || height == 0 {
        return Err(TextureError::InvalidArgument(format!(
            "texture size must be non-zero, got {}x{}",
            width, height
        )));
    }
    if depth == 0 {
        return Err(TextureError::InvalidArgument(
            "texture depth must be non-zero".to_string(),
        ));
    }
    if [width, height, depth]
        .into_iter()
        .any(|value| value > GLsizei::MAX as u32)
    {
        return Err(TextureError::InvalidArgument(format!(
            "texture size {} is too large to pass to OpenGL",
            extents
        )));
    }
    if format == PixelFormat::None {
        return Err(TextureError::InvalidArgument(
            "texture needs a pixel format".to_string(),
        ));
    }
    match target {
        TextureTarget::Texture2D | TextureTarget::CubeMap if depth != 1 => {
            Err(TextureError::InvalidArgument(format!(
                "{:?} textures have a depth of 1, got {}",
                target, depth
            )))
        }
        TextureTarget::CubeMap if width != height => Err(TextureError::InvalidArgument(format!(
            "cube map faces must be square, got {}x{}",
            width, height
        ))),
        _ => Ok(()),
    }
}

/// Full check of a request against a context's capabilities. Returns the
/// native formats to allocate storage with.
///
/// Size limits are checked before power-of-two-ness, so an oversized request
/// is reported as such even if it's also not a power of two.
pub fn validate(
    caps: &Capabilities,
    target: TextureTarget,
    extents: Extents,
    format: PixelFormat,
) -> Result<NativeFormat, TextureError> {
    check_request(target, extents, format)?;

    if !caps.supports_target(target) {
        return Err(TextureError::UnsupportedTarget(target));
    }

    let (max_width, max_height, max_depth) = caps.max_extents(target);
    for (requested, max) in [
        (extents.width, max_width),
        (extents.height, max_height),
        (extents.depth, max_depth),
    ] {
        if requested > max {
            return Err(TextureError::UnsupportedDimension { requested, max });
        }
    }

    // Array layer counts aren't subject to the power-of-two rule.
    let needs_pot_depth = target == TextureTarget::Texture3D;
    if !caps.npot_supported()
        && (!extents.width.is_power_of_two()
            || !extents.height.is_power_of_two()
            || (needs_pot_depth && !extents.depth.is_power_of_two()))
    {
        return Err(TextureError::UnsupportedNPOT {
            width: extents.width,
            height: extents.height,
            depth: extents.depth,
        });
    }

    format
        .native_for(caps)
        .ok_or(TextureError::UnsupportedFormat(format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn caps(max: u32, npot: bool) -> Capabilities {
        let (major_version, minor_version) = if npot { (3, 3) } else { (1, 4) };
        Capabilities {
            major_version,
            minor_version,
            core_profile: npot,
            max_texture_size: max,
            max_3d_texture_size: max,
            max_cube_map_texture_size: max,
            max_array_texture_layers: if npot { 256 } else { 0 },
            extensions: HashSet::new(),
        }
    }

    fn extents(width: u32, height: u32, depth: u32) -> Extents {
        Extents {
            width,
            height,
            depth,
        }
    }

    #[test]
    fn zero_size_and_no_format_are_invalid() {
        for (width, height) in [(0, 4), (4, 0), (0, 0)] {
            assert!(matches!(
                check_request(
                    TextureTarget::Texture2D,
                    extents(width, height, 1),
                    PixelFormat::RGBA8
                ),
                Err(TextureError::InvalidArgument(_))
            ));
        }
        assert!(matches!(
            check_request(
                TextureTarget::Texture2D,
                extents(4, 4, 1),
                PixelFormat::None
            ),
            Err(TextureError::InvalidArgument(_))
        ));
        assert!(matches!(
            check_request(
                TextureTarget::Texture3D,
                extents(4, 4, 0),
                PixelFormat::RGBA8
            ),
            Err(TextureError::InvalidArgument(_))
        ));
    }

    #[test]
    fn sizes_must_fit_in_glsizei() {
        let largest = GLsizei::MAX as u32;
        assert!(check_request(
            TextureTarget::Texture2D,
            extents(largest, 1, 1),
            PixelFormat::R8
        )
        .is_ok());
        for request in [
            extents(u32::MAX, 4, 1),
            extents(4, largest + 1, 1),
            extents(4, 4, largest + 1),
        ] {
            assert!(matches!(
                check_request(TextureTarget::Texture3D, request, PixelFormat::R8),
                Err(TextureError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn target_shapes() {
        assert!(check_request(TextureTarget::Texture2D, extents(4, 4, 2), PixelFormat::R8).is_err());
        assert!(check_request(TextureTarget::CubeMap, extents(4, 8, 1), PixelFormat::R8).is_err());
        assert!(check_request(TextureTarget::CubeMap, extents(8, 8, 1), PixelFormat::R8).is_ok());
        assert!(
            check_request(TextureTarget::Texture2DArray, extents(4, 8, 3), PixelFormat::R8)
                .is_ok()
        );
    }

    #[test]
    fn dimension_is_checked_before_npot() {
        let caps = caps(16, false);
        let rgba = PixelFormat::RGBA8;
        let target = TextureTarget::Texture2D;
        assert!(matches!(
            validate(&caps, target, extents(17, 4, 1), rgba),
            Err(TextureError::UnsupportedDimension {
                requested: 17,
                max: 16
            })
        ));
        assert!(matches!(
            validate(&caps, target, extents(3, 4, 1), rgba),
            Err(TextureError::UnsupportedNPOT { width: 3, .. })
        ));
        assert!(validate(&caps, target, extents(4, 4, 1), rgba).is_ok());
        assert!(validate(&caps, target, extents(16, 16, 1), rgba).is_ok());
    }

    #[test]
    fn npot_allowed_when_supported() {
        let caps = caps(4096, true);
        assert!(validate(
            &caps,
            TextureTarget::Texture3D,
            extents(3, 5, 7),
            PixelFormat::RGBA8
        )
        .is_ok());
    }

    #[test]
    fn depth_limits() {
        let caps = caps(4096, true);
        assert!(matches!(
            validate(
                &caps,
                TextureTarget::Texture2DArray,
                extents(4, 4, 257),
                PixelFormat::RGBA8
            ),
            Err(TextureError::UnsupportedDimension {
                requested: 257,
                max: 256
            })
        ));
        assert!(matches!(
            validate(
                &caps,
                TextureTarget::Texture3D,
                extents(4, 4, 4097),
                PixelFormat::RGBA8
            ),
            Err(TextureError::UnsupportedDimension { .. })
        ));
    }

    #[test]
    fn unsupported_targets_and_formats() {
        let old = caps(2048, false);
        assert!(matches!(
            validate(
                &old,
                TextureTarget::Texture2DArray,
                extents(4, 4, 2),
                PixelFormat::RGBA8
            ),
            Err(TextureError::UnsupportedTarget(TextureTarget::Texture2DArray))
        ));
        assert!(matches!(
            validate(
                &old,
                TextureTarget::Texture2D,
                extents(4, 4, 1),
                PixelFormat::RGBA32F
            ),
            Err(TextureError::UnsupportedFormat(PixelFormat::RGBA32F))
        ));
        assert!(validate(
            &old,
            TextureTarget::Texture2D,
            extents(4, 4, 1),
            PixelFormat::Luminance8
        )
        .is_ok());

        let mut old_with_float = old.clone();
        old_with_float
            .extensions
            .insert("GL_ARB_texture_float".to_string());
        assert!(validate(
            &old_with_float,
            TextureTarget::Texture2D,
            extents(4, 4, 1),
            PixelFormat::RGBA32F
        )
        .is_ok());

        let core = caps(4096, true);
        assert!(matches!(
            validate(
                &core,
                TextureTarget::Texture2D,
                extents(4, 4, 1),
                PixelFormat::Luminance8
            ),
            Err(TextureError::UnsupportedFormat(PixelFormat::Luminance8))
        ));
    }
}
