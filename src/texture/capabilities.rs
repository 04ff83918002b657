/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Querying what the current context can do with textures.

use super::{TextureError, TextureTarget};
use crate::gl::gl33core_raw as gl; // constants only
use crate::gl::gl33core_raw::types::{GLint, GLuint};
use crate::gl::util::{get_integer, get_string, get_string_i};
use crate::gl::GL;
use std::collections::HashSet;

/// Texture-related limits and features of a context.
///
/// Usually obtained with [Capabilities::query], but the fields are public so
/// that a description of a hypothetical context can be built directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub major_version: u32,
    pub minor_version: u32,
    /// `true` for a core profile context (3.2 and later only).
    pub core_profile: bool,
    /// `GL_MAX_TEXTURE_SIZE`
    pub max_texture_size: u32,
    /// `GL_MAX_3D_TEXTURE_SIZE`, 0 if 3D textures are unsupported.
    pub max_3d_texture_size: u32,
    /// `GL_MAX_CUBE_MAP_TEXTURE_SIZE`, 0 if cube maps are unsupported.
    pub max_cube_map_texture_size: u32,
    /// `GL_MAX_ARRAY_TEXTURE_LAYERS`, 0 if array textures are unsupported.
    pub max_array_texture_layers: u32,
    pub extensions: HashSet<String>,
}

/// Parse the `major.minor` prefix of a `GL_VERSION` string, e.g.
/// `"3.3.0 NVIDIA 535.54"` or `"2.1 Mesa 23.0.4"`.
fn parse_version(version: &str) -> Option<(u32, u32)> {
    let number = version.split_whitespace().next()?;
    let mut parts = number.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor: String = parts
        .next()?
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    Some((major, minor.parse().ok()?))
}

fn to_limit(value: GLint) -> u32 {
    value.max(0) as u32
}

impl Capabilities {
    /// Query the capabilities of `ctx`, which must be current.
    pub fn query(ctx: &mut dyn GL) -> Result<Capabilities, TextureError> {
        if !ctx.is_current() {
            return Err(TextureError::NoActiveContext);
        }

        let version_string = unsafe { get_string(ctx, gl::VERSION) }.unwrap_or_default();
        let (major_version, minor_version) = parse_version(&version_string).unwrap_or_else(|| {
            log!(
                "Couldn't parse GL_VERSION {:?}, assuming OpenGL 1.1",
                version_string
            );
            (1, 1)
        });

        let mut caps = Capabilities {
            major_version,
            minor_version,
            core_profile: false,
            max_texture_size: 0,
            max_3d_texture_size: 0,
            max_cube_map_texture_size: 0,
            max_array_texture_layers: 0,
            extensions: HashSet::new(),
        };

        unsafe {
            if caps.version_at_least(3, 0) {
                let count = to_limit(get_integer(ctx, gl::NUM_EXTENSIONS));
                for i in 0..count {
                    if let Some(name) = get_string_i(ctx, gl::EXTENSIONS, i as GLuint) {
                        caps.extensions.insert(name);
                    }
                }
            } else if let Some(list) = get_string(ctx, gl::EXTENSIONS) {
                caps.extensions
                    .extend(list.split_whitespace().map(str::to_string));
            }

            if caps.version_at_least(3, 2) {
                let mask = get_integer(ctx, gl::CONTEXT_PROFILE_MASK) as u32;
                caps.core_profile = mask & gl::CONTEXT_CORE_PROFILE_BIT != 0;
            }

            caps.max_texture_size = to_limit(get_integer(ctx, gl::MAX_TEXTURE_SIZE));
            if caps.supports_target(TextureTarget::Texture3D) {
                caps.max_3d_texture_size = to_limit(get_integer(ctx, gl::MAX_3D_TEXTURE_SIZE));
            }
            if caps.supports_target(TextureTarget::CubeMap) {
                caps.max_cube_map_texture_size =
                    to_limit(get_integer(ctx, gl::MAX_CUBE_MAP_TEXTURE_SIZE));
            }
            if caps.supports_target(TextureTarget::Texture2DArray) {
                caps.max_array_texture_layers =
                    to_limit(get_integer(ctx, gl::MAX_ARRAY_TEXTURE_LAYERS));
            }
        }

        log_dbg!("Queried {:?}", caps);
        Ok(caps)
    }

    pub fn version_at_least(&self, major: u32, minor: u32) -> bool {
        (self.major_version, self.minor_version) >= (major, minor)
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains(name)
    }

    /// Whether texture dimensions may be something other than a power of two.
    pub fn npot_supported(&self) -> bool {
        self.version_at_least(2, 0) || self.has_extension("GL_ARB_texture_non_power_of_two")
    }

    pub fn supports_target(&self, target: TextureTarget) -> bool {
        match target {
            TextureTarget::Texture2D => true,
            TextureTarget::Texture3D => {
                self.version_at_least(1, 2) || self.has_extension("GL_EXT_texture3D")
            }
            TextureTarget::CubeMap => {
                self.version_at_least(1, 3) || self.has_extension("GL_ARB_texture_cube_map")
            }
            TextureTarget::Texture2DArray => {
                self.version_at_least(3, 0) || self.has_extension("GL_EXT_texture_array")
            }
        }
    }

    /// Largest width, height and depth allowed for `target`.
    pub fn max_extents(&self, target: TextureTarget) -> (u32, u32, u32) {
        match target {
            TextureTarget::Texture2D => (self.max_texture_size, self.max_texture_size, 1),
            TextureTarget::Texture3D => (
                self.max_3d_texture_size,
                self.max_3d_texture_size,
                self.max_3d_texture_size,
            ),
            TextureTarget::CubeMap => (
                self.max_cube_map_texture_size,
                self.max_cube_map_texture_size,
                1,
            ),
            TextureTarget::Texture2DArray => (
                self.max_texture_size,
                self.max_texture_size,
                self.max_array_texture_layers,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::recording::{Call, FakeDriver, RecordingGL};

    #[test]
    fn version_parsing() {
        assert_eq!(parse_version("3.3.0 NVIDIA 535.54"), Some((3, 3)));
        assert_eq!(parse_version("2.1 Mesa 23.0.4"), Some((2, 1)));
        assert_eq!(parse_version("4.6.0"), Some((4, 6)));
        assert_eq!(parse_version("1.4"), Some((1, 4)));
        assert_eq!(parse_version(""), None);
        assert_eq!(parse_version("OpenGL"), None);
    }

    #[test]
    fn query_core_context() {
        let mut ctx = RecordingGL::new(
            FakeDriver::gl33_core()
                .with_max_texture_size(8192)
                .with_extension("GL_ARB_debug_output"),
        );
        let caps = Capabilities::query(&mut ctx).unwrap();
        assert_eq!((caps.major_version, caps.minor_version), (3, 3));
        assert!(caps.core_profile);
        assert!(caps.npot_supported());
        assert!(caps.has_extension("GL_ARB_debug_output"));
        assert_eq!(caps.max_extents(TextureTarget::Texture3D), (8192, 8192, 8192));
        assert_eq!(
            caps.max_extents(TextureTarget::Texture2DArray),
            (8192, 8192, 2048)
        );
        // Core profiles have no GL_EXTENSIONS string.
        assert!(!ctx.calls().contains(&Call::GetString(gl::EXTENSIONS)));
    }

    #[test]
    fn query_legacy_context() {
        let mut ctx = RecordingGL::new(FakeDriver::gl14().with_extension("GL_EXT_bgra"));
        let caps = Capabilities::query(&mut ctx).unwrap();
        assert!(!caps.core_profile);
        assert!(!caps.npot_supported());
        assert!(caps.has_extension("GL_EXT_bgra"));
        assert!(caps.supports_target(TextureTarget::Texture3D));
        assert!(!caps.supports_target(TextureTarget::Texture2DArray));
        assert_eq!(caps.max_extents(TextureTarget::Texture3D), (256, 256, 256));
        assert_eq!(caps.max_array_texture_layers, 0);
        // No indexed queries before 3.0, and no profile query before 3.2.
        assert!(!ctx
            .calls()
            .iter()
            .any(|call| matches!(call, Call::GetStringi(..))));
        assert!(!ctx
            .calls()
            .contains(&Call::GetIntegerv(gl::CONTEXT_PROFILE_MASK)));
    }

    #[test]
    fn query_needs_current_context() {
        let mut ctx = RecordingGL::new(FakeDriver::default());
        ctx.set_current(false);
        assert!(matches!(
            Capabilities::query(&mut ctx),
            Err(TextureError::NoActiveContext)
        ));
        assert!(ctx.calls().is_empty());
    }
}
