/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Parsing and management of user-configurable options for `glwrap-info`.

use crate::gl::GLImplementation;
use crate::texture::{Extents, PixelFormat, TextureTarget};

pub const DOCUMENTATION: &str = "\
Context options:
    --gl-implementation=...
        Use a particular OpenGL implementation. The options are:
        gl33_core    Native OpenGL 3.3 core profile
        gl21_compat  Native OpenGL 2.1 compatibility profile

        The default is to try each of them in the order above, and use the
        first one that works.

Test texture options:
    --test-texture=...
        After printing the context's capabilities, create a texture of this
        size and report whether it worked. The size is written as WxHxD, e.g.
        --test-texture=64x64x4. The depth may be left out, in which case it
        is 1.

    --test-target=...
        The kind of texture --test-texture creates. One of 2d, 3d, cube and
        2d_array. The default is 3d.

    --test-format=...
        The pixel format --test-texture uses. One of r8, rg8, rgb8, rgba8,
        bgr8, bgra8, r32f, rgba32f and luminance8. The default is rgba8.
";

/// Struct containing all user-configurable options.
#[derive(Debug, PartialEq)]
pub struct Options {
    pub gl_implementation: Option<GLImplementation>,
    pub test_texture: Option<Extents>,
    pub test_target: TextureTarget,
    pub test_format: PixelFormat,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            gl_implementation: None,
            test_texture: None,
            test_target: TextureTarget::Texture3D,
            test_format: PixelFormat::RGBA8,
        }
    }
}

fn parse_extents(value: &str) -> Result<Extents, String> {
    let mut parts = value.split('x');
    let mut next = |name| -> Result<Option<u32>, String> {
        parts
            .next()
            .map(|part| {
                part.parse()
                    .map_err(|_| format!("Invalid texture {}: {:?}", name, part))
            })
            .transpose()
    };
    let width = next("width")?.ok_or("Missing texture width")?;
    let height = next("height")?.ok_or("Texture size must be written as WxH or WxHxD")?;
    let depth = next("depth")?.unwrap_or(1);
    if next("size")?.is_some() {
        return Err("Texture size has too many dimensions".to_string());
    }
    Ok(Extents::new(width, height, depth))
}

impl Options {
    /// Parse the command-line argument syntax for an option. Returns `Ok(true)`
    /// if the option was valid and has been applied, and `Ok(false)` if the
    /// option was not recognized.
    pub fn parse_argument(&mut self, arg: &str) -> Result<bool, String> {
        if let Some(value) = arg.strip_prefix("--gl-implementation=") {
            self.gl_implementation = Some(
                GLImplementation::from_short_name(value)
                    .map_err(|_| format!("Unrecognized OpenGL implementation: {:?}", value))?,
            );
        } else if let Some(value) = arg.strip_prefix("--test-texture=") {
            self.test_texture = Some(parse_extents(value)?);
        } else if let Some(value) = arg.strip_prefix("--test-target=") {
            self.test_target = TextureTarget::from_short_name(value)
                .map_err(|_| format!("Unrecognized texture target: {:?}", value))?;
        } else if let Some(value) = arg.strip_prefix("--test-format=") {
            self.test_format = PixelFormat::from_short_name(value)
                .map_err(|_| format!("Unrecognized pixel format: {:?}", value))?;
        } else {
            return Ok(false);
        };
        Ok(true)
    }
}
