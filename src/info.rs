/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Entry point of `glwrap-info`, which prints what the host's OpenGL driver
//! can do with textures, and optionally tries to create one.

use crate::gl::GLImplementation;
use crate::options::{self, Options};
use crate::texture::{Capabilities, PixelFormat, Texture, TextureTarget};
use crate::window::{self, Window};

const USAGE: &str = "\
Usage:
    glwrap-info [options]

Special options:
    --help
        Display this help text.
";

pub fn main<T: Iterator<Item = String>>(mut args: T) -> Result<(), String> {
    echo!("glwrap-info {}", env!("CARGO_PKG_VERSION"));
    echo!();

    let _ = args.next(); // skip argv[0]

    let mut options = Options::default();
    for arg in args {
        if arg == "--help" {
            echo!("{}", USAGE);
            echo!("{}", options::DOCUMENTATION);
            return Ok(());
        } else if !options.parse_argument(&arg)? {
            echo!("{}", USAGE);
            echo!("{}", options::DOCUMENTATION);
            return Err(format!("Unexpected argument: {:?}", arg));
        }
    }

    let list = if let Some(ref preference) = options.gl_implementation {
        std::slice::from_ref(preference)
    } else {
        GLImplementation::IMPLEMENTATIONS
    };

    let mut window = Window::new_hidden("glwrap-info")?;
    let (gl_ctx, mut ctx) = window::create_gl_ctx(&mut window, list)?;
    log_dbg!("Context version: {:?}", gl_ctx.version());

    let caps = Capabilities::query(&mut *ctx).map_err(|e| e.to_string())?;
    print_capabilities(&caps);

    if let Some(extents) = options.test_texture {
        echo!();
        echo!(
            "Creating a {} {:?} texture with format {}:",
            extents,
            options.test_target,
            options.test_format.short_name()
        );
        let mut texture = Texture::new(options.test_target);
        match texture.create_empty(&mut *ctx, extents, options.test_format) {
            Ok(()) => echo!("=> Success! Texture name: {}", texture.name()),
            Err(err) => echo!("=> Failed: {}.", err),
        }
        texture.delete(&mut *ctx).map_err(|e| e.to_string())?;
    }

    ctx.set_current(false);
    drop(ctx);
    drop(gl_ctx);
    Ok(())
}

fn print_capabilities(caps: &Capabilities) {
    echo!("Context capabilities:");
    echo!(
        "- Version: {}.{}{}",
        caps.major_version,
        caps.minor_version,
        if caps.core_profile { " core" } else { "" }
    );
    echo!(
        "- Non-power-of-two textures: {}",
        if caps.npot_supported() { "yes" } else { "no" }
    );
    for target in [
        TextureTarget::Texture2D,
        TextureTarget::Texture3D,
        TextureTarget::CubeMap,
        TextureTarget::Texture2DArray,
    ] {
        if caps.supports_target(target) {
            let (width, height, depth) = caps.max_extents(target);
            echo!("- {:?}: up to {}x{}x{}", target, width, height, depth);
        } else {
            echo!("- {:?}: unsupported", target);
        }
    }
    let formats: Vec<&str> = PixelFormat::ALL
        .iter()
        .filter(|format| format.native_for(caps).is_some())
        .map(|format| format.short_name())
        .collect();
    echo!("- Pixel formats: {}", formats.join(", "));
    echo!("- Extensions: {}", caps.extensions.len());
}
