/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! OpenGL context creation etc.

use crate::gl::GLVersion;
use sdl2::video::GLProfile;

pub struct GLContext {
    gl_ctx: sdl2::video::GLContext,
    version: GLVersion,
}
impl GLContext {
    pub fn version(&self) -> GLVersion {
        self.version
    }
}

pub fn create_gl_context(
    video_ctx: &sdl2::VideoSubsystem,
    window: &sdl2::video::Window,
    version: GLVersion,
) -> Result<GLContext, String> {
    let attr = video_ctx.gl_attr();
    match version {
        GLVersion::GL21Compat => {
            attr.set_context_version(2, 1);
            attr.set_context_profile(GLProfile::Compatibility);
        }
        GLVersion::GL33Core => {
            attr.set_context_version(3, 3);
            attr.set_context_profile(GLProfile::Core);
        }
    }

    let gl_ctx = window.gl_create_context()?;

    Ok(GLContext { gl_ctx, version })
}

pub fn make_gl_context_current(
    window: &sdl2::video::Window,
    gl_ctx: &GLContext,
) -> Result<(), String> {
    window.gl_make_current(&gl_ctx.gl_ctx)
}
