/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Abstraction of the host window, which exists here only to own OpenGL
//! contexts. The window is never shown.
//!
//! Only available with the `sdl` feature. The library itself never needs a
//! window: everything above [crate::gl] takes a context handle explicitly.

mod gl;

pub use gl::GLContext;

use crate::gl::{GLImplementation, GLVersion, GL};
use std::ffi::c_void;

pub struct Window {
    _sdl_ctx: sdl2::Sdl,
    video_ctx: sdl2::VideoSubsystem,
    window: sdl2::video::Window,
}
impl Window {
    pub fn new_hidden(title: &str) -> Result<Window, String> {
        let sdl_ctx = sdl2::init()?;
        let video_ctx = sdl_ctx.video()?;

        // The size is irrelevant since nothing is drawn to it, but some
        // drivers refuse to make a context current on a 0x0 surface.
        let window = video_ctx
            .window(title, 64, 64)
            .hidden()
            .opengl()
            .build()
            .map_err(|e| e.to_string())?;

        Ok(Window {
            _sdl_ctx: sdl_ctx,
            video_ctx,
            window,
        })
    }

    pub fn create_gl_context(&mut self, version: GLVersion) -> Result<GLContext, String> {
        gl::create_gl_context(&self.video_ctx, &self.window, version)
    }

    pub fn make_gl_context_current(&mut self, gl_ctx: &GLContext) -> Result<(), String> {
        gl::make_gl_context_current(&self.window, gl_ctx)
    }

    /// Look up an OpenGL entry point of the current context.
    pub fn gl_get_proc_address(&self, procname: &str) -> *const c_void {
        self.video_ctx.gl_get_proc_address(procname) as *const _
    }

    /// Create a context for `implementation`, make it current and load the
    /// implementation's bindings. The returned [GLContext] must be kept alive
    /// for as long as the [GL] is used.
    pub fn create_gl_implementation(
        &mut self,
        implementation: GLImplementation,
    ) -> Result<(GLContext, Box<dyn GL>), String> {
        let gl_ctx = self.create_gl_context(implementation.version())?;
        self.make_gl_context_current(&gl_ctx)?;
        let mut loader = |procname: &str| self.gl_get_proc_address(procname);
        // Safety: the context of the right version was just made current, and
        // the loader returns its entry points.
        let ctx = unsafe { implementation.construct(&mut loader)? };
        Ok((gl_ctx, ctx))
    }
}

/// Try each implementation in `list`, in order, and return the first one a
/// context can be created for.
pub fn create_gl_ctx(
    window: &mut Window,
    list: &[GLImplementation],
) -> Result<(GLContext, Box<dyn GL>), String> {
    log!("Creating an OpenGL context:");
    for &implementation in list {
        log!("Trying: {}", implementation.description());
        match window.create_gl_implementation(implementation) {
            Ok(result) => {
                log!("=> Success!");
                return Ok(result);
            }
            Err(err) => {
                log!("=> Failed: {}.", err);
            }
        }
    }
    Err("Couldn't create an OpenGL context!".to_string())
}
