/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Generic OpenGL interface.
//!
//! This does not provide the types and constants, so the correct usage is to
//! import `GL` from this module, but get the constants and types from
//! [super::gl33core_raw].

use super::gl33core_raw::types::*;

/// Trait representing an OpenGL implementation and context.
///
/// Only the entry points the texture layer needs are here. They have the
/// same names and signatures as the C API, so implementations are mostly
/// passthroughs.
///
/// # Safety
/// It is the caller's responsibility to make the context current before using
/// any of the `unsafe` methods of this trait. [GL::is_current] can be used to
/// check this.
#[allow(clippy::upper_case_acronyms)]
#[allow(clippy::too_many_arguments)] // not our fault :(
pub trait GL {
    /// Get a human-friendly description of this implementation.
    fn description() -> &'static str
    where
        Self: Sized;

    /// Whether the context is current on the calling thread, i.e. whether it
    /// is okay to call the `unsafe` methods.
    fn is_current(&self) -> bool;

    /// Tell the implementation that its context has been made current, or
    /// has stopped being current. This is called by whatever manages the
    /// underlying context (e.g. [crate::window]).
    fn set_current(&mut self, current: bool);

    // Generic state manipulation
    unsafe fn GetError(&mut self) -> GLenum;
    unsafe fn GetIntegerv(&mut self, pname: GLenum, params: *mut GLint);
    unsafe fn GetString(&mut self, name: GLenum) -> *const GLubyte;
    unsafe fn GetStringi(&mut self, name: GLenum, index: GLuint) -> *const GLubyte;

    // Textures
    unsafe fn PixelStorei(&mut self, pname: GLenum, param: GLint);
    unsafe fn GenTextures(&mut self, n: GLsizei, textures: *mut GLuint);
    unsafe fn DeleteTextures(&mut self, n: GLsizei, textures: *const GLuint);
    unsafe fn BindTexture(&mut self, target: GLenum, texture: GLuint);
    unsafe fn TexParameteri(&mut self, target: GLenum, pname: GLenum, param: GLint);
    unsafe fn TexImage2D(
        &mut self,
        target: GLenum,
        level: GLint,
        internalformat: GLint,
        width: GLsizei,
        height: GLsizei,
        border: GLint,
        format: GLenum,
        type_: GLenum,
        pixels: *const GLvoid,
    );
    unsafe fn TexSubImage2D(
        &mut self,
        target: GLenum,
        level: GLint,
        xoffset: GLint,
        yoffset: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        type_: GLenum,
        pixels: *const GLvoid,
    );
    unsafe fn TexImage3D(
        &mut self,
        target: GLenum,
        level: GLint,
        internalformat: GLint,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
        border: GLint,
        format: GLenum,
        type_: GLenum,
        pixels: *const GLvoid,
    );
    unsafe fn TexSubImage3D(
        &mut self,
        target: GLenum,
        level: GLint,
        xoffset: GLint,
        yoffset: GLint,
        zoffset: GLint,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
        format: GLenum,
        type_: GLenum,
        pixels: *const GLvoid,
    );
}
