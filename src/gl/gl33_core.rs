/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Passthrough for a native OpenGL 3.3 core profile driver.
//!
//! There's almost no validation of arguments here, because we assume the
//! driver is complete and the texture layer has already validated requests
//! against the context's capabilities.

use super::gl33core_raw as gl33;
use super::gl33core_raw::types::*;
use super::GL;
use std::ffi::c_void;

pub struct GLCore33 {
    current: bool,
}
impl GLCore33 {
    /// Load the 3.3 core bindings. Fails if an entry point the texture layer
    /// needs is missing, which usually means the current context is older
    /// than 3.3.
    ///
    /// # Safety
    /// An OpenGL 3.3 core profile context must be current.
    pub unsafe fn load_with(loader: &mut dyn FnMut(&str) -> *const c_void) -> Result<Self, String> {
        gl33::load_with(|s| loader(s));
        let required = [
            ("glGetStringi", gl33::GetStringi::is_loaded()),
            ("glTexImage3D", gl33::TexImage3D::is_loaded()),
            ("glTexSubImage3D", gl33::TexSubImage3D::is_loaded()),
        ];
        for (name, loaded) in required {
            if !loaded {
                return Err(format!("{} could not be loaded", name));
            }
        }
        Ok(Self { current: true })
    }
}
impl GL for GLCore33 {
    fn description() -> &'static str {
        "Native OpenGL 3.3 core profile"
    }

    fn is_current(&self) -> bool {
        self.current
    }
    fn set_current(&mut self, current: bool) {
        self.current = current;
    }

    // Generic state manipulation
    unsafe fn GetError(&mut self) -> GLenum {
        gl33::GetError()
    }
    unsafe fn GetIntegerv(&mut self, pname: GLenum, params: *mut GLint) {
        gl33::GetIntegerv(pname, params)
    }
    unsafe fn GetString(&mut self, name: GLenum) -> *const GLubyte {
        gl33::GetString(name)
    }
    unsafe fn GetStringi(&mut self, name: GLenum, index: GLuint) -> *const GLubyte {
        gl33::GetStringi(name, index)
    }

    // Textures
    unsafe fn PixelStorei(&mut self, pname: GLenum, param: GLint) {
        gl33::PixelStorei(pname, param)
    }
    unsafe fn GenTextures(&mut self, n: GLsizei, textures: *mut GLuint) {
        gl33::GenTextures(n, textures)
    }
    unsafe fn DeleteTextures(&mut self, n: GLsizei, textures: *const GLuint) {
        gl33::DeleteTextures(n, textures)
    }
    unsafe fn BindTexture(&mut self, target: GLenum, texture: GLuint) {
        gl33::BindTexture(target, texture)
    }
    unsafe fn TexParameteri(&mut self, target: GLenum, pname: GLenum, param: GLint) {
        gl33::TexParameteri(target, pname, param)
    }
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
    ) {
        gl33::TexImage2D(
            target,
            level,
            internalformat,
            width,
            height,
            border,
            format,
            type_,
            pixels,
        )
    }
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
    ) {
        gl33::TexSubImage2D(
            target, level, xoffset, yoffset, width, height, format, type_, pixels,
        )
    }
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
    ) {
        gl33::TexImage3D(
            target,
            level,
            internalformat,
            width,
            height,
            depth,
            border,
            format,
            type_,
            pixels,
        )
    }
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
    ) {
        gl33::TexSubImage3D(
            target, level, xoffset, yoffset, zoffset, width, height, depth, format, type_, pixels,
        )
    }
}
