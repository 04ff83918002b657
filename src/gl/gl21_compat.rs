/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Passthrough for an OpenGL 2.1 compatibility profile driver.
//!
//! OpenGL 2.1 has everything the texture layer needs except the indexed
//! extension query (`glGetStringi` with `GL_NUM_EXTENSIONS`), which arrived in
//! 3.0. A compatibility context from a newer driver will report a 3.x version
//! string, which makes [crate::texture::Capabilities] use the indexed query,
//! but the 2.1 bindings have no `glGetStringi` to call. So both parts of the
//! indexed query are emulated here by splitting the old space-separated
//! `GL_EXTENSIONS` string.

use super::gl21compat_raw as gl21;
use super::gl21compat_raw::types::*;
use super::gl33core_raw as gl33; // constants only
use super::GL;
use std::ffi::{c_void, CStr, CString};

pub struct GLCompat21 {
    current: bool,
    /// Cached result of splitting `GL_EXTENSIONS`, built on first use.
    extensions: Option<Vec<CString>>,
}
impl GLCompat21 {
    /// Load the 2.1 compatibility bindings.
    ///
    /// # Safety
    /// An OpenGL 2.1 (or later) compatibility profile context must be current.
    pub unsafe fn load_with(loader: &mut dyn FnMut(&str) -> *const c_void) -> Result<Self, String> {
        gl21::load_with(|s| loader(s));
        if !gl21::TexImage3D::is_loaded() {
            return Err("glTexImage3D could not be loaded".to_string());
        }
        Ok(Self {
            current: true,
            extensions: None,
        })
    }

    unsafe fn extensions(&mut self) -> &[CString] {
        self.extensions.get_or_insert_with(|| {
            let list = gl21::GetString(gl21::EXTENSIONS);
            if list.is_null() {
                return Vec::new();
            }
            split_extensions(CStr::from_ptr(list as *const _).to_bytes())
        })
    }
}

/// Split a `GL_EXTENSIONS` string into the names `glGetStringi` would return.
fn split_extensions(list: &[u8]) -> Vec<CString> {
    list.split(|c| c.is_ascii_whitespace())
        .filter(|name| !name.is_empty())
        .filter_map(|name| CString::new(name).ok())
        .collect()
}
impl GL for GLCompat21 {
    fn description() -> &'static str {
        "Native OpenGL 2.1 compatibility profile"
    }

    fn is_current(&self) -> bool {
        self.current
    }
    fn set_current(&mut self, current: bool) {
        self.current = current;
    }

    // Generic state manipulation
    unsafe fn GetError(&mut self) -> GLenum {
        gl21::GetError()
    }
    unsafe fn GetIntegerv(&mut self, pname: GLenum, params: *mut GLint) {
        if pname == gl33::NUM_EXTENSIONS {
            params.write(self.extensions().len().try_into().unwrap());
        } else {
            gl21::GetIntegerv(pname, params)
        }
    }
    unsafe fn GetString(&mut self, name: GLenum) -> *const GLubyte {
        gl21::GetString(name)
    }
    unsafe fn GetStringi(&mut self, name: GLenum, index: GLuint) -> *const GLubyte {
        assert!(name == gl33::EXTENSIONS);
        match self.extensions().get(index as usize) {
            Some(extension) => extension.as_ptr() as *const _,
            None => std::ptr::null(),
        }
    }

    // Textures
    unsafe fn PixelStorei(&mut self, pname: GLenum, param: GLint) {
        match pname {
            gl21::PACK_ALIGNMENT | gl21::UNPACK_ALIGNMENT => {
                assert!(param == 1 || param == 2 || param == 4 || param == 8);
            }
            gl21::UNPACK_ROW_LENGTH => assert!(param >= 0),
            _ => panic!("Unhandled pixel store parameter: {:#x}", pname),
        }
        gl21::PixelStorei(pname, param)
    }
    unsafe fn GenTextures(&mut self, n: GLsizei, textures: *mut GLuint) {
        gl21::GenTextures(n, textures)
    }
    unsafe fn DeleteTextures(&mut self, n: GLsizei, textures: *const GLuint) {
        gl21::DeleteTextures(n, textures)
    }
    unsafe fn BindTexture(&mut self, target: GLenum, texture: GLuint) {
        gl21::BindTexture(target, texture)
    }
    unsafe fn TexParameteri(&mut self, target: GLenum, pname: GLenum, param: GLint) {
        gl21::TexParameteri(target, pname, param)
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
        assert!(level >= 0);
        assert!(border == 0);
        gl21::TexImage2D(
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
        gl21::TexSubImage2D(
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
        // EXT_texture_array uses the same enum value as 3.0's TEXTURE_2D_ARRAY.
        assert!(target == gl21::TEXTURE_3D || target == gl21::TEXTURE_2D_ARRAY_EXT);
        assert!(border == 0);
        gl21::TexImage3D(
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
        assert!(target == gl21::TEXTURE_3D || target == gl21::TEXTURE_2D_ARRAY_EXT);
        gl21::TexSubImage3D(
            target, level, xoffset, yoffset, zoffset, width, height, depth, format, type_, pixels,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[u8]) -> Vec<String> {
        split_extensions(list)
            .into_iter()
            .map(|name| name.into_string().unwrap())
            .collect()
    }

    #[test]
    fn empty_extension_string() {
        assert!(split_extensions(b"").is_empty());
        assert!(split_extensions(b"   ").is_empty());
    }

    #[test]
    fn extension_string_separators() {
        assert_eq!(
            names(b"GL_ARB_texture_float GL_ARB_texture_rg"),
            ["GL_ARB_texture_float", "GL_ARB_texture_rg"]
        );
        // Some drivers pad the list with extra or trailing spaces.
        assert_eq!(
            names(b"  GL_EXT_bgra   GL_EXT_texture_array "),
            ["GL_EXT_bgra", "GL_EXT_texture_array"]
        );
    }
}
