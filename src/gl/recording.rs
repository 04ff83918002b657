/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! A fake [GL] implementation that records every call.
//!
//! [RecordingGL] doesn't draw anything and doesn't keep texture contents. It
//! answers capability queries from a [FakeDriver] description, hands out
//! texture names, can be told to raise GL errors, and keeps a log of every
//! call in order, so tests can check exactly what the texture layer asked the
//! driver to do.

use super::gl33core_raw as gl;
use super::gl33core_raw::types::*;
use super::GL;
use std::collections::VecDeque;
use std::ffi::CString;

/// Description of the driver [RecordingGL] pretends to be.
#[derive(Clone, Debug)]
pub struct FakeDriver {
    pub major_version: u32,
    pub minor_version: u32,
    /// Only meaningful for 3.2 and later, where profiles exist.
    pub core_profile: bool,
    pub max_texture_size: GLint,
    pub max_3d_texture_size: GLint,
    pub max_cube_map_texture_size: GLint,
    pub max_array_texture_layers: GLint,
    pub extensions: Vec<String>,
}

impl Default for FakeDriver {
    fn default() -> Self {
        FakeDriver::gl33_core()
    }
}

impl FakeDriver {
    /// A typical OpenGL 3.3 core profile driver.
    pub fn gl33_core() -> Self {
        FakeDriver {
            major_version: 3,
            minor_version: 3,
            core_profile: true,
            max_texture_size: 4096,
            max_3d_texture_size: 4096,
            max_cube_map_texture_size: 4096,
            max_array_texture_layers: 2048,
            extensions: Vec::new(),
        }
    }

    /// An old OpenGL 1.4 driver: no non-power-of-two textures, no texture
    /// arrays, no float or two-channel formats, and small limits.
    pub fn gl14() -> Self {
        FakeDriver {
            major_version: 1,
            minor_version: 4,
            core_profile: false,
            max_texture_size: 2048,
            max_3d_texture_size: 256,
            max_cube_map_texture_size: 2048,
            max_array_texture_layers: 0,
            extensions: Vec::new(),
        }
    }

    /// Use `max` for every dimension limit (but not the array layer limit).
    pub fn with_max_texture_size(mut self, max: GLint) -> Self {
        self.max_texture_size = max;
        self.max_3d_texture_size = max;
        self.max_cube_map_texture_size = max;
        self
    }

    pub fn with_extension(mut self, name: &str) -> Self {
        self.extensions.push(name.to_string());
        self
    }

    fn version_string(&self) -> String {
        format!(
            "{}.{}.0 RecordingGL",
            self.major_version, self.minor_version
        )
    }

    fn uses_indexed_extensions(&self) -> bool {
        self.major_version >= 3
    }
}

/// One recorded call. Pointers aren't recorded, only whether pixel data was
/// provided.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    GetError,
    GetIntegerv(GLenum),
    GetString(GLenum),
    GetStringi(GLenum, GLuint),
    PixelStorei(GLenum, GLint),
    GenTextures(GLsizei),
    DeleteTextures(Vec<GLuint>),
    BindTexture(GLenum, GLuint),
    TexParameteri(GLenum, GLenum, GLint),
    TexImage2D {
        target: GLenum,
        internalformat: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        type_: GLenum,
        has_data: bool,
    },
    TexSubImage2D {
        target: GLenum,
        xoffset: GLint,
        yoffset: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        type_: GLenum,
        has_data: bool,
    },
    TexImage3D {
        target: GLenum,
        internalformat: GLint,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
        format: GLenum,
        type_: GLenum,
        has_data: bool,
    },
    TexSubImage3D {
        target: GLenum,
        xoffset: GLint,
        yoffset: GLint,
        zoffset: GLint,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
        format: GLenum,
        type_: GLenum,
        has_data: bool,
    },
}

impl Call {
    /// `glTexImage*`: allocates storage.
    pub fn is_allocation(&self) -> bool {
        matches!(self, Call::TexImage2D { .. } | Call::TexImage3D { .. })
    }
    /// `glTexSubImage*`: uploads into existing storage.
    pub fn is_upload(&self) -> bool {
        matches!(self, Call::TexSubImage2D { .. } | Call::TexSubImage3D { .. })
    }
}

pub struct RecordingGL {
    driver: FakeDriver,
    current: bool,
    calls: Vec<Call>,
    pending_errors: VecDeque<GLenum>,
    error_on_next_allocation: Option<GLenum>,
    error_on_next_upload: Option<GLenum>,
    next_texture_name: GLuint,
    version_string: CString,
    extension_string: CString,
    extension_names: Vec<CString>,
    unpack_alignment: GLint,
    unpack_row_length: GLint,
}

impl RecordingGL {
    /// Create a fake context, initially current.
    pub fn new(driver: FakeDriver) -> Self {
        let version_string = CString::new(driver.version_string()).unwrap();
        let extension_string = CString::new(driver.extensions.join(" ")).unwrap();
        let extension_names = driver
            .extensions
            .iter()
            .map(|name| CString::new(name.as_str()).unwrap())
            .collect();
        RecordingGL {
            driver,
            current: true,
            calls: Vec::new(),
            pending_errors: VecDeque::new(),
            error_on_next_allocation: None,
            error_on_next_upload: None,
            next_texture_name: 1,
            version_string,
            extension_string,
            extension_names,
            unpack_alignment: 4,
            unpack_row_length: 0,
        }
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Return the calls so far and forget them.
    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    pub fn allocations(&self) -> Vec<&Call> {
        self.calls.iter().filter(|c| c.is_allocation()).collect()
    }

    pub fn uploads(&self) -> Vec<&Call> {
        self.calls.iter().filter(|c| c.is_upload()).collect()
    }

    /// Values passed for `GL_UNPACK_ALIGNMENT`, in order.
    pub fn unpack_alignments(&self) -> Vec<GLint> {
        self.calls
            .iter()
            .filter_map(|call| match *call {
                Call::PixelStorei(gl::UNPACK_ALIGNMENT, value) => Some(value),
                _ => None,
            })
            .collect()
    }

    /// Current `GL_UNPACK_ROW_LENGTH` state.
    pub fn unpack_row_length(&self) -> GLint {
        self.unpack_row_length
    }

    /// Queue an error as if some earlier, unrelated call had raised it.
    pub fn push_error(&mut self, code: GLenum) {
        self.pending_errors.push_back(code);
    }

    /// Make the next `glTexImage*` call raise `code`.
    pub fn raise_error_on_next_allocation(&mut self, code: GLenum) {
        self.error_on_next_allocation = Some(code);
    }

    /// Make the next `glTexSubImage*` call raise `code`.
    pub fn raise_error_on_next_upload(&mut self, code: GLenum) {
        self.error_on_next_upload = Some(code);
    }

    fn record(&mut self, call: Call) {
        assert!(
            self.current,
            "RecordingGL called while not current: {:?}",
            call
        );
        if call.is_allocation() {
            self.pending_errors.extend(self.error_on_next_allocation.take());
        } else if call.is_upload() {
            self.pending_errors.extend(self.error_on_next_upload.take());
        }
        self.calls.push(call);
    }
}

impl GL for RecordingGL {
    fn description() -> &'static str {
        "Recording fake driver"
    }

    fn is_current(&self) -> bool {
        self.current
    }
    fn set_current(&mut self, current: bool) {
        self.current = current;
    }

    // Generic state manipulation
    unsafe fn GetError(&mut self) -> GLenum {
        self.record(Call::GetError);
        self.pending_errors.pop_front().unwrap_or(gl::NO_ERROR)
    }
    unsafe fn GetIntegerv(&mut self, pname: GLenum, params: *mut GLint) {
        self.record(Call::GetIntegerv(pname));
        let driver = &self.driver;
        let value = match pname {
            gl::MAX_TEXTURE_SIZE => driver.max_texture_size,
            gl::MAX_3D_TEXTURE_SIZE => driver.max_3d_texture_size,
            gl::MAX_CUBE_MAP_TEXTURE_SIZE => driver.max_cube_map_texture_size,
            gl::MAX_ARRAY_TEXTURE_LAYERS => driver.max_array_texture_layers,
            gl::MAJOR_VERSION => driver.major_version as GLint,
            gl::MINOR_VERSION => driver.minor_version as GLint,
            gl::NUM_EXTENSIONS => driver.extensions.len() as GLint,
            gl::CONTEXT_PROFILE_MASK => {
                if driver.core_profile {
                    gl::CONTEXT_CORE_PROFILE_BIT as GLint
                } else {
                    gl::CONTEXT_COMPATIBILITY_PROFILE_BIT as GLint
                }
            }
            gl::UNPACK_ALIGNMENT => self.unpack_alignment,
            gl::UNPACK_ROW_LENGTH => self.unpack_row_length,
            _ => panic!("Unhandled parameter name: {:#x}", pname),
        };
        params.write(value);
    }
    unsafe fn GetString(&mut self, name: GLenum) -> *const GLubyte {
        self.record(Call::GetString(name));
        let string: &'static [u8] = match name {
            gl::VERSION => return self.version_string.as_ptr() as *const _,
            gl::EXTENSIONS if !self.driver.uses_indexed_extensions() => {
                return self.extension_string.as_ptr() as *const _
            }
            gl::VENDOR => b"glwrap\0",
            gl::RENDERER => b"RecordingGL\0",
            _ => {
                self.pending_errors.push_back(gl::INVALID_ENUM);
                return std::ptr::null();
            }
        };
        string.as_ptr()
    }
    unsafe fn GetStringi(&mut self, name: GLenum, index: GLuint) -> *const GLubyte {
        self.record(Call::GetStringi(name, index));
        assert!(self.driver.uses_indexed_extensions());
        assert!(name == gl::EXTENSIONS);
        match self.extension_names.get(index as usize) {
            Some(extension) => extension.as_ptr() as *const _,
            None => {
                self.pending_errors.push_back(gl::INVALID_VALUE);
                std::ptr::null()
            }
        }
    }

    // Textures
    unsafe fn PixelStorei(&mut self, pname: GLenum, param: GLint) {
        self.record(Call::PixelStorei(pname, param));
        match pname {
            gl::UNPACK_ALIGNMENT => {
                assert!(param == 1 || param == 2 || param == 4 || param == 8);
                self.unpack_alignment = param;
            }
            gl::UNPACK_ROW_LENGTH => {
                assert!(param >= 0);
                self.unpack_row_length = param;
            }
            _ => panic!("Unhandled pixel store parameter: {:#x}", pname),
        }
    }
    unsafe fn GenTextures(&mut self, n: GLsizei, textures: *mut GLuint) {
        self.record(Call::GenTextures(n));
        for i in 0..n as usize {
            textures.add(i).write(self.next_texture_name);
            self.next_texture_name += 1;
        }
    }
    unsafe fn DeleteTextures(&mut self, n: GLsizei, textures: *const GLuint) {
        let names = std::slice::from_raw_parts(textures, n as usize).to_vec();
        self.record(Call::DeleteTextures(names));
    }
    unsafe fn BindTexture(&mut self, target: GLenum, texture: GLuint) {
        self.record(Call::BindTexture(target, texture));
    }
    unsafe fn TexParameteri(&mut self, target: GLenum, pname: GLenum, param: GLint) {
        self.record(Call::TexParameteri(target, pname, param));
    }
    unsafe fn TexImage2D(
        &mut self,
        target: GLenum,
        _level: GLint,
        internalformat: GLint,
        width: GLsizei,
        height: GLsizei,
        _border: GLint,
        format: GLenum,
        type_: GLenum,
        pixels: *const GLvoid,
    ) {
        self.record(Call::TexImage2D {
            target,
            internalformat,
            width,
            height,
            format,
            type_,
            has_data: !pixels.is_null(),
        });
    }
    unsafe fn TexSubImage2D(
        &mut self,
        target: GLenum,
        _level: GLint,
        xoffset: GLint,
        yoffset: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        type_: GLenum,
        pixels: *const GLvoid,
    ) {
        self.record(Call::TexSubImage2D {
            target,
            xoffset,
            yoffset,
            width,
            height,
            format,
            type_,
            has_data: !pixels.is_null(),
        });
    }
    unsafe fn TexImage3D(
        &mut self,
        target: GLenum,
        _level: GLint,
        internalformat: GLint,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
        _border: GLint,
        format: GLenum,
        type_: GLenum,
        pixels: *const GLvoid,
    ) {
        self.record(Call::TexImage3D {
            target,
            internalformat,
            width,
            height,
            depth,
            format,
            type_,
            has_data: !pixels.is_null(),
        });
    }
    unsafe fn TexSubImage3D(
        &mut self,
        target: GLenum,
        _level: GLint,
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
        self.record(Call::TexSubImage3D {
            target,
            xoffset,
            yoffset,
            zoffset,
            width,
            height,
            depth,
            format,
            type_,
            has_data: !pixels.is_null(),
        });
    }
}
