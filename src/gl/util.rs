/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Shared utilities: typed wrappers for queries, and error checks.

use super::gl33core_raw as gl; // constants only
use super::gl33core_raw::types::{GLenum, GLint, GLuint};
use super::GL;
use crate::texture::TextureError;
use std::ffi::CStr;

/// `glGetIntegerv` for a single value.
pub unsafe fn get_integer(ctx: &mut dyn GL, pname: GLenum) -> GLint {
    let mut value = 0;
    ctx.GetIntegerv(pname, &mut value);
    value
}

/// `glGetString`, copied into a Rust string. Returns [None] if the driver
/// returns a null pointer (an unknown name).
pub unsafe fn get_string(ctx: &mut dyn GL, name: GLenum) -> Option<String> {
    let string = ctx.GetString(name);
    if string.is_null() {
        return None;
    }
    Some(
        CStr::from_ptr(string as *const _)
            .to_string_lossy()
            .into_owned(),
    )
}

/// `glGetStringi`, copied into a Rust string.
pub unsafe fn get_string_i(ctx: &mut dyn GL, name: GLenum, index: GLuint) -> Option<String> {
    let string = ctx.GetStringi(name, index);
    if string.is_null() {
        return None;
    }
    Some(
        CStr::from_ptr(string as *const _)
            .to_string_lossy()
            .into_owned(),
    )
}

/// Post-call error check: turn a pending GL error into
/// [TextureError::GraphicsOperationFailed].
pub unsafe fn check_error(ctx: &mut dyn GL, operation: &'static str) -> Result<(), TextureError> {
    match ctx.GetError() {
        gl::NO_ERROR => Ok(()),
        code => Err(TextureError::GraphicsOperationFailed { operation, code }),
    }
}

/// Discard errors raised by earlier, unrelated calls, so that
/// [check_error] only reports errors from the call it follows. Returns how
/// many were discarded.
///
/// The number of iterations is bounded because a broken driver (or a lost
/// context) may keep reporting errors forever.
pub unsafe fn drain_errors(ctx: &mut dyn GL) -> usize {
    const MAX_ERRORS: usize = 16;
    let mut drained = 0;
    while drained < MAX_ERRORS {
        let code = ctx.GetError();
        if code == gl::NO_ERROR {
            break;
        }
        log!(
            "Discarding stale GL error {} ({:#x})",
            error_name(code),
            code
        );
        drained += 1;
    }
    drained
}

/// Symbolic name of a GL error code, for messages.
pub fn error_name(code: GLenum) -> &'static str {
    match code {
        gl::NO_ERROR => "GL_NO_ERROR",
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        _ => "unknown GL error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::recording::{FakeDriver, RecordingGL};

    #[test]
    fn check_error_reports_code() {
        let mut ctx = RecordingGL::new(FakeDriver::default());
        unsafe {
            assert!(check_error(&mut ctx, "nothing").is_ok());
            ctx.push_error(gl::OUT_OF_MEMORY);
            match check_error(&mut ctx, "glTexImage3D") {
                Err(TextureError::GraphicsOperationFailed { operation, code }) => {
                    assert_eq!(operation, "glTexImage3D");
                    assert_eq!(code, gl::OUT_OF_MEMORY);
                }
                other => panic!("unexpected result: {:?}", other),
            }
        }
    }

    #[test]
    fn drain_errors_stops_at_no_error() {
        let mut ctx = RecordingGL::new(FakeDriver::default());
        ctx.push_error(gl::INVALID_ENUM);
        ctx.push_error(gl::INVALID_VALUE);
        assert_eq!(unsafe { drain_errors(&mut ctx) }, 2);
        assert_eq!(unsafe { drain_errors(&mut ctx) }, 0);
    }

    #[test]
    fn strings() {
        let mut ctx = RecordingGL::new(FakeDriver::gl33_core().with_extension("GL_ARB_foo"));
        unsafe {
            assert_eq!(
                get_string(&mut ctx, gl::VERSION).as_deref(),
                Some("3.3.0 RecordingGL")
            );
            assert_eq!(
                get_string_i(&mut ctx, gl::EXTENSIONS, 0).as_deref(),
                Some("GL_ARB_foo")
            );
            assert_eq!(get_string_i(&mut ctx, gl::EXTENSIONS, 1), None);
            assert_eq!(get_integer(&mut ctx, gl::NUM_EXTENSIONS), 1);
        }
        assert_eq!(error_name(gl::OUT_OF_MEMORY), "GL_OUT_OF_MEMORY");
    }
}
