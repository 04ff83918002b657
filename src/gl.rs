/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! OpenGL abstraction and implementations.
//!
//! The texture layer never calls the generated bindings directly. It talks to
//! a context through the [GL] trait, which is passed explicitly to every
//! operation that needs one. This module contains:
//!
//! - [gl_generic] provides the [GL] abstraction.
//! - Various modules provide implementations:
//!   - [gl33_core] passes through to an OpenGL 3.3 core profile driver.
//!   - [gl21_compat] passes through to an OpenGL 2.1 compatibility profile
//!     driver, emulating the few queries 2.1 lacks.
//!   - [recording] is an in-process fake driver that records every call. It
//!     is what the tests run against.
//! - [gl33core_raw] and [gl21compat_raw] are raw bindings generated from the
//!   Khronos API registry. **The function bindings are only for use within
//!   this module.** The constants and types can be used outside it, however.
//! - [util] has typed helpers for queries and error checks.
//!
//! Useful resources:
//! - [OpenGL 3.3 reference pages](https://registry.khronos.org/OpenGL-Refpages/gl4/)
//! - [OpenGL 2.1 reference pages](https://registry.khronos.org/OpenGL-Refpages/gl2.1/)
//! - Extensions:
//!   - [ARB_texture_float](https://registry.khronos.org/OpenGL/extensions/ARB/ARB_texture_float.txt)
//!   - [ARB_texture_rg](https://registry.khronos.org/OpenGL/extensions/ARB/ARB_texture_rg.txt)
//!   - [ARB_texture_non_power_of_two](https://registry.khronos.org/OpenGL/extensions/ARB/ARB_texture_non_power_of_two.txt)
//!   - [EXT_texture_array](https://registry.khronos.org/OpenGL/extensions/EXT/EXT_texture_array.txt)

pub mod gl21_compat;
pub mod gl33_core;
mod gl_generic;
pub mod recording;
pub mod util;

pub use glwrap_gl_bindings::gl21compat as gl21compat_raw;
pub use glwrap_gl_bindings::gl33core as gl33core_raw;

use gl21_compat::GLCompat21;
use gl33_core::GLCore33;
pub use gl_generic::GL;
use std::ffi::c_void;

/// Context versions and profiles that [GL] implementations can require.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GLVersion {
    /// OpenGL 2.1 compatibility profile
    GL21Compat,
    /// OpenGL 3.3 core profile
    GL33Core,
}

/// Labels for [GL] implementations and an abstraction for constructing them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GLImplementation {
    /// [GLCore33].
    GLCore33,
    /// [GLCompat21].
    GLCompat21,
}
impl GLImplementation {
    /// List of implementations in order of preference.
    pub const IMPLEMENTATIONS: &'static [Self] = &[Self::GLCore33, Self::GLCompat21];
    /// Convert from short name used for command-line arguments. Returns [Err]
    /// if name is not recognized.
    pub fn from_short_name(name: &str) -> Result<Self, ()> {
        match name {
            "gl33_core" => Ok(Self::GLCore33),
            "gl21_compat" => Ok(Self::GLCompat21),
            _ => Err(()),
        }
    }
    /// See [GL::description].
    pub fn description(self) -> &'static str {
        match self {
            Self::GLCore33 => GLCore33::description(),
            Self::GLCompat21 => GLCompat21::description(),
        }
    }
    /// The kind of context that must be current before [Self::construct] is
    /// called.
    pub fn version(self) -> GLVersion {
        match self {
            Self::GLCore33 => GLVersion::GL33Core,
            Self::GLCompat21 => GLVersion::GL21Compat,
        }
    }
    /// Load the bindings for this implementation with `loader` and wrap them.
    ///
    /// # Safety
    /// A context of [Self::version] must be current on this thread, and
    /// `loader` must return that context's entry points.
    pub unsafe fn construct(
        self,
        loader: &mut dyn FnMut(&str) -> *const c_void,
    ) -> Result<Box<dyn GL>, String> {
        fn boxer<T: GL + 'static>(ctx: T) -> Box<dyn GL> {
            Box::new(ctx)
        }
        match self {
            Self::GLCore33 => GLCore33::load_with(loader).map(boxer),
            Self::GLCompat21 => GLCompat21::load_with(loader).map(boxer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names() {
        assert_eq!(
            GLImplementation::from_short_name("gl33_core"),
            Ok(GLImplementation::GLCore33)
        );
        assert_eq!(
            GLImplementation::from_short_name("gl21_compat"),
            Ok(GLImplementation::GLCompat21)
        );
        assert_eq!(GLImplementation::from_short_name("gles1_native"), Err(()));
        assert_eq!(
            GLImplementation::GLCompat21.version(),
            GLVersion::GL21Compat
        );
    }
}
