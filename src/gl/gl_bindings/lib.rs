/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! This package contains OpenGL bindings generated with the `gl_generator`
//! crate.
//!
//! Each module has the usual `gl_generator` global layout: constants, a
//! `types` module, one `unsafe fn` per entry point, and `load_with`, which
//! must be called while the matching context is current.

#![allow(non_snake_case)]

/// OpenGL 3.3 core profile.
#[allow(warnings)]
pub mod gl33core {
    include!(concat!(env!("OUT_DIR"), "/gl33core.rs"));
}
/// OpenGL 2.1 compatibility profile, plus the texture extensions that bring it
/// closest to 3.x texture functionality.
#[allow(warnings)]
pub mod gl21compat {
    include!(concat!(env!("OUT_DIR"), "/gl21compat.rs"));
}
