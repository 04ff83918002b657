/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! glwrap exposes OpenGL through generated bindings, and builds texture
//! objects on top of them.
//!
//! - [gl] has the bindings (generated by `gl_generator`, see
//!   `src/gl/gl_bindings`), the [gl::GL] context abstraction and its
//!   implementations.
//! - [texture] has texture objects, and the capability checks and creation
//!   techniques they are made with.
//! - [image] has the client-side images textures are filled from.
//! - [options] parses the options of the `glwrap-info` tool.
//!
//! With the `sdl` feature, [window] can create a real context to run all of
//! this on, and [info] is the entry point of `glwrap-info`.
//!
//! Nothing here is thread-safe: a context, and the textures and images used
//! with it, belong to one thread.

// The GL trait's methods are named after the C entry points.
#![allow(non_snake_case)]

#[macro_use]
mod log;
pub mod gl;
pub mod image;
#[cfg(feature = "sdl")]
pub mod info;
pub mod options;
pub mod texture;
#[cfg(feature = "sdl")]
pub mod window;
