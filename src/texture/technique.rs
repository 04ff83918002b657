/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Creation techniques: deferred descriptions of how to fill a texture's
//! storage.
//!
//! A technique is built for one target when the caller says what the texture
//! should contain, which may be long before any context is current. It is
//! executed once, with the texture bound on a current context, and then
//! disposed, which lets go of any images it was holding on to.
//!
//! Construction checks everything that can be checked without a context, so
//! a technique that exists is well-formed for its target. Checking against
//! the context's capabilities is [super::validate]'s job and happens before
//! execution.

use super::validate::check_request;
use super::{Extents, NativeFormat, PixelFormat, TextureError, TextureTarget};
use crate::gl::gl33core_raw as gl; // constants only
use crate::gl::gl33core_raw::types::{GLenum, GLint, GLsizei};
use crate::gl::util::{check_error, get_integer};
use crate::gl::GL;
use crate::image::Image;
use std::rc::Rc;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TechniqueState {
    /// Constructed, not yet executed.
    Defined,
    /// Storage has been allocated (and filled, for images).
    Executed,
    /// Referenced images have been released.
    Disposed,
}

#[derive(Debug)]
enum TechniqueKind {
    /// Allocate storage without contents.
    Empty,
    /// Allocate storage for a stack of equally-sized images, then upload
    /// each one into its own layer (or cube map face).
    Images { slices: Vec<Rc<Image>> },
}

#[derive(Debug)]
pub struct CreationTechnique {
    state: TechniqueState,
    target: TextureTarget,
    kind: TechniqueKind,
    /// Storage extents. Saved so they can still be reported after disposal
    /// drops the images.
    extents: Extents,
    format: PixelFormat,
}

/// Extents fit in a [GLsizei]: [check_request] rejects anything larger.
fn to_glsizei(value: u32) -> GLsizei {
    value.try_into().unwrap()
}

impl CreationTechnique {
    /// Storage for `target` without initial contents.
    pub fn empty(
        target: TextureTarget,
        extents: Extents,
        format: PixelFormat,
    ) -> Result<Self, TextureError> {
        check_request(target, extents, format)?;
        Ok(CreationTechnique {
            state: TechniqueState::Defined,
            target,
            kind: TechniqueKind::Empty,
            extents,
            format,
        })
    }

    /// Storage for `target` filled from `slices`, one per layer (or cube map
    /// face), in order.
    ///
    /// Accepts plain `Rc<Image>`s or `Option<Rc<Image>>`s; a [None] entry is
    /// rejected. All slices must have the width, height and pixel format of
    /// the first one. A 2D texture takes exactly one slice and a cube map
    /// exactly six (see [TextureTarget::CubeMap]); 3D and array textures take
    /// any non-zero number.
    pub fn images<I, S>(target: TextureTarget, slices: I) -> Result<Self, TextureError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Option<Rc<Image>>>,
    {
        let mut checked: Vec<Rc<Image>> = Vec::new();
        for (index, slice) in slices.into_iter().enumerate() {
            let Some(slice) = slice.into() else {
                return Err(TextureError::InvalidArgument(format!(
                    "image slice {} is missing",
                    index
                )));
            };
            if let Some(first) = checked.first() {
                if slice.dimensions() != first.dimensions() {
                    let (width, height) = slice.dimensions();
                    let (first_width, first_height) = first.dimensions();
                    return Err(TextureError::InvalidArgument(format!(
                        "image slice {} is {}x{}, but slice 0 is {}x{}",
                        index, width, height, first_width, first_height
                    )));
                }
                if slice.format() != first.format() {
                    return Err(TextureError::InvalidArgument(format!(
                        "image slice {} has format {:?}, but slice 0 has {:?}",
                        index,
                        slice.format(),
                        first.format()
                    )));
                }
            }
            checked.push(slice);
        }
        let Some(first) = checked.first() else {
            return Err(TextureError::InvalidArgument(
                "at least one image slice is needed".to_string(),
            ));
        };

        let count = checked.len();
        let expected = match target {
            TextureTarget::Texture2D => Some(1),
            TextureTarget::CubeMap => Some(6),
            TextureTarget::Texture3D | TextureTarget::Texture2DArray => None,
        };
        if let Some(expected) = expected.filter(|&expected| expected != count) {
            return Err(TextureError::InvalidArgument(format!(
                "{:?} textures need {} image(s), got {}",
                target, expected, count
            )));
        }
        let depth: u32 = match target {
            TextureTarget::Texture2D | TextureTarget::CubeMap => 1,
            TextureTarget::Texture3D | TextureTarget::Texture2DArray => {
                count.try_into().map_err(|_| {
                    TextureError::InvalidArgument(format!("too many image slices: {}", count))
                })?
            }
        };

        let (width, height) = first.dimensions();
        let extents = Extents {
            width,
            height,
            depth,
        };
        let format = first.format();
        check_request(target, extents, format)?;
        Ok(CreationTechnique {
            state: TechniqueState::Defined,
            target,
            kind: TechniqueKind::Images { slices: checked },
            extents,
            format,
        })
    }

    pub fn state(&self) -> TechniqueState {
        self.state
    }

    pub fn target(&self) -> TextureTarget {
        self.target
    }

    /// Extents of the storage this technique allocates. For 3D and array
    /// textures made from images, the depth is the number of slices.
    pub fn extents(&self) -> Extents {
        self.extents
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Number of images this technique currently holds.
    pub fn slice_count(&self) -> usize {
        match &self.kind {
            TechniqueKind::Empty => 0,
            TechniqueKind::Images { slices } => slices.len(),
        }
    }

    /// Allocate (and for images, fill) the storage of the texture currently
    /// bound to this technique's target, using the already-validated `native`
    /// formats.
    ///
    /// This can be done only once: executing a technique that isn't
    /// [TechniqueState::Defined] panics. After a GL error the technique still
    /// counts as executed, and the texture's storage is undefined.
    pub fn execute(&mut self, ctx: &mut dyn GL, native: NativeFormat) -> Result<(), TextureError> {
        assert_eq!(
            self.state,
            TechniqueState::Defined,
            "creation technique executed twice"
        );
        self.state = TechniqueState::Executed;

        allocate(ctx, self.target, self.extents, native)?;

        let TechniqueKind::Images { slices } = &self.kind else {
            return Ok(());
        };
        let old_row_length = unsafe { get_integer(ctx, gl::UNPACK_ROW_LENGTH) };
        for (index, slice) in slices.iter().enumerate() {
            upload(ctx, self.target, index, slice, native, old_row_length)?;
        }
        Ok(())
    }

    /// Release the images this technique holds. Each one is released exactly
    /// once, no matter how often this is called.
    pub fn dispose(&mut self) {
        if self.state == TechniqueState::Disposed {
            return;
        }
        self.state = TechniqueState::Disposed;
        if let TechniqueKind::Images { slices } = &mut self.kind {
            log_dbg!("Releasing {} image slice(s)", slices.len());
            slices.clear();
        }
    }
}

/// Face targets in the order cube map slices are given.
const CUBE_MAP_FACES: [GLenum; 6] = [
    gl::TEXTURE_CUBE_MAP_POSITIVE_X,
    gl::TEXTURE_CUBE_MAP_NEGATIVE_X,
    gl::TEXTURE_CUBE_MAP_POSITIVE_Y,
    gl::TEXTURE_CUBE_MAP_NEGATIVE_Y,
    gl::TEXTURE_CUBE_MAP_POSITIVE_Z,
    gl::TEXTURE_CUBE_MAP_NEGATIVE_Z,
];

fn allocate(
    ctx: &mut dyn GL,
    target: TextureTarget,
    extents: Extents,
    native: NativeFormat,
) -> Result<(), TextureError> {
    log_dbg!(
        "Allocating {:?} storage of {} ({:#x})",
        target,
        extents,
        native.internal_format
    );
    let width = to_glsizei(extents.width);
    let height = to_glsizei(extents.height);
    let internal_format = native.internal_format as GLint;
    unsafe {
        match target {
            TextureTarget::Texture2D => {
                ctx.TexImage2D(
                    gl::TEXTURE_2D,
                    0,
                    internal_format,
                    width,
                    height,
                    0,
                    native.format,
                    native.type_,
                    std::ptr::null(),
                );
                check_error(ctx, "glTexImage2D")
            }
            TextureTarget::CubeMap => {
                for face in CUBE_MAP_FACES {
                    ctx.TexImage2D(
                        face,
                        0,
                        internal_format,
                        width,
                        height,
                        0,
                        native.format,
                        native.type_,
                        std::ptr::null(),
                    );
                    check_error(ctx, "glTexImage2D")?;
                }
                Ok(())
            }
            TextureTarget::Texture3D | TextureTarget::Texture2DArray => {
                ctx.TexImage3D(
                    target.to_gl(),
                    0,
                    internal_format,
                    width,
                    height,
                    to_glsizei(extents.depth),
                    0,
                    native.format,
                    native.type_,
                    std::ptr::null(),
                );
                check_error(ctx, "glTexImage3D")
            }
        }
    }
}

fn upload(
    ctx: &mut dyn GL,
    target: TextureTarget,
    index: usize,
    slice: &Image,
    native: NativeFormat,
    old_row_length: GLint,
) -> Result<(), TextureError> {
    let (width, height) = slice.dimensions();
    let (width, height) = (to_glsizei(width), to_glsizei(height));
    let row_length = slice.unpack_row_length();
    let pixels = slice.pixels().as_ptr().cast();
    unsafe {
        ctx.PixelStorei(gl::UNPACK_ALIGNMENT, slice.unpack_alignment());
        ctx.PixelStorei(gl::UNPACK_ROW_LENGTH, row_length.unwrap_or(0));
        let operation = match target {
            TextureTarget::Texture2D | TextureTarget::CubeMap => {
                // Slice counts are fixed at construction: 1 or 6.
                let face = if target == TextureTarget::CubeMap {
                    CUBE_MAP_FACES[index]
                } else {
                    gl::TEXTURE_2D
                };
                ctx.TexSubImage2D(
                    face,
                    0,
                    0,
                    0,
                    width,
                    height,
                    native.format,
                    native.type_,
                    pixels,
                );
                "glTexSubImage2D"
            }
            TextureTarget::Texture3D | TextureTarget::Texture2DArray => {
                ctx.TexSubImage3D(
                    target.to_gl(),
                    0,
                    0,
                    0,
                    to_glsizei(index as u32),
                    width,
                    height,
                    1,
                    native.format,
                    native.type_,
                    pixels,
                );
                "glTexSubImage3D"
            }
        };
        // Checked before the restore so a failed upload isn't blamed on it.
        let result = check_error(ctx, operation);
        ctx.PixelStorei(gl::UNPACK_ROW_LENGTH, old_row_length);
        result
    }
}
