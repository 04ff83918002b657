/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Texture objects.
//!
//! A [Texture] is described first and created on a context later. Describing
//! it (e.g. [Texture::with_empty] or [Texture::define_images]) builds a
//! [CreationTechnique] and records the extents and format, but touches no
//! context. [Texture::realize] then checks the request against the context's
//! [Capabilities], allocates a texture name, and executes the technique. The
//! `create_*` methods do both steps at once.
//!
//! - [format] maps [PixelFormat]s to OpenGL formats.
//! - [capabilities] queries context limits.
//! - [validate] checks requests against those limits.
//! - [technique] fills texture storage.

pub mod capabilities;
pub mod format;
pub mod technique;
pub mod validate;

pub use capabilities::Capabilities;
pub use format::{NativeFormat, PixelFormat};
pub use technique::{CreationTechnique, TechniqueState};

use crate::gl::gl33core_raw as gl; // constants only
use crate::gl::gl33core_raw::types::{GLenum, GLuint};
use crate::gl::util::{check_error, drain_errors};
use crate::gl::GL;
use crate::image::Image;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextureError {
    /// Malformed request, detected without involving the context.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("no OpenGL context is current")]
    NoActiveContext,
    #[error("{0:?} textures are not supported by this context")]
    UnsupportedTarget(TextureTarget),
    #[error("texture dimension {requested} exceeds the maximum of {max}")]
    UnsupportedDimension { requested: u32, max: u32 },
    #[error("{width}x{height}x{depth} is not a power-of-two size, which this context requires")]
    UnsupportedNPOT { width: u32, height: u32, depth: u32 },
    #[error("pixel format {0:?} is not supported by this context")]
    UnsupportedFormat(PixelFormat),
    /// The driver raised an error. `code` is the `glGetError` value.
    #[error("{operation} failed with GL error {code:#x}")]
    GraphicsOperationFailed {
        operation: &'static str,
        code: GLenum,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TextureTarget {
    /// `GL_TEXTURE_2D`
    Texture2D,
    /// `GL_TEXTURE_3D`
    Texture3D,
    /// `GL_TEXTURE_CUBE_MAP`. Slices are faces, in +X, -X, +Y, -Y, +Z, -Z
    /// order.
    CubeMap,
    /// `GL_TEXTURE_2D_ARRAY`. Slices are layers.
    Texture2DArray,
}

impl TextureTarget {
    /// Convert from short name used for command-line arguments. Returns [Err]
    /// if name is not recognized.
    pub fn from_short_name(name: &str) -> Result<Self, ()> {
        match name {
            "2d" => Ok(Self::Texture2D),
            "3d" => Ok(Self::Texture3D),
            "cube" => Ok(Self::CubeMap),
            "2d_array" => Ok(Self::Texture2DArray),
            _ => Err(()),
        }
    }

    pub fn to_gl(self) -> GLenum {
        match self {
            Self::Texture2D => gl::TEXTURE_2D,
            Self::Texture3D => gl::TEXTURE_3D,
            Self::CubeMap => gl::TEXTURE_CUBE_MAP,
            Self::Texture2DArray => gl::TEXTURE_2D_ARRAY,
        }
    }
}

/// Width, height and depth of a texture. Depth is 1 for 2D textures and cube
/// maps, and the layer count for array textures.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Extents {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Extents {
    pub fn new(width: u32, height: u32, depth: u32) -> Extents {
        Extents {
            width,
            height,
            depth,
        }
    }
}

impl std::fmt::Display for Extents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.depth)
    }
}

pub struct Texture {
    target: TextureTarget,
    /// 0 until the texture has been realized.
    name: GLuint,
    /// [None] while undefined.
    extents: Option<Extents>,
    format: PixelFormat,
    /// Waiting to be executed by [Texture::realize].
    technique: Option<CreationTechnique>,
}

impl Texture {
    /// An undefined texture: no extents, no format, nothing to create.
    pub fn new(target: TextureTarget) -> Texture {
        Texture {
            target,
            name: 0,
            extents: None,
            format: PixelFormat::None,
            technique: None,
        }
    }

    /// A texture that will be created without contents.
    pub fn with_empty(
        target: TextureTarget,
        extents: Extents,
        format: PixelFormat,
    ) -> Result<Texture, TextureError> {
        let mut texture = Texture::new(target);
        texture.define_empty(extents, format)?;
        Ok(texture)
    }

    /// A texture that will be created from images.
    pub fn with_images<I, S>(target: TextureTarget, slices: I) -> Result<Texture, TextureError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Option<Rc<Image>>>,
    {
        let mut texture = Texture::new(target);
        texture.define_images(slices)?;
        Ok(texture)
    }

    pub fn target(&self) -> TextureTarget {
        self.target
    }

    /// The GL texture name, or 0 if the texture hasn't been realized.
    pub fn name(&self) -> GLuint {
        self.name
    }

    /// [None] if the texture is undefined.
    pub fn extents(&self) -> Option<Extents> {
        self.extents
    }

    /// [PixelFormat::None] if the texture is undefined.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Whether there's a technique waiting for [Texture::realize].
    pub fn is_pending(&self) -> bool {
        self.technique.is_some()
    }

    /// Describe storage without contents, replacing any pending technique.
    /// Doesn't touch any context.
    pub fn define_empty(&mut self, extents: Extents, format: PixelFormat) -> Result<(), TextureError> {
        let technique = CreationTechnique::empty(self.target, extents, format)?;
        self.replace_technique(technique);
        Ok(())
    }

    /// Describe storage filled from images, replacing any pending technique.
    /// Doesn't touch any context. See [CreationTechnique::images] for how
    /// many images each target takes.
    pub fn define_images<I, S>(&mut self, slices: I) -> Result<(), TextureError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Option<Rc<Image>>>,
    {
        let technique = CreationTechnique::images(self.target, slices)?;
        self.replace_technique(technique);
        Ok(())
    }

    fn replace_technique(&mut self, technique: CreationTechnique) {
        self.extents = Some(technique.extents());
        self.format = technique.format();
        if let Some(mut old) = self.technique.replace(technique) {
            old.dispose();
        }
    }

    /// Create the texture's storage on `ctx` if a technique is pending.
    ///
    /// The request is validated against the context's capabilities first, so
    /// a rejected request leaves no GL state behind. On success the technique
    /// is disposed. On a GL error it's disposed too, the texture keeps its
    /// name, and its storage is undefined until it's created again.
    pub fn realize(&mut self, ctx: &mut dyn GL) -> Result<(), TextureError> {
        let Some(mut technique) = self.technique.take() else {
            return Ok(());
        };
        let native = match self.check_capabilities(ctx, &technique) {
            Ok(native) => native,
            Err(err) => {
                // Still pending: it may work on another context.
                self.technique = Some(technique);
                return Err(err);
            }
        };

        let result = unsafe { self.execute(ctx, &mut technique, native) };
        technique.dispose();
        if let Err(ref err) = result {
            log!(
                "Creating {:?} texture {} failed: {}",
                self.target,
                self.name,
                err
            );
        }
        result
    }

    fn check_capabilities(
        &self,
        ctx: &mut dyn GL,
        technique: &CreationTechnique,
    ) -> Result<NativeFormat, TextureError> {
        if !ctx.is_current() {
            return Err(TextureError::NoActiveContext);
        }
        let caps = Capabilities::query(ctx)?;
        validate::validate(
            &caps,
            self.target,
            technique.extents(),
            technique.format(),
        )
    }

    unsafe fn execute(
        &mut self,
        ctx: &mut dyn GL,
        technique: &mut CreationTechnique,
        native: NativeFormat,
    ) -> Result<(), TextureError> {
        drain_errors(ctx);
        if self.name == 0 {
            ctx.GenTextures(1, &mut self.name);
            check_error(ctx, "glGenTextures")?;
        }
        let target = self.target.to_gl();
        ctx.BindTexture(target, self.name);
        check_error(ctx, "glBindTexture")?;
        log_dbg!(
            "Creating {:?} texture {} ({} {:?})",
            self.target,
            self.name,
            technique.extents(),
            technique.format()
        );
        technique.execute(ctx, native)?;

        // The default filters expect mipmaps, which would leave the texture
        // incomplete.
        ctx.TexParameteri(target, gl::TEXTURE_MIN_FILTER, gl::LINEAR as _);
        ctx.TexParameteri(target, gl::TEXTURE_MAG_FILTER, gl::LINEAR as _);
        check_error(ctx, "glTexParameteri")
    }

    /// Define storage without contents and create it on `ctx` right away.
    pub fn create_empty(
        &mut self,
        ctx: &mut dyn GL,
        extents: Extents,
        format: PixelFormat,
    ) -> Result<(), TextureError> {
        self.define_empty(extents, format)?;
        self.realize(ctx)
    }

    /// Define storage from images and create it on `ctx` right away.
    pub fn create_images<I, S>(&mut self, ctx: &mut dyn GL, slices: I) -> Result<(), TextureError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Option<Rc<Image>>>,
    {
        self.define_images(slices)?;
        self.realize(ctx)
    }

    /// Delete the GL texture. The description (extents and format) is kept,
    /// but there's nothing left to realize; define it again to recreate it.
    pub fn delete(&mut self, ctx: &mut dyn GL) -> Result<(), TextureError> {
        if self.name == 0 {
            return Ok(());
        }
        if !ctx.is_current() {
            return Err(TextureError::NoActiveContext);
        }
        unsafe { ctx.DeleteTextures(1, &self.name) };
        self.name = 0;
        Ok(())
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("target", &self.target)
            .field("name", &self.name)
            .field("extents", &self.extents)
            .field("format", &self.format)
            .field("pending", &self.is_pending())
            .finish()
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        if self.name != 0 {
            log!(
                "Warning: {:?} texture {} dropped without being deleted, leaking it",
                self.target,
                self.name
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::recording::{Call, FakeDriver, RecordingGL};

    fn r8_slice(width: u32, height: u32) -> Rc<Image> {
        let len = (width * height) as usize;
        Rc::new(Image::new(width, height, PixelFormat::R8, width as usize, vec![0; len]).unwrap())
    }

    #[test]
    fn undefined_texture() {
        let mut ctx = RecordingGL::new(FakeDriver::default());
        let mut texture = Texture::new(TextureTarget::Texture3D);
        assert_eq!(texture.extents(), None);
        assert_eq!(texture.format(), PixelFormat::None);
        assert!(!texture.is_pending());
        texture.realize(&mut ctx).unwrap();
        assert!(ctx.calls().is_empty());
        assert_eq!(texture.name(), 0);
    }

    #[test]
    fn zero_width_makes_no_calls() {
        let mut ctx = RecordingGL::new(FakeDriver::default());
        let mut texture = Texture::new(TextureTarget::Texture3D);
        let result = texture.create_empty(&mut ctx, Extents::new(0, 4, 4), PixelFormat::RGBA8);
        assert!(matches!(result, Err(TextureError::InvalidArgument(_))));
        assert!(ctx.calls().is_empty());
        assert_eq!(texture.extents(), None);
    }

    #[test]
    fn define_does_not_need_a_context() {
        let mut texture =
            Texture::with_empty(TextureTarget::Texture2D, Extents::new(8, 8, 1), PixelFormat::RGB8)
                .unwrap();
        assert!(texture.is_pending());
        assert_eq!(texture.extents(), Some(Extents::new(8, 8, 1)));

        let mut ctx = RecordingGL::new(FakeDriver::default());
        ctx.set_current(false);
        assert!(matches!(
            texture.realize(&mut ctx),
            Err(TextureError::NoActiveContext)
        ));
        assert!(texture.is_pending());

        ctx.set_current(true);
        texture.realize(&mut ctx).unwrap();
        assert!(!texture.is_pending());
        assert_eq!(texture.name(), 1);
        assert!(ctx.calls().contains(&Call::BindTexture(gl::TEXTURE_2D, 1)));
        texture.delete(&mut ctx).unwrap();
    }

    #[test]
    fn redefining_replaces_the_technique() {
        let first = r8_slice(4, 4);
        let weak = Rc::downgrade(&first);
        let mut texture = Texture::with_images(TextureTarget::Texture2D, [first]).unwrap();
        assert!(weak.upgrade().is_some());

        texture
            .define_empty(Extents::new(16, 16, 1), PixelFormat::RGBA8)
            .unwrap();
        // The replaced technique let go of its image.
        assert!(weak.upgrade().is_none());
        assert_eq!(texture.extents(), Some(Extents::new(16, 16, 1)));
        assert_eq!(texture.format(), PixelFormat::RGBA8);
    }

    #[test]
    fn slice_counts_per_target() {
        let two = [r8_slice(4, 4), r8_slice(4, 4)];
        assert!(matches!(
            Texture::with_images(TextureTarget::Texture2D, two.clone()),
            Err(TextureError::InvalidArgument(_))
        ));
        assert!(matches!(
            Texture::with_images(TextureTarget::CubeMap, two.clone()),
            Err(TextureError::InvalidArgument(_))
        ));
        let texture = Texture::with_images(TextureTarget::Texture2DArray, two).unwrap();
        assert_eq!(texture.extents(), Some(Extents::new(4, 4, 2)));

        let faces: Vec<_> = (0..6).map(|_| r8_slice(8, 8)).collect();
        let texture = Texture::with_images(TextureTarget::CubeMap, faces).unwrap();
        assert_eq!(texture.extents(), Some(Extents::new(8, 8, 1)));

        let faces: Vec<_> = (0..6).map(|_| r8_slice(8, 4)).collect();
        assert!(Texture::with_images(TextureTarget::CubeMap, faces).is_err());
    }

    #[test]
    fn mismatched_slices_make_no_calls() {
        let mut ctx = RecordingGL::new(FakeDriver::default());
        let mut texture = Texture::new(TextureTarget::Texture3D);
        let result = texture.create_images(&mut ctx, [r8_slice(4, 4), r8_slice(4, 2)]);
        assert!(matches!(result, Err(TextureError::InvalidArgument(_))));
        assert!(ctx.calls().is_empty());
    }

    #[test]
    fn capability_failures_allocate_nothing() {
        let mut ctx = RecordingGL::new(FakeDriver::gl14().with_max_texture_size(64));
        let mut texture = Texture::new(TextureTarget::Texture2D);
        assert!(matches!(
            texture.create_empty(&mut ctx, Extents::new(65, 64, 1), PixelFormat::RGBA8),
            Err(TextureError::UnsupportedDimension {
                requested: 65,
                max: 64
            })
        ));
        assert!(matches!(
            texture.create_empty(&mut ctx, Extents::new(3, 4, 1), PixelFormat::RGBA8),
            Err(TextureError::UnsupportedNPOT { .. })
        ));
        assert!(matches!(
            texture.create_empty(&mut ctx, Extents::new(4, 4, 1), PixelFormat::RG8),
            Err(TextureError::UnsupportedFormat(PixelFormat::RG8))
        ));
        assert!(ctx.allocations().is_empty());
        assert!(!ctx
            .calls()
            .iter()
            .any(|call| matches!(call, Call::GenTextures(_))));

        texture
            .create_empty(&mut ctx, Extents::new(4, 4, 1), PixelFormat::RGBA8)
            .unwrap();
        assert_eq!(ctx.allocations().len(), 1);
        texture.delete(&mut ctx).unwrap();
    }

    #[test]
    fn allocation_failure_keeps_the_name() {
        let mut ctx = RecordingGL::new(FakeDriver::default());
        ctx.raise_error_on_next_allocation(gl::OUT_OF_MEMORY);
        let mut texture = Texture::new(TextureTarget::Texture3D);
        let result = texture.create_empty(&mut ctx, Extents::new(64, 64, 64), PixelFormat::RGBA32F);
        assert!(matches!(
            result,
            Err(TextureError::GraphicsOperationFailed {
                operation: "glTexImage3D",
                code: gl::OUT_OF_MEMORY
            })
        ));
        assert_ne!(texture.name(), 0);
        assert!(!texture.is_pending());

        // Retrying is up to the caller, and reuses the name.
        let name = texture.name();
        texture
            .create_empty(&mut ctx, Extents::new(32, 32, 32), PixelFormat::RGBA32F)
            .unwrap();
        assert_eq!(texture.name(), name);
        texture.delete(&mut ctx).unwrap();
        assert!(ctx.calls().contains(&Call::DeleteTextures(vec![name])));
        assert_eq!(texture.name(), 0);
    }

    #[test]
    fn stale_errors_are_not_blamed_on_creation() {
        let mut ctx = RecordingGL::new(FakeDriver::default());
        ctx.push_error(gl::INVALID_ENUM);
        let mut texture = Texture::new(TextureTarget::Texture2D);
        texture
            .create_empty(&mut ctx, Extents::new(4, 4, 1), PixelFormat::RGBA8)
            .unwrap();
        texture.delete(&mut ctx).unwrap();
    }
}
