//! Immutable color-grid textures with wrap-mode sampling.
//!
//! Textures are built once from decoded image data (a row-major grid) and
//! read-only afterward. Decoding itself happens outside the engine.

use thiserror::Error;

use crate::paint::Color;

/// Texel addressing outside the grid.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum WrapMode {
    /// Tile the grid in both directions.
    #[default]
    Repeat,
    /// Clamp to the nearest edge texel.
    Clamp,
}

impl WrapMode {
    /// Parses the textual mode used by asset pipelines.
    ///
    /// Unknown strings fall back to `Repeat` with a warning, so a bad asset
    /// never takes the frame down.
    pub fn parse(mode: &str) -> WrapMode {
        match mode {
            "repeat" => WrapMode::Repeat,
            "clamp" => WrapMode::Clamp,
            other => {
                log::warn!("invalid wrap mode {other:?}, using \"repeat\"");
                WrapMode::Repeat
            }
        }
    }
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum TextureError {
    #[error("texture grid is empty")]
    Empty,
    #[error("texture row {row} has {len} texels, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },
}

/// Immutable 2D grid of colors.
#[derive(Debug, Clone)]
pub struct Texture {
    texels: Vec<Color>,
    width: i32,
    height: i32,
    wrap: WrapMode,
}

impl Texture {
    /// Builds a texture from a row-major grid, wrap mode `Repeat`.
    pub fn from_grid(rows: Vec<Vec<Color>>) -> Result<Texture, TextureError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(TextureError::Empty);
        }
        for (row, r) in rows.iter().enumerate() {
            if r.len() != width {
                return Err(TextureError::RaggedRow { row, len: r.len(), expected: width });
            }
        }

        let mut texels = Vec::with_capacity(width * height);
        for row in &rows {
            texels.extend_from_slice(row);
        }

        Ok(Texture {
            texels,
            width: width as i32,
            height: height as i32,
            wrap: WrapMode::Repeat,
        })
    }

    #[inline]
    pub fn with_wrap(mut self, wrap: WrapMode) -> Texture {
        self.wrap = wrap;
        self
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn wrap(&self) -> WrapMode {
        self.wrap
    }

    /// Samples the texel at `(u, v)` under the texture's wrap mode.
    pub fn sample(&self, u: i32, v: i32) -> Color {
        let (x, y) = match self.wrap {
            WrapMode::Repeat => (u.rem_euclid(self.width), v.rem_euclid(self.height)),
            WrapMode::Clamp => (u.clamp(0, self.width - 1), v.clamp(0, self.height - 1)),
        };
        self.texels[(y * self.width + x) as usize]
    }
}
