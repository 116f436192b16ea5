use std::path::{Path, PathBuf};

/// Errors from loading a texture image.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to read texture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode texture: {0}")]
    Decode(#[from] image::ImageError),
    #[error("unsupported texture with {channels} channel(s); expected RGB or RGBA")]
    UnsupportedChannels { channels: u8 },
}

/// Tightly packed RGBA8 pixels, bottom row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| TextureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let texture = Self::decode(&bytes)?;
        tracing::debug!(
            path = %path.display(),
            width = texture.width,
            height = texture.height,
            "loaded texture"
        );
        Ok(texture)
    }

    /// Decode an encoded image (PNG or JPEG). Only three- and four-channel
    /// images are accepted; rows are flipped so texture coordinate v = 0 is
    /// the bottom of the picture.
    pub fn decode(bytes: &[u8]) -> Result<Self, TextureError> {
        let image = image::load_from_memory(bytes)?;
        let channels = image.color().channel_count();
        if !matches!(channels, 3 | 4) {
            return Err(TextureError::UnsupportedChannels { channels });
        }
        let rgba = image.flipv().to_rgba8();
        Ok(Self {
            width: rgba.width(),
            height: rgba.height(),
            rgba: rgba.into_raw(),
        })
    }

    /// RGBA at column `x`, row `y` (row 0 is the bottom), or `None` outside
    /// the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let texel = self.rgba.get(i..i + 4)?;
        Some([texel[0], texel[1], texel[2], texel[3]])
    }
}

fn generate(size: u32, pixel: impl Fn(u32, u32) -> [u8; 4]) -> TextureImage {
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            rgba.extend_from_slice(&pixel(x, y));
        }
    }
    TextureImage {
        width: size,
        height: size,
        rgba,
    }
}

/// Square checkerboard with `cells` cells per side.
pub fn checkerboard(size: u32, cells: u32, a: [u8; 4], b: [u8; 4]) -> TextureImage {
    let cell = (size / cells.max(1)).max(1);
    generate(size, |x, y| if (x / cell + y / cell) % 2 == 0 { a } else { b })
}

/// Diagonal stripes, `width` pixels wide.
pub fn stripes(size: u32, width: u32, a: [u8; 4], b: [u8; 4]) -> TextureImage {
    let width = width.max(1);
    generate(size, |x, y| if ((x + y) / width) % 2 == 0 { a } else { b })
}
