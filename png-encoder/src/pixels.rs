use crate::{PngError, BYTES_PER_PIXEL, FILTER_NONE};

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Opaque blue used for the application icons
pub const ICON_BLUE: Rgba = Rgba::new(33, 150, 243, 255);

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub(crate) fn from_slice(px: &[u8]) -> Self {
        Self::new(px[0], px[1], px[2], px[3])
    }
}

/// How an icon is painted: a border band of `border_width` pixels and a fill.
///
/// The default paints both with [`ICON_BLUE`], so icons come out as a solid
/// square. The border band has never been given its own colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconStyle {
    pub fill: Rgba,
    pub border: Rgba,
    pub border_width: u32,
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            fill: ICON_BLUE,
            border: ICON_BLUE,
            border_width: 10,
        }
    }
}

impl IconStyle {
    pub fn solid(color: Rgba) -> Self {
        Self {
            fill: color,
            border: color,
            border_width: 0,
        }
    }

    fn color_at(&self, x: u32, y: u32, width: u32, height: u32) -> Rgba {
        let bw = self.border_width;
        let in_border = x < bw
            || y < bw
            || x >= width.saturating_sub(bw)
            || y >= height.saturating_sub(bw);
        if in_border {
            self.border
        } else {
            self.fill
        }
    }
}

/// Byte length of a `width`x`height` RGBA buffer.
///
/// Rejects zero dimensions and sizes whose pixel buffer or filtered
/// scanline stream would not fit in `usize`.
pub fn buffer_len(width: u32, height: u32) -> Result<usize, PngError> {
    if width == 0 || height == 0 {
        return Err(PngError::InvalidDimensions { width, height });
    }

    let too_large = || PngError::ImageTooLarge { width, height };
    let row = (width as usize)
        .checked_mul(BYTES_PER_PIXEL)
        .ok_or_else(too_large)?;
    let pixels = row.checked_mul(height as usize).ok_or_else(too_large)?;
    (row + 1).checked_mul(height as usize).ok_or_else(too_large)?;
    Ok(pixels)
}

fn alloc(len: usize, width: u32, height: u32) -> Result<Vec<u8>, PngError> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| PngError::ImageTooLarge { width, height })?;
    Ok(data)
}

/// Row-major RGBA pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Paint a `width`x`height` icon with the given style
    pub fn new(width: u32, height: u32, style: &IconStyle) -> Result<Self, PngError> {
        let len = buffer_len(width, height)?;
        let mut data = alloc(len, width, height)?;

        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&style.color_at(x, y, width, height).to_array());
            }
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn solid(width: u32, height: u32, color: Rgba) -> Result<Self, PngError> {
        Self::new(width, height, &IconStyle::solid(color))
    }

    /// Wrap existing RGBA bytes; the length must match the dimensions
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PngError> {
        let expected = buffer_len(width, height)?;
        if data.len() != expected {
            return Err(PngError::ScanlineLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn row_len(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// RGBA bytes of row `y`
    ///
    /// # Panics
    ///
    /// Panics if `y >= self.height()`.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.row_len();
        &self.data[start..start + self.row_len()]
    }

    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let idx = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        Rgba::from_slice(&self.data[idx..idx + BYTES_PER_PIXEL])
    }

    /// The single colour of the image, if every pixel shares it
    pub fn uniform_color(&self) -> Option<Rgba> {
        let mut pixels = self.data.chunks_exact(BYTES_PER_PIXEL);
        let first = pixels.next()?;
        pixels
            .all(|px| px == first)
            .then(|| Rgba::from_slice(first))
    }

    /// Rows prefixed with filter type "None", concatenated in row order
    pub fn scanlines(&self) -> Result<Vec<u8>, PngError> {
        let row_len = self.row_len();
        let mut out = alloc((row_len + 1) * self.height as usize, self.width, self.height)?;

        for row in self.data.chunks_exact(row_len) {
            out.push(FILTER_NONE);
            out.extend_from_slice(row);
        }

        Ok(out)
    }
}
