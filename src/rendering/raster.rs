/// Software rasterizer for the quote display list.
///
/// Executes paint commands into an RGBA buffer at `viewport * scale`
/// and encodes the result as PNG. Text uses a built-in 5x7 bitmap font
/// covering printable ASCII; characters outside the table render as
/// hollow boxes.
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};

use crate::error::{Error, Result};
use crate::rendering::paint::PaintCommand;
use crate::rendering::Screenshot;
use crate::Viewport;

/// Glyph cell width in layout pixels (5 columns + 1 of spacing).
pub const GLYPH_ADVANCE: u32 = 6;
/// Line height in layout pixels (7 glyph rows + 1 of leading).
pub const LINE_HEIGHT: u32 = 8;

const GLYPH_COLS: i32 = 5;
const GLYPH_ROWS: i32 = 7;

/// Upper bound on the RGBA surface, in bytes. Keeps `row * width + col`
/// addressing inside `u32` and refuses captures no caller can want.
pub(crate) const MAX_SURFACE_BYTES: u64 = 1 << 30;

struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Framebuffer {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![255u8; width as usize * height as usize * 4],
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, rgba: (u8, u8, u8, u8)) {
        let x0 = x.max(0) as u32;
        let y0 = y.max(0) as u32;
        let x1 = (x.saturating_add(width as i32)).clamp(0, self.width as i32) as u32;
        let y1 = (y.saturating_add(height as i32)).clamp(0, self.height as i32) as u32;
        for py in y0..y1 {
            for px in x0..x1 {
                let offset = (py as usize * self.width as usize + px as usize) * 4;
                self.pixels[offset] = rgba.0;
                self.pixels[offset + 1] = rgba.1;
                self.pixels[offset + 2] = rgba.2;
                self.pixels[offset + 3] = rgba.3;
            }
        }
    }
}

/// Rasterize a display list at `viewport * scale`.
pub fn rasterize(commands: &[PaintCommand], viewport: Viewport, scale: u32) -> Result<Screenshot> {
    if viewport.width == 0 || viewport.height == 0 {
        return Err(Error::Render("viewport has zero area".into()));
    }
    if scale == 0 {
        return Err(Error::Render("capture scale must be at least 1".into()));
    }

    let width = viewport
        .width
        .checked_mul(scale)
        .ok_or_else(|| Error::Render("capture width overflows".into()))?;
    let height = viewport
        .height
        .checked_mul(scale)
        .ok_or_else(|| Error::Render("capture height overflows".into()))?;
    if width as u64 * height as u64 * 4 > MAX_SURFACE_BYTES {
        return Err(Error::Render(format!(
            "capture surface {}x{} exceeds the size limit",
            width, height
        )));
    }
    let mut fb = Framebuffer::new(width, height);
    let s = scale as i32;

    for command in commands {
        match command {
            PaintCommand::SolidRect {
                x,
                y,
                width,
                height,
                rgba,
            } => {
                fb.fill_rect(x * s, y * s, width * scale, height * scale, *rgba);
            }
            PaintCommand::Text {
                x,
                y,
                text,
                scale: text_scale,
                rgba,
            } => {
                draw_text(&mut fb, x * s, y * s, text, (text_scale * scale) as i32, *rgba);
            }
        }
    }

    let mut png_data = Vec::new();
    PngEncoder::new(&mut png_data)
        .write_image(&fb.pixels, width, height, ColorType::Rgba8)
        .map_err(|e| Error::Render(format!("PNG encoding failed: {}", e)))?;

    Ok(Screenshot {
        width,
        height,
        png_data,
    })
}

/// Draw one line of text. `px` is the size of one glyph pixel in device
/// pixels (node scale times capture scale).
fn draw_text(fb: &mut Framebuffer, x: i32, y: i32, text: &str, px: i32, rgba: (u8, u8, u8, u8)) {
    let mut pen_x = x;
    let advance = GLYPH_ADVANCE as i32 * px;
    for ch in text.chars() {
        if ch == ' ' {
            pen_x += advance;
            continue;
        }
        match glyph(ch) {
            Some(rows) => {
                for (row, bits) in rows.iter().enumerate() {
                    for col in 0..GLYPH_COLS {
                        if bits & (1 << (GLYPH_COLS - 1 - col)) != 0 {
                            fb.fill_rect(
                                pen_x + col * px,
                                y + row as i32 * px,
                                px as u32,
                                px as u32,
                                rgba,
                            );
                        }
                    }
                }
            }
            // No glyph for this character: draw a hollow box
            None => {
                let w = (GLYPH_COLS * px) as u32;
                let h = (GLYPH_ROWS * px) as u32;
                fb.fill_rect(pen_x, y, w, px as u32, rgba);
                fb.fill_rect(pen_x, y + (GLYPH_ROWS - 1) * px, w, px as u32, rgba);
                fb.fill_rect(pen_x, y, px as u32, h, rgba);
                fb.fill_rect(pen_x + (GLYPH_COLS - 1) * px, y, px as u32, h, rgba);
            }
        }
        pen_x += advance;
    }
}

/// 5x7 glyph bitmaps, one byte per row, low 5 bits used, MSB leftmost.
/// Lowercase letters map onto their uppercase forms.
fn glyph(ch: char) -> Option<[u8; 7]> {
    let ch = if ch.is_ascii_lowercase() {
        ch.to_ascii_uppercase()
    } else {
        ch
    };
    let rows = match ch {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00110, 0b00110],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b01000],
        ':' => [0b00000, 0b00110, 0b00110, 0b00000, 0b00110, 0b00110, 0b00000],
        ';' => [0b00000, 0b00110, 0b00110, 0b00000, 0b00110, 0b00100, 0b01000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '+' => [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        '#' => [0b01010, 0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b01010],
        '/' => [0b00001, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b10000],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '\'' => [0b00100, 0b00100, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        '"' => [0b01010, 0b01010, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '?' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
        '%' => [0b11000, 0b11001, 0b00010, 0b00100, 0b01000, 0b10011, 0b00011],
        '$' => [0b00100, 0b01111, 0b10100, 0b01110, 0b00101, 0b11110, 0b00100],
        '_' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b11111],
        '=' => [0b00000, 0b00000, 0b11111, 0b00000, 0b11111, 0b00000, 0b00000],
        '&' => [0b01100, 0b10010, 0b10100, 0b01000, 0b10101, 0b10010, 0b01101],
        '*' => [0b00000, 0b00100, 0b10101, 0b01110, 0b10101, 0b00100, 0b00000],
        _ => return None,
    };
    Some(rows)
}
