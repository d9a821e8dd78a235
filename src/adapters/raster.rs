use crate::core::render::{parse_hex_color, type_colors, CardView};
use crate::domain::ports::Rasterizer;
use crate::utils::error::{CardError, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

pub const DEFAULT_WIDTH: u32 = 400;
pub const DEFAULT_HEIGHT: u32 = 560;
/// 畫布邊長上限
pub const MAX_CANVAS_SIDE: u32 = 4096;

const MARGIN: u32 = 24;
const MOVE_ROW_HEIGHT: u32 = 44;
const ICON_SIZE: u32 = 28;

/// Draws the card layout blocks (background, sprite panel, move rows,
/// entry box) and composites the sprite. Glyphs are left to the surface.
#[derive(Debug, Clone)]
pub struct PngRasterizer {
    width: u32,
    height: u32,
}

impl Default for PngRasterizer {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl PngRasterizer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn color(hex: &str) -> Rgba<u8> {
        let [r, g, b] = parse_hex_color(hex).unwrap_or([0xFF, 0xFF, 0xFF]);
        Rgba([r, g, b, 0xFF])
    }

    fn fill(canvas: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
        let x_end = (x + w).min(canvas.width());
        let y_end = (y + h).min(canvas.height());
        for py in y..y_end {
            for px in x..x_end {
                canvas.put_pixel(px, py, color);
            }
        }
    }
}

impl Rasterizer for PngRasterizer {
    fn rasterize(&self, view: &CardView, sprite: Option<&[u8]>) -> Result<Vec<u8>> {
        if self.width <= MARGIN * 4 || self.height <= MARGIN * 8 {
            return Err(CardError::Image {
                message: format!("card size {}x{} is too small", self.width, self.height),
            });
        }
        if self.width > MAX_CANVAS_SIDE || self.height > MAX_CANVAS_SIDE {
            return Err(CardError::Image {
                message: format!("card size {}x{} is too large", self.width, self.height),
            });
        }

        let primary = Self::color(&view.primary_color);
        let secondary = Self::color(&view.secondary_color);
        let mut canvas = RgbaImage::from_pixel(self.width, self.height, primary);

        let inner_width = self.width - MARGIN * 2;
        let panel_top = MARGIN * 2;
        let panel_height = self.height * 2 / 5;
        Self::fill(&mut canvas, MARGIN, panel_top, inner_width, panel_height, secondary);

        if let Some(bytes) = sprite {
            match image::load_from_memory(bytes) {
                Ok(img) => {
                    let fitted = img.resize(inner_width, panel_height, FilterType::Triangle);
                    let x = MARGIN + (inner_width - fitted.width()) / 2;
                    let y = panel_top + (panel_height - fitted.height()) / 2;
                    imageops::overlay(&mut canvas, &fitted.to_rgba8(), x as i64, y as i64);
                }
                Err(e) => tracing::warn!("⚠️ Sprite could not be decoded: {}", e),
            }
        }

        // 招式列：左邊的小方塊用招式屬性的顏色
        let mut y = panel_top + panel_height + MARGIN;
        for mv in &view.moves {
            if y + MOVE_ROW_HEIGHT > self.height {
                break;
            }
            Self::fill(&mut canvas, MARGIN, y, inner_width, MOVE_ROW_HEIGHT, secondary);
            let (icon_color, _) = type_colors(&mv.type_name);
            let icon_offset = (MOVE_ROW_HEIGHT - ICON_SIZE) / 2;
            Self::fill(
                &mut canvas,
                MARGIN + icon_offset,
                y + icon_offset,
                ICON_SIZE,
                ICON_SIZE,
                Self::color(icon_color),
            );
            y += MOVE_ROW_HEIGHT + MARGIN / 2;
        }

        let entry_top = y.max(self.height - MARGIN * 4);
        if entry_top + MARGIN < self.height {
            let entry_height = self.height - MARGIN - entry_top;
            Self::fill(
                &mut canvas,
                MARGIN,
                entry_top,
                inner_width,
                entry_height,
                Rgba([0xFF, 0xFF, 0xFF, 0xFF]),
            );
        }

        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(canvas)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .map_err(|e| CardError::Image {
                message: e.to_string(),
            })?;
        Ok(buf)
    }
}
