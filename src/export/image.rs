//! PNG export. rusttype rasterizes glyphs straight into an RGBA canvas;
//! the layout mirrors the PDF export (header band, body, glossary,
//! disclaimer, diagonal watermark).

use std::path::Path;

use image::{Rgba, RgbaImage};
use rusttype::{point, Font, Scale};

use super::fonts::load_font_bytes;
use super::{ExportError, DISCLAIMER, WATERMARK};
use crate::models::SimplifyResponse;

const CANVAS_WIDTH: u32 = 1200;
const MIN_HEIGHT: u32 = 700;
const PADDING: u32 = 40;
const HEADER_HEIGHT: u32 = 50;
const LINE_HEIGHT: u32 = 28;
const BODY_SCALE: f32 = 20.0;
const SMALL_SCALE: f32 = 17.0;

const INK: Rgba<u8> = Rgba([33, 33, 33, 255]);
const ACCENT: Rgba<u8> = Rgba([0, 102, 204, 255]);
const MUTED: Rgba<u8> = Rgba([120, 120, 120, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Render a simplified document to PNG bytes. Unlike the PDF path there is
/// no builtin fallback font, so a missing font file is a hard error.
pub fn render_png(result: &SimplifyResponse, fonts_dir: &Path) -> Result<Vec<u8>, ExportError> {
    let font_bytes = load_font_bytes(fonts_dir, result.target_language).ok_or_else(|| {
        ExportError::FontUnavailable(format!(
            "no font for language '{}'",
            result.target_language
        ))
    })?;
    let font = Font::try_from_vec(font_bytes)
        .ok_or_else(|| ExportError::FontUnavailable("font file could not be parsed".into()))?;

    let content_width = (CANVAS_WIDTH - 2 * PADDING) as f32;
    let body_lines = wrap_measured(&result.simplified_text, &font, BODY_SCALE, content_width);

    let mut glossary_lines: Vec<(String, bool)> = Vec::new();
    for entry in &result.glossary {
        glossary_lines.push((format!("• {}", entry.term), true));
        for line in wrap_measured(&entry.definition, &font, SMALL_SCALE, content_width - 30.0) {
            glossary_lines.push((format!("   {line}"), false));
        }
    }
    let disclaimer_lines = wrap_measured(DISCLAIMER, &font, SMALL_SCALE, content_width);

    let total_lines =
        body_lines.len() + glossary_lines.len() + disclaimer_lines.len() + 6;
    let height = (HEADER_HEIGHT + 2 * PADDING + total_lines as u32 * LINE_HEIGHT).max(MIN_HEIGHT);

    let mut canvas = RgbaImage::from_pixel(CANVAS_WIDTH, height, WHITE);

    // Header band
    for y in 0..HEADER_HEIGHT {
        for x in 0..CANVAS_WIDTH {
            canvas.put_pixel(x, y, ACCENT);
        }
    }
    draw_line(&mut canvas, &font, BODY_SCALE, PADDING as f32, 34.0, "SaralDocs - Simplified", WHITE);

    let mut y = (HEADER_HEIGHT + PADDING) as f32;

    for line in &body_lines {
        draw_line(&mut canvas, &font, BODY_SCALE, PADDING as f32, y, line, INK);
        y += LINE_HEIGHT as f32;
    }

    if !glossary_lines.is_empty() {
        y += LINE_HEIGHT as f32;
        draw_line(&mut canvas, &font, BODY_SCALE, PADDING as f32, y, "Glossary / Important Terms", ACCENT);
        y += LINE_HEIGHT as f32;
        for (line, is_term) in &glossary_lines {
            let color = if *is_term { ACCENT } else { INK };
            draw_line(&mut canvas, &font, SMALL_SCALE, PADDING as f32, y, line, color);
            y += LINE_HEIGHT as f32;
        }
    }

    y += LINE_HEIGHT as f32;
    for line in &disclaimer_lines {
        draw_line(&mut canvas, &font, SMALL_SCALE, PADDING as f32, y, line, MUTED);
        y += (LINE_HEIGHT - 6) as f32;
    }

    stamp_watermark(&mut canvas, &font);

    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(canvas)
        .write_to(&mut out, image::ImageFormat::Png)
        .map_err(|e| ExportError::Image(e.to_string()))?;
    Ok(out.into_inner())
}

/// Width-measured wrapping: greedy by word, falling back to per-character
/// splits for words wider than the content box.
fn wrap_measured(text: &str, font: &Font<'_>, scale: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for raw_line in text.lines() {
        if raw_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if measure_width(&candidate, font, scale) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if measure_width(word, font, scale) <= max_width {
                current = word.to_string();
            } else {
                for ch in word.chars() {
                    let candidate = format!("{current}{ch}");
                    if measure_width(&candidate, font, scale) > max_width && !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                        current = ch.to_string();
                    } else {
                        current = candidate;
                    }
                }
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

fn measure_width(text: &str, font: &Font<'_>, scale: f32) -> f32 {
    let scale = Scale::uniform(scale);
    font.layout(text, scale, point(0.0, 0.0))
        .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
        .fold(0.0, f32::max)
}

/// Rasterize one line of text with its baseline at `y`.
fn draw_line(
    canvas: &mut RgbaImage,
    font: &Font<'_>,
    scale: f32,
    x: f32,
    y: f32,
    text: &str,
    color: Rgba<u8>,
) {
    let scale = Scale::uniform(scale);
    for glyph in font.layout(text, scale, point(x, y)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px >= 0 && py >= 0 && (px as u32) < canvas.width() && (py as u32) < canvas.height()
                {
                    blend(canvas, px as u32, py as u32, color, coverage);
                }
            });
        }
    }
}

/// Diagonal translucent watermark across the middle of the canvas.
fn stamp_watermark(canvas: &mut RgbaImage, font: &Font<'_>) {
    let scale = Scale::uniform(64.0);
    let angle = -std::f32::consts::FRAC_PI_6;
    let (sin, cos) = angle.sin_cos();
    let cx = canvas.width() as f32 / 2.0 - 130.0;
    let cy = canvas.height() as f32 / 2.0;

    for glyph in font.layout(WATERMARK, scale, point(0.0, 0.0)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, coverage| {
                let lx = (bb.min.x + gx as i32) as f32;
                let ly = (bb.min.y + gy as i32) as f32;
                // Rotate the glyph pixel around the text origin, then
                // translate to the canvas center.
                let rx = cx + lx * cos - ly * sin;
                let ry = cy + lx * sin + ly * cos;
                if rx >= 0.0 && ry >= 0.0 && (rx as u32) < canvas.width() && (ry as u32) < canvas.height()
                {
                    blend(canvas, rx as u32, ry as u32, INK, coverage * 0.08);
                }
            });
        }
    }
}

fn blend(canvas: &mut RgbaImage, x: u32, y: u32, color: Rgba<u8>, alpha: f32) {
    let alpha = alpha.clamp(0.0, 1.0);
    let existing = *canvas.get_pixel(x, y);
    let mut blended = [0u8; 4];
    for i in 0..3 {
        blended[i] =
            (color.0[i] as f32 * alpha + existing.0[i] as f32 * (1.0 - alpha)).round() as u8;
    }
    blended[3] = 255;
    canvas.put_pixel(x, y, Rgba(blended));
}
