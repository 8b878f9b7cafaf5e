//! Flattened 16:9 TV raster: floor plan, profile markers, labels, and the
//! active event's decorative assets baked into one image.

use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontVec, Glyph, GlyphId, PxScale, ScaleFont, point};
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};
use rand::Rng;

use crate::core::compositor::layout::{Marker, anchor_position, spread_markers};
use crate::core::compositor::parse_hex_color;
use crate::core::compositor::processor::ProcessorRegistry;
use crate::core::coords::{FLOOR_PLAN_HEIGHT, FLOOR_PLAN_WIDTH};
use crate::core::events::DiscoveredEvent;
use crate::errors::{AppError, AppResult};
use crate::models::event::{Align, AssetSpec};
use crate::models::resolved::ResolvedEmployee;
use crate::ui::messages::warning;

pub const TV_WIDTH: u32 = 3840;
pub const TV_HEIGHT: u32 = 2160;
const SIDE_PANEL_WIDTH: u32 = 800;
const FIT_SCALE: f64 = 0.85;

const MARKER_SIZE: u32 = 90;
const MARKER_RADIUS: f64 = 48.0;

const PANEL_COLOR: Rgba<u8> = Rgba([0, 47, 95, 255]);
const ACCENT_COLOR: Rgba<u8> = Rgba([255, 107, 53, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

const TITLE_FONT_SIZE: f32 = 80.0;
const INFO_FONT_SIZE: f32 = 50.0;
const NAME_FONT_SIZE: f32 = 40.0;
const ROOM_FONT_SIZE: f32 = 32.0;
const LABEL_PADDING: f32 = 8.0;

// Optional side-panel decor, probed from the data directory.
const PANEL_QR_FILE: &str = "assets/qr_fix_location.png";
const PANEL_LOGO_FILE: &str = "assets/logo.png";
const PANEL_REPO_QR_FILE: &str = "assets/repo_qr.png";

const PANEL_QR_SIZE: u32 = 500;
const PANEL_QR_Y: i64 = 250;
const PANEL_LOGO_WIDTH: u32 = 700;

const QR_INSTRUCTION_LINES: [&str; 3] = ["Missing or in the", "wrong place?", "Scan to update!"];

pub struct TvRenderer<'a> {
    pub data_dir: &'a Path,
    pub floor_plan: &'a Path,
    pub font: Option<&'a FontVec>,
    pub event: Option<&'a DiscoveredEvent>,
    pub processors: ProcessorRegistry,
}

impl TvRenderer<'_> {
    /// Render one grouping to `output`. `total` is the grouping's full
    /// record count (placed + positionless) for the stats line.
    pub fn render(
        &self,
        employees: &[&ResolvedEmployee],
        title: &str,
        total: usize,
        rng: &mut impl Rng,
        output: &Path,
    ) -> AppResult<()> {
        if !self.floor_plan.exists() {
            return Err(AppError::MissingInput(self.floor_plan.display().to_string()));
        }
        let floor_plan = image::open(self.floor_plan)?.to_rgba8();

        let map_area_w = (TV_WIDTH - SIDE_PANEL_WIDTH) as f64;
        let map_area_h = TV_HEIGHT as f64;
        let scale = (map_area_w / floor_plan.width() as f64)
            .min(map_area_h / floor_plan.height() as f64)
            * FIT_SCALE;
        let map_w = (floor_plan.width() as f64 * scale).round() as u32;
        let map_h = (floor_plan.height() as f64 * scale).round() as u32;
        let map_offset_x = ((map_area_w - map_w as f64) / 2.0) as i64;
        let map_offset_y = ((map_area_h - map_h as f64) / 2.0) as i64;

        let mut canvas = RgbaImage::from_pixel(TV_WIDTH, TV_HEIGHT, WHITE);
        let floor_resized = imageops::resize(&floor_plan, map_w, map_h, FilterType::Lanczos3);
        imageops::overlay(&mut canvas, &floor_resized, map_offset_x, map_offset_y);

        // Markers live in floor-plan coordinate space until pasted.
        let mut markers: Vec<Marker> = employees
            .iter()
            .filter(|e| e.is_plottable())
            .map(|e| Marker {
                person_id: e.person_id.clone(),
                x: e.x.unwrap_or_default(),
                y: e.y.unwrap_or_default(),
            })
            .collect();
        spread_markers(&mut markers, FLOOR_PLAN_WIDTH, FLOOR_PLAN_HEIGHT);

        // Canvas-space scale is relative to the coordinate space, not the
        // floor-plan bitmap, so undersized plan images still place markers
        // consistently.
        let to_canvas_x = |x: f64| map_offset_x as f64 + x * (map_w as f64 / FLOOR_PLAN_WIDTH);
        let to_canvas_y = |y: f64| map_offset_y as f64 + y * (map_h as f64 / FLOOR_PLAN_HEIGHT);

        for marker in &markers {
            let Some(emp) = employees.iter().find(|e| e.person_id == marker.person_id) else {
                continue;
            };
            let cx = to_canvas_x(marker.x);
            let cy = to_canvas_y(marker.y);
            self.draw_marker(&mut canvas, emp, cx, cy);
            self.draw_labels(&mut canvas, emp, cx, cy);
        }

        if let Some(event) = self.event {
            self.draw_event_assets(&mut canvas, event, rng);
        }

        self.draw_side_panel(&mut canvas, title, markers.len(), total);

        write_png_atomic(&canvas, output)
    }

    fn draw_marker(&self, canvas: &mut RgbaImage, emp: &ResolvedEmployee, cx: f64, cy: f64) {
        fill_circle(canvas, cx, cy, MARKER_RADIUS, PANEL_COLOR);

        let Some(picture) = emp.picture.as_ref() else {
            return;
        };
        let path = self.data_dir.join(picture);
        let pic = match image::open(&path) {
            Ok(pic) => pic.to_rgba8(),
            Err(e) => {
                warning(format!("Could not load {}: {}", path.display(), e));
                return;
            }
        };

        let pic = self.process_picture(pic, emp);
        let mut pic = imageops::resize(&pic, MARKER_SIZE, MARKER_SIZE, FilterType::Lanczos3);
        circular_crop(&mut pic);

        let half = (MARKER_SIZE / 2) as i64;
        imageops::overlay(canvas, &pic, cx as i64 - half, cy as i64 - half);
    }

    /// Run the active event's profile processor, falling back to the
    /// untransformed picture on any failure so one bad photo never aborts
    /// the render.
    fn process_picture(&self, pic: RgbaImage, emp: &ResolvedEmployee) -> RgbaImage {
        let Some(event) = self.event else {
            return pic;
        };
        let Some(name) = event.config.profile_processor.as_deref() else {
            return pic;
        };
        let Some(processor) = self.processors.get(name) else {
            warning(format!(
                "Event '{}' names unknown profile processor '{}'",
                event.name, name
            ));
            return pic;
        };

        let original = pic.clone();
        match processor.transform(pic, &event.config.profile_processor_config) {
            Ok(processed) => processed,
            Err(e) => {
                warning(format!(
                    "Profile processor '{}' failed for {}: {}",
                    name, emp.person_id, e
                ));
                original
            }
        }
    }

    fn draw_labels(&self, canvas: &mut RgbaImage, emp: &ResolvedEmployee, cx: f64, cy: f64) {
        let Some(font) = self.font else {
            return;
        };
        let (cx, cy) = (cx as f32, cy as f32);

        let name = emp.display_name.as_str();
        let name_w = measure_line(font, NAME_FONT_SIZE, name);
        let name_h = line_height(font, NAME_FONT_SIZE);
        let name_x = cx - name_w / 2.0;
        let name_y = cy + MARKER_RADIUS as f32 + LABEL_PADDING * 2.0;

        fill_rect(
            canvas,
            name_x - LABEL_PADDING,
            name_y - LABEL_PADDING,
            name_x + name_w + LABEL_PADDING,
            name_y + name_h + LABEL_PADDING,
            PANEL_COLOR,
        );
        draw_line(canvas, font, NAME_FONT_SIZE, name_x, name_y, WHITE, name);

        let Some(room) = emp.room.as_deref() else {
            return;
        };
        let room_w = measure_line(font, ROOM_FONT_SIZE, room);
        let room_h = line_height(font, ROOM_FONT_SIZE);
        let room_x = cx - room_w / 2.0;
        let room_y = name_y + name_h + LABEL_PADDING * 2.0 + 6.0;

        fill_rect(
            canvas,
            room_x - LABEL_PADDING,
            room_y - LABEL_PADDING,
            room_x + room_w + LABEL_PADDING,
            room_y + room_h + LABEL_PADDING,
            ACCENT_COLOR,
        );
        draw_line(canvas, font, ROOM_FONT_SIZE, room_x, room_y, WHITE, room);
    }

    fn draw_event_assets(&self, canvas: &mut RgbaImage, event: &DiscoveredEvent, rng: &mut impl Rng) {
        for asset in &event.config.assets {
            match asset {
                AssetSpec::Image {
                    file,
                    scale,
                    placement,
                } => {
                    let path = event.dir.join(file);
                    let decoration = match image::open(&path) {
                        Ok(img) => img.to_rgba8(),
                        Err(e) => {
                            warning(format!("Could not load {}: {}", path.display(), e));
                            continue;
                        }
                    };
                    let w = ((decoration.width() as f32 * scale).round() as u32).max(1);
                    let h = ((decoration.height() as f32 * scale).round() as u32).max(1);
                    let decoration = imageops::resize(&decoration, w, h, FilterType::Lanczos3);

                    let (x, y) = anchor_position(
                        placement,
                        w as i64,
                        h as i64,
                        TV_WIDTH as i64,
                        TV_HEIGHT as i64,
                    );
                    imageops::overlay(canvas, &decoration, x, y);
                }
                AssetSpec::Message {
                    texts,
                    color,
                    font_size,
                    align,
                    placement,
                } => {
                    if texts.is_empty() {
                        continue;
                    }
                    let Some(font) = self.font else {
                        continue;
                    };
                    let text = &texts[rng.gen_range(0..texts.len())];
                    let color = parse_hex_color(color)
                        .map(|[r, g, b]| Rgba([r, g, b, 255]))
                        .unwrap_or(WHITE);

                    let lines: Vec<&str> = text.lines().collect();
                    let line_h = line_height(font, *font_size);
                    let block_w = lines
                        .iter()
                        .map(|l| measure_line(font, *font_size, l))
                        .fold(0.0_f32, f32::max);
                    let block_h = line_h * lines.len() as f32;

                    let (x, y) = anchor_position(
                        placement,
                        block_w.ceil() as i64,
                        block_h.ceil() as i64,
                        TV_WIDTH as i64,
                        TV_HEIGHT as i64,
                    );

                    for (i, line) in lines.iter().enumerate() {
                        let line_w = measure_line(font, *font_size, line);
                        let line_x = match align {
                            Align::Left => x as f32,
                            Align::Center => x as f32 + (block_w - line_w) / 2.0,
                            Align::Right => x as f32 + block_w - line_w,
                        };
                        let line_y = y as f32 + i as f32 * line_h;
                        draw_line(canvas, font, *font_size, line_x, line_y, color, line);
                    }
                }
            }
        }
    }

    fn draw_side_panel(&self, canvas: &mut RgbaImage, title: &str, placed: usize, total: usize) {
        let panel_x = (TV_WIDTH - SIDE_PANEL_WIDTH) as f32;
        fill_rect(
            canvas,
            panel_x,
            0.0,
            TV_WIDTH as f32,
            TV_HEIGHT as f32,
            PANEL_COLOR,
        );

        if let Some(font) = self.font {
            let title_w = measure_line(font, TITLE_FONT_SIZE, title);
            let title_x = panel_x + (SIDE_PANEL_WIDTH as f32 - title_w) / 2.0;
            draw_line(canvas, font, TITLE_FONT_SIZE, title_x, 80.0, WHITE, title);
        }

        // Location-update QR with its instruction block; the stats line
        // moves below them when the QR is present.
        let mut stats_y = 220.0;
        if let Some(qr) = self.load_panel_image(PANEL_QR_FILE) {
            let qr = imageops::resize(&qr, PANEL_QR_SIZE, PANEL_QR_SIZE, FilterType::Lanczos3);
            let qr_x = panel_x as i64 + ((SIDE_PANEL_WIDTH - PANEL_QR_SIZE) / 2) as i64;
            imageops::overlay(canvas, &qr, qr_x, PANEL_QR_Y);

            if let Some(font) = self.font {
                let instruction_y = (PANEL_QR_Y + PANEL_QR_SIZE as i64 + 30) as f32;
                for (i, line) in QR_INSTRUCTION_LINES.iter().enumerate() {
                    let line_w = measure_line(font, INFO_FONT_SIZE, line);
                    let line_x = panel_x + (SIDE_PANEL_WIDTH as f32 - line_w) / 2.0;
                    let line_y = instruction_y + i as f32 * 60.0;
                    draw_line(canvas, font, INFO_FONT_SIZE, line_x, line_y, WHITE, line);
                }
            }
            stats_y = (PANEL_QR_Y + PANEL_QR_SIZE as i64 + 230) as f32;
        }

        if let Some(font) = self.font {
            let stats = format!("({placed} out of {total} displayed)");
            let stats_w = measure_line(font, NAME_FONT_SIZE, &stats);
            let stats_x = panel_x + (SIDE_PANEL_WIDTH as f32 - stats_w) / 2.0;
            draw_line(canvas, font, NAME_FONT_SIZE, stats_x, stats_y, WHITE, &stats);
        }

        // Bottom block: logo, with the repository QR stacked above it.
        if let Some(logo) = self.load_panel_image(PANEL_LOGO_FILE) {
            let logo_h = ((logo.height() as f64 / logo.width() as f64)
                * PANEL_LOGO_WIDTH as f64)
                .round()
                .max(1.0) as u32;
            let logo = imageops::resize(&logo, PANEL_LOGO_WIDTH, logo_h, FilterType::Lanczos3);
            let logo_x = panel_x as i64 + ((SIDE_PANEL_WIDTH - PANEL_LOGO_WIDTH) / 2) as i64;
            let logo_y = TV_HEIGHT as i64 - logo_h as i64 - 100;
            imageops::overlay(canvas, &logo, logo_x, logo_y);

            if let Some(repo_qr) = self.load_panel_image(PANEL_REPO_QR_FILE) {
                let qr_h = logo_h;
                let qr_w = ((repo_qr.width() as f64 / repo_qr.height() as f64) * qr_h as f64)
                    .round()
                    .max(1.0) as u32;
                let repo_qr = imageops::resize(&repo_qr, qr_w, qr_h, FilterType::Lanczos3);
                let qr_x = panel_x as i64 + 50;
                let qr_y = logo_y - qr_h as i64 - 60;
                imageops::overlay(canvas, &repo_qr, qr_x, qr_y);
            }
        }
    }

    /// Optional panel decoration. Absence is reported, never fatal.
    fn load_panel_image(&self, rel: &str) -> Option<RgbaImage> {
        let path = self.data_dir.join(rel);
        match image::open(&path) {
            Ok(img) => Some(img.to_rgba8()),
            Err(e) => {
                warning(format!("Could not load {}: {}", path.display(), e));
                None
            }
        }
    }
}

/// Encode to a sibling temp file and rename, so a failed run never leaves
/// a truncated image under the final name.
pub fn write_png_atomic(canvas: &RgbaImage, output: &Path) -> AppResult<()> {
    let tmp: PathBuf = output.with_extension("png.tmp");
    canvas.save_with_format(&tmp, ImageFormat::Png)?;
    fs::rename(&tmp, output)?;
    Ok(())
}

// ---------------------------
// Pixel helpers
// ---------------------------

fn blend_pixel(canvas: &mut RgbaImage, x: u32, y: u32, color: Rgba<u8>, coverage: f32) {
    let alpha = coverage.clamp(0.0, 1.0);
    let base = canvas.get_pixel(x, y).0;
    let mut out = [0u8; 4];
    for i in 0..3 {
        out[i] = (base[i] as f32 * (1.0 - alpha) + color.0[i] as f32 * alpha).round() as u8;
    }
    out[3] = base[3].max((255.0 * alpha) as u8);
    canvas.put_pixel(x, y, Rgba(out));
}

fn fill_rect(canvas: &mut RgbaImage, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba<u8>) {
    let x0 = x0.max(0.0) as u32;
    let y0 = y0.max(0.0) as u32;
    let x1 = (x1.max(0.0) as u32).min(canvas.width());
    let y1 = (y1.max(0.0) as u32).min(canvas.height());
    for y in y0..y1 {
        for x in x0..x1 {
            canvas.put_pixel(x, y, color);
        }
    }
}

fn fill_circle(canvas: &mut RgbaImage, cx: f64, cy: f64, r: f64, color: Rgba<u8>) {
    let x0 = ((cx - r).floor().max(0.0)) as u32;
    let y0 = ((cy - r).floor().max(0.0)) as u32;
    let x1 = (((cx + r).ceil() as u32) + 1).min(canvas.width());
    let y1 = (((cy + r).ceil() as u32) + 1).min(canvas.height());
    for y in y0..y1 {
        for x in x0..x1 {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            if dx * dx + dy * dy <= r * r {
                canvas.put_pixel(x, y, color);
            }
        }
    }
}

/// Zero the alpha of everything outside the inscribed circle.
fn circular_crop(pic: &mut RgbaImage) {
    let cx = pic.width() as f64 / 2.0;
    let cy = pic.height() as f64 / 2.0;
    let r = cx.min(cy);
    for (x, y, pixel) in pic.enumerate_pixels_mut() {
        let dx = x as f64 + 0.5 - cx;
        let dy = y as f64 + 0.5 - cy;
        if dx * dx + dy * dy > r * r {
            pixel.0[3] = 0;
        }
    }
}

// ---------------------------
// Text helpers (ab_glyph)
// ---------------------------

fn line_height(font: &FontVec, size: f32) -> f32 {
    let scaled = font.as_scaled(PxScale::from(size));
    scaled.ascent() - scaled.descent()
}

fn measure_line(font: &FontVec, size: f32, text: &str) -> f32 {
    let scaled = font.as_scaled(PxScale::from(size));
    let mut width = 0.0;
    let mut prev: Option<GlyphId> = None;
    for ch in text.chars() {
        let id = font.glyph_id(ch);
        if let Some(p) = prev {
            width += scaled.kern(p, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }
    width
}

/// Draw one line with its top-left corner at (x, y).
fn draw_line(
    canvas: &mut RgbaImage,
    font: &FontVec,
    size: f32,
    x: f32,
    y: f32,
    color: Rgba<u8>,
    text: &str,
) {
    let scale = PxScale::from(size);
    let scaled = font.as_scaled(scale);
    let mut caret = x;
    let mut prev: Option<GlyphId> = None;

    for ch in text.chars() {
        let id = font.glyph_id(ch);
        if let Some(p) = prev {
            caret += scaled.kern(p, id);
        }
        let glyph: Glyph = id.with_scale_and_position(scale, point(caret, y + scaled.ascent()));
        if let Some(outline) = font.outline_glyph(glyph) {
            let bounds = outline.px_bounds();
            outline.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i32 + gx as i32;
                let py = bounds.min.y as i32 + gy as i32;
                if coverage > 0.0
                    && px >= 0
                    && py >= 0
                    && (px as u32) < canvas.width()
                    && (py as u32) < canvas.height()
                {
                    blend_pixel(canvas, px as u32, py as u32, color, coverage);
                }
            });
        }
        caret += scaled.h_advance(id);
        prev = Some(id);
    }
}
