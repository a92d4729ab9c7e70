//! Canvas2D presentation of both views. Pure consumer: reads notation and
//! scene state, redraws the full scene every call, decides nothing.

use crate::core::constants::*;
use crate::core::{staff_base_y, NotationState, SpatialScene};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> Option<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<web::CanvasRenderingContext2d>().ok())
}

// ---------------- Notation view ----------------

pub fn draw_notation(
    ctx: &web::CanvasRenderingContext2d,
    canvas: &web::HtmlCanvasElement,
    state: &NotationState,
) {
    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    ctx.clear_rect(0.0, 0.0, width, height);

    for staff_index in 0..state.staff_count {
        draw_staff(ctx, width, staff_index);
    }

    // Unrecognized ink stays visible forever; recognized strokes are hidden
    // behind the notes they became.
    for stroke in state.strokes.iter().filter(|s| !s.recognized) {
        draw_polyline(ctx, &stroke.points, "#cbd5e1");
    }
    if !state.current_stroke().is_empty() {
        draw_polyline(ctx, state.current_stroke(), "#3b82f6");
    }

    for note in &state.notes {
        draw_note(ctx, note);
    }
}

fn draw_staff(ctx: &web::CanvasRenderingContext2d, width: f64, staff_index: usize) {
    let base = staff_base_y(staff_index) as f64;

    ctx.set_stroke_style_str("#333");
    ctx.set_line_width(1.0);
    for line in 0..5 {
        let y = base + 35.0 + line as f64 * LINE_SPACING as f64;
        ctx.begin_path();
        ctx.move_to(20.0, y);
        ctx.line_to(width - 20.0, y);
        ctx.stroke();
    }

    ctx.set_font("40px serif");
    ctx.set_fill_style_str("#333");
    _ = ctx.fill_text("\u{1d11e}", 25.0, base + 75.0);

    // Opening barline.
    ctx.set_line_width(2.0);
    ctx.begin_path();
    ctx.move_to(70.0, base + 35.0);
    ctx.line_to(70.0, base + 95.0);
    ctx.stroke();
}

fn draw_polyline(ctx: &web::CanvasRenderingContext2d, points: &[glam::Vec2], color: &str) {
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(2.0);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.begin_path();
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            ctx.move_to(p.x as f64, p.y as f64);
        } else {
            ctx.line_to(p.x as f64, p.y as f64);
        }
    }
    ctx.stroke();
}

fn draw_note(ctx: &web::CanvasRenderingContext2d, note: &crate::core::Note) {
    let x = note.x as f64;
    let y = note.y as f64;
    let hollow = note.duration_beats >= HALF_NOTE_BEATS;

    if hollow {
        ctx.set_stroke_style_str("#1e40af");
        ctx.set_line_width(2.0);
        ctx.begin_path();
        _ = ctx.ellipse(x, y, 9.0, 7.0, std::f64::consts::FRAC_PI_4, 0.0, std::f64::consts::TAU);
        ctx.stroke();
    } else {
        ctx.set_fill_style_str("#1e40af");
        ctx.begin_path();
        _ = ctx.ellipse(x, y, 9.0, 7.0, std::f64::consts::FRAC_PI_4, 0.0, std::f64::consts::TAU);
        ctx.fill();
    }

    if !hollow {
        // Stem, plus a flag for eighths and shorter.
        ctx.set_stroke_style_str("#1e40af");
        ctx.set_line_width(2.5);
        let stem_x = x + 8.0;
        ctx.begin_path();
        ctx.move_to(stem_x, y);
        ctx.line_to(stem_x, y - 45.0);
        ctx.stroke();
        if note.duration_beats <= 0.5 {
            ctx.begin_path();
            _ = ctx.arc(stem_x, y - 40.0, 8.0, 0.0, std::f64::consts::PI);
            ctx.stroke();
        }
    }

    ctx.set_font("11px sans-serif");
    ctx.set_fill_style_str("#475569");
    _ = ctx.fill_text(
        &format!("{}{}", note.name.as_str(), note.octave),
        x - 12.0,
        y + 30.0,
    );
}

// ---------------- Spatial view ----------------

pub fn draw_spatial(
    ctx: &web::CanvasRenderingContext2d,
    canvas: &web::HtmlCanvasElement,
    scene: &SpatialScene,
    pulse: f32,
    playing: bool,
) {
    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let center_x = width / 2.0;
    let center_y = height / 2.0;

    ctx.clear_rect(0.0, 0.0, width, height);
    ctx.set_fill_style_str("#f8fafc");
    ctx.fill_rect(0.0, 0.0, width, height);

    // Grid.
    ctx.set_stroke_style_str("#e5e7eb");
    ctx.set_line_width(1.0);
    let mut gx = 0.0;
    while gx < width {
        ctx.begin_path();
        ctx.move_to(gx, 0.0);
        ctx.line_to(gx, height);
        ctx.stroke();
        gx += 40.0;
    }
    let mut gy = 0.0;
    while gy < height {
        ctx.begin_path();
        ctx.move_to(0.0, gy);
        ctx.line_to(width, gy);
        ctx.stroke();
        gy += 40.0;
    }

    // Room boundary.
    ctx.set_stroke_style_str("#6b7280");
    ctx.set_line_width(2.0);
    ctx.begin_path();
    _ = ctx.arc(
        center_x,
        center_y,
        width.min(height) / 2.0 - 40.0,
        0.0,
        std::f64::consts::TAU,
    );
    ctx.stroke();

    // Listener at the origin.
    ctx.set_fill_style_str("#10b981");
    ctx.fill_rect(center_x - 8.0, center_y - 8.0, 16.0, 16.0);
    ctx.set_fill_style_str("#065f46");
    ctx.set_font("12px sans-serif");
    ctx.set_text_align("center");
    _ = ctx.fill_text("You", center_x, center_y + 25.0);

    for (index, source) in scene.sources.iter().enumerate() {
        let x = center_x + source.position.x as f64;
        let y = center_y + source.position.y as f64;

        // Volume ring; breathes gently while audio is running.
        let wobble = if playing { (pulse as f64) * 4.0 } else { 0.0 };
        ctx.set_stroke_style_str(&source.color);
        ctx.set_line_width(2.0);
        ctx.begin_path();
        _ = ctx.arc(
            x,
            y,
            20.0 + source.volume as f64 * 20.0 + wobble,
            0.0,
            std::f64::consts::TAU,
        );
        ctx.stroke();

        let fill = if scene.dragging == Some(index) {
            "#dc2626"
        } else {
            source.color.as_str()
        };
        ctx.set_fill_style_str(fill);
        ctx.begin_path();
        _ = ctx.arc(x, y, 12.0, 0.0, std::f64::consts::TAU);
        ctx.fill();

        ctx.set_fill_style_str("#374151");
        ctx.set_font("bold 11px sans-serif");
        _ = ctx.fill_text(&source.label, x, y - 20.0);
    }

    ctx.set_fill_style_str("#6b7280");
    ctx.set_font("14px sans-serif");
    ctx.set_text_align("left");
    _ = ctx.fill_text(
        "Drag sources to move them; use headphones for stereo placement",
        10.0,
        height - 15.0,
    );
}
