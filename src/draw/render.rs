//! Cairo-based rendering for keycap pills.

use std::time::Instant;

use super::FontDescriptor;
use super::color::Color;
use crate::config::PillSize;
use crate::input::KeyPart;
use crate::overlay::Pill;
use crate::theme::Palette;

/// Everything the renderer needs besides the pills themselves.
pub struct RenderParams<'a> {
    pub palette: &'a Palette,
    pub font: &'a FontDescriptor,
    pub size: PillSize,
    /// Overall overlay opacity, 0.0 - 1.0, from the config percentage.
    pub opacity: f64,
    /// Anchor point in surface pixels.
    pub anchor: (f64, f64),
    /// Whether stacked pills grow upward from the anchor.
    pub grows_up: bool,
}

/// Pixel dimensions for one pill size.
struct SizeSpec {
    font_size: f64,
    /// Modifier name text under the symbol
    sub_font_size: f64,
    keycap_height: f64,
    corner_radius: f64,
    pad_x: f64,
    /// Gap between keycaps within a pill
    gap: f64,
    /// Vertical gap between stacked pills
    stack_gap: f64,
}

fn size_spec(size: PillSize) -> SizeSpec {
    match size {
        PillSize::Large => SizeSpec {
            font_size: 22.0,
            sub_font_size: 9.0,
            keycap_height: 58.0,
            corner_radius: 12.0,
            pad_x: 18.0,
            gap: 8.0,
            stack_gap: 10.0,
        },
        PillSize::Small => SizeSpec {
            font_size: 16.0,
            sub_font_size: 8.0,
            keycap_height: 44.0,
            corner_radius: 10.0,
            pad_x: 13.0,
            gap: 6.0,
            stack_gap: 8.0,
        },
    }
}

/// Renders the current pill stack anchored at `params.anchor`.
///
/// Pills are passed oldest-first; the newest pill sits at the anchor and
/// older pills are pushed away from it, upward or downward per
/// `params.grows_up`. Each pill's fade opacity is folded into the overall
/// overlay opacity.
pub fn render_pills<'a>(
    ctx: &cairo::Context,
    params: &RenderParams<'_>,
    pills: impl Iterator<Item = &'a Pill>,
    now: Instant,
) {
    let spec = size_spec(params.size);
    let (anchor_x, anchor_y) = params.anchor;

    let mut offset = 0.0;
    let pills: Vec<&Pill> = pills.collect();
    for pill in pills.iter().rev() {
        let alpha = params.opacity * pill.opacity(now);
        if alpha <= 0.0 {
            continue;
        }

        let width = measure_pill(ctx, params, &spec, pill);
        let x = anchor_x - width / 2.0;
        let y = if params.grows_up {
            anchor_y - spec.keycap_height - offset
        } else {
            anchor_y + offset
        };

        render_keycaps(
            ctx,
            params,
            &spec,
            &pill.parts,
            pill.repeat_count,
            x,
            y,
            alpha,
        );
        offset += spec.keycap_height + spec.stack_gap;
    }
}

/// Renders the reposition scrim with a preview pill and drag hint.
pub fn render_reposition(
    ctx: &cairo::Context,
    params: &RenderParams<'_>,
    width: f64,
    height: f64,
) {
    let spec = size_spec(params.size);

    // Dim the whole screen so the anchor stands out.
    ctx.set_source_rgba(0.0, 0.0, 0.0, 0.35);
    ctx.rectangle(0.0, 0.0, width, height);
    let _ = ctx.fill();

    // Preview pill so the drag has something visible to grab.
    let preview = [
        KeyPart::modifier(crate::keymap::COMMAND),
        KeyPart::label("C"),
    ];
    let (anchor_x, anchor_y) = params.anchor;
    let preview_width = measure_parts(ctx, params, &spec, &preview, 1);
    render_keycaps(
        ctx,
        params,
        &spec,
        &preview,
        1,
        anchor_x - preview_width / 2.0,
        anchor_y - spec.keycap_height / 2.0,
        1.0,
    );

    // Hint text under the preview, flipped above it near the bottom edge.
    let layout = pangocairo::functions::create_layout(ctx);
    let font_desc =
        pango::FontDescription::from_string(&params.font.to_pango_string(spec.sub_font_size * 1.6));
    layout.set_font_description(Some(&font_desc));
    layout.set_text("Drag to reposition \u{00B7} Press Esc to save");
    let (text_w, text_h) = layout.pixel_size();

    let below = anchor_y + spec.keycap_height / 2.0 + 30.0;
    let hint_y = if below + text_h as f64 > height {
        anchor_y - spec.keycap_height / 2.0 - 30.0 - text_h as f64
    } else {
        below
    };
    ctx.move_to(anchor_x - text_w as f64 / 2.0, hint_y);
    ctx.set_source_rgba(1.0, 1.0, 1.0, 0.9);
    pangocairo::functions::show_layout(ctx, &layout);
}

/// Total pixel width of a pill, repeat badge included.
fn measure_pill(
    ctx: &cairo::Context,
    params: &RenderParams<'_>,
    spec: &SizeSpec,
    pill: &Pill,
) -> f64 {
    measure_parts(ctx, params, spec, &pill.parts, pill.repeat_count)
}

fn measure_parts(
    ctx: &cairo::Context,
    params: &RenderParams<'_>,
    spec: &SizeSpec,
    parts: &[KeyPart],
    repeat_count: u32,
) -> f64 {
    let mut width = 0.0;
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            width += spec.gap;
        }
        width += keycap_width(ctx, params, spec, part);
    }
    if repeat_count > 1 {
        width += spec.gap + badge_width(ctx, params, spec, repeat_count);
    }
    width
}

/// Glyph + name pairs for labels that render like modifiers (stacked
/// symbol over a small name) instead of plain text.
fn key_icon(label: &str) -> Option<(&'static str, &'static str)> {
    match label {
        "Esc" => Some(("\u{238B}", "esc")),
        "Space" => Some(("\u{2423}", "space")),
        "Return" => Some(("\u{21A9}", "return")),
        "\u{232B}" => Some(("\u{232B}", "delete")),
        "\u{2326}" => Some(("\u{2326}", "delete")),
        "Tab" => Some(("\u{21E5}", "tab")),
        _ => None,
    }
}

fn keycap_width(
    ctx: &cairo::Context,
    params: &RenderParams<'_>,
    spec: &SizeSpec,
    part: &KeyPart,
) -> f64 {
    let text_width = match part {
        KeyPart::Modifier { glyph, .. } => {
            let symbol_w = text_size(ctx, params.font, spec.font_size, glyph.symbol).0;
            let name_w = text_size(ctx, params.font, spec.sub_font_size, glyph.name).0;
            symbol_w.max(name_w)
        }
        KeyPart::Label { label } => match key_icon(label) {
            Some((glyph, name)) => {
                let glyph_w = text_size(ctx, params.font, spec.font_size, glyph).0;
                let name_w = text_size(ctx, params.font, spec.sub_font_size, name).0;
                glyph_w.max(name_w)
            }
            None => text_size(ctx, params.font, spec.font_size, label).0,
        },
    };
    // Keycaps never get narrower than they are tall.
    (text_width + spec.pad_x * 2.0).max(spec.keycap_height)
}

fn badge_width(
    ctx: &cairo::Context,
    params: &RenderParams<'_>,
    spec: &SizeSpec,
    repeat_count: u32,
) -> f64 {
    let badge = format!("\u{00D7}{repeat_count}");
    text_size(ctx, params.font, spec.font_size * 0.75, &badge).0
}

fn text_size(ctx: &cairo::Context, font: &FontDescriptor, size: f64, text: &str) -> (f64, f64) {
    let layout = pangocairo::functions::create_layout(ctx);
    let font_desc = pango::FontDescription::from_string(&font.to_pango_string(size));
    layout.set_font_description(Some(&font_desc));
    layout.set_text(text);
    let (w, h) = layout.pixel_size();
    (w as f64, h as f64)
}

#[allow(clippy::too_many_arguments)]
fn render_keycaps(
    ctx: &cairo::Context,
    params: &RenderParams<'_>,
    spec: &SizeSpec,
    parts: &[KeyPart],
    repeat_count: u32,
    x: f64,
    y: f64,
    alpha: f64,
) {
    ctx.save().ok();
    ctx.set_antialias(cairo::Antialias::Best);

    let mut cursor = x;
    for part in parts {
        let width = keycap_width(ctx, params, spec, part);
        render_keycap(ctx, params, spec, part, cursor, y, width, alpha);
        cursor += width + spec.gap;
    }

    // Repeat badge sits outside the keycaps, vertically centered.
    if repeat_count > 1 {
        let badge = format!("\u{00D7}{repeat_count}");
        let (_, badge_h) = text_size(ctx, params.font, spec.font_size * 0.75, &badge);
        draw_text(
            ctx,
            params.font,
            spec.font_size * 0.75,
            &badge,
            cursor,
            y + (spec.keycap_height - badge_h) / 2.0,
            params.palette.text,
            alpha,
        );
    }

    ctx.restore().ok();
}

#[allow(clippy::too_many_arguments)]
fn render_keycap(
    ctx: &cairo::Context,
    params: &RenderParams<'_>,
    spec: &SizeSpec,
    part: &KeyPart,
    x: f64,
    y: f64,
    width: f64,
    alpha: f64,
) {
    let palette = params.palette;
    let height = spec.keycap_height;
    let radius = spec.corner_radius;

    // Soft spread shadow, then a tight one under the bottom edge.
    rounded_rect(ctx, x - 2.0, y + 3.0, width + 4.0, height + 4.0, radius + 2.0);
    set_source(ctx, palette.shadow_spread, alpha);
    let _ = ctx.fill();
    rounded_rect(ctx, x, y + 2.0, width, height, radius);
    set_source(ctx, palette.shadow_tight, alpha);
    let _ = ctx.fill();

    // Body: vertical gradient from the lightened top to the base color.
    let gradient = cairo::LinearGradient::new(x, y, x, y + height);
    let top = palette.bg_top;
    let bottom = palette.bg_bottom;
    gradient.add_color_stop_rgba(0.0, top.r, top.g, top.b, top.a * alpha);
    gradient.add_color_stop_rgba(1.0, bottom.r, bottom.g, bottom.b, bottom.a * alpha);
    rounded_rect(ctx, x, y, width, height, radius);
    let _ = ctx.set_source(&gradient);
    let _ = ctx.fill();

    // Outline, plus a heavier bottom edge for key depth.
    rounded_rect(ctx, x, y, width, height, radius);
    set_source(ctx, palette.border, alpha);
    ctx.set_line_width(1.0);
    let _ = ctx.stroke();

    ctx.move_to(x + radius, y + height - 1.0);
    ctx.line_to(x + width - radius, y + height - 1.0);
    set_source(ctx, palette.border_bottom, alpha);
    ctx.set_line_width(2.0);
    let _ = ctx.stroke();

    match part {
        KeyPart::Modifier { glyph, caps_led } => {
            draw_stacked(
                ctx, params, spec, glyph.symbol, glyph.name, x, y, width, alpha,
            );

            // Caps lock carries a toggle LED in the top-right corner.
            if let Some(led_on) = caps_led {
                let led_r = 3.0;
                let led_x = x + width - radius - led_r;
                let led_y = y + radius;
                ctx.arc(led_x, led_y, led_r, 0.0, std::f64::consts::PI * 2.0);
                if *led_on {
                    ctx.set_source_rgba(0.29, 0.87, 0.5, alpha);
                } else {
                    set_source(ctx, palette.text.with_alpha(0.25), alpha);
                }
                let _ = ctx.fill();
            }
        }
        KeyPart::Label { label } => match key_icon(label) {
            Some((glyph, name)) => {
                draw_stacked(ctx, params, spec, glyph, name, x, y, width, alpha);
            }
            None => {
                let (text_w, text_h) = text_size(ctx, params.font, spec.font_size, label);
                draw_text(
                    ctx,
                    params.font,
                    spec.font_size,
                    label,
                    x + (width - text_w) / 2.0,
                    y + (height - text_h) / 2.0,
                    palette.text,
                    alpha,
                );
            }
        },
    }
}

/// Symbol on top, small name underneath, both centered.
#[allow(clippy::too_many_arguments)]
fn draw_stacked(
    ctx: &cairo::Context,
    params: &RenderParams<'_>,
    spec: &SizeSpec,
    symbol: &str,
    name: &str,
    x: f64,
    y: f64,
    width: f64,
    alpha: f64,
) {
    let palette = params.palette;
    let height = spec.keycap_height;
    let (symbol_w, symbol_h) = text_size(ctx, params.font, spec.font_size, symbol);
    let (name_w, name_h) = text_size(ctx, params.font, spec.sub_font_size, name);
    let total_h = symbol_h + name_h;
    let symbol_y = y + (height - total_h) / 2.0;

    draw_text(
        ctx,
        params.font,
        spec.font_size,
        symbol,
        x + (width - symbol_w) / 2.0,
        symbol_y,
        palette.text,
        alpha,
    );
    draw_text(
        ctx,
        params.font,
        spec.sub_font_size,
        name,
        x + (width - name_w) / 2.0,
        symbol_y + symbol_h,
        palette.text.with_alpha(palette.text.a * 0.8),
        alpha,
    );
}

#[allow(clippy::too_many_arguments)]
fn draw_text(
    ctx: &cairo::Context,
    font: &FontDescriptor,
    size: f64,
    text: &str,
    x: f64,
    y: f64,
    color: Color,
    alpha: f64,
) {
    let layout = pangocairo::functions::create_layout(ctx);
    let font_desc = pango::FontDescription::from_string(&font.to_pango_string(size));
    layout.set_font_description(Some(&font_desc));
    layout.set_text(text);
    ctx.move_to(x, y);
    set_source(ctx, color, alpha);
    pangocairo::functions::show_layout(ctx, &layout);
}

fn set_source(ctx: &cairo::Context, color: Color, alpha: f64) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a * alpha);
}

/// Traces a rounded rectangle path.
fn rounded_rect(ctx: &cairo::Context, x: f64, y: f64, width: f64, height: f64, radius: f64) {
    use std::f64::consts::FRAC_PI_2;
    let radius = radius.min(width / 2.0).min(height / 2.0);
    ctx.new_path();
    ctx.arc(x + width - radius, y + radius, radius, -FRAC_PI_2, 0.0);
    ctx.arc(x + width - radius, y + height - radius, radius, 0.0, FRAC_PI_2);
    ctx.arc(
        x + radius,
        y + height - radius,
        radius,
        FRAC_PI_2,
        2.0 * FRAC_PI_2,
    );
    ctx.arc(x + radius, y + radius, radius, 2.0 * FRAC_PI_2, 3.0 * FRAC_PI_2);
    ctx.close_path();
}
