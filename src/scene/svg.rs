//! SVG document output for [`MapFrame`]s.

use std::fmt::Write as _;

use crate::{
    assets::color::Rgba8,
    foundation::core::Canvas,
    geo::projection::{LOGICAL_HEIGHT, LOGICAL_WIDTH},
    scene::{
        frame::{ArcShape, MapFrame},
        hover::MARKER_RADIUS,
    },
};

const BACKGROUND_OPACITY: f64 = 0.9;
const GLOW_STD_DEVIATION: f64 = 2.0;
const TOOLTIP_MARGIN: f64 = 16.0;
const TOOLTIP_HEIGHT: f64 = 32.0;
const TOOLTIP_FONT_SIZE: f64 = 14.0;
const TOOLTIP_TEXT: &str = "#67e8f9";
const TOOLTIP_BORDER: &str = "#22d3ee";

/// Render `frame` as a standalone SVG document of `canvas` pixels.
///
/// Content is laid out in the 800×400 logical view box and letterboxed to fit the canvas.
/// `clear` fills the whole document behind the map when it is not fully transparent.
pub fn to_svg(frame: &MapFrame, canvas: Canvas, clear: Rgba8) -> String {
    let mut out = String::with_capacity(4096);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}" viewBox="0 0 {} {}" preserveAspectRatio="xMidYMid meet">"#,
        canvas.width, canvas.height, LOGICAL_WIDTH, LOGICAL_HEIGHT
    );

    if clear.a > 0 {
        let _ = write!(
            out,
            r#"<rect x="-100%" y="-100%" width="300%" height="300%" fill="{}" fill-opacity="{}"/>"#,
            clear.to_hex_rgb(),
            clear.opacity()
        );
    }

    write_defs(&mut out, frame.line_color);

    let _ = write!(
        out,
        r#"<image x="0" y="0" width="{}" height="{}" preserveAspectRatio="xMidYMid slice" opacity="{}" xlink:href="{}"/>"#,
        LOGICAL_WIDTH,
        LOGICAL_HEIGHT,
        BACKGROUND_OPACITY,
        frame.background.data_uri()
    );

    let line = frame.line_color.to_hex_rgb();
    let line_opacity = frame.line_color.opacity();

    for arc in frame.visible_arcs() {
        write_arc(&mut out, arc);
    }
    for arc in &frame.arcs {
        if let Some(m) = arc.marker.filter(|m| m.opacity > 0.0) {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}" fill-opacity="{}" opacity="{}"/>"#,
                m.position.x, m.position.y, MARKER_RADIUS, line, line_opacity, m.opacity
            );
        }
    }

    for e in &frame.endpoints {
        let _ = write!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}" fill-opacity="{}" filter="url(#glow)"/>"#,
            e.center.x, e.center.y, MARKER_RADIUS, line, line_opacity
        );
    }

    for t in &frame.tooltips {
        let width = 24.0 + 7.5 * t.label.chars().count() as f64;
        let y = LOGICAL_HEIGHT - TOOLTIP_MARGIN - TOOLTIP_HEIGHT + t.offset_y;
        let _ = write!(
            out,
            r#"<g opacity="{}"><rect x="{}" y="{}" width="{}" height="{}" rx="8" fill="black" fill-opacity="0.8" stroke="{}" stroke-opacity="0.4"/><text x="{}" y="{}" font-family="sans-serif" font-size="{}" font-weight="500" fill="{}">{}</text></g>"#,
            t.opacity,
            TOOLTIP_MARGIN,
            y,
            width,
            TOOLTIP_HEIGHT,
            TOOLTIP_BORDER,
            TOOLTIP_MARGIN + 12.0,
            y + TOOLTIP_HEIGHT / 2.0 + TOOLTIP_FONT_SIZE * 0.35,
            TOOLTIP_FONT_SIZE,
            TOOLTIP_TEXT,
            escape_xml(&t.label)
        );
    }

    out.push_str("</svg>");
    out
}

fn write_defs(out: &mut String, line_color: Rgba8) {
    let c = line_color.to_hex_rgb();
    let o = line_color.opacity();
    let _ = write!(
        out,
        concat!(
            r#"<defs>"#,
            r#"<linearGradient id="path-gradient" x1="0%" y1="0%" x2="100%" y2="0%">"#,
            r#"<stop offset="0%" stop-color="black" stop-opacity="0"/>"#,
            r#"<stop offset="5%" stop-color="{c}" stop-opacity="{o}"/>"#,
            r#"<stop offset="95%" stop-color="{c}" stop-opacity="{o}"/>"#,
            r#"<stop offset="100%" stop-color="black" stop-opacity="0"/>"#,
            r#"</linearGradient>"#,
            r#"<filter id="glow" x="-50%" y="-50%" width="200%" height="200%">"#,
            r#"<feGaussianBlur stdDeviation="{blur}" result="blur"/>"#,
            r#"<feMerge><feMergeNode in="blur"/><feMergeNode in="SourceGraphic"/></feMerge>"#,
            r#"</filter>"#,
            r#"</defs>"#
        ),
        c = c,
        o = o,
        blur = GLOW_STD_DEVIATION
    );
}

fn write_arc(out: &mut String, arc: &ArcShape) {
    let _ = write!(
        out,
        r#"<path d="{}" fill="none" stroke="url(#path-gradient)" stroke-width="1""#,
        arc.path.to_svg_d()
    );
    // A fully drawn arc is a plain stroke. A partial one is a single dash from the start whose
    // gap outruns any length the renderer measures, so it never wraps back onto the curve.
    if arc.visible < 1.0 {
        let _ = write!(
            out,
            r#" stroke-dasharray="{} {}""#,
            arc.length * arc.visible,
            arc.length * 2.0 + 1.0
        );
    }
    out.push_str("/>");
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scene/svg.rs"]
mod tests;
