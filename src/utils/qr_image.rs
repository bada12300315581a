//! SVG rendering of QR payloads.
//!
//! The symbol is built with the `qrcode` crate and written out as a single
//! SVG path, one square per dark module.

use std::fmt::Write;

use qrcode::{Color, EcLevel, QrCode};

use common::{AppError, AppResult, QrCodeConfig};

use crate::config::{MAX_QR_BORDER, MAX_QR_MODULE_SIZE};

/// Height in pixels reserved under the symbol for the caption
const CAPTION_HEIGHT: u32 = 24;

const CAPTION_FONT_SIZE: u32 = 12;

/// Rendering parameters resolved from configuration.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub module_size: u32,
    pub border: u32,
    pub ec_level: EcLevel,
}

impl RenderOptions {
    pub fn from_config(config: &QrCodeConfig) -> AppResult<Self> {
        Ok(Self {
            module_size: config.module_size.clamp(1, MAX_QR_MODULE_SIZE),
            border: config.border.min(MAX_QR_BORDER),
            ec_level: parse_ec_level(&config.error_correction)?,
        })
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            module_size: 10,
            border: 4,
            ec_level: EcLevel::M,
        }
    }
}

/// Parse an error correction level name (`L`, `M`, `Q`, `H`).
pub fn parse_ec_level(level: &str) -> AppResult<EcLevel> {
    match level.trim().to_ascii_uppercase().as_str() {
        "L" => Ok(EcLevel::L),
        "M" => Ok(EcLevel::M),
        "Q" => Ok(EcLevel::Q),
        "H" => Ok(EcLevel::H),
        other => Err(AppError::validation(format!(
            "Invalid error correction level '{}', expected one of: L, M, Q, H",
            other
        ))),
    }
}

/// Render `data` as an SVG document, optionally captioned with `caption`.
pub fn render_svg(data: &str, options: &RenderOptions, caption: Option<&str>) -> AppResult<String> {
    let code = QrCode::with_error_correction_level(data, options.ec_level)
        .map_err(|e| AppError::internal(format!("QR rendering failed: {}", e)))?;

    // Bounded so the canvas arithmetic stays within u32
    let modules = code.width() as u32;
    let scale = options.module_size.clamp(1, MAX_QR_MODULE_SIZE);
    let border = options.border.min(MAX_QR_BORDER);
    let size = (modules + 2 * border) * scale;
    let height = if caption.is_some() {
        size + CAPTION_HEIGHT
    } else {
        size
    };

    let mut path = String::new();
    for (index, color) in code.to_colors().into_iter().enumerate() {
        if color != Color::Dark {
            continue;
        }
        let x = (index as u32 % modules + border) * scale;
        let y = (index as u32 / modules + border) * scale;
        // Writing into a String cannot fail
        let _ = write!(path, "M{x},{y}h{scale}v{scale}h-{scale}z");
    }

    let mut svg = String::with_capacity(path.len() + 512);
    let _ = write!(
        svg,
        r##"<?xml version="1.0" encoding="UTF-8"?><svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{size}" height="{height}" viewBox="0 0 {size} {height}" shape-rendering="crispEdges"><rect width="{size}" height="{height}" fill="#ffffff"/><path d="{path}" fill="#000000"/>"##
    );

    if let Some(text) = caption {
        let baseline = size + CAPTION_HEIGHT / 2 + CAPTION_FONT_SIZE / 3;
        let text_length = size.saturating_sub(2 * scale).max(scale);
        let _ = write!(
            svg,
            r#"<text x="{x}" y="{baseline}" font-family="monospace" font-size="{font_size}" text-anchor="middle" textLength="{text_length}" lengthAdjust="spacingAndGlyphs">{text}</text>"#,
            x = size / 2,
            font_size = CAPTION_FONT_SIZE,
            text = escape_xml(text),
        );
    }

    svg.push_str("</svg>");
    Ok(svg)
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn low_ec() -> RenderOptions {
        RenderOptions {
            ec_level: EcLevel::L,
            ..RenderOptions::default()
        }
    }

    #[test]
    fn renders_square_svg_with_quiet_zone() {
        let svg = render_svg("HELLO", &low_ec(), None).unwrap();

        // Version 1 symbol: 21 modules plus 4 on each side, 10px per module
        assert!(svg.contains(r#"width="290" height="290""#));
        assert!(svg.ends_with("</svg>"));
        assert!(!svg.contains("<text"));
    }

    #[test]
    fn caption_extends_canvas_and_is_escaped() {
        let svg = render_svg("HELLO", &low_ec(), Some("A&B <1>")).unwrap();

        assert!(svg.contains(r#"height="314""#));
        assert!(svg.contains("A&amp;B &lt;1&gt;"));
    }

    #[test]
    fn module_size_is_clamped() {
        let config = QrCodeConfig {
            module_size: 0,
            ..QrCodeConfig::default()
        };
        let options = RenderOptions::from_config(&config).unwrap();
        assert_eq!(options.module_size, 1);
    }

    #[test]
    fn oversized_border_is_bounded() {
        let config = QrCodeConfig {
            border: u32::MAX,
            ..QrCodeConfig::default()
        };
        let options = RenderOptions::from_config(&config).unwrap();
        assert_eq!(options.border, MAX_QR_BORDER);

        let unbounded = RenderOptions {
            border: u32::MAX,
            module_size: u32::MAX,
            ec_level: EcLevel::L,
        };
        let svg = render_svg("HELLO", &unbounded, None).unwrap();
        let side = (21 + 2 * MAX_QR_BORDER) * MAX_QR_MODULE_SIZE;
        assert!(svg.contains(&format!(r#"width="{side}" height="{side}""#)));
    }

    #[test]
    fn parses_error_correction_levels() {
        assert_eq!(parse_ec_level("h").unwrap(), EcLevel::H);
        assert_eq!(parse_ec_level(" Q ").unwrap(), EcLevel::Q);
        assert!(matches!(parse_ec_level("X"), Err(AppError::Validation(_))));
    }
}
