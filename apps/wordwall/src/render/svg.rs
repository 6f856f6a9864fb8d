//! SVG output for cutting or printing the wall face.
//!
//! One `<text>` element per letter. Letter `c` of row `r` sits at
//! `x = c * x_space`, `y = 1 + r * y_space` (centimetres). The document is as wide as
//! the widest row and as tall as the baseline after the last row.

use crate::layout::{Grid, WallGeometry};

/// Writes `grid` as a standalone SVG document.
pub fn render_svg(grid: &Grid, geometry: &WallGeometry) -> String {
    let width = grid.width() as f32 * geometry.x_space_cm;
    let height = 1.0 + grid.row_count() as f32 * geometry.y_space_cm;

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}cm\" height=\"{}cm\" \
         font-family=\"{}\" font-weight=\"bold\" font-size=\"{}cm\">\n",
        fmt_cm(width),
        fmt_cm(height),
        xml_escape(&geometry.font_family),
        fmt_cm(geometry.letter_size_cm),
    ));

    for (r, row) in grid.rows().iter().enumerate() {
        let y = 1.0 + r as f32 * geometry.y_space_cm;
        for (c, ch) in row.iter().enumerate() {
            let x = c as f32 * geometry.x_space_cm;
            out.push_str(&format!(
                "  <text x=\"{}cm\" y=\"{}cm\">{}</text>\n",
                fmt_cm(x),
                fmt_cm(y),
                xml_escape(&ch.to_string())
            ));
        }
    }

    out.push_str("</svg>\n");
    out
}

/// Millimetre precision, trailing zeros dropped.
fn fmt_cm(value: f32) -> String {
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::default_geometry;

    #[test]
    fn test_one_text_element_per_letter() {
        let grid = Grid::from_lines(["ab", "cde"]);
        let svg = render_svg(&grid, &default_geometry());
        assert_eq!(svg.matches("<text ").count(), 5);
        assert!(svg.contains("<text x=\"0cm\" y=\"1cm\">a</text>"));
        assert!(svg.contains("<text x=\"2cm\" y=\"2.5cm\">e</text>"));
    }

    #[test]
    fn test_document_size_and_font() {
        let grid = Grid::from_lines(["ab", "cde"]);
        let svg = render_svg(&grid, &default_geometry());
        assert!(svg.contains("width=\"3cm\""));
        assert!(svg.contains("height=\"4cm\""));
        assert!(svg.contains("font-family=\"Arial\""));
        assert!(svg.contains("font-weight=\"bold\""));
        assert!(svg.contains("font-size=\"0.8cm\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_special_characters_are_escaped() {
        let grid = Grid::from_lines(["a<&"]);
        let svg = render_svg(&grid, &default_geometry());
        assert!(svg.contains(">&lt;</text>"));
        assert!(svg.contains(">&amp;</text>"));
    }

    #[test]
    fn test_fmt_cm() {
        assert_eq!(fmt_cm(0.0), "0");
        assert_eq!(fmt_cm(1.5), "1.5");
        assert_eq!(fmt_cm(0.1 + 0.2), "0.3");
        assert_eq!(fmt_cm(20.0), "20");
    }
}
