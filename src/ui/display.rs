// Tue Jan 13 2026 - Alex

use crate::memory::Value;
use crate::structure::StructLayout;
use crate::utils::{hex_string_spaced, printable_ascii};
use colored::*;

const MAX_HEXDUMP_WIDTH: usize = 256;

pub struct DisplayRenderer {
    use_color: bool,
    hexdump_width: usize,
}

impl DisplayRenderer {
    pub fn new() -> Self {
        Self {
            use_color: true,
            hexdump_width: 16,
        }
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn with_hexdump_width(mut self, width: usize) -> Self {
        self.hexdump_width = width.clamp(1, MAX_HEXDUMP_WIDTH);
        self
    }

    fn paint(&self, text: String, color: Color) -> String {
        if self.use_color {
            text.color(color).to_string()
        } else {
            text
        }
    }

    pub fn render_layout(&self, name: &str, layout: &StructLayout) -> String {
        let mut out = format!(
            "{} (size {}, align {})\n",
            self.paint(name.to_string(), Color::Cyan),
            layout.size(),
            layout.alignment()
        );
        let width = layout.names().map(str::len).max().unwrap_or(0);
        for (field_name, field) in layout.fields() {
            let size = field
                .size()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "?".to_string());
            out.push_str(&format!(
                "  {} {:<width$}  {:>4}  {}\n",
                self.paint(format!("+{:<4}", field.offset()), Color::Yellow),
                field_name,
                size,
                self.paint(field.type_name().to_string(), Color::Green),
                width = width
            ));
        }
        out
    }

    pub fn render_values(&self, values: &[(&str, Value)]) -> String {
        let width = values.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        values
            .iter()
            .map(|(name, value)| {
                format!(
                    "  {:<width$} = {}\n",
                    name,
                    self.paint(value.to_string(), Color::Magenta),
                    width = width
                )
            })
            .collect()
    }

    pub fn hexdump(&self, bytes: &[u8]) -> String {
        let width = self.hexdump_width;
        bytes
            .chunks(width)
            .enumerate()
            .map(|(row, chunk)| {
                let hex = hex_string_spaced(chunk);
                format!(
                    "{}  {:<pad$}  |{}|\n",
                    self.paint(format!("{:08x}", row * width), Color::Yellow),
                    hex,
                    printable_ascii(chunk),
                    pad = width * 3 - 1
                )
            })
            .collect()
    }
}

impl Default for DisplayRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::LayoutBuilder;

    #[test]
    fn test_hexdump_rows() {
        let renderer = DisplayRenderer::new().with_color(false).with_hexdump_width(4);
        let dump = renderer.hexdump(b"abcdef");
        assert_eq!(dump, "00000000  61 62 63 64  |abcd|\n00000004  65 66        |ef|\n");
    }

    #[test]
    fn test_render_layout_lists_fields_in_order() {
        let layout = LayoutBuilder::new()
            .field("y", 4, "double")
            .unwrap()
            .field("x", 0, "int32")
            .unwrap()
            .build()
            .unwrap();
        let text = DisplayRenderer::new().with_color(false).render_layout("Point", &layout);
        let y = text.find("double").unwrap();
        let x = text.find("int32").unwrap();
        assert!(text.starts_with("Point (size 12, align 1)"));
        assert!(y < x);
    }

    #[test]
    fn test_render_values() {
        let text = DisplayRenderer::new()
            .with_color(false)
            .render_values(&[("x", Value::Int32(1)), ("long", Value::string("a"))]);
        assert_eq!(text, "  x    = 1\n  long = \"a\"\n");
    }

    #[test]
    fn test_hexdump_width_is_clamped() {
        let renderer = DisplayRenderer::new().with_color(false).with_hexdump_width(usize::MAX);
        let dump = renderer.hexdump(&[0xab]);
        assert!(dump.starts_with("00000000  ab "));
        assert!(dump.ends_with("|.|\n"));
    }
}
