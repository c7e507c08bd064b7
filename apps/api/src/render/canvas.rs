//! Page assembly on top of `lopdf`: a top-down cursor over US Letter pages,
//! text runs in the three Times faces, and horizontal rules.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use super::font_metrics::FontFace;
use super::RenderError;

const PT_PER_CM: f32 = 72.0 / 2.54;

pub const PAGE_WIDTH_PT: f32 = 612.0;
pub const PAGE_HEIGHT_PT: f32 = 792.0;
pub const MARGIN_VERTICAL_PT: f32 = 1.0 * PT_PER_CM;
pub const MARGIN_HORIZONTAL_PT: f32 = 1.2 * PT_PER_CM;

/// Share of the line height that sits above the baseline.
const ASCENT_RATIO: f32 = 0.8;

pub struct PageCanvas {
    pages: Vec<Vec<Operation>>,
    cursor_y: f32,
}

impl Default for PageCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl PageCanvas {
    pub fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            cursor_y: PAGE_HEIGHT_PT - MARGIN_VERTICAL_PT,
        }
    }

    pub fn left(&self) -> f32 {
        MARGIN_HORIZONTAL_PT
    }

    pub fn right(&self) -> f32 {
        PAGE_WIDTH_PT - MARGIN_HORIZONTAL_PT
    }

    pub fn content_width(&self) -> f32 {
        self.right() - self.left()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Starts a new page when fewer than `height` points remain above the bottom margin.
    /// A fresh page never breaks again, so oversized blocks still make progress.
    pub fn ensure_space(&mut self, height: f32) {
        let fresh = self.cursor_y >= PAGE_HEIGHT_PT - MARGIN_VERTICAL_PT;
        if !fresh && self.cursor_y - height < MARGIN_VERTICAL_PT {
            self.pages.push(Vec::new());
            self.cursor_y = PAGE_HEIGHT_PT - MARGIN_VERTICAL_PT;
        }
    }

    pub fn advance(&mut self, dy: f32) {
        self.cursor_y -= dy;
    }

    /// Reserves one line of `leading` points and returns its baseline.
    pub fn next_line(&mut self, leading: f32) -> f32 {
        self.ensure_space(leading);
        let baseline = self.cursor_y - leading * ASCENT_RATIO;
        self.cursor_y -= leading;
        baseline
    }

    pub fn text(&mut self, x: f32, baseline: f32, face: FontFace, size: f32, text: &str) {
        if text.is_empty() {
            return;
        }
        let ops = self.current_page();
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![face.resource_name().into(), size.into()],
        ));
        ops.push(Operation::new("Td", vec![x.into(), baseline.into()]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_win_ansi(text))],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    /// Full-width horizontal rule at `y`.
    pub fn rule(&mut self, y: f32, thickness: f32) {
        let (left, right) = (self.left(), self.right());
        let ops = self.current_page();
        ops.push(Operation::new("w", vec![thickness.into()]));
        ops.push(Operation::new("m", vec![left.into(), y.into()]));
        ops.push(Operation::new("l", vec![right.into(), y.into()]));
        ops.push(Operation::new("S", vec![]));
    }

    fn current_page(&mut self) -> &mut Vec<Operation> {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Serialises all pages into a compressed PDF 1.5 document.
    pub fn finish(self) -> Result<Vec<u8>, RenderError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = lopdf::Dictionary::new();
        for face in FontFace::ALL {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(face.resource_name(), font_id);
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
        });

        let mut kids = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(Object::from(page_id));
        }

        let count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH_PT.into(), PAGE_HEIGHT_PT.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

/// Encodes text for a WinAnsiEncoding simple font. Characters outside the
/// code page become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\t' | '\n' | '\r' => b' ',
            ' '..='~' => c as u8,
            '\u{00A0}'..='\u{00FF}' => c as u32 as u8,
            '\u{20AC}' => 0x80,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Go"), b"Go".to_vec());
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("\u{2022} a \u{2013} b"), vec![0x95, b' ', b'a', b' ', 0x96, b' ', b'b']);
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    }

    #[test]
    fn test_next_line_breaks_page_at_bottom_margin() {
        let mut canvas = PageCanvas::new();
        let usable = PAGE_HEIGHT_PT - 2.0 * MARGIN_VERTICAL_PT;
        let lines_per_page = (usable / 12.0).floor() as usize;
        for _ in 0..lines_per_page {
            canvas.next_line(12.0);
        }
        assert_eq!(canvas.page_count(), 1);

        let baseline = canvas.next_line(12.0);
        assert_eq!(canvas.page_count(), 2);
        assert!(baseline > PAGE_HEIGHT_PT / 2.0);
    }

    #[test]
    fn test_oversized_block_on_fresh_page_does_not_loop() {
        let mut canvas = PageCanvas::new();
        canvas.ensure_space(PAGE_HEIGHT_PT * 2.0);
        assert_eq!(canvas.page_count(), 1);
    }

    #[test]
    fn test_finish_produces_loadable_document() {
        let mut canvas = PageCanvas::new();
        let y = canvas.next_line(12.0);
        let x = canvas.left();
        canvas.text(x, y, FontFace::Bold, 10.0, "Hello");
        canvas.rule(y - 2.0, 0.8);

        let bytes = canvas.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}
