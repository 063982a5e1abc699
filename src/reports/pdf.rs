use anyhow::Context;
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, Greyscale, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Pt, Rect,
};

use super::layout::{Canvas, TextStyle};

// A4 in points
const PAGE_WIDTH: f64 = 595.276;
const PAGE_HEIGHT: f64 = 841.89;

const LINE_SPACING: f64 = 1.25;
// Helvetica average glyph width as a fraction of the font size; close
// enough for table wrapping without shipping font metrics.
const CHAR_WIDTH_FACTOR: f64 = 0.5;

/// `Canvas` backed by printpdf. Layout coordinates are points from the top
/// of the page; PDF space is bottom-up, so y flips here.
pub struct PdfCanvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl PdfCanvas {
    pub fn new(title: &str) -> anyhow::Result<Self> {
        let (doc, page, layer) = PdfDocument::new(
            title,
            Mm::from(Pt(PAGE_WIDTH as f32)),
            Mm::from(Pt(PAGE_HEIGHT as f32)),
            "Page 1",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .context("add helvetica")?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .context("add helvetica bold")?;
        let italic = doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .context("add helvetica oblique")?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            italic,
        })
    }

    pub fn finish(self) -> anyhow::Result<Vec<u8>> {
        let PdfCanvas { doc, .. } = self;
        doc.save_to_bytes().context("serialize pdf")
    }

    fn font_for(&self, style: TextStyle) -> &IndirectFontRef {
        if style.bold {
            &self.bold
        } else if style.italic {
            &self.italic
        } else {
            &self.regular
        }
    }

    fn wrap_lines(&self, text: &str, width: f64, style: TextStyle) -> Vec<String> {
        let max_chars = ((width / (style.size * CHAR_WIDTH_FACTOR)) as usize).max(1);
        let mut lines = Vec::new();
        let mut current = String::new();
        for word in text.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.len() + 1 + word.len() <= max_chars {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        if lines.is_empty() {
            lines.push(String::new());
        }
        lines
    }
}

impl Canvas for PdfCanvas {
    fn page_height(&self) -> f64 {
        PAGE_HEIGHT
    }

    fn start_page(&mut self) {
        let (page, layer) = self.doc.add_page(
            Mm::from(Pt(PAGE_WIDTH as f32)),
            Mm::from(Pt(PAGE_HEIGHT as f32)),
            "Page",
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
    }

    fn measure_height(&self, text: &str, width: f64, style: TextStyle) -> f64 {
        let lines = self.wrap_lines(text, width, style);
        lines.len() as f64 * style.size * LINE_SPACING
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, width: f64, style: TextStyle) {
        let font = self.font_for(style).clone();
        let line_height = style.size * LINE_SPACING;
        for (i, line) in self.wrap_lines(text, width, style).into_iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            // y is the top of the text block; baseline sits one glyph height
            // below the top of each line
            let baseline = PAGE_HEIGHT - (y + i as f64 * line_height + style.size);
            self.layer.use_text(
                line,
                style.size as f32,
                Mm::from(Pt(x as f32)),
                Mm::from(Pt(baseline as f32)),
                &font,
            );
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, gray: f64) {
        self.layer
            .set_fill_color(Color::Greyscale(Greyscale::new(gray as f32, None)));
        let rect = Rect::new(
            Mm::from(Pt(x as f32)),
            Mm::from(Pt((PAGE_HEIGHT - y - h) as f32)),
            Mm::from(Pt((x + w) as f32)),
            Mm::from(Pt((PAGE_HEIGHT - y) as f32)),
        )
        .with_mode(PaintMode::Fill);
        self.layer.add_rect(rect);
        // reset so following text stays black
        self.layer
            .set_fill_color(Color::Greyscale(Greyscale::new(0.0, None)));
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.layer
            .set_outline_color(Color::Greyscale(Greyscale::new(0.0, None)));
        let rect = Rect::new(
            Mm::from(Pt(x as f32)),
            Mm::from(Pt((PAGE_HEIGHT - y - h) as f32)),
            Mm::from(Pt((x + w) as f32)),
            Mm::from(Pt((PAGE_HEIGHT - y) as f32)),
        )
        .with_mode(PaintMode::Stroke);
        self.layer.add_rect(rect);
    }
}
