//! Minimal PDF 1.4 writer used by the order document renderer.
//!
//! Emits a self-contained file: catalog, page tree, one uncompressed content
//! stream per page, the two WinAnsi-encoded base fonts (Helvetica and
//! Helvetica-Bold) and an info dictionary, followed by the cross-reference
//! table. Coordinates passed to the drawing methods are measured from the
//! top-left corner of the page; they are flipped to PDF's bottom-up space
//! when the operators are written.

use std::fmt::Write as _;

use chrono::NaiveDateTime;

/// 8-bit RGB color mapped to the `rg`/`RG` operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn operands(self) -> String {
        format!(
            "{:.3} {:.3} {:.3}",
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0
        )
    }
}

/// The two base fonts embedded in every document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

pub struct PdfWriter {
    width: f64,
    height: f64,
    pages: Vec<String>,
}

impl PdfWriter {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            pages: Vec::new(),
        }
    }

    /// Starts a fresh page; subsequent drawing lands on it.
    pub fn begin_page(&mut self) {
        self.pages.push(String::new());
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn stream(&mut self) -> &mut String {
        if self.pages.is_empty() {
            self.pages.push(String::new());
        }
        self.pages.last_mut().expect("page present")
    }

    /// Draws a single line of text with its baseline `y` points from the
    /// page top. Overflowing text is clipped by the page bounds.
    pub fn text(&mut self, x: f64, y: f64, size: f64, font: Font, color: Rgb, content: &str) {
        let baseline = self.height - y;
        let stream = self.stream();
        let _ = write!(
            stream,
            "BT\n/{} {:.2} Tf\n{} rg\n1 0 0 1 {:.2} {:.2} Tm\n({}) Tj\nET\n",
            font.resource(),
            size,
            color.operands(),
            x,
            baseline,
            encode_win_ansi(content)
        );
    }

    /// Filled rectangle with its top edge `y` points from the page top.
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb) {
        let bottom = self.height - y - h;
        let stream = self.stream();
        let _ = write!(
            stream,
            "{} rg\n{:.2} {:.2} {:.2} {:.2} re\nf\n",
            color.operands(),
            x,
            bottom,
            w,
            h
        );
    }

    /// Outlined rectangle with its top edge `y` points from the page top.
    pub fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb) {
        let bottom = self.height - y - h;
        let stream = self.stream();
        let _ = write!(
            stream,
            "{} RG\n{:.2} {:.2} {:.2} {:.2} re\nS\n",
            color.operands(),
            x,
            bottom,
            w,
            h
        );
    }

    /// Straight line between two points given in top-down coordinates.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Rgb) {
        let (b1, b2) = (self.height - y1, self.height - y2);
        let stream = self.stream();
        let _ = write!(
            stream,
            "{} RG\n{:.2} {:.2} m\n{:.2} {:.2} l\nS\n",
            color.operands(),
            x1,
            b1,
            x2,
            b2
        );
    }

    /// Assembles the final file.
    pub fn finish(self, title: &str, created_at: NaiveDateTime) -> Vec<u8> {
        let page_count = self.pages.len().max(1);
        let pages = if self.pages.is_empty() {
            vec![String::new()]
        } else {
            self.pages
        };

        let mut pdf: Vec<u8> = Vec::new();
        pdf.extend_from_slice(b"%PDF-1.4\n");
        pdf.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        // xref offsets indexed by object number - 1.
        let mut offsets: Vec<usize> = Vec::new();

        offsets.push(pdf.len());
        pdf.extend_from_slice(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

        // The page tree is written after its kids; reserve its slot now.
        let pages_slot = offsets.len();
        offsets.push(0);

        let font_obj_start = 3 + page_count * 2;
        let mut page_obj_ids = Vec::with_capacity(page_count);

        for (idx, stream) in pages.iter().enumerate() {
            let page_obj = 3 + idx * 2;
            let content_obj = page_obj + 1;
            page_obj_ids.push(page_obj);

            offsets.push(pdf.len());
            let page = format!(
                "{page_obj} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] /Contents {content_obj} 0 R /Resources << /Font << /F1 {} 0 R /F2 {} 0 R >> >> >>\nendobj\n",
                self.width,
                self.height,
                font_obj_start,
                font_obj_start + 1
            );
            pdf.extend_from_slice(page.as_bytes());

            offsets.push(pdf.len());
            let content = format!(
                "{content_obj} 0 obj\n<< /Length {} >>\nstream\n{stream}\nendstream\nendobj\n",
                stream.len()
            );
            pdf.extend_from_slice(content.as_bytes());
        }

        offsets[pages_slot] = pdf.len();
        let kids = page_obj_ids
            .iter()
            .map(|id| format!("{id} 0 R"))
            .collect::<Vec<_>>()
            .join(" ");
        let tree = format!("2 0 obj\n<< /Type /Pages /Kids [{kids}] /Count {page_count} >>\nendobj\n");
        pdf.extend_from_slice(tree.as_bytes());

        offsets.push(pdf.len());
        let regular = format!(
            "{font_obj_start} 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>\nendobj\n"
        );
        pdf.extend_from_slice(regular.as_bytes());

        offsets.push(pdf.len());
        let bold = format!(
            "{} 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>\nendobj\n",
            font_obj_start + 1
        );
        pdf.extend_from_slice(bold.as_bytes());

        let info_obj = font_obj_start + 2;
        offsets.push(pdf.len());
        let info = format!(
            "{info_obj} 0 obj\n<< /Title ({}) /Producer (QuickOrder) /CreationDate (D:{}) >>\nendobj\n",
            encode_win_ansi(title),
            created_at.format("%Y%m%d%H%M%S")
        );
        pdf.extend_from_slice(info.as_bytes());

        let xref_start = pdf.len();
        pdf.extend_from_slice(b"xref\n");
        pdf.extend_from_slice(format!("0 {}\n", offsets.len() + 1).as_bytes());
        pdf.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &offsets {
            pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }

        pdf.extend_from_slice(b"trailer\n");
        pdf.extend_from_slice(
            format!(
                "<< /Size {} /Root 1 0 R /Info {info_obj} 0 R >>\n",
                offsets.len() + 1
            )
            .as_bytes(),
        );
        pdf.extend_from_slice(b"startxref\n");
        pdf.extend_from_slice(format!("{xref_start}\n").as_bytes());
        pdf.extend_from_slice(b"%%EOF\n");

        pdf
    }
}

/// Escapes a string for a PDF literal, mapping to WinAnsi bytes. Characters
/// outside Latin-1 are replaced with `?`.
fn encode_win_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            ' '..='~' => out.push(c),
            c if ('\u{a0}'..='\u{ff}').contains(&c) => {
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            _ => out.push('?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_delimiters_and_accents() {
        assert_eq!(encode_win_ansi("a(b)c"), "a\\(b\\)c");
        assert_eq!(encode_win_ansi("Señal"), "Se\\361al");
        assert_eq!(encode_win_ansi("口"), "?");
    }

    #[test]
    fn finish_produces_one_page_per_begin_page() {
        let mut writer = PdfWriter::new(612.0, 792.0);
        writer.begin_page();
        writer.text(50.0, 50.0, 10.0, Font::Regular, Rgb::new(0, 0, 0), "uno");
        writer.begin_page();
        writer.text(50.0, 50.0, 10.0, Font::Bold, Rgb::new(0, 0, 0), "dos");
        assert_eq!(writer.page_count(), 2);

        let bytes = writer.finish("doc", NaiveDateTime::default());
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.contains("/Count 2"));
        assert!(text.contains("(uno) Tj"));
        assert!(text.contains("(dos) Tj"));
        assert!(text.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn coordinates_are_flipped_to_bottom_up() {
        let mut writer = PdfWriter::new(612.0, 792.0);
        writer.begin_page();
        writer.text(60.0, 92.0, 9.0, Font::Regular, Rgb::new(0, 0, 0), "x");
        let bytes = writer.finish("doc", NaiveDateTime::default());
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("1 0 0 1 60.00 700.00 Tm"));
    }
}
