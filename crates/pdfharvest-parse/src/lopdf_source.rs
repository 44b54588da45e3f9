//! lopdf-backed [`DocumentSource`].
//!
//! Decodes a PDF with lopdf and interprets each page's content stream
//! just far enough to produce positioned word runs and ruling edges:
//! text showing and positioning operators with approximate glyph
//! advances, plus painted rectangles and axis-aligned line segments.
//! Fonts are not resolved; see [`crate::widths`].

use encoding_rs::{UTF_16BE, WINDOWS_1252};
use log::warn;
use lopdf::content::Content;
use lopdf::{Object, ObjectId};
use pdfharvest_core::{BBox, Edge, TextRun};

use crate::error::ParseError;
use crate::source::{DocumentSource, PageText};
use crate::widths::glyph_width_em;

/// Ascender height as a fraction of font size.
const ASCENT_RATIO: f64 = 0.8;

/// Maximum horizontal gap between glyphs of one word, in points.
const WORD_X_TOLERANCE: f64 = 3.0;

/// Maximum baseline drift within one text row, in points.
const WORD_Y_TOLERANCE: f64 = 3.0;

/// Painted rectangles thinner than this act as single rulings rather
/// than four-sided cell borders.
const THIN_RECT: f64 = 2.0;

/// A PDF document opened for text-run extraction.
pub struct LopdfSource {
    doc: lopdf::Document,
    /// Page object ids in document order.
    page_ids: Vec<ObjectId>,
}

impl LopdfSource {
    /// Open a PDF from bytes. Encrypted input is decrypted with the
    /// empty password automatically; if that is rejected the document
    /// fails to open.
    pub fn open(bytes: &[u8]) -> Result<Self, ParseError> {
        Self::open_with_password(bytes, b"")
    }

    /// Open a PDF from bytes with a password. The password is ignored
    /// for unencrypted input.
    pub fn open_with_password(bytes: &[u8], password: &[u8]) -> Result<Self, ParseError> {
        let mut doc = lopdf::Document::load_mem(bytes)
            .map_err(|e| ParseError::Decode(format!("failed to parse PDF: {e}")))?;

        if doc.is_encrypted() {
            let password = std::str::from_utf8(password)
                .map_err(|_| ParseError::InvalidPassword)?;
            doc.decrypt(password)
                .map_err(|_| ParseError::InvalidPassword)?;
        }

        let page_ids: Vec<ObjectId> = doc.get_pages().values().copied().collect();
        Ok(Self { doc, page_ids })
    }
}

impl DocumentSource for LopdfSource {
    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn page(&self, number: usize) -> Result<PageText, ParseError> {
        let count = self.page_ids.len();
        let id = number
            .checked_sub(1)
            .and_then(|i| self.page_ids.get(i))
            .copied()
            .ok_or(ParseError::PageOutOfRange { number, count })?;

        let media = media_box(&self.doc, id, number)?;

        if let Some(rotation) = inherited_i64(&self.doc, id, b"Rotate").filter(|r| *r % 360 != 0) {
            warn!("page {number} declares rotation {rotation}, which is not applied");
        }

        let content_bytes = self
            .doc
            .get_page_content(id)
            .map_err(|e| ParseError::Content {
                page: number,
                message: format!("failed to read content stream: {e}"),
            })?;
        let content = Content::decode(&content_bytes).map_err(|e| ParseError::Content {
            page: number,
            message: format!("failed to decode content stream: {e}"),
        })?;

        let mut interpreter = Interpreter::new(media);
        interpreter.run(&content);

        Ok(PageText {
            page_number: number,
            width: media.2 - media.0,
            height: media.3 - media.1,
            runs: group_words(interpreter.glyphs),
            rulings: interpreter.rulings,
        })
    }
}

/// MediaBox as (x0, y0, x1, y1) in bottom-up PDF coordinates,
/// following the /Parent chain when the page itself has none.
fn media_box(
    doc: &lopdf::Document,
    page_id: ObjectId,
    number: usize,
) -> Result<(f64, f64, f64, f64), ParseError> {
    let obj = inherited(doc, page_id, b"MediaBox").ok_or_else(|| ParseError::Content {
        page: number,
        message: "MediaBox not found on page or ancestors".into(),
    })?;
    let obj = resolve(doc, obj);
    let array = obj.as_array().map_err(|_| ParseError::Content {
        page: number,
        message: "MediaBox is not an array".into(),
    })?;
    let mut values = [0.0f64; 4];
    if array.len() != 4 {
        return Err(ParseError::Content {
            page: number,
            message: "MediaBox does not have four entries".into(),
        });
    }
    for (slot, item) in values.iter_mut().zip(array) {
        *slot = number_of(resolve(doc, item)).ok_or_else(|| ParseError::Content {
            page: number,
            message: "MediaBox entry is not numeric".into(),
        })?;
    }
    Ok((
        values[0].min(values[2]),
        values[1].min(values[3]),
        values[0].max(values[2]),
        values[1].max(values[3]),
    ))
}

/// Look a key up on a page dictionary, following /Parent links.
fn inherited<'a>(doc: &'a lopdf::Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut current = page_id;
    loop {
        let dict = doc.get_object(current).ok()?.as_dict().ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value);
        }
        current = dict.get(b"Parent").ok()?.as_reference().ok()?;
    }
}

fn inherited_i64(doc: &lopdf::Document, page_id: ObjectId, key: &[u8]) -> Option<i64> {
    inherited(doc, page_id, key).and_then(|o| resolve(doc, o).as_i64().ok())
}

/// Follow a reference to its target object; non-references pass through.
fn resolve<'a>(doc: &'a lopdf::Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        other => other,
    }
}

fn number_of(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

/// Decode a PDF string: UTF-16BE when BOM-tagged, else treated as
/// PDFDocEncoding via its Latin-1 superset.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let (text, _, _) = UTF_16BE.decode(&bytes[2..]);
        text.into_owned()
    } else {
        let (text, _, _) = WINDOWS_1252.decode(bytes);
        text.into_owned()
    }
}

/// Row-major 2-D affine transform `[a b c d e f]`, applied to row
/// vectors: `x' = a·x + c·y + e`, `y' = b·x + d·y + f`.
#[derive(Debug, Clone, Copy)]
struct Matrix {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Matrix {
    fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    fn translation(tx: f64, ty: f64) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::identity()
        }
    }

    /// `self` applied first, then `other`.
    fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }
}

/// Minimal text/graphics state machine over a decoded content stream.
struct Interpreter {
    /// MediaBox as (x0, y0, x1, y1), bottom-up.
    media: (f64, f64, f64, f64),
    glyphs: Vec<(char, BBox)>,
    rulings: Vec<Edge>,
    ctm: Matrix,
    ctm_stack: Vec<Matrix>,
    tm: Matrix,
    tlm: Matrix,
    font_size: f64,
    leading: f64,
    char_spacing: f64,
    word_spacing: f64,
    current_point: (f64, f64),
    /// Pending path segments in device coordinates.
    segments: Vec<((f64, f64), (f64, f64))>,
    /// Pending rectangles as device-coordinate corner pairs.
    rects: Vec<((f64, f64), (f64, f64))>,
}

impl Interpreter {
    fn new(media: (f64, f64, f64, f64)) -> Self {
        Self {
            media,
            glyphs: Vec::new(),
            rulings: Vec::new(),
            ctm: Matrix::identity(),
            ctm_stack: Vec::new(),
            tm: Matrix::identity(),
            tlm: Matrix::identity(),
            font_size: 12.0,
            leading: 0.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            current_point: (0.0, 0.0),
            segments: Vec::new(),
            rects: Vec::new(),
        }
    }

    fn run(&mut self, content: &Content) {
        for op in &content.operations {
            let args = &op.operands;
            match op.operator.as_str() {
                "q" => self.ctm_stack.push(self.ctm),
                "Q" => {
                    if let Some(m) = self.ctm_stack.pop() {
                        self.ctm = m;
                    }
                }
                "cm" => {
                    if let Some(m) = matrix_args(args) {
                        self.ctm = m.then(&self.ctm);
                    }
                }
                "BT" => {
                    self.tm = Matrix::identity();
                    self.tlm = Matrix::identity();
                }
                "Tf" => {
                    if let Some(size) = args.get(1).and_then(number_of) {
                        self.font_size = size;
                    }
                }
                "TL" => {
                    if let Some(l) = args.first().and_then(number_of) {
                        self.leading = l;
                    }
                }
                "Tc" => {
                    if let Some(s) = args.first().and_then(number_of) {
                        self.char_spacing = s;
                    }
                }
                "Tw" => {
                    if let Some(s) = args.first().and_then(number_of) {
                        self.word_spacing = s;
                    }
                }
                "Td" => {
                    if let (Some(tx), Some(ty)) = two_numbers(args) {
                        self.text_move(tx, ty);
                    }
                }
                "TD" => {
                    if let (Some(tx), Some(ty)) = two_numbers(args) {
                        self.leading = -ty;
                        self.text_move(tx, ty);
                    }
                }
                "Tm" => {
                    if let Some(m) = matrix_args(args) {
                        self.tm = m;
                        self.tlm = m;
                    }
                }
                "T*" => self.next_line(),
                "Tj" => {
                    if let Some(Object::String(bytes, _)) = args.first() {
                        self.show_text(bytes);
                    }
                }
                "'" => {
                    self.next_line();
                    if let Some(Object::String(bytes, _)) = args.first() {
                        self.show_text(bytes);
                    }
                }
                "\"" => {
                    if let Some(aw) = args.first().and_then(number_of) {
                        self.word_spacing = aw;
                    }
                    if let Some(ac) = args.get(1).and_then(number_of) {
                        self.char_spacing = ac;
                    }
                    self.next_line();
                    if let Some(Object::String(bytes, _)) = args.get(2) {
                        self.show_text(bytes);
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(items)) = args.first() {
                        for item in items {
                            match item {
                                Object::String(bytes, _) => self.show_text(bytes),
                                other => {
                                    if let Some(adjust) = number_of(other) {
                                        let tx = -adjust / 1000.0 * self.font_size;
                                        self.tm = Matrix::translation(tx, 0.0).then(&self.tm);
                                    }
                                }
                            }
                        }
                    }
                }
                "m" => {
                    if let (Some(x), Some(y)) = two_numbers(args) {
                        self.current_point = self.ctm.apply(x, y);
                    }
                }
                "l" => {
                    if let (Some(x), Some(y)) = two_numbers(args) {
                        let next = self.ctm.apply(x, y);
                        self.segments.push((self.current_point, next));
                        self.current_point = next;
                    }
                }
                "c" | "v" | "y" => {
                    // Curves never form table rulings; just track the endpoint.
                    let coords: Vec<f64> = args.iter().filter_map(number_of).collect();
                    if coords.len() >= 2 {
                        self.current_point = self
                            .ctm
                            .apply(coords[coords.len() - 2], coords[coords.len() - 1]);
                    }
                }
                "re" => {
                    let coords: Vec<f64> = args.iter().filter_map(number_of).collect();
                    if let [x, y, w, h] = coords[..] {
                        let p0 = self.ctm.apply(x, y);
                        let p1 = self.ctm.apply(x + w, y + h);
                        self.rects.push((p0, p1));
                    }
                }
                "S" | "s" | "f" | "F" | "f*" | "B" | "B*" | "b" | "b*" => self.flush_path(true),
                "n" => self.flush_path(false),
                _ => {}
            }
        }
    }

    fn text_move(&mut self, tx: f64, ty: f64) {
        self.tlm = Matrix::translation(tx, ty).then(&self.tlm);
        self.tm = self.tlm;
    }

    fn next_line(&mut self) {
        let leading = self.leading;
        self.text_move(0.0, -leading);
    }

    fn show_text(&mut self, bytes: &[u8]) {
        for ch in decode_pdf_string(bytes).chars() {
            let trm = self.tm.then(&self.ctm);
            let sx = (trm.a * trm.a + trm.b * trm.b).sqrt();
            let sy = (trm.c * trm.c + trm.d * trm.d).sqrt();
            let width = glyph_width_em(ch) * self.font_size;

            if !ch.is_whitespace() {
                let x0 = trm.e - self.media.0;
                let bottom = self.media.3 - trm.f;
                let height = self.font_size * sy * ASCENT_RATIO;
                self.glyphs.push((
                    ch,
                    BBox::new(x0, bottom - height, x0 + width * sx, bottom),
                ));
            }

            let mut advance = width + self.char_spacing;
            if ch == ' ' {
                advance += self.word_spacing;
            }
            self.tm = Matrix::translation(advance, 0.0).then(&self.tm);
        }
    }

    /// Convert pending rectangles and segments into rulings. Skipped
    /// entirely when the path ends without painting.
    fn flush_path(&mut self, painted: bool) {
        let segments = std::mem::take(&mut self.segments);
        let rects = std::mem::take(&mut self.rects);
        if !painted {
            return;
        }

        for (p0, p1) in rects {
            let x0 = p0.0.min(p1.0) - self.media.0;
            let x1 = p0.0.max(p1.0) - self.media.0;
            let top = self.media.3 - p0.1.max(p1.1);
            let bottom = self.media.3 - p0.1.min(p1.1);
            if x1 - x0 < THIN_RECT {
                self.rulings
                    .push(Edge::vertical((x0 + x1) / 2.0, top, bottom));
            } else if bottom - top < THIN_RECT {
                self.rulings
                    .push(Edge::horizontal(x0, x1, (top + bottom) / 2.0));
            } else {
                self.rulings.push(Edge::horizontal(x0, x1, top));
                self.rulings.push(Edge::horizontal(x0, x1, bottom));
                self.rulings.push(Edge::vertical(x0, top, bottom));
                self.rulings.push(Edge::vertical(x1, top, bottom));
            }
        }

        for (p0, p1) in segments {
            let (x0, y0) = (p0.0 - self.media.0, self.media.3 - p0.1);
            let (x1, y1) = (p1.0 - self.media.0, self.media.3 - p1.1);
            if (y1 - y0).abs() <= 0.5 {
                self.rulings
                    .push(Edge::horizontal(x0.min(x1), x0.max(x1), (y0 + y1) / 2.0));
            } else if (x1 - x0).abs() <= 0.5 {
                self.rulings
                    .push(Edge::vertical((x0 + x1) / 2.0, y0.min(y1), y0.max(y1)));
            }
        }
    }
}

fn matrix_args(args: &[Object]) -> Option<Matrix> {
    let coords: Vec<f64> = args.iter().filter_map(number_of).collect();
    if let [a, b, c, d, e, f] = coords[..] {
        Some(Matrix { a, b, c, d, e, f })
    } else {
        None
    }
}

fn two_numbers(args: &[Object]) -> (Option<f64>, Option<f64>) {
    (
        args.first().and_then(number_of),
        args.get(1).and_then(number_of),
    )
}

/// Group glyph boxes into word runs: rows by baseline proximity, words
/// split at horizontal gaps.
fn group_words(glyphs: Vec<(char, BBox)>) -> Vec<TextRun> {
    if glyphs.is_empty() {
        return Vec::new();
    }

    let mut sorted = glyphs;
    sorted.sort_by(|a, b| {
        a.1.top
            .partial_cmp(&b.1.top)
            .unwrap()
            .then(a.1.x0.partial_cmp(&b.1.x0).unwrap())
    });

    let mut rows: Vec<Vec<(char, BBox)>> = Vec::new();
    for glyph in sorted {
        match rows.last_mut() {
            Some(row) if (glyph.1.top - row[0].1.top).abs() <= WORD_Y_TOLERANCE => row.push(glyph),
            _ => rows.push(vec![glyph]),
        }
    }

    let mut words = Vec::new();
    for mut row in rows {
        row.sort_by(|a, b| a.1.x0.partial_cmp(&b.1.x0).unwrap());
        let mut text = String::new();
        let mut bbox: Option<BBox> = None;
        for (ch, glyph_box) in row {
            match bbox {
                Some(current) if glyph_box.x0 - current.x1 > WORD_X_TOLERANCE => {
                    words.push(TextRun::new(std::mem::take(&mut text), current));
                    text.push(ch);
                    bbox = Some(glyph_box);
                }
                Some(current) => {
                    text.push(ch);
                    bbox = Some(current.union(&glyph_box));
                }
                None => {
                    text.push(ch);
                    bbox = Some(glyph_box);
                }
            }
        }
        if let Some(current) = bbox {
            words.push(TextRun::new(text, current));
        }
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a single-page PDF with the given content stream.
    fn pdf_with_content(content: &[u8]) -> Vec<u8> {
        pdf_with_page_contents(&[content])
    }

    /// Create a multi-page PDF, one content stream per page.
    fn pdf_with_page_contents(contents: &[&[u8]]) -> Vec<u8> {
        use lopdf::{Object, Stream, dictionary};

        let mut doc = lopdf::Document::with_version("1.5");

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let mut page_ids = Vec::new();
        for content in contents {
            let stream = Stream::new(dictionary! {}, content.to_vec());
            let content_id = doc.add_object(stream);
            let page_dict = dictionary! {
                "Type" => "Page",
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ],
                "Contents" => Object::Reference(content_id),
                "Resources" => dictionary! {
                    "Font" => dictionary! {
                        "F1" => Object::Reference(font_id),
                    },
                },
            };
            page_ids.push(doc.add_object(page_dict));
        }

        let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(page_ids.len() as i64),
        });
        for page_id in &page_ids {
            if let Ok(page_obj) = doc.get_object_mut(*page_id) {
                if let Ok(dict) = page_obj.as_dict_mut() {
                    dict.set("Parent", Object::Reference(pages_id));
                }
            }
        }

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_page_count_and_geometry() {
        let bytes = pdf_with_page_contents(&[b"", b""]);
        let source = LopdfSource::open(&bytes).unwrap();
        assert_eq!(source.page_count(), 2);

        let page = source.page(1).unwrap();
        assert_eq!(page.width, 612.0);
        assert_eq!(page.height, 792.0);
        assert!(page.runs.is_empty());
    }

    #[test]
    fn test_page_out_of_range() {
        let bytes = pdf_with_content(b"");
        let source = LopdfSource::open(&bytes).unwrap();
        assert!(matches!(
            source.page(2),
            Err(ParseError::PageOutOfRange { number: 2, count: 1 })
        ));
        assert!(matches!(
            source.page(0),
            Err(ParseError::PageOutOfRange { number: 0, count: 1 })
        ));
    }

    #[test]
    fn test_simple_text_becomes_one_run() {
        let bytes = pdf_with_content(b"BT /F1 12 Tf 72 720 Td (Hello) Tj ET");
        let source = LopdfSource::open(&bytes).unwrap();
        let page = source.page(1).unwrap();

        assert_eq!(page.runs.len(), 1);
        let run = &page.runs[0];
        assert_eq!(run.text, "Hello");
        assert_eq!(run.bbox.x0, 72.0);
        // Baseline at 720 from the page bottom of a 792pt page.
        assert!((run.bbox.bottom - 72.0).abs() < 0.01);
        assert!(run.bbox.top < run.bbox.bottom);
    }

    #[test]
    fn test_space_splits_words() {
        let bytes = pdf_with_content(b"BT /F1 12 Tf 72 720 Td (Total Assets) Tj ET");
        let source = LopdfSource::open(&bytes).unwrap();
        let page = source.page(1).unwrap();

        let texts: Vec<&str> = page.runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["Total", "Assets"]);
        assert!(page.runs[1].bbox.x0 > page.runs[0].bbox.x1);
    }

    #[test]
    fn test_lines_come_out_in_reading_order() {
        let content: &[u8] =
            b"BT /F1 12 Tf 72 600 Td (lower) Tj ET BT /F1 12 Tf 72 720 Td (upper) Tj ET";
        let source = LopdfSource::open(&pdf_with_content(content)).unwrap();
        let page = source.page(1).unwrap();

        let texts: Vec<&str> = page.runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["upper", "lower"]);
    }

    #[test]
    fn test_tj_array_kerning_keeps_word_together() {
        let bytes = pdf_with_content(b"BT /F1 12 Tf 72 720 Td [(Ta) -50 (ble)] TJ ET");
        let source = LopdfSource::open(&bytes).unwrap();
        let page = source.page(1).unwrap();

        assert_eq!(page.runs.len(), 1);
        assert_eq!(page.runs[0].text, "Table");
    }

    #[test]
    fn test_painted_rect_produces_rulings() {
        let bytes = pdf_with_content(b"100 100 200 50 re S");
        let source = LopdfSource::open(&bytes).unwrap();
        let page = source.page(1).unwrap();

        let horizontal = page
            .rulings
            .iter()
            .filter(|e| e.orientation == pdfharvest_core::Orientation::Horizontal)
            .count();
        let vertical = page
            .rulings
            .iter()
            .filter(|e| e.orientation == pdfharvest_core::Orientation::Vertical)
            .count();
        assert_eq!(horizontal, 2);
        assert_eq!(vertical, 2);

        // Device y 100..150 flips to top-left 642..692.
        assert!(page.rulings.iter().any(|e| (e.top - 642.0).abs() < 0.01));
        assert!(page.rulings.iter().any(|e| (e.top - 692.0).abs() < 0.01));
    }

    #[test]
    fn test_unpainted_path_produces_no_rulings() {
        let bytes = pdf_with_content(b"100 100 200 50 re n");
        let source = LopdfSource::open(&bytes).unwrap();
        let page = source.page(1).unwrap();
        assert!(page.rulings.is_empty());
    }

    #[test]
    fn test_line_segments_become_rulings() {
        let bytes = pdf_with_content(b"100 100 m 300 100 l S 100 100 m 100 300 l S");
        let source = LopdfSource::open(&bytes).unwrap();
        let page = source.page(1).unwrap();
        assert_eq!(page.rulings.len(), 2);
        assert_eq!(
            page.rulings[0].orientation,
            pdfharvest_core::Orientation::Horizontal
        );
        assert_eq!(
            page.rulings[1].orientation,
            pdfharvest_core::Orientation::Vertical
        );
    }

    #[test]
    fn test_decode_pdf_string_utf16() {
        let bytes = [0xFE, 0xFF, 0x00, 0x41, 0x00, 0x42];
        assert_eq!(decode_pdf_string(&bytes), "AB");
        assert_eq!(decode_pdf_string(b"plain"), "plain");
    }

    #[test]
    fn test_media_box_inherited_from_parent() {
        use lopdf::{Object, Stream, dictionary};

        let mut doc = lopdf::Document::with_version("1.5");
        let stream = Stream::new(dictionary! {}, b"".to_vec());
        let content_id = doc.add_object(stream);
        // Page without its own MediaBox.
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Contents" => Object::Reference(content_id),
        });
        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => Object::Integer(1),
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(595),
                Object::Integer(842),
            ],
        });
        if let Ok(page_obj) = doc.get_object_mut(page_id) {
            if let Ok(dict) = page_obj.as_dict_mut() {
                dict.set("Parent", Object::Reference(pages_id));
            }
        }
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));
        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();

        let source = LopdfSource::open(&buf).unwrap();
        let page = source.page(1).unwrap();
        assert_eq!(page.width, 595.0);
        assert_eq!(page.height, 842.0);
    }
}
