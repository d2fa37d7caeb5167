//! Positioned text spans from page content streams.
//!
//! Table detection works on where text sits on the page, which plain text
//! extraction throws away. This walks the text operators of a page and
//! records each shown string with its baseline origin and font size.

use std::collections::BTreeMap;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};

/// A run of text shown by a single text operator.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Estimated width of the text
    pub width: f32,
    /// Effective font size in points
    pub font_size: f32,
}

impl TextSpan {
    /// Create a span, estimating its width from the glyph count.
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32) -> Self {
        let text = text.into();
        let width = text.chars().count() as f32 * font_size * AVG_GLYPH_WIDTH;
        Self {
            text,
            x,
            y,
            width,
            font_size,
        }
    }

    /// Right edge of the span.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Average glyph advance as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

/// Default leading when a content stream never sets `TL`.
const DEFAULT_LEADING: f32 = 12.0;

/// TJ adjustments (thousandths of a text unit) wider than this are word gaps.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Extracts [`TextSpan`]s from the pages of a loaded document.
pub struct SpanExtractor<'a> {
    doc: &'a LopdfDocument,
}

impl<'a> SpanExtractor<'a> {
    /// Create an extractor over a loaded document.
    pub fn new(doc: &'a LopdfDocument) -> Self {
        Self { doc }
    }

    /// Extract the spans of one page.
    ///
    /// A page without a content stream yields no spans.
    pub fn extract_page_spans(&self, page_num: u32, page_id: ObjectId) -> Result<Vec<TextSpan>> {
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::extraction(page_num, e))?;
        let encodings: BTreeMap<_, _> = fonts
            .iter()
            .filter_map(|(name, font)| {
                font.get_font_encoding(self.doc)
                    .ok()
                    .map(|enc| (name.clone(), enc))
            })
            .collect();

        let content = self
            .doc
            .get_page_content(page_id)
            .map_err(|e| Error::extraction(page_num, e))?;
        if content.is_empty() {
            return Ok(Vec::new());
        }

        let content = lopdf::content::Content::decode(&content)
            .map_err(|e| Error::extraction(page_num, e))?;

        let decode = |font: &[u8], bytes: &[u8]| -> String {
            match encodings.get(font) {
                Some(enc) => LopdfDocument::decode_text(enc, bytes)
                    .unwrap_or_else(|_| decode_text_simple(bytes)),
                None => decode_text_simple(bytes),
            }
        };

        let mut spans = Vec::new();
        let mut state = TextState::default();
        let mut in_text_block = false;

        for op in content.operations {
            let operands = op.operands.as_slice();
            match op.operator.as_str() {
                "BT" => {
                    in_text_block = true;
                    state.matrix = TextMatrix::default();
                }
                "ET" => in_text_block = false,
                "Tf" => {
                    if let [Object::Name(name), size, ..] = operands {
                        state.font = name.clone();
                        state.font_size = get_number(size).unwrap_or(state.font_size);
                    }
                }
                "TL" => {
                    if let Some(leading) = operands.first().and_then(get_number) {
                        state.leading = leading;
                    }
                }
                "Td" | "TD" => {
                    if let [tx, ty, ..] = operands {
                        let tx = get_number(tx).unwrap_or(0.0);
                        let ty = get_number(ty).unwrap_or(0.0);
                        if op.operator == "TD" {
                            state.leading = -ty;
                        }
                        state.matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if operands.len() >= 6 {
                        let n: Vec<f32> = operands[..6]
                            .iter()
                            .map(|o| get_number(o).unwrap_or(0.0))
                            .collect();
                        state.matrix.set(n[0], n[1], n[2], n[3], n[4], n[5]);
                    }
                }
                "T*" => state.matrix.next_line(state.leading),
                "Tj" if in_text_block => {
                    if let Some(Object::String(bytes, _)) = operands.first() {
                        let text = decode(&state.font, bytes);
                        push_span(&mut spans, &state, text);
                    }
                }
                "TJ" if in_text_block => {
                    if let Some(Object::Array(items)) = operands.first() {
                        let text = combine_tj(items, |bytes| decode(&state.font, bytes));
                        push_span(&mut spans, &state, text);
                    }
                }
                "'" | "\"" => {
                    state.matrix.next_line(state.leading);
                    let text_idx = if op.operator == "\"" { 2 } else { 0 };
                    if in_text_block {
                        if let Some(Object::String(bytes, _)) = operands.get(text_idx) {
                            let text = decode(&state.font, bytes);
                            push_span(&mut spans, &state, text);
                        }
                    }
                }
                _ => {}
            }
        }

        log::debug!("page {}: {} text spans", page_num, spans.len());
        Ok(spans)
    }
}

#[derive(Debug)]
struct TextState {
    matrix: TextMatrix,
    font: Vec<u8>,
    font_size: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            matrix: TextMatrix::default(),
            font: Vec::new(),
            font_size: 12.0,
            leading: DEFAULT_LEADING,
        }
    }
}

fn push_span(spans: &mut Vec<TextSpan>, state: &TextState, text: String) {
    if text.trim().is_empty() {
        return;
    }
    let (x, y) = state.matrix.position();
    spans.push(TextSpan::new(
        text,
        x,
        y,
        state.font_size * state.matrix.scale(),
    ));
}

/// Join the strings of a `TJ` array, turning wide negative kerning into
/// word spaces.
fn combine_tj(items: &[Object], mut decode: impl FnMut(&[u8]) -> String) -> String {
    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => combined.push_str(&decode(bytes)),
            other => {
                let Some(adjustment) = get_number(other) else {
                    continue;
                };
                if -adjustment > TJ_SPACE_THRESHOLD {
                    match combined.chars().last() {
                        Some(c) if !c.is_whitespace() && !is_spaceless_script_char(c) => {
                            combined.push(' ')
                        }
                        _ => {}
                    }
                }
            }
        }
    }
    combined
}

/// Text matrix tracking for positioning.
#[derive(Debug, Clone, Copy)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32, // X translation
    f: f32, // Y translation
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        *self = Self { a, b, c, d, e, f };
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self, leading: f32) {
        self.translate(0.0, -leading);
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Chinese and Japanese text carries no word spaces; Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    matches!(
        c as u32,
        0x4E00..=0x9FFF // CJK Unified Ideographs
            | 0x3400..=0x4DBF // Extension A
            | 0x20000..=0x2EBEF // Extensions B-F
            | 0x3040..=0x309F // Hiragana
            | 0x30A0..=0x30FF // Katakana
            | 0x3000..=0x303F // CJK Symbols and Punctuation
    )
}

/// Decode a string operand when the font has no usable encoding.
fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        // Latin-1
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
