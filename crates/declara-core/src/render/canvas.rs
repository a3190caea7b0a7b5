use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object, StringFormat};

use super::metrics::encode_win_ansi;

/// Standard fonts available to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    pub const ALL: [Font; 2] = [Font::Helvetica, Font::HelveticaBold];

    /// Resource name under the page's `/Font` dictionary. Prefixed so it
    /// cannot collide with the template's own fonts.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "DeclHelv",
            Font::HelveticaBold => "DeclHelvB",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Type1 font dictionary using WinAnsiEncoding.
    pub fn dictionary(self) -> Dictionary {
        Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Font".to_vec())),
            ("Subtype", Object::Name(b"Type1".to_vec())),
            ("BaseFont", Object::Name(self.base_font().as_bytes().to_vec())),
            ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
        ])
    }
}

/// A string placed on the overlay, kept for inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub font: Font,
    pub size: f32,
    pub x: f32,
    pub y: f32,
    pub text: String,
}

/// A straight stroke placed on the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub width: f32,
    pub from: (f32, f32),
    pub to: (f32, f32),
}

/// Records drawing calls as PDF content-stream operations.
#[derive(Debug, Clone)]
pub struct Canvas {
    operations: Vec<Operation>,
    text_runs: Vec<TextRun>,
    lines: Vec<LineSegment>,
    font: Font,
    font_size: f32,
    line_width: f32,
}

impl Canvas {
    pub fn new(font: Font, font_size: f32) -> Self {
        Canvas {
            operations: Vec::new(),
            text_runs: Vec::new(),
            lines: Vec::new(),
            font,
            font_size,
            line_width: 1.0,
        }
    }

    pub fn set_font(&mut self, font: Font, size: f32) {
        self.font = font;
        self.font_size = size;
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
        self.operations
            .push(Operation::new("w", vec![Object::Real(width)]));
    }

    /// Draw `text` with its baseline starting at (x, y).
    pub fn draw_string(&mut self, x: f32, y: f32, text: &str) {
        self.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![
                    Object::Name(self.font.resource_name().as_bytes().to_vec()),
                    Object::Real(self.font_size),
                ],
            ),
            Operation::new("Td", vec![Object::Real(x), Object::Real(y)]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
        self.text_runs.push(TextRun {
            font: self.font,
            size: self.font_size,
            x,
            y,
            text: text.to_string(),
        });
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.operations.extend([
            Operation::new("m", vec![Object::Real(x1), Object::Real(y1)]),
            Operation::new("l", vec![Object::Real(x2), Object::Real(y2)]),
            Operation::new("S", vec![]),
        ]);
        self.lines.push(LineSegment {
            width: self.line_width,
            from: (x1, y1),
            to: (x2, y2),
        });
    }

    pub fn text_runs(&self) -> &[TextRun] {
        &self.text_runs
    }

    pub fn lines(&self) -> &[LineSegment] {
        &self.lines
    }

    /// Content stream with the drawing isolated in its own graphics state.
    pub fn to_content(&self) -> Content {
        let mut operations = Vec::with_capacity(self.operations.len() + 3);
        operations.push(Operation::new("q", vec![]));
        // Black fill and stroke regardless of what the template left set.
        operations.push(Operation::new("g", vec![Object::Integer(0)]));
        operations.push(Operation::new("G", vec![Object::Integer(0)]));
        operations.extend(self.operations.iter().cloned());
        operations.push(Operation::new("Q", vec![]));
        Content { operations }
    }
}
