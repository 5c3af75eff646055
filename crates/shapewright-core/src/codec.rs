//! Line-oriented text format for documents.
//!
//! ```text
//! Background_Color: -1
//! GeneralShape;-16777216;0;-16777216;0:10.0,10.0,0.0,0.0,0.0,0.0,;1:110.0,10.0,0.0,0.0,0.0,0.0,;...
//! ```
//!
//! The first non-blank line carries the background, every following line one
//! shape. Each path segment is written as its type tag (0 move, 1 line,
//! 2 quad, 3 cubic, 4 close) followed by exactly six coordinates.

use crate::document::{Background, Document, ImageRef};
use crate::shapes::{Rgb, Shape};
use kurbo::{BezPath, PathEl, Point};
use thiserror::Error;

pub const BACKGROUND_COLOR_PREFIX: &str = "Background_Color: ";
pub const BACKGROUND_IMAGE_PREFIX: &str = "Background_Image: ";
pub const SHAPE_TAG: &str = "GeneralShape";

const SEG_MOVE: u8 = 0;
const SEG_LINE: u8 = 1;
const SEG_QUAD: u8 = 2;
const SEG_CUBIC: u8 = 3;
const SEG_CLOSE: u8 = 4;
const SEGMENT_SLOTS: usize = 6;

/// Errors from decoding a document.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The background colour is not a 32-bit integer.
    #[error("line {line}: `{value}` is not a valid colour")]
    BadNumber { line: usize, value: String },

    /// A shape line could not be parsed.
    #[error("invalid shape: {0}")]
    InvalidShape(String),
}

pub type CodecResult<T> = Result<T, CodecError>;

/// Encode a document as text, one line per entry, newline-terminated.
pub fn encode(document: &Document) -> String {
    let mut text = String::new();
    for line in encode_lines(document) {
        text.push_str(&line);
        text.push('\n');
    }
    text
}

/// Encode a document as a list of lines: background first, then shapes back
/// to front.
pub fn encode_lines(document: &Document) -> Vec<String> {
    let mut lines = Vec::with_capacity(document.len() + 1);
    lines.push(encode_background(&document.background));
    lines.extend(document.shapes().iter().map(encode_shape));
    lines
}

pub fn encode_background(background: &Background) -> String {
    match background {
        Background::Color(color) => format!("{BACKGROUND_COLOR_PREFIX}{}", color.to_argb()),
        Background::Image(image) => format!("{BACKGROUND_IMAGE_PREFIX}{}", image.path),
    }
}

/// Encode one shape as a `GeneralShape;` line.
pub fn encode_shape(shape: &Shape) -> String {
    let mut line = format!(
        "{SHAPE_TAG};{};{};{};",
        shape.fill.to_argb(),
        shape.outline_thickness,
        shape.outline.to_argb()
    );
    for el in shape.path.elements() {
        let (tag, coords) = segment_slots(*el);
        line.push_str(&tag.to_string());
        line.push(':');
        for c in coords {
            line.push_str(&format!("{c:?},"));
        }
        line.push(';');
    }
    line
}

fn segment_slots(el: PathEl) -> (u8, [f64; SEGMENT_SLOTS]) {
    match el {
        PathEl::MoveTo(p) => (SEG_MOVE, [p.x, p.y, 0.0, 0.0, 0.0, 0.0]),
        PathEl::LineTo(p) => (SEG_LINE, [p.x, p.y, 0.0, 0.0, 0.0, 0.0]),
        PathEl::QuadTo(p1, p2) => (SEG_QUAD, [p1.x, p1.y, p2.x, p2.y, 0.0, 0.0]),
        PathEl::CurveTo(p1, p2, p3) => (SEG_CUBIC, [p1.x, p1.y, p2.x, p2.y, p3.x, p3.y]),
        PathEl::ClosePath => (SEG_CLOSE, [0.0; SEGMENT_SLOTS]),
    }
}

/// Decode a document from text.
pub fn decode(text: &str) -> CodecResult<Document> {
    decode_lines(text.lines())
}

/// Decode a document from individual lines.
///
/// Only a malformed background colour is an error. Lines that are not shapes
/// or fail to parse are skipped.
pub fn decode_lines<I, S>(lines: I) -> CodecResult<Document>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut document = Document::new();
    let mut seen_first = false;

    for (index, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        let number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        if !seen_first {
            seen_first = true;
            if let Some(background) = decode_background(line, number)? {
                document.background = background;
                continue;
            }
        }

        match parse_shape(line) {
            Ok(shape) => {
                document.add_shape(shape);
            }
            Err(err) => log::warn!("skipping line {number}: {err}"),
        }
    }

    document.mark_saved();
    Ok(document)
}

/// Parse a background line. `Ok(None)` if the line is not a background line.
pub fn decode_background(line: &str, number: usize) -> CodecResult<Option<Background>> {
    if let Some(value) = line.strip_prefix(BACKGROUND_COLOR_PREFIX) {
        let argb = value.trim().parse::<i32>().map_err(|_| CodecError::BadNumber {
            line: number,
            value: value.to_string(),
        })?;
        return Ok(Some(Background::Color(Rgb::from_argb(argb))));
    }
    if let Some(path) = line.strip_prefix(BACKGROUND_IMAGE_PREFIX) {
        return Ok(Some(Background::Image(ImageRef::new(path))));
    }
    Ok(None)
}

/// Decode a `GeneralShape;` line, or `None` if it is not a valid shape.
pub fn decode_shape(line: &str) -> Option<Shape> {
    parse_shape(line).ok()
}

/// Decode a `GeneralShape;` line, reporting why it was rejected.
pub fn parse_shape(line: &str) -> CodecResult<Shape> {
    let mut tokens = line.split(';').filter(|t| !t.is_empty());

    match tokens.next() {
        Some(SHAPE_TAG) => {}
        _ => return Err(CodecError::InvalidShape("not a shape line".to_string())),
    }
    let fill = Rgb::from_argb(parse_field(tokens.next(), "fill colour")?);
    let thickness: u32 = parse_field(tokens.next(), "outline thickness")?;
    let outline = Rgb::from_argb(parse_field(tokens.next(), "outline colour")?);

    let mut path = BezPath::new();
    for segment in tokens {
        let el = parse_segment(segment)?;
        if path.elements().is_empty() && !matches!(el, PathEl::MoveTo(_)) {
            return Err(CodecError::InvalidShape(
                "path does not start with a move".to_string(),
            ));
        }
        path.push(el);
    }
    if path.elements().is_empty() {
        return Err(CodecError::InvalidShape("path has no segments".to_string()));
    }

    Ok(Shape::with_style(path, fill, thickness, outline))
}

fn parse_field<T: std::str::FromStr>(token: Option<&str>, what: &str) -> CodecResult<T> {
    let token = token.ok_or_else(|| CodecError::InvalidShape(format!("missing {what}")))?;
    token
        .trim()
        .parse()
        .map_err(|_| CodecError::InvalidShape(format!("bad {what} `{token}`")))
}

fn parse_segment(segment: &str) -> CodecResult<PathEl> {
    let mut parts = segment.split([':', ',']).filter(|t| !t.is_empty());
    let tag: u8 = parse_field(parts.next(), "segment type")?;
    let mut c = [0.0; SEGMENT_SLOTS];
    for slot in c.iter_mut() {
        *slot = parse_field(parts.next(), "coordinate")?;
    }

    let el = match tag {
        SEG_MOVE => PathEl::MoveTo(Point::new(c[0], c[1])),
        SEG_LINE => PathEl::LineTo(Point::new(c[0], c[1])),
        SEG_QUAD => PathEl::QuadTo(Point::new(c[0], c[1]), Point::new(c[2], c[3])),
        SEG_CUBIC => PathEl::CurveTo(
            Point::new(c[0], c[1]),
            Point::new(c[2], c[3]),
            Point::new(c[4], c[5]),
        ),
        SEG_CLOSE => PathEl::ClosePath,
        other => {
            return Err(CodecError::InvalidShape(format!(
                "unknown segment type {other}"
            )));
        }
    };
    Ok(el)
}
