//! Visible signature appearance streams: a minimal, text-only stamp drawn
//! at the signature field's rectangle (ISO 32000-2 §12.7.4.5, `/AP /N`).
//!
//! Deliberately has no field that could be mistaken for a QR/URL style
//! parameter; appearance content is plain text lines only.

use crate::content::ContentBuilder;
use crate::object::{Object, PdfDictionary, PdfName, PdfStream};
use crate::types::Rectangle;

/// The text lines drawn into a signature's appearance stream. Each
/// non-empty field becomes one line, in this order.
#[derive(Debug, Clone, Default)]
pub struct StampStyle {
    /// First line, conventionally the signer's name.
    pub name_line: Option<String>,
    /// Second line, e.g. `"Reason: ..."`.
    pub reason_line: Option<String>,
    /// Third line, e.g. `"Location: ..."`.
    pub location_line: Option<String>,
    /// Fourth line, the signing time already formatted by the caller.
    pub date_line: Option<String>,
    /// Font size in points for every line.
    pub font_size: f64,
}

impl StampStyle {
    /// A style with only a name line, 9pt.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name_line: Some(name.into()),
            font_size: 9.0,
            ..Default::default()
        }
    }

    fn lines(&self) -> Vec<&str> {
        [
            &self.name_line,
            &self.reason_line,
            &self.location_line,
            &self.date_line,
        ]
        .into_iter()
        .flatten()
        .map(|s| s.as_str())
        .collect()
    }
}

/// Builds the `/AP /N` appearance stream for a signature field occupying
/// `rect`, stacking `style`'s non-empty lines top to bottom with a fixed
/// line height of `1.2 * font_size`.
pub fn build_appearance_stream(rect: Rectangle, style: &StampStyle) -> crate::error::PdfResult<PdfStream> {
    let lines = style.lines();
    let line_height = style.font_size * 1.2;
    let width = rect.width();
    let height = rect.height();

    let mut builder = ContentBuilder::new().save_state();
    let top = height - style.font_size;
    for (i, line) in lines.iter().enumerate() {
        let y = top - (i as f64) * line_height;
        if y < 0.0 {
            log::warn!("signature appearance stream truncated: rectangle too short for all lines");
            break;
        }
        builder = builder.text("Helvetica", style.font_size, 2.0, y, line);
    }
    let builder = builder.restore_state();

    let mut stream = builder.build()?;
    stream.dictionary.set("Type", Object::Name(PdfName::new_unchecked("XObject")));
    stream.dictionary.set("Subtype", Object::Name(PdfName::new_unchecked("Form")));
    stream.dictionary.set(
        "BBox",
        Object::from(vec![
            Object::Real(0.0),
            Object::Real(0.0),
            Object::Real(width),
            Object::Real(height),
        ]),
    );
    let mut resources = PdfDictionary::new();
    let mut fonts = PdfDictionary::new();
    let mut helvetica = PdfDictionary::new();
    helvetica.set("Type", Object::Name(PdfName::new_unchecked("Font")));
    helvetica.set("Subtype", Object::Name(PdfName::new_unchecked("Type1")));
    helvetica.set("BaseFont", Object::Name(PdfName::new_unchecked("Helvetica")));
    fonts.set("Helvetica", Object::Dictionary(helvetica));
    resources.set("Font", Object::Dictionary(fonts));
    stream.dictionary.set("Resources", Object::Dictionary(resources));

    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appearance_stream_has_one_text_show_per_line() {
        let style = StampStyle {
            name_line: Some("Jane Doe".to_string()),
            reason_line: Some("Approval".to_string()),
            location_line: None,
            date_line: None,
            font_size: 10.0,
        };
        let stream = build_appearance_stream(Rectangle::new(0.0, 0.0, 200.0, 50.0), &style).unwrap();
        let content = String::from_utf8(stream.data.clone()).unwrap();
        assert_eq!(content.matches("Tj").count(), 2);
    }

    #[test]
    fn appearance_stream_bbox_matches_rectangle() {
        let style = StampStyle::with_name("Only Name");
        let stream = build_appearance_stream(Rectangle::new(0.0, 0.0, 120.0, 40.0), &style).unwrap();
        assert_eq!(
            stream.dictionary.get("BBox"),
            Some(&Object::from(vec![
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(120.0),
                Object::Real(40.0),
            ]))
        );
    }
}
