use std::io::Write;

use eframe::egui::ColorImage;
use image::RgbImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::error::ExportError;

// ---------------------------------------------------------------------------
// Page geometry (PDF points, 1/72 inch)
// ---------------------------------------------------------------------------

pub const A4_WIDTH: f32 = 595.28;
pub const A4_HEIGHT: f32 = 841.89;
pub const MARGIN: f32 = 36.0;

/// Drop alpha from a screenshot so it can be embedded as DeviceRGB.
pub fn to_rgb(image: &ColorImage) -> Result<RgbImage, ExportError> {
    let [width, height] = image.size;
    if width == 0 || height == 0 {
        return Err(ExportError::EmptySnapshot);
    }
    let bytes: Vec<u8> = image
        .pixels
        .iter()
        .flat_map(|p| {
            let [r, g, b, _] = p.to_srgba_unmultiplied();
            [r, g, b]
        })
        .collect();
    RgbImage::from_raw(width as u32, height as u32, bytes).ok_or(ExportError::EmptySnapshot)
}

/// Placement of an image scaled to the printable page width, top-aligned.
/// Images taller than the page after scaling are shrunk to fit the height.
fn placement(width: u32, height: u32) -> (f32, f32, f32, f32) {
    let max_w = A4_WIDTH - 2.0 * MARGIN;
    let max_h = A4_HEIGHT - 2.0 * MARGIN;
    let scale = (max_w / width as f32).min(max_h / height as f32);
    let w = width as f32 * scale;
    let h = height as f32 * scale;
    let x = (A4_WIDTH - w) / 2.0;
    let y = A4_HEIGHT - MARGIN - h;
    (x, y, w, h)
}

/// Build a single-page A4 document holding `image`.
pub fn build_document(image: &RgbImage, title: &str) -> Result<Document, ExportError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ExportError::EmptySnapshot);
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8i64,
        },
        image.as_raw().clone(),
    );
    let image_id = doc.add_object(image_stream);

    let (x, y, w, h) = placement(width, height);
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![w.into(), 0i64.into(), 0i64.into(), h.into(), x.into(), y.into()],
            ),
            Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let encoded = content
        .encode()
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        },
        "MediaBox" => vec![0i64.into(), 0i64.into(), A4_WIDTH.into(), A4_HEIGHT.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(title),
        "Producer" => Object::string_literal("aqi-dashboard"),
    });
    doc.trailer.set("Info", info_id);

    doc.compress();
    Ok(doc)
}

/// Write `image` as a one-page PDF.
pub fn export_pdf<W: Write>(image: &RgbImage, title: &str, mut writer: W) -> Result<(), ExportError> {
    let mut doc = build_document(image, title)?;
    doc.save_to(&mut writer)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    Ok(())
}
