//! Single-page PDF assembly: the preview raster plus clickable link regions.

use std::io::Write;

use chrono::Utc;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::RgbImage;
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use super::geometry::PageGeometry;
use super::overlay::OverlayRegion;
use super::ExportError;

pub const PDF_FILENAME: &str = "resume.pdf";
pub const PDF_MIME: &str = "application/pdf";

const PRODUCER: &str = concat!("resume-api ", env!("CARGO_PKG_VERSION"));
const IMAGE_NAME: &str = "Im0";

/// Builds the PDF bytes.
///
/// The raster is stretched over the whole page. Each overlay becomes a
/// borderless `/Link` annotation with a `/URI` action; overlay rectangles
/// come in with a top-left origin and are flipped into PDF user space here.
pub fn write_pdf(
    raster: &RgbImage,
    page: PageGeometry,
    overlays: &[OverlayRegion],
) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(image_xobject(raster)?);
    let resources_id = doc.add_object(dictionary! {
        "XObject" => dictionary! { IMAGE_NAME => image_id },
    });

    let content = format!(
        "q {} 0 0 {} 0 0 cm /{IMAGE_NAME} Do Q",
        page.width_pt, page.height_pt
    );
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

    let annots: Vec<Object> = overlays
        .iter()
        .map(|region| Object::Reference(link_annotation(&mut doc, page, region)))
        .collect();

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), page.width_pt.into(), page.height_pt.into()],
        "Contents" => content_id,
        "Resources" => resources_id,
        "Annots" => annots,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Producer" => Object::string_literal(PRODUCER),
        "CreationDate" => Object::string_literal(Utc::now().format("D:%Y%m%d%H%M%SZ").to_string()),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    Ok(bytes)
}

fn image_xobject(raster: &RgbImage) -> Result<Stream, ExportError> {
    if raster.width() == 0 || raster.height() == 0 {
        return Err(ExportError::Pdf("raster is empty".to_string()));
    }
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(raster.as_raw())
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let compressed = encoder
        .finish()
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    Ok(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(raster.width()),
            "Height" => i64::from(raster.height()),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "FlateDecode",
        },
        compressed,
    ))
}

fn link_annotation(doc: &mut Document, page: PageGeometry, region: &OverlayRegion) -> ObjectId {
    let r = region.rect;
    let rect = vec![
        r.x.into(),
        (page.height_pt - r.bottom()).into(),
        r.right().into(),
        (page.height_pt - r.y).into(),
    ];
    doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => rect,
        "Border" => vec![0.into(), 0.into(), 0.into()],
        "A" => dictionary! {
            "Type" => "Action",
            "S" => "URI",
            "URI" => Object::string_literal(region.url.as_str()),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::geometry::Rect;
    use image::Rgb;

    fn count(haystack: &[u8], needle: &str) -> usize {
        haystack
            .windows(needle.len())
            .filter(|w| *w == needle.as_bytes())
            .count()
    }

    fn region(url: &str, y: f32) -> OverlayRegion {
        OverlayRegion {
            rect: Rect::new(10.0, y, 50.0, 12.0),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_one_link_annotation_per_overlay() {
        let raster = RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]));
        let overlays = vec![
            region("mailto:jane@x.com", 20.0),
            region("https://github.com/jane", 40.0),
            region("https://jane.dev", 60.0),
        ];
        let bytes = write_pdf(&raster, PageGeometry::A4, &overlays).unwrap();

        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert_eq!(count(&bytes, "/Link"), 3);
        assert_eq!(count(&bytes, "https://github.com/jane"), 1);
        assert_eq!(count(&bytes, "/Image"), 1);
    }

    #[test]
    fn test_no_overlays_still_writes_page() {
        let raster = RgbImage::from_pixel(2, 3, Rgb([0, 0, 0]));
        let bytes = write_pdf(&raster, PageGeometry::A4, &[]).unwrap();
        assert_eq!(count(&bytes, "/Link"), 0);
        assert!(count(&bytes, "595.28") >= 1);
    }

    #[test]
    fn test_empty_raster_is_rejected() {
        let raster = RgbImage::new(0, 0);
        assert!(matches!(
            write_pdf(&raster, PageGeometry::A4, &[]),
            Err(ExportError::Pdf(_))
        ));
    }

    #[test]
    fn test_link_rect_is_flipped_into_pdf_space() {
        let mut doc = Document::with_version("1.5");
        let page = PageGeometry {
            width_pt: 100.0,
            height_pt: 200.0,
        };
        let id = link_annotation(&mut doc, page, &region("https://a.example", 20.0));
        let annot = doc.get_dictionary(id).unwrap();
        let rect: Vec<f32> = annot
            .get(b"Rect")
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o.as_float().unwrap())
            .collect();
        assert_eq!(rect, vec![10.0, 168.0, 60.0, 180.0]);
    }
}
