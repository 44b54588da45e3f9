//! Full-stack test: a real PDF built with lopdf, parsed, located, and
//! extracted through the YAML schema path.

use pdfharvest::Extractor;
use serde_json::json;

/// Create a single-page PDF with the given content stream.
fn pdf_with_content(content: &[u8]) -> Vec<u8> {
    use lopdf::{Object, Stream, dictionary};

    let mut doc = lopdf::Document::with_version("1.5");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let stream = Stream::new(dictionary! {}, content.to_vec());
    let content_id = doc.add_object(stream);

    let page_id = doc.add_object(dictionary! {
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
    });

    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => vec![Object::Reference(page_id)],
        "Count" => Object::Integer(1),
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
    buf
}

/// One line of text at a baseline position.
fn text_at(x: f64, y: f64, text: &str) -> String {
    format!("BT /F1 12 Tf {x} {y} Td ({text}) Tj ET\n")
}

#[test]
fn test_extract_report_from_real_pdf() {
    let mut content = String::new();
    content.push_str(&text_at(72.0, 720.0, "Fund Report"));
    content.push_str(&text_at(72.0, 660.0, "Holdings"));
    content.push_str(&text_at(72.0, 640.0, "Name"));
    content.push_str(&text_at(300.0, 640.0, "Amount"));
    content.push_str(&text_at(72.0, 620.0, "ACME"));
    content.push_str(&text_at(300.0, 620.0, "500"));
    content.push_str(&text_at(72.0, 600.0, "Globex"));
    content.push_str(&text_at(300.0, 600.0, "800"));
    content.push_str(&text_at(72.0, 560.0, "Summary"));
    content.push_str(&text_at(72.0, 540.0, "Total Assets"));
    content.push_str(&text_at(300.0, 540.0, "1,300"));
    content.push_str(&text_at(72.0, 500.0, "End of Report"));

    let pdf = pdf_with_content(content.as_bytes());

    let schema = "\
holdings:
  top: Holdings|false
  bottom: Summary
  type: 1
summary:
  top: Summary|false
  bottom: End of Report
  type: 0
";
    let extractor = Extractor::from_schema_str(schema).unwrap();
    let result = extractor.extract_bytes(&pdf).unwrap();

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "holdings": [
                {"Name": "ACME", "Amount": "500"},
                {"Name": "Globex", "Amount": "800"},
            ],
            "summary": {"Total_Assets": "1,300"},
        })
    );
}

#[test]
fn test_schema_file_path_end_to_end() {
    use std::io::Write;

    let mut content = String::new();
    content.push_str(&text_at(72.0, 700.0, "Facts"));
    content.push_str(&text_at(72.0, 680.0, "Currency"));
    content.push_str(&text_at(300.0, 680.0, "USD"));
    content.push_str(&text_at(72.0, 640.0, "Fin"));
    let pdf = pdf_with_content(content.as_bytes());

    let mut schema_file = tempfile::NamedTempFile::new().unwrap();
    schema_file
        .write_all(b"facts:\n  top: Facts|false\n  bottom: Fin\n  type: 0\n")
        .unwrap();

    let extractor = Extractor::from_schema_file(schema_file.path()).unwrap();
    let result = extractor.extract_bytes(&pdf).unwrap();

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"facts": {"Currency": "USD"}})
    );
}
