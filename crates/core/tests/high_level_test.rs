//! Tests for the high-level page API and page dumps.

use pdfgrid_core::api::{PageInput, embedded_line_groups, render_embedded, render_ocr, render_page};
use pdfgrid_core::font::FontSpec;
use pdfgrid_core::model::{ContentOp, Operand};
use pdfgrid_core::{GridError, LayoutOptions, OcrLine};
use std::collections::HashMap;

const EMBEDDED_PAGE: &str = r#"{
    "source": "embedded",
    "fonts": {"/F1": {"subtype": "Type1", "base_font": "Courier"}},
    "operators": [
        {"operands": [], "operator": "BT"},
        {"operands": [{"Name": "F1"}, {"Int": 10}], "operator": "Tf"},
        {"operands": [{"Int": 72}, {"Int": 700}], "operator": "Td"},
        {"operands": [{"String": [72, 105]}], "operator": "Tj"},
        {"operands": [{"Real": 120.0}, {"Int": 0}], "operator": "Td"},
        {"operands": [{"Array": [{"String": [79]}, {"Int": -200}, {"String": [75]}]}], "operator": "TJ"},
        {"operands": [], "operator": "ET"}
    ]
}"#;

const OCR_PAGE: &str = r#"{
    "source": "ocr",
    "lines": [
        {"text": "Total", "polygon": [1.0, 2.0, 1.5, 2.0, 1.5, 2.12, 1.0, 2.12]},
        {"text": "", "polygon": [1.0, 3.0, 1.5, 3.0, 1.5, 3.12, 1.0, 3.12]}
    ],
    "rotation": 0.2
}"#;

#[test]
fn test_embedded_page_dump() {
    let page = PageInput::from_json(EMBEDDED_PAGE).unwrap();
    let text = render_page(&page, &LayoutOptions::default()).unwrap();
    insta::assert_snapshot!(text, @"Hi                     OK");
}

#[test]
fn test_ocr_page_dump() {
    let page = PageInput::from_json(OCR_PAGE).unwrap();
    assert!(matches!(page, PageInput::Ocr { page_size: None, .. }));
    let groups = page.line_groups(&LayoutOptions::default()).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(render_page(&page, &LayoutOptions::default()).unwrap(), "Total");
}

#[test]
fn test_invalid_dump_is_json_error() {
    let err = PageInput::from_json(r#"{"source": "fax"}"#).unwrap_err();
    assert!(matches!(err, GridError::Json(_)));
}

#[test]
fn test_unknown_font_is_reported() {
    let ops = vec![
        ContentOp::bare("BT"),
        ContentOp::new(vec![Operand::Name("F2".into()), Operand::Int(12)], "Tf"),
        ContentOp::new(vec![Operand::String(b"x".to_vec())], "Tj"),
        ContentOp::bare("ET"),
    ];
    let fonts = HashMap::from([("F1".to_string(), FontSpec::new("Type1", Some("Courier")))]);
    let err = render_embedded(&ops, &fonts, &LayoutOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), "font resource not found: F2");
}

/// The same line groups give the same page whichever producer built them.
#[test]
fn test_embedded_and_ocr_layout_agree() {
    let name = |s: &str| Operand::Name(s.to_string());
    let text = |s: &str| Operand::String(s.as_bytes().to_vec());
    let tm = |y: f64| {
        ContentOp::new(
            [1.0, 0.0, 0.0, -1.0, 0.0, y].map(Operand::Real).to_vec(),
            "Tm",
        )
    };
    let ops = vec![
        ContentOp::bare("BT"),
        ContentOp::new(vec![name("F1"), Operand::Int(10)], "Tf"),
        tm(100.0),
        ContentOp::new(vec![text("Date")], "Tj"),
        tm(100.0),
        ContentOp::new(vec![Operand::Int(300), Operand::Int(0)], "Td"),
        ContentOp::new(vec![text("2024-01-31")], "Tj"),
        tm(130.0),
        ContentOp::new(vec![text("Amount due")], "Tj"),
        ContentOp::bare("ET"),
    ];
    let fonts = HashMap::from([("F1".to_string(), FontSpec::new("Type1", Some("Courier")))]);
    let opts = LayoutOptions::default();

    let groups = embedded_line_groups(&ops, &fonts, &opts).unwrap();
    assert_eq!(groups.len(), 3);
    let lines: Vec<OcrLine> = groups
        .iter()
        .map(|g| {
            let (x0, x1) = (g.x / 100.0, g.displaced_x / 100.0);
            let (y0, y1) = (g.y / 100.0, (g.y + g.font_height) / 100.0);
            OcrLine::new(g.text.clone(), vec![x0, y0, x1, y0, x1, y1, x0, y1])
        })
        .collect();

    let embedded = render_embedded(&ops, &fonts, &opts).unwrap();
    assert_eq!(embedded, render_ocr(&lines, 0.0, None, &opts));
    assert_eq!(embedded.lines().count(), 2);
}
