//! Synthetic PDFs for integration tests.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// A string shown at a fixed position on a page.
#[derive(Debug, Clone, Copy)]
pub struct Placed<'a> {
    pub x: f32,
    pub y: f32,
    pub text: &'a str,
}

pub fn at(x: f32, y: f32, text: &str) -> Placed<'_> {
    Placed { x, y, text }
}

/// Build a PDF where each entry of `pages` lists the strings on that page.
/// Every string is shown in 12pt Helvetica inside its own text object.
pub fn build_pdf(pages: &[Vec<Placed<'_>>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for items in pages {
        let mut operations = Vec::new();
        for item in items {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
            ));
            operations.push(Operation::new(
                "Td",
                vec![Object::Real(item.x), Object::Real(item.y)],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(item.text)],
            ));
            operations.push(Operation::new("ET", vec![]));
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content stream"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ],
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(pages.len() as i64),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("serialize PDF");
    buffer
}

/// A single line of text per page.
pub fn text_pages(lines: &[&str]) -> Vec<u8> {
    let pages: Vec<Vec<Placed<'_>>> = lines.iter().map(|&line| vec![at(72.0, 700.0, line)]).collect();
    build_pdf(&pages)
}
