//! Test-only PDF fixtures.

use std::path::Path;

use lopdf::{Document, Object, Stream, dictionary};

/// Write a PDF whose pages carry an integer `Marker` entry each, in order.
/// The page size lives on the page tree root so pages inherit it.
pub(crate) fn write_fixture_pdf(path: &Path, markers: &[i64]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut l_kids: Vec<Object> = Vec::new();
    for n_marker in markers {
        let content_id = doc.add_object(Stream::new(dictionary! {}, b"q Q".to_vec()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Marker" => Object::Integer(*n_marker),
        });
        l_kids.push(Object::Reference(page_id));
    }

    let dict_pages = dictionary! {
        "Type" => "Pages",
        "Kids" => l_kids,
        "Count" => Object::Integer(markers.len() as i64),
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(288),
            Object::Integer(432),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(dict_pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).expect("save fixture pdf");
}

/// `Marker` entries of every page in page order.
pub(crate) fn read_page_markers(path: &Path) -> Vec<i64> {
    let doc = Document::load(path).expect("load pdf");
    doc.get_pages()
        .values()
        .map(|page_id| {
            doc.get_object(*page_id)
                .and_then(Object::as_dict)
                .and_then(|dict| dict.get(b"Marker"))
                .and_then(Object::as_i64)
                .expect("page marker")
        })
        .collect()
}
