//! Page concatenation of PDF files with `lopdf`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::conf::C_PDF_VERSION;
use crate::spec::MergeError;

/// Page attributes a page may inherit from its ancestors in the page tree.
const TUP_INHERITED_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];
/// Upper bound on page-tree depth walked for inherited attributes.
const N_TREE_DEPTH_MAX: usize = 64;

/// Concatenate `paths` into one PDF at `path_out`.
///
/// Pages keep file order, then in-file order. Outlines are dropped.
/// Returns the number of pages written.
pub fn merge_pdf_files(paths: &[PathBuf], path_out: &Path) -> Result<usize, MergeError> {
    let mut n_id_next: u32 = 1;
    let mut l_pages: Vec<(ObjectId, Dictionary)> = Vec::new();
    let mut dict_objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for path_pdf in paths {
        let mut doc = Document::load(path_pdf).map_err(|err| MergeError::Load {
            path: path_pdf.clone(),
            message: err.to_string(),
        })?;
        doc.renumber_objects_with(n_id_next);
        n_id_next = doc.max_id + 1;

        let n_pages_before = l_pages.len();
        for page_id in doc.get_pages().into_values() {
            l_pages.push((page_id, derive_page_dict(&doc, page_id, path_pdf)?));
        }
        tracing::debug!(
            "Collected {} page(s) from {}",
            l_pages.len() - n_pages_before,
            path_pdf.display()
        );
        dict_objects.extend(doc.objects);
    }

    if l_pages.is_empty() {
        return Err(MergeError::NoPages);
    }

    let mut document = Document::with_version(C_PDF_VERSION);
    let mut catalog: Option<(ObjectId, Dictionary)> = None;
    let mut pages_root: Option<(ObjectId, Dictionary)> = None;

    for (object_id, object) in dict_objects {
        let c_type = derive_type_name(&object).unwrap_or_default().to_vec();
        match c_type.as_slice() {
            b"Catalog" => {
                if catalog.is_none() {
                    if let Object::Dictionary(dict) = object {
                        catalog = Some((object_id, dict));
                    }
                }
            }
            b"Pages" => {
                if pages_root.is_none() {
                    if let Object::Dictionary(dict) = object {
                        pages_root = Some((object_id, dict));
                    }
                }
            }
            b"Page" | b"Outlines" | b"Outline" => {}
            _ => {
                document.objects.insert(object_id, object);
            }
        }
    }

    let (catalog_id, mut dict_catalog) = catalog.ok_or_else(|| MergeError::MissingStructure {
        message: "no document catalog".to_string(),
    })?;
    let (pages_id, mut dict_pages) = pages_root.ok_or_else(|| MergeError::MissingStructure {
        message: "no page tree root".to_string(),
    })?;

    let n_pages = l_pages.len();
    let mut l_kids: Vec<Object> = Vec::with_capacity(n_pages);
    for (page_id, mut dict_page) in l_pages {
        dict_page.set("Parent", Object::Reference(pages_id));
        document.objects.insert(page_id, Object::Dictionary(dict_page));
        l_kids.push(Object::Reference(page_id));
    }

    dict_pages.remove(b"Parent");
    dict_pages.set("Count", Object::Integer(n_pages as i64));
    dict_pages.set("Kids", Object::Array(l_kids));
    document.objects.insert(pages_id, Object::Dictionary(dict_pages));

    dict_catalog.set("Pages", Object::Reference(pages_id));
    dict_catalog.remove(b"Outlines");
    document
        .objects
        .insert(catalog_id, Object::Dictionary(dict_catalog));
    document.trailer.set("Root", Object::Reference(catalog_id));

    document.max_id = document.objects.keys().map(|(n_id, _)| *n_id).max().unwrap_or(0);
    document.renumber_objects();
    document.compress();

    let derive_save_err = |source: std::io::Error| MergeError::Save {
        path: path_out.to_path_buf(),
        source,
    };
    let file_out = File::create(path_out).map_err(derive_save_err)?;
    let mut writer = BufWriter::new(file_out);
    document.save_to(&mut writer).map_err(derive_save_err)?;
    writer.flush().map_err(derive_save_err)?;

    tracing::info!("Merged {n_pages} page(s) into {}", path_out.display());
    Ok(n_pages)
}

fn derive_type_name(object: &Object) -> Option<&[u8]> {
    object.as_dict().ok()?.get(b"Type").ok()?.as_name().ok()
}

/// Copy of the page dictionary with inherited attributes pulled down, so it
/// survives being re-parented under a flat page tree.
fn derive_page_dict(
    doc: &Document,
    page_id: ObjectId,
    path_pdf: &Path,
) -> Result<Dictionary, MergeError> {
    let mut dict_page = doc
        .get_object(page_id)
        .and_then(Object::as_dict)
        .map_err(|err| MergeError::Load {
            path: path_pdf.to_path_buf(),
            message: format!("page {page_id:?}: {err}"),
        })?
        .clone();

    let mut id_parent = dict_page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut n_depth = 0usize;
    while let Some(id_node) = id_parent {
        if n_depth >= N_TREE_DEPTH_MAX {
            break;
        }
        let Ok(dict_node) = doc.get_object(id_node).and_then(Object::as_dict) else {
            break;
        };
        for key in TUP_INHERITED_KEYS {
            if dict_page.has(key) {
                continue;
            }
            if let Ok(value) = dict_node.get(key) {
                dict_page.set(key.to_vec(), value.clone());
            }
        }
        id_parent = dict_node.get(b"Parent").and_then(Object::as_reference).ok();
        n_depth += 1;
    }

    Ok(dict_page)
}

#[cfg(test)]
mod tests {
    use lopdf::{Document, Object};

    use super::merge_pdf_files;
    use crate::fixture::{read_page_markers, write_fixture_pdf};
    use crate::spec::MergeError;

    #[test]
    fn merge_keeps_file_then_page_order() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_a = tmp.path().join("a.pdf");
        let path_b = tmp.path().join("b.pdf");
        write_fixture_pdf(&path_a, &[11, 12]);
        write_fixture_pdf(&path_b, &[21]);
        let path_out = tmp.path().join("out.pdf");

        let n_pages = merge_pdf_files(&[path_b.clone(), path_a.clone()], &path_out).expect("merge");
        assert_eq!(n_pages, 3);
        assert_eq!(read_page_markers(&path_out), vec![21, 11, 12]);
    }

    #[test]
    fn merge_pulls_inherited_media_box_onto_pages() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_a = tmp.path().join("a.pdf");
        write_fixture_pdf(&path_a, &[1]);
        let path_out = tmp.path().join("out.pdf");
        merge_pdf_files(&[path_a], &path_out).expect("merge");

        let doc = Document::load(&path_out).expect("load merged");
        let page_id = *doc.get_pages().values().next().expect("one page");
        let dict_page = doc
            .get_object(page_id)
            .and_then(Object::as_dict)
            .expect("page dict");
        assert!(dict_page.has(b"MediaBox"));
    }

    #[test]
    fn merge_empty_input_is_no_pages() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let res = merge_pdf_files(&[], &tmp.path().join("out.pdf"));
        assert!(matches!(res, Err(MergeError::NoPages)));
        assert!(!tmp.path().join("out.pdf").exists());
    }

    #[test]
    fn merge_unparseable_input_is_load_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_bad = tmp.path().join("bad.pdf");
        std::fs::write(&path_bad, b"not a pdf").expect("write");
        let res = merge_pdf_files(&[path_bad], &tmp.path().join("out.pdf"));
        assert!(matches!(res, Err(MergeError::Load { .. })));
    }
}
