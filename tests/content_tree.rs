use longan::Error;
use longan::odf::content::{Content, Frame, Graphic, Paragraph};
use longan::odf::document::{Document, DocumentKind, ImageFormat, Statistic, UnrecognizedImage};
use proptest::prelude::*;
use std::io::Write;

#[derive(Debug, Clone)]
enum Op {
    Insert(usize),
    Remove(usize),
    Pop,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..16).prop_map(Op::Insert),
        (0usize..16).prop_map(Op::Remove),
        Just(Op::Pop),
    ]
}

proptest! {
    #[test]
    fn body_children_follow_collection(ops in prop::collection::vec(op(), 1..40)) {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        for op in ops {
            match op {
                Op::Insert(at) => {
                    let index = at % (doc.content.len() + 1);
                    let paragraph = Paragraph::with_text(&mut doc.ctx, "p").unwrap();
                    doc.content.insert(&mut doc.ctx, index, paragraph.into()).unwrap();
                },
                Op::Remove(at) => {
                    if !doc.content.is_empty() {
                        let index = at % doc.content.len();
                        doc.content.remove(&mut doc.ctx, index).unwrap();
                    }
                },
                Op::Pop => {
                    doc.content.pop(&mut doc.ctx).unwrap();
                },
            }
            prop_assert_eq!(doc.ctx.store().children(doc.body()).to_vec(), doc.content.nodes());
            prop_assert_eq!(
                doc.ctx.metadata().count(Statistic::Paragraph) as usize,
                doc.content.len()
            );
        }
    }

    #[test]
    fn nested_children_follow_collection(count in 0usize..8, removals in prop::collection::vec(0usize..8, 0..8)) {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let mut frame = Frame::new(&mut doc.ctx, "f").unwrap();
        let graphic = Graphic::linked(&mut doc.ctx, "http://example.com/a.png").unwrap();
        frame.content_mut().push(&mut doc.ctx, graphic.into()).unwrap();
        for _ in 0..count {
            let paragraph = Paragraph::new(&mut doc.ctx);
            frame.content_mut().insert(&mut doc.ctx, 0, paragraph.into()).unwrap();
        }
        for at in removals {
            let len = frame.content().len();
            if len > 0 {
                frame.content_mut().remove(&mut doc.ctx, at % len).unwrap();
            }
        }
        prop_assert_eq!(doc.ctx.store().children(frame.node()).to_vec(), frame.content().nodes());
    }
}

#[test]
fn table_cannot_go_inside_paragraph() {
    let mut doc = Document::new(DocumentKind::Text).unwrap();
    let mut paragraph = Paragraph::new(&mut doc.ctx);
    let table = longan::odf::table::Table::new(&mut doc.ctx, "T", Default::default()).unwrap();
    let node = table.node();
    let result = paragraph.content_mut().push(&mut doc.ctx, table.into());
    assert!(matches!(result, Err(Error::InvalidContent(_))));
    assert!(paragraph.content().is_empty());
    assert_eq!(doc.ctx.store().parent(node), None);
    assert_eq!(doc.ctx.metadata().count(Statistic::Table), 0);
}

#[test]
fn graphic_binds_to_frame_and_registers() {
    let mut doc = Document::new(DocumentKind::Text).unwrap();
    let png = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0];
    let graphic = Graphic::from_bytes(&mut doc.ctx, png.to_vec()).unwrap();
    let graphic_node = graphic.node();
    assert_eq!(graphic.format(), Some(ImageFormat::Png));

    let frame = Frame::with_graphic(&mut doc.ctx, "pic", graphic, "2cm", "2cm").unwrap();
    let frame_node = frame.node();
    assert_eq!(frame.graphic().and_then(Graphic::frame), Some(frame_node));
    assert!(doc.ctx.graphics().contains(graphic_node));
    assert_eq!(doc.ctx.metadata().count(Statistic::Image), 1);

    let mut frame = frame;
    frame.content_mut().remove(&mut doc.ctx, 0).unwrap();
    assert!(!doc.ctx.graphics().contains(graphic_node));
    assert_eq!(doc.ctx.metadata().count(Statistic::Image), 0);
}

#[test]
fn graphic_from_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.png");
    let mut doc = Document::new(DocumentKind::Text).unwrap();
    match Graphic::from_file(&mut doc.ctx, &path) {
        Err(Error::Graphic { path: reported, source }) => {
            assert_eq!(reported, path);
            assert!(source.downcast_ref::<std::io::Error>().is_some());
        },
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn graphic_from_unrecognized_file_reports_cause() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"definitely not a picture").unwrap();
    let mut doc = Document::new(DocumentKind::Text).unwrap();
    match Graphic::from_file(&mut doc.ctx, file.path()) {
        Err(Error::Graphic { source, .. }) => {
            assert!(source.downcast_ref::<UnrecognizedImage>().is_some());
        },
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn graphic_from_file_embeds_payload() {
    let mut file = tempfile::Builder::new().suffix(".gif").tempfile().unwrap();
    file.write_all(b"GIF89a\x01\x00\x01\x00").unwrap();
    let mut doc = Document::new(DocumentKind::Text).unwrap();
    let graphic = Graphic::from_file(&mut doc.ctx, file.path()).unwrap();
    assert_eq!(graphic.format(), Some(ImageFormat::Gif));
    assert!(graphic.href().starts_with("Pictures/"));
    assert!(graphic.href().ends_with(".gif"));
    assert_eq!(graphic.data().map(|d| d.len()), Some(10));
}

#[test]
fn text_is_collected_recursively() {
    let mut doc = Document::new(DocumentKind::Text).unwrap();
    let first = Paragraph::with_text(&mut doc.ctx, "one  two").unwrap();
    doc.content.push(&mut doc.ctx, first.into()).unwrap();
    let second = Paragraph::with_text(&mut doc.ctx, "three").unwrap();
    doc.content.push(&mut doc.ctx, second.into()).unwrap();

    let texts: Vec<String> = doc
        .content
        .iter()
        .map(|item: &Content| item.text(doc.ctx.store()))
        .collect();
    assert_eq!(texts, vec!["one  two".to_string(), "three".to_string()]);
}

#[test]
fn attached_content_must_be_removed_before_moving() {
    let mut doc = Document::new(DocumentKind::Text).unwrap();
    let paragraph = Paragraph::with_text(&mut doc.ctx, "moved").unwrap();
    let copy = paragraph.clone();
    doc.content.push(&mut doc.ctx, paragraph.into()).unwrap();
    let mut frame = Frame::new(&mut doc.ctx, "Box").unwrap();

    let result = frame.content_mut().push(&mut doc.ctx, copy.into());
    assert!(matches!(result, Err(Error::InvalidContent(_))));
    assert!(frame.content().is_empty());
    assert_eq!(doc.ctx.store().children(doc.body()), doc.content.nodes().as_slice());
    assert_eq!(doc.ctx.metadata().count(Statistic::Paragraph), 1);

    let taken = doc.content.remove(&mut doc.ctx, 0).unwrap();
    frame.content_mut().push(&mut doc.ctx, taken).unwrap();
    assert!(doc.content.is_empty());
    assert_eq!(doc.ctx.store().children(frame.node()), frame.content().nodes().as_slice());
    assert_eq!(doc.ctx.metadata().count(Statistic::Paragraph), 1);
}
