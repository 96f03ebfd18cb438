use longan::odf::content::{Frame, Graphic, Heading, Paragraph};
use longan::odf::document::{
    AssemblyOptions, Document, DocumentKind, Statistic, XmlPartsExporter, XmlPartsImporter,
};

#[test]
fn unpacked_package_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = Document::new(DocumentKind::Text).unwrap();
    doc.ctx.metadata_mut().set_title("Report").unwrap();

    let heading = Heading::with_text(&mut doc.ctx, 1, "Intro").unwrap();
    doc.content.push(&mut doc.ctx, heading.into()).unwrap();
    let mut paragraph = Paragraph::with_text(&mut doc.ctx, "See ").unwrap();
    let png = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    let graphic = Graphic::from_bytes(&mut doc.ctx, png).unwrap();
    let href = graphic.href().to_string();
    let frame = Frame::with_graphic(&mut doc.ctx, "fig", graphic, "1cm", "1cm").unwrap();
    paragraph.content_mut().push(&mut doc.ctx, frame.into()).unwrap();
    doc.content.push(&mut doc.ctx, paragraph.into()).unwrap();

    let mut exporter = XmlPartsExporter::new();
    doc.save(&AssemblyOptions::default(), &mut exporter).unwrap();
    assert_eq!(exporter.pictures().len(), 1);
    exporter.write_to_dir(dir.path()).unwrap();
    assert!(dir.path().join(&href).is_file());

    let mut importer = XmlPartsImporter::from_dir(dir.path()).unwrap();
    let loaded = Document::load(DocumentKind::Text, &mut importer).unwrap();
    let meta = loaded.ctx.metadata();
    assert_eq!(meta.title().as_deref(), Some("Report"));
    assert_eq!(meta.count(Statistic::Paragraph), 2);
    assert_eq!(meta.count(Statistic::Image), 1);
    assert!(meta.modification_date().is_some());
    assert_eq!(loaded.content.len(), 2);
    assert_eq!(loaded.ctx.graphics().len(), 1);
    assert!(loaded.ctx.graphics().iter().all(|entry| entry.href == href));
}

#[test]
fn unknown_body_elements_are_kept() {
    let content = concat!(
        r#"<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" "#,
        r#"xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0"><office:body><office:text>"#,
        r#"<text:p>a</text:p><text:bibliography-mark/></office:text></office:body></office:document-content>"#,
    );
    let mut importer = XmlPartsImporter::new(content);
    let mut doc = Document::load(DocumentKind::Text, &mut importer).unwrap();
    assert_eq!(doc.content.len(), 2);
    assert_eq!(doc.warnings().len(), 1);

    let mut exporter = XmlPartsExporter::new();
    doc.save(&AssemblyOptions::default(), &mut exporter).unwrap();
    assert!(exporter.content().unwrap().contains("<text:bibliography-mark/>"));
}
