use longan::Error;
use longan::odf::document::{AssemblyOptions, Document, DocumentKind, XmlPartsExporter, XmlPartsImporter};
use longan::odf::style::properties::TextProperties;
use longan::odf::style::{StyleFamily, import_container};

const ROOT_OPEN: &str = r#"<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" xmlns:fo="urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0">"#;

fn content_with_styles(styles: &str, body: &str) -> String {
    format!(
        "{ROOT_OPEN}<office:automatic-styles>{styles}</office:automatic-styles><office:body><office:text>{body}</office:text></office:body></office:document-content>"
    )
}

#[test]
fn request_returns_the_same_style() {
    let mut doc = Document::new(DocumentKind::Text).unwrap();
    let first = doc.request_style(StyleFamily::Paragraph, "P1").unwrap().node();
    let second = doc.request_style(StyleFamily::Paragraph, "P1").unwrap().node();
    assert_eq!(first, second);
    assert_eq!(doc.styles.len(), 1);

    match doc.request_style(StyleFamily::Table, "P1") {
        Err(Error::StyleFamilyMismatch { name, existing, requested }) => {
            assert_eq!(name, "P1");
            assert_eq!(existing, StyleFamily::Paragraph);
            assert_eq!(requested, StyleFamily::Table);
        },
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn property_set_is_a_singleton() {
    let mut doc = Document::new(DocumentKind::Text).unwrap();
    let style = doc.styles.request(&mut doc.ctx, StyleFamily::Text, "T1").unwrap();
    let first = style.text_properties(&mut doc.ctx).unwrap().node();
    let second = style.text_properties(&mut doc.ctx).unwrap().node();
    assert_eq!(first, second);

    let bold = style.properties_of::<TextProperties>(&mut doc.ctx).unwrap();
    bold.set_bold(&mut doc.ctx, true).unwrap();
    let style_node = style.node();

    let store = doc.ctx.store();
    let matching = store
        .children(style_node)
        .iter()
        .filter(|child| store.is_named(**child, "style:text-properties"))
        .count();
    assert_eq!(matching, 1);
    assert_eq!(store.attribute(first, "fo:font-weight"), Some("bold"));
}

#[test]
fn family_restricts_property_kinds() {
    let mut doc = Document::new(DocumentKind::Text).unwrap();
    let style = doc.styles.request(&mut doc.ctx, StyleFamily::TableColumn, "co1").unwrap();
    assert!(style.column_properties(&mut doc.ctx).is_ok());
    assert!(matches!(style.text_properties(&mut doc.ctx), Err(Error::InvalidContent(_))));
}

#[test]
fn malformed_style_is_a_warning() {
    let mut styles = String::new();
    for i in 0..9 {
        styles.push_str(&format!(
            r##"<style:style style:name="P{i}" style:family="paragraph"><style:text-properties fo:color="#00000{i}"/></style:style>"##
        ));
    }
    styles.push_str(r#"<style:style style:family="paragraph"/>"#);

    let mut importer = XmlPartsImporter::new(content_with_styles(&styles, ""));
    let mut doc = Document::new(DocumentKind::Text).unwrap();
    let warnings = doc.import(&mut importer).unwrap();

    assert_eq!(doc.styles.len(), 9);
    assert_eq!(warnings.len(), 1);
    assert_eq!(doc.warnings().len(), 1);
    assert!(warnings[0].node.is_some());
    let color = doc
        .styles
        .style("P3")
        .unwrap()
        .properties()
        .get::<TextProperties>()
        .and_then(|p| p.color(doc.ctx.store()))
        .map(str::to_string);
    assert_eq!(color.as_deref(), Some("#000003"));
}

#[test]
fn reimport_adds_nothing() {
    let styles = r#"<style:style style:name="P1" style:family="paragraph"/><style:style style:name="T1" style:family="text"/>"#;
    let mut importer = XmlPartsImporter::new(content_with_styles(styles, ""));
    let mut doc = Document::load(DocumentKind::Text, &mut importer).unwrap();
    assert_eq!(doc.styles.len(), 2);

    doc.assemble(&AssemblyOptions::default()).unwrap();
    let container = doc.parts().automatic_styles;
    let mut warnings = Vec::new();
    let added = import_container(&mut doc.ctx, container, &mut doc.styles, &mut warnings).unwrap();
    assert_eq!(added, 0);
    assert!(warnings.is_empty());
    assert_eq!(doc.styles.len(), 2);
}

#[test]
fn stray_styles_are_absorbed() {
    let body = r#"<text:p text:style-name="P9">x</text:p><style:style style:name="P9" style:family="paragraph"/>"#;
    let mut importer = XmlPartsImporter::new(content_with_styles("", body));
    let doc = Document::load(DocumentKind::Text, &mut importer).unwrap();

    assert!(doc.styles.contains("P9"));
    assert_eq!(doc.content.len(), 1);
    assert_eq!(doc.ctx.store().child_count(doc.body()), 1);
}

#[test]
fn pools_survive_save_and_load() {
    let mut doc = Document::new(DocumentKind::Text).unwrap();
    let style = doc.styles.request(&mut doc.ctx, StyleFamily::Paragraph, "P1").unwrap();
    style.set_parent_style_name(&mut doc.ctx, "Standard").unwrap();
    doc.request_common_style(StyleFamily::Paragraph, "Standard").unwrap();

    let mut exporter = XmlPartsExporter::new();
    doc.save(&AssemblyOptions::default(), &mut exporter).unwrap();
    assert!(exporter.styles().unwrap().contains(r#"style:name="Standard""#));

    let mut importer = exporter.to_importer().unwrap();
    let loaded = Document::load(DocumentKind::Text, &mut importer).unwrap();
    assert!(loaded.warnings().is_empty());
    let p1 = loaded.styles.style("P1").unwrap();
    assert_eq!(p1.family(), StyleFamily::Paragraph);
    assert_eq!(p1.parent_style_name(loaded.ctx.store()), Some("Standard"));
    assert!(loaded.common_styles.contains("Standard"));
}
