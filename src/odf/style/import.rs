//! Classification of raw style elements into typed styles.
//!
//! Container content is classified by `style:family` (or by the
//! `text:list-style` tag). Typed styles are decomposed into typed properties
//! and their element is rebuilt from the property collection, so anything
//! the typed model does not express is dropped. Everything else a style
//! container holds is kept verbatim as an [`UnknownStyle`].

use super::definition::{Style, StyleEntry, UnknownStyle};
use super::family::StyleFamily;
use super::pool::StylePool;
use super::properties::Property;
use crate::common::Result;
use crate::odf::constants::{AUTOMATIC_STYLES, COMMON_STYLES, LIST_STYLE, STYLE, STYLE_FAMILY, STYLE_NAME};
use crate::odf::document::{DocumentContext, ImportWarning};
use crate::odf::dom::NodeId;

/// Decompose a style element in place and return the typed style.
fn classify(ctx: &mut DocumentContext, node: NodeId, family: StyleFamily, name: String) -> Result<Style> {
    let raw_children = ctx.store_mut().clear_children(node)?;
    let mut style = Style::wrap(node, family, name);
    for raw in raw_children {
        if ctx.store().is_text(raw) {
            continue;
        }
        let property = Property::decompose(ctx, raw)?;
        style.properties_mut().set(ctx, property)?;
    }
    Ok(style)
}

/// Turn one container child into a pool entry.
///
/// Returns `None` (after recording a warning) when the node cannot be
/// registered; the node then stays where it is.
fn import_node(
    ctx: &mut DocumentContext,
    node: NodeId,
    pool: &StylePool,
    warnings: &mut Vec<ImportWarning>,
) -> Result<Option<StyleEntry>> {
    let store = ctx.store();
    let is_style = store.is_named(node, STYLE);
    let is_list = store.is_named(node, LIST_STYLE);
    let name = store.attribute(node, STYLE_NAME).map(str::to_string);

    let Some(name) = name else {
        if is_style || is_list {
            ImportWarning::record(warnings, "style element without style:name skipped", Some(node));
            return Ok(None);
        }
        return Ok(Some(UnknownStyle::new(node, None).into()));
    };
    if pool.contains(&name) {
        ImportWarning::record(
            warnings,
            format!("duplicate style name '{name}' skipped"),
            Some(node),
        );
        return Ok(None);
    }

    let family = if is_list {
        Some(StyleFamily::List)
    } else if is_style {
        store.attribute(node, STYLE_FAMILY).and_then(StyleFamily::parse)
    } else {
        None
    };
    let entry = match family {
        Some(family) => classify(ctx, node, family, name)?.into(),
        None => UnknownStyle::new(node, Some(name)).into(),
    };
    Ok(Some(entry))
}

/// Classify every element of a style container into `pool`.
///
/// Absorbed elements are detached from the container. Elements already
/// backing a pool entry are skipped, so running this twice adds nothing.
/// Returns the number of entries added.
pub fn import_container(
    ctx: &mut DocumentContext,
    container: NodeId,
    pool: &mut StylePool,
    warnings: &mut Vec<ImportWarning>,
) -> Result<usize> {
    let children = ctx.store().children(container).to_vec();
    let mut added = 0;
    for child in children {
        if ctx.store().is_text(child) || pool.contains_node(child) {
            continue;
        }
        if let Some(entry) = import_node(ctx, child, pool, warnings)? {
            ctx.store_mut().detach(container, child)?;
            pool.add(entry)?;
            added += 1;
        }
    }
    log::debug!("imported {added} styles from {container}");
    Ok(added)
}

/// Absorb `style:style` elements found outside the style containers.
///
/// Each absorbed element is removed from where it was found, so the style
/// exists only in `pool`. Subtrees of `office:automatic-styles` and
/// `office:styles` are not searched.
pub fn absorb_stray_styles(
    ctx: &mut DocumentContext,
    root: NodeId,
    pool: &mut StylePool,
    warnings: &mut Vec<ImportWarning>,
) -> Result<usize> {
    let store = ctx.store();
    let strays: Vec<NodeId> = store
        .descendants(root)
        .into_iter()
        .filter(|node| store.is_named(*node, STYLE) && !pool.contains_node(*node))
        .filter(|node| {
            let mut cursor = store.parent(*node);
            while let Some(ancestor) = cursor {
                if store.is_named(ancestor, AUTOMATIC_STYLES) || store.is_named(ancestor, COMMON_STYLES) {
                    return false;
                }
                cursor = store.parent(ancestor);
            }
            true
        })
        .collect();

    let mut absorbed = 0;
    for node in strays {
        if let Some(entry) = import_node(ctx, node, pool, warnings)? {
            ctx.store_mut().detach_from_parent(node)?;
            pool.add(entry)?;
            absorbed += 1;
        }
    }
    if absorbed > 0 {
        log::debug!("absorbed {absorbed} stray styles");
    }
    Ok(absorbed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::document::{Document, DocumentKind};
    use crate::odf::style::properties::{ParagraphProperties, TextProperties};

    const AUTOMATIC: &str = r#"<office:automatic-styles xmlns:office="o" xmlns:style="s" xmlns:fo="f">
        <style:style style:name="P1" style:family="paragraph">
            <style:paragraph-properties fo:text-align="center" loext:contextual-spacing="false">
                <style:tab-stops>
                    <style:tab-stop style:position="2cm" style:type="right"/>
                </style:tab-stops>
            </style:paragraph-properties>
            <style:text-properties fo:font-size="14pt" fo:hyphenate="false"/>
            <style:map style:condition="outline-level()=1" style:apply-style-name="H1"/>
        </style:style>
        <style:style style:name="G1" style:family="page-layout"/>
        <style:default-style style:family="paragraph"/>
    </office:automatic-styles>"#;

    #[test]
    fn test_classify_and_rebuild() {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let container = doc.ctx.store_mut().parse(AUTOMATIC).unwrap();
        let mut pool = StylePool::new();
        let mut warnings = Vec::new();
        let added = import_container(&mut doc.ctx, container, &mut pool, &mut warnings).unwrap();

        assert_eq!(added, 3);
        assert!(warnings.is_empty());
        assert!(doc.ctx.store().children(container).is_empty());

        let store = doc.ctx.store();
        let p1 = pool.style("P1").unwrap();
        assert_eq!(p1.family(), StyleFamily::Paragraph);
        assert_eq!(p1.properties().len(), 3);
        assert_eq!(store.children(p1.node()), p1.properties().nodes().as_slice());

        let para = p1.properties().get::<ParagraphProperties>().unwrap();
        assert_eq!(para.text_align(store), Some("center"));
        assert!(!store.has_attribute(para.node(), "loext:contextual-spacing"));
        let stops = para.tab_stops().unwrap();
        assert_eq!(stops.len(), 1);
        assert_eq!(stops.iter().next().unwrap().position(store), Some("2cm"));

        let text = p1.properties().get::<TextProperties>().unwrap();
        assert_eq!(text.font_size(store), Some("14pt"));
        assert!(!store.has_attribute(text.node(), "fo:hyphenate"));

        assert!(pool.style("G1").is_none());
        assert!(matches!(pool.get("G1"), Some(StyleEntry::Unknown(_))));
    }

    #[test]
    fn test_reimport_adds_nothing() {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let container = doc.ctx.store_mut().parse(AUTOMATIC).unwrap();
        let mut pool = StylePool::new();
        let mut warnings = Vec::new();
        import_container(&mut doc.ctx, container, &mut pool, &mut warnings).unwrap();
        for entry in pool.iter() {
            doc.ctx.store_mut().append_child(container, entry.node()).unwrap();
        }
        let again = import_container(&mut doc.ctx, container, &mut pool, &mut warnings).unwrap();
        assert_eq!(again, 0);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_stray_styles_are_moved() {
        let xml = r#"<office:document-content xmlns:office="o" xmlns:style="s" xmlns:text="t">
            <office:automatic-styles>
                <style:style style:name="kept" style:family="text"/>
            </office:automatic-styles>
            <office:body><office:text>
                <text:p>one</text:p>
                <style:style style:name="stray" style:family="text"/>
            </office:text></office:body>
        </office:document-content>"#;
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let root = doc.ctx.store_mut().parse(xml).unwrap();
        let mut pool = StylePool::new();
        let mut warnings = Vec::new();
        let absorbed = absorb_stray_styles(&mut doc.ctx, root, &mut pool, &mut warnings).unwrap();

        assert_eq!(absorbed, 1);
        let stray = pool.style("stray").unwrap();
        assert_eq!(doc.ctx.store().parent(stray.node()), None);
        assert!(!pool.contains("kept"));
    }
}
