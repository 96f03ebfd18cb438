//! ODF constants: namespaces, MIME types and the wire vocabulary the model emits.
//!
//! Everything the document model writes into the node store is spelled here,
//! so the rest of the crate never compares against ad-hoc string literals for
//! namespace prefixes or part roots.

use phf::{Map, phf_map};

/// ODF version written on blank roots
pub const OFFICE_VERSION: &str = "1.2";

/// MIME type for OpenDocument Text (.odt)
pub const ODF_TEXT: &str = "application/vnd.oasis.opendocument.text";

/// MIME type for OpenDocument Spreadsheet (.ods)
pub const ODF_SPREADSHEET: &str = "application/vnd.oasis.opendocument.spreadsheet";

/// Content part path
pub const ODF_CONTENT: &str = "content.xml";

/// Styles part path
pub const ODF_STYLES: &str = "styles.xml";

/// Metadata part path
pub const ODF_META: &str = "meta.xml";

/// Folder that pictures are referenced from
pub const PICTURES_FOLDER: &str = "Pictures/";

// ============================================================================
// NAMESPACES
// ============================================================================

pub const OFFICENS: &str = "urn:oasis:names:tc:opendocument:xmlns:office:1.0";
pub const STYLENS: &str = "urn:oasis:names:tc:opendocument:xmlns:style:1.0";
pub const TEXTNS: &str = "urn:oasis:names:tc:opendocument:xmlns:text:1.0";
pub const TABLENS: &str = "urn:oasis:names:tc:opendocument:xmlns:table:1.0";
pub const DRAWNS: &str = "urn:oasis:names:tc:opendocument:xmlns:drawing:1.0";
pub const FONS: &str = "urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0";
pub const XLINKNS: &str = "http://www.w3.org/1999/xlink";
pub const DCNS: &str = "http://purl.org/dc/elements/1.1/";
pub const METANS: &str = "urn:oasis:names:tc:opendocument:xmlns:meta:1.0";
pub const NUMBERNS: &str = "urn:oasis:names:tc:opendocument:xmlns:datastyle:1.0";
pub const SVGNS: &str = "urn:oasis:names:tc:opendocument:xmlns:svg-compatible:1.0";
pub const FORMNS: &str = "urn:oasis:names:tc:opendocument:xmlns:form:1.0";
pub const SCRIPTNS: &str = "urn:oasis:names:tc:opendocument:xmlns:script:1.0";
pub const XMLNS: &str = "http://www.w3.org/XML/1998/namespace";

/// Prefix to namespace URI for every prefix the model creates nodes in.
pub static NAMESPACES: Map<&'static str, &'static str> = phf_map! {
    "office" => OFFICENS,
    "style" => STYLENS,
    "text" => TEXTNS,
    "table" => TABLENS,
    "draw" => DRAWNS,
    "fo" => FONS,
    "xlink" => XLINKNS,
    "dc" => DCNS,
    "meta" => METANS,
    "number" => NUMBERNS,
    "svg" => SVGNS,
    "form" => FORMNS,
    "script" => SCRIPTNS,
    "xml" => XMLNS,
};

/// Declaration order for blank part roots.
pub const DECLARED_PREFIXES: &[&str] = &[
    "office", "style", "text", "table", "draw", "fo", "xlink", "dc", "meta", "number", "svg",
    "form", "script",
];

/// Resolve a namespace prefix to its URI.
pub fn namespace_uri(prefix: &str) -> Option<&'static str> {
    NAMESPACES.get(prefix).copied()
}

// ============================================================================
// PART ROOTS AND CONTAINERS
// ============================================================================

pub const DOCUMENT_CONTENT: &str = "office:document-content";
pub const DOCUMENT_STYLES: &str = "office:document-styles";
pub const DOCUMENT_META: &str = "office:document-meta";
pub const AUTOMATIC_STYLES: &str = "office:automatic-styles";
pub const COMMON_STYLES: &str = "office:styles";
pub const MASTER_STYLES: &str = "office:master-styles";
pub const BODY: &str = "office:body";
pub const BODY_TEXT: &str = "office:text";
pub const BODY_SPREADSHEET: &str = "office:spreadsheet";
pub const META: &str = "office:meta";
pub const DOCUMENT_STATISTIC: &str = "meta:document-statistic";

// ============================================================================
// STYLE VOCABULARY
// ============================================================================

pub const STYLE: &str = "style:style";
pub const LIST_STYLE: &str = "text:list-style";
pub const STYLE_NAME: &str = "style:name";
pub const STYLE_FAMILY: &str = "style:family";
pub const PARENT_STYLE_NAME: &str = "style:parent-style-name";
pub const DISPLAY_NAME: &str = "style:display-name";

pub const TAB_STOPS: &str = "style:tab-stops";
pub const TAB_STOP: &str = "style:tab-stop";

// ============================================================================
// BOOLEAN WIRE VALUES
// ============================================================================

/// Serialize a boolean attribute value.
pub const fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Parse a boolean attribute value; anything but `true`/`false` is `None`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Parse a 1-based textual repeat count, falling back to 1.
pub fn parse_repeat(value: Option<&str>) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_prefixes_are_known() {
        for prefix in DECLARED_PREFIXES {
            assert!(namespace_uri(prefix).is_some(), "{prefix}");
        }
        assert_eq!(namespace_uri("office"), Some(OFFICENS));
        assert_eq!(namespace_uri("w"), None);
    }

    #[test]
    fn test_bool_wire_values() {
        assert_eq!(bool_str(true), "true");
        assert_eq!(bool_str(false), "false");
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("1"), None);
    }

    #[test]
    fn test_parse_repeat() {
        assert_eq!(parse_repeat(None), 1);
        assert_eq!(parse_repeat(Some("3")), 3);
        assert_eq!(parse_repeat(Some("0")), 1);
        assert_eq!(parse_repeat(Some("x")), 1);
    }
}
