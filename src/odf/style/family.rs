use super::properties::PropertyKind;
use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Style family, decoded once from `style:family` (or the list-style tag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleFamily {
    /// Paragraph styles
    Paragraph,
    /// Text/character styles
    Text,
    /// Table styles
    Table,
    /// Table column styles
    TableColumn,
    /// Table row styles
    TableRow,
    /// Table cell styles
    TableCell,
    /// Graphic and frame styles
    Graphic,
    /// Section styles
    Section,
    /// `text:list-style`, recognised by element name
    List,
}

static FAMILY_NAMES: phf::Map<&'static str, StyleFamily> = phf_map! {
    "paragraph" => StyleFamily::Paragraph,
    "text" => StyleFamily::Text,
    "table" => StyleFamily::Table,
    "table-column" => StyleFamily::TableColumn,
    "table-row" => StyleFamily::TableRow,
    "table-cell" => StyleFamily::TableCell,
    "graphic" => StyleFamily::Graphic,
    "section" => StyleFamily::Section,
};

impl StyleFamily {
    /// Parse a `style:family` value. `list` is not a family attribute value.
    pub fn parse(value: &str) -> Option<Self> {
        FAMILY_NAMES.get(value.trim()).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StyleFamily::Paragraph => "paragraph",
            StyleFamily::Text => "text",
            StyleFamily::Table => "table",
            StyleFamily::TableColumn => "table-column",
            StyleFamily::TableRow => "table-row",
            StyleFamily::TableCell => "table-cell",
            StyleFamily::Graphic => "graphic",
            StyleFamily::Section => "section",
            StyleFamily::List => "list",
        }
    }

    /// Element that carries a style of this family.
    pub fn element(self) -> &'static str {
        match self {
            StyleFamily::List => crate::odf::constants::LIST_STYLE,
            _ => crate::odf::constants::STYLE,
        }
    }

    /// Whether a style of this family may host properties of `kind`.
    pub fn allows(self, kind: PropertyKind) -> bool {
        use PropertyKind as K;
        match self {
            StyleFamily::Paragraph => matches!(kind, K::Paragraph | K::Text),
            StyleFamily::Text => kind == K::Text,
            StyleFamily::Table => kind == K::Table,
            StyleFamily::TableColumn => kind == K::TableColumn,
            StyleFamily::TableRow => kind == K::TableRow,
            StyleFamily::TableCell => matches!(kind, K::TableCell | K::Paragraph | K::Text),
            StyleFamily::Graphic => matches!(kind, K::Graphic | K::Paragraph | K::Text),
            StyleFamily::Section => kind == K::Section,
            StyleFamily::List => false,
        }
    }
}

impl fmt::Display for StyleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
