use super::PropertyKind;
use crate::common::Result;
use crate::odf::document::DocumentContext;
use crate::odf::dom::NodeStore;
use phf::phf_set;

static TEXT_ATTRIBUTES: phf::Set<&'static str> = phf_set! {
    "style:font-name",
    "style:font-name-asian",
    "style:font-name-complex",
    "fo:font-family",
    "fo:font-size",
    "style:font-size-asian",
    "style:font-size-complex",
    "fo:font-weight",
    "style:font-weight-asian",
    "style:font-weight-complex",
    "fo:font-style",
    "style:font-style-asian",
    "style:font-style-complex",
    "fo:font-variant",
    "fo:text-transform",
    "fo:color",
    "fo:background-color",
    "fo:letter-spacing",
    "fo:text-shadow",
    "fo:language",
    "fo:country",
    "style:text-underline-style",
    "style:text-underline-width",
    "style:text-underline-color",
    "style:text-underline-type",
    "style:text-line-through-style",
    "style:text-line-through-type",
    "style:text-position",
    "style:font-relief",
    "style:text-outline",
};

typed_property!(
    /// `style:text-properties`: character formatting.
    TextProperties, PropertyKind::Text, TEXT_ATTRIBUTES, defaults: []
);

impl TextProperties {
    string_attributes! {
        font_name, set_font_name => "style:font-name";
        font_family, set_font_family => "fo:font-family";
        /// Size with unit, e.g. `12pt`
        font_size, set_font_size => "fo:font-size";
        font_weight, set_font_weight => "fo:font-weight";
        font_style, set_font_style => "fo:font-style";
        color, set_color => "fo:color";
        background_color, set_background_color => "fo:background-color";
        underline_style, set_underline_style => "style:text-underline-style";
        line_through_style, set_line_through_style => "style:text-line-through-style";
        /// `super`, `sub` or a percentage offset
        text_position, set_text_position => "style:text-position";
        text_shadow, set_text_shadow => "fo:text-shadow";
    }

    pub fn is_bold(&self, store: &NodeStore) -> bool {
        self.font_weight(store) == Some("bold")
    }

    /// Bold across western, asian and complex scripts.
    pub fn set_bold(&self, ctx: &mut DocumentContext, bold: bool) -> Result<()> {
        let weight = if bold { "bold" } else { "normal" };
        let store = ctx.store_mut();
        for attr in ["fo:font-weight", "style:font-weight-asian", "style:font-weight-complex"] {
            store.set_attribute(self.node, attr, weight)?;
        }
        Ok(())
    }

    pub fn is_italic(&self, store: &NodeStore) -> bool {
        self.font_style(store) == Some("italic")
    }

    pub fn set_italic(&self, ctx: &mut DocumentContext, italic: bool) -> Result<()> {
        let style = if italic { "italic" } else { "normal" };
        let store = ctx.store_mut();
        for attr in ["fo:font-style", "style:font-style-asian", "style:font-style-complex"] {
            store.set_attribute(self.node, attr, style)?;
        }
        Ok(())
    }

    /// Solid single underline in the font colour.
    pub fn set_underline(&self, ctx: &mut DocumentContext, underline: bool) -> Result<()> {
        let store = ctx.store_mut();
        if underline {
            store.set_attribute(self.node, "style:text-underline-style", "solid")?;
            store.set_attribute(self.node, "style:text-underline-width", "auto")?;
            store.set_attribute(self.node, "style:text-underline-color", "font-color")
        } else {
            store.set_attribute(self.node, "style:text-underline-style", "none")
        }
    }
}
