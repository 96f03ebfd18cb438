use super::PropertyKind;
use crate::common::Result;
use crate::odf::document::DocumentContext;
use crate::odf::dom::{NodeId, NodeStore};
use phf::phf_set;

static GRAPHIC_ATTRIBUTES: phf::Set<&'static str> = phf_set! {
    "style:wrap",
    "style:run-through",
    "style:number-wrapped-paragraphs",
    "style:wrap-contour",
    "style:vertical-pos",
    "style:vertical-rel",
    "style:horizontal-pos",
    "style:horizontal-rel",
    "style:flow-with-text",
    "style:mirror",
    "fo:clip",
    "draw:fill",
    "draw:fill-color",
    "draw:stroke",
    "svg:stroke-color",
    "svg:stroke-width",
    "draw:shadow",
    "draw:luminance",
    "draw:contrast",
    "draw:color-mode",
    "draw:textarea-vertical-align",
    "draw:textarea-horizontal-align",
    "draw:auto-grow-height",
    "fo:min-height",
    "fo:border",
    "fo:padding",
    "fo:margin-left",
    "fo:margin-right",
    "fo:margin-top",
    "fo:margin-bottom",
    "fo:background-color",
};

static SECTION_ATTRIBUTES: phf::Set<&'static str> = phf_set! {
    "fo:background-color",
    "fo:margin-left",
    "fo:margin-right",
    "style:editable",
    "style:protect",
    "style:writing-mode",
    "text:dont-balance-text-columns",
};

const COLUMNS: &str = "style:columns";

typed_property!(
    /// `style:graphic-properties`. New instances let text run through the
    /// graphic, which sits in the foreground.
    GraphicProperties, PropertyKind::Graphic, GRAPHIC_ATTRIBUTES,
    defaults: [("style:wrap", "run-through"), ("style:run-through", "foreground")]
);

impl GraphicProperties {
    string_attributes! {
        /// `none`, `left`, `right`, `parallel`, `dynamic` or `run-through`
        wrap, set_wrap => "style:wrap";
        run_through, set_run_through => "style:run-through";
        vertical_pos, set_vertical_pos => "style:vertical-pos";
        vertical_rel, set_vertical_rel => "style:vertical-rel";
        horizontal_pos, set_horizontal_pos => "style:horizontal-pos";
        horizontal_rel, set_horizontal_rel => "style:horizontal-rel";
        fill, set_fill => "draw:fill";
        fill_color, set_fill_color => "draw:fill-color";
        stroke, set_stroke => "draw:stroke";
        stroke_color, set_stroke_color => "svg:stroke-color";
        border, set_border => "fo:border";
        padding, set_padding => "fo:padding";
    }

    bool_attributes! {
        flows_with_text, set_flow_with_text => "style:flow-with-text";
    }
}

typed_property!(
    /// `style:section-properties` and its column layout.
    SectionProperties, PropertyKind::Section, SECTION_ATTRIBUTES, defaults: [],
    absorb: absorb_columns
);

impl SectionProperties {
    string_attributes! {
        background_color, set_background_color => "fo:background-color";
        margin_left, set_margin_left => "fo:margin-left";
        margin_right, set_margin_right => "fo:margin-right";
    }

    bool_attributes! {
        editable, set_editable => "style:editable";
    }

    /// Column count, 1 when no `style:columns` child is present.
    pub fn column_count(&self, store: &NodeStore) -> usize {
        store
            .find_child(self.node, COLUMNS)
            .and_then(|c| store.attribute(c, "fo:column-count"))
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(1)
    }

    pub fn column_gap<'a>(&self, store: &'a NodeStore) -> Option<&'a str> {
        store
            .find_child(self.node, COLUMNS)
            .and_then(|c| store.attribute(c, "fo:column-gap"))
    }

    pub fn set_columns(&self, ctx: &mut DocumentContext, count: usize, gap: &str) -> Result<()> {
        let store = ctx.store_mut();
        let columns = store.find_or_append_child(self.node, COLUMNS)?;
        let mut buffer = itoa::Buffer::new();
        store.set_attribute(columns, "fo:column-count", buffer.format(count.max(1)))?;
        store.set_attribute(columns, "fo:column-gap", gap)
    }

    fn absorb_columns(&self, ctx: &mut DocumentContext, raw: NodeId) -> Result<()> {
        let store = ctx.store();
        let Some(columns) = store.find_child(raw, COLUMNS) else {
            return Ok(());
        };
        let count = store
            .attribute(columns, "fo:column-count")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(1);
        let gap = store.attribute(columns, "fo:column-gap").unwrap_or("0cm").to_string();
        self.set_columns(ctx, count, &gap)
    }
}
