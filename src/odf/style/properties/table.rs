use super::PropertyKind;
use phf::phf_set;

static TABLE_ATTRIBUTES: phf::Set<&'static str> = phf_set! {
    "style:width",
    "style:rel-width",
    "table:align",
    "fo:margin",
    "fo:margin-left",
    "fo:margin-right",
    "fo:margin-top",
    "fo:margin-bottom",
    "style:shadow",
    "fo:background-color",
    "fo:break-before",
    "fo:break-after",
    "fo:keep-with-next",
    "style:may-break-between-rows",
    "table:border-model",
    "style:writing-mode",
    "table:display",
};

static COLUMN_ATTRIBUTES: phf::Set<&'static str> = phf_set! {
    "style:column-width",
    "style:rel-column-width",
    "style:use-optimal-column-width",
    "fo:break-before",
    "fo:break-after",
};

static ROW_ATTRIBUTES: phf::Set<&'static str> = phf_set! {
    "style:row-height",
    "style:min-row-height",
    "style:use-optimal-row-height",
    "fo:background-color",
    "fo:break-before",
    "fo:break-after",
    "fo:keep-together",
};

static CELL_ATTRIBUTES: phf::Set<&'static str> = phf_set! {
    "fo:padding",
    "fo:padding-left",
    "fo:padding-right",
    "fo:padding-top",
    "fo:padding-bottom",
    "fo:border",
    "fo:border-left",
    "fo:border-right",
    "fo:border-top",
    "fo:border-bottom",
    "style:border-line-width",
    "fo:background-color",
    "style:vertical-align",
    "fo:wrap-option",
    "style:shrink-to-fit",
    "style:text-align-source",
    "style:repeat-content",
    "style:rotation-angle",
    "style:cell-protect",
    "style:print-content",
    "style:direction",
    "style:writing-mode",
    "style:shadow",
};

typed_property!(
    /// `style:table-properties`. New instances span the text area
    /// (`16.99cm`, aligned to the margins).
    TableProperties, PropertyKind::Table, TABLE_ATTRIBUTES,
    defaults: [("style:width", "16.99cm"), ("table:align", "margins")]
);

impl TableProperties {
    string_attributes! {
        width, set_width => "style:width";
        relative_width, set_relative_width => "style:rel-width";
        /// `left`, `center`, `right` or `margins`
        align, set_align => "table:align";
        margin_left, set_margin_left => "fo:margin-left";
        margin_right, set_margin_right => "fo:margin-right";
        margin_top, set_margin_top => "fo:margin-top";
        margin_bottom, set_margin_bottom => "fo:margin-bottom";
        shadow, set_shadow => "style:shadow";
        background_color, set_background_color => "fo:background-color";
    }

    bool_attributes! {
        may_break_between_rows, set_may_break_between_rows => "style:may-break-between-rows";
    }
}

typed_property!(
    /// `style:table-column-properties`.
    ColumnProperties, PropertyKind::TableColumn, COLUMN_ATTRIBUTES, defaults: []
);

impl ColumnProperties {
    string_attributes! {
        column_width, set_column_width => "style:column-width";
        /// Relative width such as `1000*`
        relative_width, set_relative_width => "style:rel-column-width";
    }

    bool_attributes! {
        use_optimal_width, set_use_optimal_width => "style:use-optimal-column-width";
    }
}

typed_property!(
    /// `style:table-row-properties`.
    RowProperties, PropertyKind::TableRow, ROW_ATTRIBUTES, defaults: []
);

impl RowProperties {
    string_attributes! {
        row_height, set_row_height => "style:row-height";
        min_row_height, set_min_row_height => "style:min-row-height";
        background_color, set_background_color => "fo:background-color";
    }

    bool_attributes! {
        use_optimal_height, set_use_optimal_height => "style:use-optimal-row-height";
    }
}

typed_property!(
    /// `style:table-cell-properties`.
    CellProperties, PropertyKind::TableCell, CELL_ATTRIBUTES, defaults: []
);

impl CellProperties {
    string_attributes! {
        padding, set_padding => "fo:padding";
        border, set_border => "fo:border";
        border_left, set_border_left => "fo:border-left";
        border_right, set_border_right => "fo:border-right";
        border_top, set_border_top => "fo:border-top";
        border_bottom, set_border_bottom => "fo:border-bottom";
        background_color, set_background_color => "fo:background-color";
        /// `top`, `middle`, `bottom` or `automatic`
        vertical_align, set_vertical_align => "style:vertical-align";
    }

    pub fn wraps(&self, store: &crate::odf::dom::NodeStore) -> bool {
        store.attribute(self.node, "fo:wrap-option") == Some("wrap")
    }

    pub fn set_wrap(&self, ctx: &mut crate::odf::document::DocumentContext, wrap: bool) -> crate::common::Result<()> {
        let value = if wrap { "wrap" } else { "no-wrap" };
        ctx.store_mut().set_attribute(self.node, "fo:wrap-option", value)
    }
}
