use super::{Property, PropertyKind, TypedProperty};
use crate::common::Result;
use crate::odf::constants::{TAB_STOP, TAB_STOPS};
use crate::odf::content::{NodeBacked, NodeCollection, NodeSync};
use crate::odf::document::DocumentContext;
use crate::odf::dom::{NodeId, NodeStore};
use phf::phf_set;

static PARAGRAPH_ATTRIBUTES: phf::Set<&'static str> = phf_set! {
    "fo:margin",
    "fo:margin-left",
    "fo:margin-right",
    "fo:margin-top",
    "fo:margin-bottom",
    "fo:text-align",
    "fo:text-align-last",
    "fo:text-indent",
    "style:auto-text-indent",
    "fo:line-height",
    "style:line-height-at-least",
    "style:line-spacing",
    "fo:break-before",
    "fo:break-after",
    "fo:background-color",
    "fo:keep-with-next",
    "fo:keep-together",
    "fo:orphans",
    "fo:widows",
    "fo:padding",
    "fo:border",
    "fo:border-left",
    "fo:border-right",
    "fo:border-top",
    "fo:border-bottom",
    "style:shadow",
    "style:writing-mode",
    "style:vertical-align",
    "style:tab-stop-distance",
    "style:justify-single-word",
    "text:number-lines",
    "text:line-number",
};

static TAB_STOP_ATTRIBUTES: phf::Set<&'static str> = phf_set! {
    "style:position",
    "style:type",
    "style:char",
    "style:leader-type",
    "style:leader-style",
    "style:leader-width",
    "style:leader-color",
    "style:leader-text",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabKind {
    #[default]
    Left,
    Center,
    Right,
    /// Aligned on a character, `style:char`.
    Char,
}

impl TabKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TabKind::Left => "left",
            TabKind::Center => "center",
            TabKind::Right => "right",
            TabKind::Char => "char",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "center" => TabKind::Center,
            "right" => TabKind::Right,
            "char" => TabKind::Char,
            _ => TabKind::Left,
        }
    }
}

/// One `style:tab-stop`.
#[derive(Debug, Clone, Copy)]
pub struct TabStop {
    node: NodeId,
}

impl TabStop {
    pub fn new(ctx: &mut DocumentContext, position: &str, kind: TabKind) -> Result<Self> {
        let node = ctx.element(TAB_STOP);
        let store = ctx.store_mut();
        store.set_attribute(node, "style:position", position)?;
        if kind != TabKind::Left {
            store.set_attribute(node, "style:type", kind.as_str())?;
        }
        Ok(Self { node })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn position<'a>(&self, store: &'a NodeStore) -> Option<&'a str> {
        store.attribute(self.node, "style:position")
    }

    pub fn kind(&self, store: &NodeStore) -> TabKind {
        store
            .attribute(self.node, "style:type")
            .map(TabKind::parse)
            .unwrap_or_default()
    }

    pub fn leader_text<'a>(&self, store: &'a NodeStore) -> Option<&'a str> {
        store.attribute(self.node, "style:leader-text")
    }

    /// Fill the gap with `text` drawn in `style` (`dotted`, `solid`, ...).
    pub fn set_leader(&self, ctx: &mut DocumentContext, style: &str, text: &str) -> Result<()> {
        let store = ctx.store_mut();
        store.set_attribute(self.node, "style:leader-style", style)?;
        store.set_attribute(self.node, "style:leader-text", text)
    }
}

impl NodeBacked for TabStop {
    fn node(&self) -> NodeId {
        self.node
    }
}

/// The `style:tab-stops` list of a paragraph style.
#[derive(Debug, Clone)]
pub struct TabStops {
    node: NodeId,
    stops: NodeCollection<TabStop, NodeSync>,
}

impl TabStops {
    fn new(ctx: &mut DocumentContext) -> Self {
        let node = ctx.element(TAB_STOPS);
        Self {
            node,
            stops: NodeCollection::new(node, NodeSync),
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TabStop> {
        self.stops.iter()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn push(&mut self, ctx: &mut DocumentContext, stop: TabStop) -> Result<()> {
        self.stops.push(ctx, stop)
    }

    pub fn remove(&mut self, ctx: &mut DocumentContext, index: usize) -> Result<TabStop> {
        self.stops.remove(ctx, index)
    }
}

/// `style:paragraph-properties`, including its tab stops.
#[derive(Debug, Clone)]
pub struct ParagraphProperties {
    node: NodeId,
    tab_stops: Option<TabStops>,
}

impl ParagraphProperties {
    pub fn node(&self) -> NodeId {
        self.node
    }

    string_attributes! {
        margin_left, set_margin_left => "fo:margin-left";
        margin_right, set_margin_right => "fo:margin-right";
        margin_top, set_margin_top => "fo:margin-top";
        margin_bottom, set_margin_bottom => "fo:margin-bottom";
        /// `start`, `end`, `left`, `right`, `center` or `justify`
        text_align, set_text_align => "fo:text-align";
        text_indent, set_text_indent => "fo:text-indent";
        line_height, set_line_height => "fo:line-height";
        /// `auto`, `column` or `page`
        break_before, set_break_before => "fo:break-before";
        break_after, set_break_after => "fo:break-after";
        background_color, set_background_color => "fo:background-color";
        border, set_border => "fo:border";
        padding, set_padding => "fo:padding";
    }

    bool_attributes! {
        numbers_lines, set_numbers_lines => "text:number-lines";
    }

    pub fn tab_stops(&self) -> Option<&TabStops> {
        self.tab_stops.as_ref()
    }

    /// Append a tab stop, creating the `style:tab-stops` list on first use.
    pub fn add_tab_stop(&mut self, ctx: &mut DocumentContext, stop: TabStop) -> Result<()> {
        if self.tab_stops.is_none() {
            let stops = TabStops::new(ctx);
            ctx.store_mut().append_child(self.node, stops.node)?;
            self.tab_stops = Some(stops);
        }
        match self.tab_stops.as_mut() {
            Some(stops) => stops.push(ctx, stop),
            None => Ok(()),
        }
    }

    pub fn clear_tab_stops(&mut self, ctx: &mut DocumentContext) -> Result<()> {
        if let Some(stops) = self.tab_stops.take() {
            ctx.store_mut().detach(self.node, stops.node)?;
        }
        Ok(())
    }
}

impl NodeBacked for ParagraphProperties {
    fn node(&self) -> NodeId {
        self.node
    }
}

impl TypedProperty for ParagraphProperties {
    const KIND: PropertyKind = PropertyKind::Paragraph;

    fn empty(ctx: &mut DocumentContext) -> Self {
        Self {
            node: ctx.element(Self::KIND.tag()),
            tab_stops: None,
        }
    }

    fn apply_defaults(&mut self, _ctx: &mut DocumentContext) -> Result<()> {
        Ok(())
    }

    fn known_attributes() -> &'static phf::Set<&'static str> {
        &PARAGRAPH_ATTRIBUTES
    }

    /// Rebuild `style:tab-stops` entries as typed tab stops.
    fn absorb_children(&mut self, ctx: &mut DocumentContext, raw: NodeId) -> Result<()> {
        let Some(list) = ctx.store().find_child(raw, TAB_STOPS) else {
            return Ok(());
        };
        let raw_stops: Vec<NodeId> = ctx
            .store()
            .children(list)
            .iter()
            .copied()
            .filter(|c| ctx.store().is_named(*c, TAB_STOP))
            .collect();
        for raw_stop in raw_stops {
            let stop = TabStop {
                node: ctx.element(TAB_STOP),
            };
            let carried: Vec<(String, String)> = ctx
                .store()
                .attributes(raw_stop)
                .iter()
                .filter(|a| TAB_STOP_ATTRIBUTES.contains(a.name.to_string().as_str()))
                .map(|a| (a.name.to_string(), a.value.clone()))
                .collect();
            for (name, value) in carried {
                ctx.store_mut().set_attribute(stop.node, &name, &value)?;
            }
            self.add_tab_stop(ctx, stop)?;
        }
        Ok(())
    }

    fn into_property(self) -> Property {
        Property::ParagraphProperties(self)
    }

    fn from_property(property: &Property) -> Option<&Self> {
        match property {
            Property::ParagraphProperties(p) => Some(p),
            _ => None,
        }
    }

    fn from_property_mut(property: &mut Property) -> Option<&mut Self> {
        match property {
            Property::ParagraphProperties(p) => Some(p),
            _ => None,
        }
    }
}

impl From<ParagraphProperties> for Property {
    fn from(value: ParagraphProperties) -> Self {
        Property::ParagraphProperties(value)
    }
}
