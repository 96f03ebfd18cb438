//! Document metadata stored on the meta tree.
//!
//! Nothing here is cached: every read goes to `office:meta` and its
//! `meta:document-statistic` child, and every write lands there directly.

use crate::common::Result;
use crate::odf::constants::DOCUMENT_STATISTIC;
use crate::odf::dom::{NodeId, NodeStore};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Handles of the metadata containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MetaNodes {
    pub(crate) meta: NodeId,
    pub(crate) statistic: NodeId,
}

impl MetaNodes {
    /// Locate (or create) the statistic element under `meta`.
    pub(crate) fn locate(store: &mut NodeStore, meta: NodeId) -> Result<Self> {
        let statistic = store.find_or_append_child(meta, DOCUMENT_STATISTIC)?;
        Ok(Self { meta, statistic })
    }
}

/// Counters kept on `meta:document-statistic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Statistic {
    Page,
    Paragraph,
    Table,
    Image,
    Object,
    Word,
    Character,
}

impl Statistic {
    pub const ALL: [Statistic; 7] = [
        Statistic::Page,
        Statistic::Paragraph,
        Statistic::Table,
        Statistic::Image,
        Statistic::Object,
        Statistic::Word,
        Statistic::Character,
    ];

    pub fn attribute(self) -> &'static str {
        match self {
            Statistic::Page => "meta:page-count",
            Statistic::Paragraph => "meta:paragraph-count",
            Statistic::Table => "meta:table-count",
            Statistic::Image => "meta:image-count",
            Statistic::Object => "meta:object-count",
            Statistic::Word => "meta:word-count",
            Statistic::Character => "meta:character-count",
        }
    }
}

/// Snapshot of all counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStatistics {
    pub page_count: u32,
    pub paragraph_count: u32,
    pub table_count: u32,
    pub image_count: u32,
    pub object_count: u32,
    pub word_count: u32,
    pub character_count: u32,
}

fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}

/// Read access to document metadata.
#[derive(Debug, Clone, Copy)]
pub struct Metadata<'a> {
    store: &'a NodeStore,
    nodes: MetaNodes,
}

impl<'a> Metadata<'a> {
    pub(crate) fn new(store: &'a NodeStore, nodes: MetaNodes) -> Self {
        Self { store, nodes }
    }

    pub fn count(&self, statistic: Statistic) -> u32 {
        self.store
            .attribute(self.nodes.statistic, statistic.attribute())
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn statistics(&self) -> DocumentStatistics {
        DocumentStatistics {
            page_count: self.count(Statistic::Page),
            paragraph_count: self.count(Statistic::Paragraph),
            table_count: self.count(Statistic::Table),
            image_count: self.count(Statistic::Image),
            object_count: self.count(Statistic::Object),
            word_count: self.count(Statistic::Word),
            character_count: self.count(Statistic::Character),
        }
    }

    fn field(&self, qualified: &str) -> Option<String> {
        self.store
            .find_child(self.nodes.meta, qualified)
            .map(|node| self.store.text_content(node))
    }

    pub fn title(&self) -> Option<String> {
        self.field("dc:title")
    }

    pub fn description(&self) -> Option<String> {
        self.field("dc:description")
    }

    pub fn subject(&self) -> Option<String> {
        self.field("dc:subject")
    }

    /// Author of the last modification.
    pub fn creator(&self) -> Option<String> {
        self.field("dc:creator")
    }

    pub fn initial_creator(&self) -> Option<String> {
        self.field("meta:initial-creator")
    }

    pub fn generator(&self) -> Option<String> {
        self.field("meta:generator")
    }

    pub fn keywords(&self) -> Vec<String> {
        self.store
            .children(self.nodes.meta)
            .iter()
            .filter(|c| self.store.is_named(**c, "meta:keyword"))
            .map(|c| self.store.text_content(*c))
            .collect()
    }

    pub fn creation_date(&self) -> Option<NaiveDateTime> {
        self.field("meta:creation-date").as_deref().and_then(parse_date)
    }

    pub fn modification_date(&self) -> Option<NaiveDateTime> {
        self.field("dc:date").as_deref().and_then(parse_date)
    }
}

/// Write access to document metadata.
#[derive(Debug)]
pub struct MetadataMut<'a> {
    store: &'a mut NodeStore,
    nodes: MetaNodes,
}

impl<'a> MetadataMut<'a> {
    pub(crate) fn new(store: &'a mut NodeStore, nodes: MetaNodes) -> Self {
        Self { store, nodes }
    }

    pub fn as_ref(&self) -> Metadata<'_> {
        Metadata::new(self.store, self.nodes)
    }

    pub fn set_count(&mut self, statistic: Statistic, value: u32) -> Result<()> {
        let mut buffer = itoa::Buffer::new();
        self.store.set_attribute(
            self.nodes.statistic,
            statistic.attribute(),
            buffer.format(value),
        )
    }

    /// Add `delta` to a counter, clamping at zero. Returns the new value.
    pub fn adjust(&mut self, statistic: Statistic, delta: i64) -> Result<u32> {
        let current = i64::from(self.as_ref().count(statistic));
        let updated = (current + delta).clamp(0, i64::from(u32::MAX)) as u32;
        self.set_count(statistic, updated)?;
        Ok(updated)
    }

    fn set_field(&mut self, qualified: &str, value: &str) -> Result<()> {
        let node = self.store.find_or_append_child(self.nodes.meta, qualified)?;
        self.store.set_text_content(node, value)
    }

    pub fn set_title(&mut self, title: &str) -> Result<()> {
        self.set_field("dc:title", title)
    }

    pub fn set_description(&mut self, description: &str) -> Result<()> {
        self.set_field("dc:description", description)
    }

    pub fn set_subject(&mut self, subject: &str) -> Result<()> {
        self.set_field("dc:subject", subject)
    }

    pub fn set_creator(&mut self, creator: &str) -> Result<()> {
        self.set_field("dc:creator", creator)
    }

    pub fn set_initial_creator(&mut self, creator: &str) -> Result<()> {
        self.set_field("meta:initial-creator", creator)
    }

    pub fn set_generator(&mut self, generator: &str) -> Result<()> {
        self.set_field("meta:generator", generator)
    }

    pub fn add_keyword(&mut self, keyword: &str) -> Result<()> {
        let node = self.store.create_qualified("meta:keyword");
        self.store.append_child(self.nodes.meta, node)?;
        self.store.set_text_content(node, keyword)
    }

    pub fn set_creation_date(&mut self, date: NaiveDateTime) -> Result<()> {
        self.set_field("meta:creation-date", &date.format(DATE_FORMAT).to_string())
    }

    pub fn set_modification_date(&mut self, date: NaiveDateTime) -> Result<()> {
        self.set_field("dc:date", &date.format(DATE_FORMAT).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn meta_store() -> (NodeStore, MetaNodes) {
        let mut store = NodeStore::new();
        let meta = store.create_qualified("office:meta");
        let nodes = MetaNodes::locate(&mut store, meta).unwrap();
        (store, nodes)
    }

    #[test]
    fn test_counters_clamp_at_zero() {
        let (mut store, nodes) = meta_store();
        let mut meta = MetadataMut::new(&mut store, nodes);
        assert_eq!(meta.adjust(Statistic::Image, 2).unwrap(), 2);
        assert_eq!(meta.adjust(Statistic::Image, -5).unwrap(), 0);
        assert_eq!(
            store.attribute(nodes.statistic, "meta:image-count"),
            Some("0")
        );
    }

    #[test]
    fn test_text_fields_and_dates() {
        let (mut store, nodes) = meta_store();
        let date = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        {
            let mut meta = MetadataMut::new(&mut store, nodes);
            meta.set_title("Quarterly report").unwrap();
            meta.set_title("Annual report").unwrap();
            meta.add_keyword("finance").unwrap();
            meta.add_keyword("2024").unwrap();
            meta.set_creation_date(date).unwrap();
        }
        let meta = Metadata::new(&store, nodes);
        assert_eq!(meta.title().as_deref(), Some("Annual report"));
        assert_eq!(meta.keywords(), vec!["finance", "2024"]);
        assert_eq!(meta.creation_date(), Some(date));
        assert_eq!(meta.creator(), None);
    }

    #[test]
    fn test_parse_date_variants() {
        assert!(parse_date("2023-11-02T10:00:00.123").is_some());
        assert!(parse_date("2023-11-02T10:00:00Z").is_some());
        assert!(parse_date("yesterday").is_none());
    }
}
