//! Pre-save assembly: bring the part trees in line with the typed model.

use super::Document;
use crate::common::Result;
use crate::odf::constants::STYLE_NAME;
use crate::odf::table::rebuild_tables;
use std::collections::HashSet;

/// Switches for [`Document::assemble`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyOptions {
    /// Regenerate every table's node children from its rows and columns.
    pub rebuild_tables: bool,
    /// Write the current local time to `dc:date`.
    pub stamp_modification_date: bool,
    /// Value for `meta:generator`; `None` leaves it alone.
    pub generator: Option<String>,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            rebuild_tables: true,
            stamp_modification_date: true,
            generator: Some(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()),
        }
    }
}

impl Document {
    /// Prepare the trees for serialization.
    ///
    /// Tables are rebuilt, pooled automatic styles are appended to the
    /// content tree's `office:automatic-styles` unless a style of the same
    /// name is already there, and `office:styles` is replaced by the common
    /// pool. Assembling twice yields the same trees apart from the date stamp.
    pub fn assemble(&mut self, options: &AssemblyOptions) -> Result<()> {
        if options.rebuild_tables {
            rebuild_tables(&mut self.ctx, &mut self.content)?;
        }
        self.emit_automatic_styles()?;
        self.emit_common_styles()?;

        let mut meta = self.ctx.metadata_mut();
        if options.stamp_modification_date {
            meta.set_modification_date(chrono::Local::now().naive_local())?;
        }
        if let Some(generator) = &options.generator {
            meta.set_generator(generator)?;
        }
        Ok(())
    }

    fn emit_automatic_styles(&mut self) -> Result<()> {
        let container = self.parts.automatic_styles;
        let store = self.ctx.store_mut();
        let mut present: HashSet<String> = store
            .children(container)
            .iter()
            .filter_map(|child| store.attribute(*child, STYLE_NAME))
            .map(str::to_string)
            .collect();

        let mut emitted = 0;
        for entry in self.styles.iter() {
            let node = entry.node();
            if store.parent(node) == Some(container) {
                continue;
            }
            if let Some(name) = entry.name() {
                if present.contains(name) {
                    log::debug!("automatic style '{name}' already present, not emitted");
                    continue;
                }
                present.insert(name.to_string());
            }
            store.append_child(container, node)?;
            emitted += 1;
        }
        log::debug!("emitted {emitted} automatic styles");
        Ok(())
    }

    fn emit_common_styles(&mut self) -> Result<()> {
        let container = self.parts.common_styles;
        let store = self.ctx.store_mut();
        store.clear_children(container)?;
        for entry in self.common_styles.iter() {
            store.append_child(container, entry.node())?;
        }
        Ok(())
    }
}
