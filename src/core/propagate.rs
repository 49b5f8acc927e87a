//! Stock-level propagation from base items down to their variants

use serde::Serialize;

use crate::core::error::Result;
use crate::core::records::StockRecord;
use crate::core::registry::BaseItemRegistry;

/// Counters describing one propagation pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PropagationStats {
    /// Stock rows offered
    pub rows: usize,
    /// Rows whose base code exists in the catalog
    pub matched: usize,
    /// Rows skipped because the catalog has no such base code
    pub unmatched: usize,
    /// Variant recomputations performed
    pub variants_updated: usize,
}

/// Apply every stock record to the registry
///
/// Rows for base codes the catalog does not contain are skipped; stock feeds
/// routinely cover more SKUs than the catalog lists. A base code appearing
/// twice simply takes the later level.
pub fn propagate<'a, I>(stock_records: I, registry: &mut BaseItemRegistry) -> Result<PropagationStats>
where
    I: IntoIterator<Item = &'a StockRecord>,
{
    let mut stats = PropagationStats::default();

    for record in stock_records {
        stats.rows += 1;
        let Some(base) = registry.base_id(&record.base_code) else {
            stats.unmatched += 1;
            tracing::trace!(base_code = %record.base_code, "stock row has no catalog entry");
            continue;
        };
        stats.matched += 1;
        stats.variants_updated += registry.set_stock_level(base, record.stock_level)?;
    }

    tracing::info!(
        rows = stats.rows,
        matched = stats.matched,
        unmatched = stats.unmatched,
        "propagated stock levels"
    );
    Ok(stats)
}
