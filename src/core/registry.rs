//! Arena of base items and variants, plus the per-vendor code index
//!
//! Base items own their variants through [`VariantId`] indices and variants
//! point back at their owner through a [`BaseId`]. Nothing holds a direct
//! reference, so the graph has no cycles and fan-out is a plain index walk.

use std::collections::{BTreeMap, HashMap};

use crate::core::error::{FeedError, Result};
use crate::core::model::{derive_stock, BaseId, BaseItem, Variant, VariantId};

/// All base items and variants seen in a catalog
#[derive(Debug, Default)]
pub struct BaseItemRegistry {
    bases: Vec<BaseItem>,
    variants: Vec<Variant>,
    /// Maps base code to its item
    by_code: HashMap<String, BaseId>,
    /// Maps (base, multiplier) to its variant
    by_pack: HashMap<(BaseId, u32), VariantId>,
}

impl BaseItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the item for `base_code`, creating it on first sight
    pub fn resolve_base(&mut self, base_code: &str) -> BaseId {
        if let Some(&id) = self.by_code.get(base_code) {
            return id;
        }
        let id = BaseId(self.bases.len());
        self.bases.push(BaseItem::new(base_code));
        self.by_code.insert(base_code.to_string(), id);
        tracing::debug!(base_code, "created base item");
        id
    }

    /// Find the variant of `base` with `multiplier`, creating it on first sight
    pub fn resolve_variant(&mut self, base: BaseId, multiplier: u32) -> VariantId {
        if let Some(&id) = self.by_pack.get(&(base, multiplier)) {
            return id;
        }
        let id = VariantId(self.variants.len());
        let base_code = self.bases[base.0].base_code().to_string();
        self.variants.push(Variant::new(base, &base_code, multiplier));
        self.bases[base.0].add_variant(id);
        self.by_pack.insert((base, multiplier), id);
        tracing::debug!(base_code = %base_code, multiplier, "created variant");
        id
    }

    pub fn base_id(&self, base_code: &str) -> Option<BaseId> {
        self.by_code.get(base_code).copied()
    }

    pub fn base(&self, id: BaseId) -> &BaseItem {
        &self.bases[id.0]
    }

    pub fn get_base(&self, base_code: &str) -> Option<&BaseItem> {
        self.base_id(base_code).map(|id| self.base(id))
    }

    pub fn variant(&self, id: VariantId) -> &Variant {
        &self.variants[id.0]
    }

    pub(crate) fn variant_mut(&mut self, id: VariantId) -> &mut Variant {
        &mut self.variants[id.0]
    }

    /// Look up a variant by its identity pair
    pub fn find_variant(&self, base_code: &str, multiplier: u32) -> Option<&Variant> {
        let base = self.base_id(base_code)?;
        self.by_pack
            .get(&(base, multiplier))
            .map(|&id| self.variant(id))
    }

    /// Variants of a base item, in creation order
    pub fn variants_of(&self, base: BaseId) -> impl Iterator<Item = &Variant> {
        self.bases[base.0]
            .variants()
            .iter()
            .map(move |&id| self.variant(id))
    }

    pub fn bases(&self) -> impl Iterator<Item = &BaseItem> {
        self.bases.iter()
    }

    pub fn variants(&self) -> impl Iterator<Item = &Variant> {
        self.variants.iter()
    }

    pub fn base_count(&self) -> usize {
        self.bases.len()
    }

    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Set the authoritative stock level of `base` and recompute every
    /// child's derived stock
    ///
    /// All multipliers are checked before anything is written, so a zero
    /// multiplier leaves the item and its variants untouched.
    pub fn set_stock_level(&mut self, base: BaseId, level: f64) -> Result<usize> {
        let mut derived = Vec::with_capacity(self.bases[base.0].variants().len());
        for &id in self.bases[base.0].variants() {
            let variant = &self.variants[id.0];
            let stock = derive_stock(level, variant.multiplier()).ok_or_else(|| {
                FeedError::ZeroMultiplier {
                    base_code: variant.base_code().to_string(),
                    multiplier: variant.multiplier(),
                }
            })?;
            derived.push((id, stock));
        }

        self.bases[base.0].store_stock_level(level);
        for &(id, stock) in &derived {
            self.variants[id.0].store_derived_stock(stock);
        }
        Ok(derived.len())
    }
}

/// Vendor name → first-listed vendor code → variant
#[derive(Debug, Default, Clone)]
pub struct VendorIndex {
    vendors: BTreeMap<String, BTreeMap<String, VariantId>>,
}

impl VendorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure `vendor` has an index, even if it ends up empty
    pub fn add_vendor(&mut self, vendor: &str) {
        self.vendors.entry(vendor.to_string()).or_default();
    }

    /// Point `code` at `variant` for `vendor`; a code registered earlier is
    /// overwritten
    pub fn register(&mut self, vendor: &str, code: &str, variant: VariantId) {
        let previous = self
            .vendors
            .entry(vendor.to_string())
            .or_default()
            .insert(code.to_string(), variant);
        if previous.is_some_and(|p| p != variant) {
            tracing::debug!(vendor, code, "vendor code reassigned to a later variant");
        }
    }

    /// Drop `code` from `vendor`'s index, but only while it still points at
    /// `variant`
    pub fn unregister(&mut self, vendor: &str, code: &str, variant: VariantId) -> bool {
        let Some(codes) = self.vendors.get_mut(vendor) else {
            return false;
        };
        if codes.get(code) == Some(&variant) {
            codes.remove(code);
            true
        } else {
            false
        }
    }

    pub fn lookup(&self, vendor: &str, code: &str) -> Option<VariantId> {
        self.vendors.get(vendor)?.get(code).copied()
    }

    /// Entries for one vendor, ordered by code
    pub fn entries(&self, vendor: &str) -> Option<impl Iterator<Item = (&str, VariantId)>> {
        self.vendors
            .get(vendor)
            .map(|codes| codes.iter().map(|(code, &id)| (code.as_str(), id)))
    }

    pub fn vendors(&self) -> impl Iterator<Item = &str> {
        self.vendors.keys().map(|v| v.as_str())
    }

    pub fn len(&self, vendor: &str) -> usize {
        self.vendors.get(vendor).map_or(0, |codes| codes.len())
    }

    pub fn has_vendor(&self, vendor: &str) -> bool {
        self.vendors.contains_key(vendor)
    }
}
