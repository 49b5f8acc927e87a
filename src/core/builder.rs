//! Item graph construction from normalized catalog records

use crate::core::error::{FeedError, Result};
use crate::core::model::VendorCodes;
use crate::core::records::CatalogRecord;
use crate::core::registry::{BaseItemRegistry, VendorIndex};

/// Build the base item registry and vendor index from catalog records
///
/// Records are applied in order. A repeated (base code, multiplier) pair
/// reuses its variant and accumulates vendor codes; the same vendor seen
/// again on that variant replaces its earlier codes. Every name in
/// `vendor_names` gets an index, even when no record mentions it.
pub fn build<'a, I>(
    records: I,
    vendor_names: impl IntoIterator<Item = &'a str>,
) -> Result<(BaseItemRegistry, VendorIndex)>
where
    I: IntoIterator<Item = &'a CatalogRecord>,
{
    let mut registry = BaseItemRegistry::new();
    let mut index = VendorIndex::new();
    for vendor in vendor_names {
        index.add_vendor(vendor);
    }

    let mut applied = 0usize;
    for record in records {
        apply_record(&mut registry, &mut index, record)?;
        applied += 1;
    }

    tracing::info!(
        records = applied,
        bases = registry.base_count(),
        variants = registry.variant_count(),
        "built item graph"
    );
    Ok((registry, index))
}

fn apply_record(
    registry: &mut BaseItemRegistry,
    index: &mut VendorIndex,
    record: &CatalogRecord,
) -> Result<()> {
    let base = registry.resolve_base(&record.base_code);
    let variant = registry.resolve_variant(base, record.multiplier);

    for (vendor, codes) in &record.vendors {
        if codes.is_empty() {
            continue;
        }
        let codes = VendorCodes::from_codes(codes).ok_or_else(|| FeedError::InvalidRecord {
            base_code: record.base_code.clone(),
            message: format!("{} codes given for {}, at most two allowed", codes.len(), vendor),
        })?;
        // A replaced primary code must not keep listing the variant
        let previous = registry
            .variant(variant)
            .codes_for(vendor)
            .map(|old| old.primary().to_string());
        if let Some(old) = previous.filter(|old| old != codes.primary()) {
            index.unregister(vendor, &old, variant);
        }

        index.register(vendor, codes.primary(), variant);
        registry.variant_mut(variant).merge_codes(vendor, codes);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{AMAZON, EBAY};

    fn vendors() -> Vec<&'static str> {
        vec![AMAZON, EBAY, "CubeCart"]
    }

    #[test]
    fn test_build_single_record() {
        let records = vec![CatalogRecord::new("X1", 2).with_vendor(AMAZON, ["AMZ-1"])];
        let (registry, index) = build(&records, vendors()).unwrap();

        assert_eq!(registry.base_count(), 1);
        assert_eq!(registry.variant_count(), 1);
        let id = index.lookup(AMAZON, "AMZ-1").unwrap();
        let variant = registry.variant(id);
        assert_eq!(variant.base_code(), "X1");
        assert_eq!(variant.multiplier(), 2);
        assert_eq!(
            variant.codes_for(AMAZON),
            Some(&VendorCodes::Single("AMZ-1".to_string()))
        );
    }

    #[test]
    fn test_repeated_pair_accumulates_vendors() {
        let records = vec![
            CatalogRecord::new("X1", 2).with_vendor(AMAZON, ["AMZ-1"]),
            CatalogRecord::new("X1", 2).with_vendor(EBAY, ["E1", "E2"]),
            CatalogRecord::new("X1", 4).with_vendor(AMAZON, ["AMZ-4"]),
        ];
        let (registry, index) = build(&records, vendors()).unwrap();

        assert_eq!(registry.base_count(), 1);
        assert_eq!(registry.variant_count(), 2);

        let pair = registry.find_variant("X1", 2).unwrap();
        assert_eq!(pair.vendor_codes().len(), 2);
        assert_eq!(
            pair.codes_for(EBAY),
            Some(&VendorCodes::Pair("E1".to_string(), "E2".to_string()))
        );
        assert_eq!(index.lookup(EBAY, "E1"), index.lookup(AMAZON, "AMZ-1"));
    }

    #[test]
    fn test_same_vendor_reappearing_replaces_codes() {
        let records = vec![
            CatalogRecord::new("X1", 2).with_vendor(AMAZON, ["OLD"]),
            CatalogRecord::new("X1", 2).with_vendor(AMAZON, ["NEW"]),
        ];
        let (registry, index) = build(&records, vendors()).unwrap();

        let variant = registry.find_variant("X1", 2).unwrap();
        assert_eq!(
            variant.codes_for(AMAZON),
            Some(&VendorCodes::Single("NEW".to_string()))
        );
        assert_eq!(index.lookup(AMAZON, "OLD"), None);
        assert!(index.lookup(AMAZON, "NEW").is_some());
        assert_eq!(index.len(AMAZON), 1);
    }

    #[test]
    fn test_replaced_code_keeps_other_variants_entry() {
        // OLD moves to the x4 variant before the x2 variant drops it
        let records = vec![
            CatalogRecord::new("X1", 2).with_vendor(AMAZON, ["OLD"]),
            CatalogRecord::new("X1", 4).with_vendor(AMAZON, ["OLD"]),
            CatalogRecord::new("X1", 2).with_vendor(AMAZON, ["NEW"]),
        ];
        let (registry, index) = build(&records, vendors()).unwrap();

        let four = index.lookup(AMAZON, "OLD").unwrap();
        assert_eq!(registry.variant(four).multiplier(), 4);
        let two = index.lookup(AMAZON, "NEW").unwrap();
        assert_eq!(registry.variant(two).multiplier(), 2);
        assert_eq!(index.len(AMAZON), 2);
    }

    #[test]
    fn test_empty_code_lists_are_ignored() {
        let records = vec![CatalogRecord::new("X1", 1).with_vendor(AMAZON, Vec::<String>::new())];
        let (registry, index) = build(&records, vendors()).unwrap();

        assert_eq!(registry.variant_count(), 1);
        assert_eq!(index.len(AMAZON), 0);
        assert!(registry.find_variant("X1", 1).unwrap().vendor_codes().is_empty());
    }

    #[test]
    fn test_too_many_codes_is_rejected() {
        let records = vec![CatalogRecord::new("X1", 1).with_vendor(EBAY, ["A", "B", "C"])];
        let err = build(&records, vendors()).unwrap_err();

        assert!(matches!(err, FeedError::InvalidRecord { ref base_code, .. } if base_code == "X1"));
    }

    #[test]
    fn test_every_vendor_gets_an_index() {
        let (_, index) = build(Vec::<CatalogRecord>::new().iter(), vendors()).unwrap();
        let names: Vec<&str> = index.vendors().collect();
        assert_eq!(names, vec![AMAZON, "CubeCart", EBAY]);
    }

    #[test]
    fn test_zero_multiplier_is_accepted_at_build_time() {
        let records = vec![CatalogRecord::new("X1", 0).with_vendor(AMAZON, ["Z"])];
        let (registry, _) = build(&records, vendors()).unwrap();
        assert_eq!(registry.find_variant("X1", 0).unwrap().multiplier(), 0);
    }
}
