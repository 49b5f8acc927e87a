//! Base items, their pack-size variants, and vendor codes

use serde::Serialize;
use std::collections::BTreeMap;

/// Vendor name under which Amazon codes are filed
pub const AMAZON: &str = "Amazon";

/// Vendor name under which eBay codes are filed
pub const EBAY: &str = "eBay";

/// Index of a [`BaseItem`] within its registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BaseId(pub(crate) usize);

/// Index of a [`Variant`] within its registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VariantId(pub(crate) usize);

/// Codes a vendor lists a variant under
///
/// Most vendors use a single code. eBay files each listing under an
/// (online, retail) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VendorCodes {
    Single(String),
    Pair(String, String),
}

impl VendorCodes {
    /// Build from an ordered code list; `None` when the list is empty or
    /// longer than a pair
    pub fn from_codes(codes: &[String]) -> Option<Self> {
        match codes {
            [one] => Some(VendorCodes::Single(one.clone())),
            [first, second] => Some(VendorCodes::Pair(first.clone(), second.clone())),
            _ => None,
        }
    }

    /// The first-listed code, used as the vendor index key
    pub fn primary(&self) -> &str {
        match self {
            VendorCodes::Single(code) => code,
            VendorCodes::Pair(first, _) => first,
        }
    }
}

impl std::fmt::Display for VendorCodes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VendorCodes::Single(code) => write!(f, "{}", code),
            VendorCodes::Pair(first, second) => write!(f, "{}/{}", first, second),
        }
    }
}

/// One physical product family, holding the authoritative stock level
#[derive(Debug, Clone, Serialize)]
pub struct BaseItem {
    base_code: String,
    stock_level: Option<f64>,
    #[serde(skip)]
    variants: Vec<VariantId>,
}

impl BaseItem {
    pub(crate) fn new(base_code: impl Into<String>) -> Self {
        Self {
            base_code: base_code.into(),
            stock_level: None,
            variants: Vec::new(),
        }
    }

    pub fn base_code(&self) -> &str {
        &self.base_code
    }

    /// Last stock level set on this item, if the stock feed covered it
    pub fn stock_level(&self) -> Option<f64> {
        self.stock_level
    }

    /// Variants owned by this item, in creation order
    pub fn variants(&self) -> &[VariantId] {
        &self.variants
    }

    pub(crate) fn add_variant(&mut self, id: VariantId) {
        self.variants.push(id);
    }

    pub(crate) fn store_stock_level(&mut self, level: f64) {
        self.stock_level = Some(level);
    }
}

/// A base item sold as a pack of `multiplier` units
#[derive(Debug, Clone, Serialize)]
pub struct Variant {
    #[serde(skip)]
    base: BaseId,
    base_code: String,
    multiplier: u32,
    vendor_codes: BTreeMap<String, VendorCodes>,
    derived_stock: i64,
}

impl Variant {
    pub(crate) fn new(base: BaseId, base_code: impl Into<String>, multiplier: u32) -> Self {
        Self {
            base,
            base_code: base_code.into(),
            multiplier,
            vendor_codes: BTreeMap::new(),
            derived_stock: 0,
        }
    }

    /// The owning base item
    pub fn base(&self) -> BaseId {
        self.base
    }

    pub fn base_code(&self) -> &str {
        &self.base_code
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Stock visible to vendors; 0 until the base item's level is set
    pub fn derived_stock(&self) -> i64 {
        self.derived_stock
    }

    pub fn vendor_codes(&self) -> &BTreeMap<String, VendorCodes> {
        &self.vendor_codes
    }

    pub fn codes_for(&self, vendor: &str) -> Option<&VendorCodes> {
        self.vendor_codes.get(vendor)
    }

    /// Record codes for a vendor; a vendor seen again replaces its old codes
    pub(crate) fn merge_codes(&mut self, vendor: &str, codes: VendorCodes) {
        self.vendor_codes.insert(vendor.to_string(), codes);
    }

    pub(crate) fn store_derived_stock(&mut self, stock: i64) {
        self.derived_stock = stock;
    }
}

/// `floor(level / multiplier)`, or `None` for a zero multiplier
///
/// Results beyond the `i64` range saturate; the stock feed reader rejects
/// levels that large before they get here.
pub fn derive_stock(level: f64, multiplier: u32) -> Option<i64> {
    if multiplier == 0 {
        return None;
    }
    Some((level / f64::from(multiplier)).floor() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_codes_from_codes() {
        let one = vec!["A".to_string()];
        let two = vec!["A".to_string(), "B".to_string()];
        let three = vec!["A".to_string(), "B".to_string(), "C".to_string()];

        assert_eq!(
            VendorCodes::from_codes(&one),
            Some(VendorCodes::Single("A".to_string()))
        );
        assert_eq!(
            VendorCodes::from_codes(&two),
            Some(VendorCodes::Pair("A".to_string(), "B".to_string()))
        );
        assert_eq!(VendorCodes::from_codes(&three), None);
        assert_eq!(VendorCodes::from_codes(&[]), None);
    }

    #[test]
    fn test_primary_code_is_first_listed() {
        let pair = VendorCodes::Pair("ONLINE".to_string(), "RETAIL".to_string());
        assert_eq!(pair.primary(), "ONLINE");
        assert_eq!(pair.to_string(), "ONLINE/RETAIL");
    }

    #[test]
    fn test_derive_stock_rounds_down() {
        assert_eq!(derive_stock(10.0, 2), Some(5));
        assert_eq!(derive_stock(10.0, 3), Some(3));
        assert_eq!(derive_stock(1.0, 4), Some(0));
        assert_eq!(derive_stock(10.9, 1), Some(10));
        assert_eq!(derive_stock(-3.0, 2), Some(-2));
        assert_eq!(derive_stock(10.0, 0), None);
    }

    #[test]
    fn test_variant_codes_last_write_wins() {
        let mut variant = Variant::new(BaseId(0), "X1", 2);
        variant.merge_codes(AMAZON, VendorCodes::Single("OLD".to_string()));
        variant.merge_codes(EBAY, VendorCodes::Pair("E1".to_string(), "E2".to_string()));
        variant.merge_codes(AMAZON, VendorCodes::Single("NEW".to_string()));

        assert_eq!(
            variant.codes_for(AMAZON),
            Some(&VendorCodes::Single("NEW".to_string()))
        );
        assert_eq!(variant.vendor_codes().len(), 2);
    }
}
