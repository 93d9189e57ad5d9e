//! Trekking essentials checklist.

use std::collections::BTreeSet;

/// The ten essentials every trekker should pack.
pub const ESSENTIALS: [&str; 10] = [
    "Water",
    "Snacks",
    "First Aid Kit",
    "Map and Compass",
    "Multi-tool or Knife",
    "Flashlight or Headlamp",
    "Sunscreen and Sunglasses",
    "Rain Gear",
    "Warm Clothing",
    "Emergency Whistle",
];

fn canonical(item: &str) -> Option<&'static str> {
    let needle = item.trim().to_lowercase();
    ESSENTIALS
        .iter()
        .copied()
        .find(|e| e.to_lowercase() == needle)
}

/// Number of distinct essentials present in `checked`. Unknown items are ignored.
pub fn coverage(checked: &BTreeSet<String>) -> usize {
    checked
        .iter()
        .filter_map(|c| canonical(c))
        .collect::<BTreeSet<_>>()
        .len()
}

/// Essentials not present in `checked`, in checklist order.
pub fn missing(checked: &BTreeSet<String>) -> Vec<&'static str> {
    let have: BTreeSet<_> = checked.iter().filter_map(|c| canonical(c)).collect();
    ESSENTIALS
        .iter()
        .copied()
        .filter(|e| !have.contains(e))
        .collect()
}

/// True when fewer than half of the essentials are checked.
pub fn is_under_packed(checked: &BTreeSet<String>) -> bool {
    coverage(checked) * 2 < ESSENTIALS.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_coverage_ignores_case_and_unknowns() {
        let checked = set(&["water", "RAIN GEAR", "Selfie stick", "Water "]);
        assert_eq!(coverage(&checked), 2);
    }

    #[test]
    fn test_missing_keeps_checklist_order() {
        let checked = set(&["Water", "Snacks", "First Aid Kit"]);
        let m = missing(&checked);
        assert_eq!(m.len(), 7);
        assert_eq!(m[0], "Map and Compass");
        assert_eq!(m[6], "Emergency Whistle");
    }

    #[test]
    fn test_half_threshold() {
        let four = set(&["Water", "Snacks", "First Aid Kit", "Rain Gear"]);
        let five = set(&["Water", "Snacks", "First Aid Kit", "Rain Gear", "Warm Clothing"]);
        assert!(is_under_packed(&four));
        assert!(!is_under_packed(&five));
        assert!(is_under_packed(&BTreeSet::new()));
    }
}
