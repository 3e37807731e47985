// src/models/region.rs
use serde::Serialize;

pub const DEFAULT_REGION: &str = "US";

/// A selectable country and the region code used to scope catalog queries.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    pub code: &'static str,
}

/// Regions offered in the country selector, in display order.
pub const REGIONS: [Region; 16] = [
    Region { name: "United States", code: "US" },
    Region { name: "United Kingdom", code: "GB" },
    Region { name: "India", code: "IN" },
    Region { name: "Bangladesh", code: "BD" },
    Region { name: "Canada", code: "CA" },
    Region { name: "Australia", code: "AU" },
    Region { name: "Japan", code: "JP" },
    Region { name: "South Korea", code: "KR" },
    Region { name: "Brazil", code: "BR" },
    Region { name: "France", code: "FR" },
    Region { name: "Germany", code: "DE" },
    Region { name: "Spain", code: "ES" },
    Region { name: "Italy", code: "IT" },
    Region { name: "Russia", code: "RU" },
    Region { name: "Mexico", code: "MX" },
    Region { name: "Indonesia", code: "ID" },
];

pub fn is_known_region(code: &str) -> bool {
    REGIONS.iter().any(|r| r.code == code)
}
