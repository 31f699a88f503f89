//! Country catalog.
//!
//! Countries are read-only catalog entries: created once, never mutated.

use serde::{Deserialize, Serialize};

/// A selectable country.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code, unique within the catalog.
    pub code: String,
    /// Display name.
    pub name: String,
}

impl Country {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

const CATALOG: &[(&str, &str)] = &[
    ("AF", "Afghanistan"),
    ("AL", "Albania"),
    ("DZ", "Algeria"),
    ("AO", "Angola"),
    ("AR", "Argentina"),
    ("AM", "Armenia"),
    ("AU", "Australia"),
    ("AT", "Austria"),
    ("AZ", "Azerbaijan"),
    ("BD", "Bangladesh"),
    ("BR", "Brazil"),
    ("CA", "Canada"),
    ("CN", "China"),
    ("ET", "Ethiopia"),
    ("FR", "France"),
    ("DE", "Germany"),
    ("IN", "India"),
    ("IT", "Italy"),
    ("JP", "Japan"),
    ("KE", "Kenya"),
    ("MX", "Mexico"),
    ("NG", "Nigeria"),
    ("PK", "Pakistan"),
    ("RU", "Russia"),
    ("SA", "Saudi Arabia"),
    ("SO", "Somalia"),
    ("ZA", "South Africa"),
    ("KR", "South Korea"),
    ("ES", "Spain"),
    ("SD", "Sudan"),
    ("TR", "Turkey"),
    ("UG", "Uganda"),
    ("GB", "United Kingdom"),
    ("US", "United States"),
    ("YE", "Yemen"),
];

/// Returns the full catalog in display order.
pub fn catalog() -> Vec<Country> {
    CATALOG
        .iter()
        .map(|(code, name)| Country::new(*code, *name))
        .collect()
}

/// Looks up a country by code, case-insensitively.
pub fn find_by_code(code: &str) -> Option<Country> {
    let code = code.trim();
    CATALOG
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(code, name)| Country::new(*code, *name))
}
