//! Country name to map identifier lookup
//!
//! The choropleth locates regions by ISO 3166-1 alpha-3 code. The source CSV
//! only carries display names, so every row is annotated from this table.
//! The EU-27 aggregate gets a pseudo-code that never matches a map region.

/// Display name → 3-letter identifier
const COUNTRY_CODES: &[(&str, &str)] = &[
    ("Belgium", "BEL"),
    ("Bulgaria", "BGR"),
    ("Czechia", "CZE"),
    ("Denmark", "DNK"),
    ("Germany", "DEU"),
    ("Estonia", "EST"),
    ("Ireland", "IRL"),
    ("Greece", "GRC"),
    ("Spain", "ESP"),
    ("France", "FRA"),
    ("Croatia", "HRV"),
    ("Italy", "ITA"),
    ("Cyprus", "CYP"),
    ("Latvia", "LVA"),
    ("Lithuania", "LTU"),
    ("Luxembourg", "LUX"),
    ("Hungary", "HUN"),
    ("Malta", "MLT"),
    ("Netherlands", "NLD"),
    ("Austria", "AUT"),
    ("Poland", "POL"),
    ("Portugal", "PRT"),
    ("Romania", "ROU"),
    ("Slovenia", "SVN"),
    ("Slovakia", "SVK"),
    ("Finland", "FIN"),
    ("Sweden", "SWE"),
    ("Norway", "NOR"),
    ("Albania", "ALB"),
    ("Bosnia and Herzegovina", "BIH"),
    ("European Union - 27 countries (from 2020)", "EU27"),
    ("Montenegro", "MNE"),
    ("North Macedonia", "MKD"),
    ("Serbia", "SRB"),
    ("Türkiye", "TUR"),
];

/// Look up the map identifier for a country display name.
///
/// Matching is exact; names not in the table yield `None`.
pub fn iso_alpha(country: &str) -> Option<&'static str> {
    COUNTRY_CODES
        .iter()
        .find(|(name, _)| *name == country)
        .map(|(_, code)| *code)
}

/// All known (name, code) pairs
pub fn all() -> &'static [(&'static str, &'static str)] {
    COUNTRY_CODES
}
