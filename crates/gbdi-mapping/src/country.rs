//! ISO 3166-1 country resolution
//!
//! Source exports carry countries as alpha-2 codes (CarbEnMats) or English
//! names (BECD). The ingest schema wants lowercase alpha-3. The table covers
//! the countries occurring in the supported building-LCA datasets; anything
//! else resolves to the `unknown` fallback where the caller allows one.

use gbdi_lcax::Country;

/// (alpha-2, alpha-3, English short name)
const COUNTRIES: &[(&str, &str, &str)] = &[
    ("AE", "are", "United Arab Emirates"),
    ("AR", "arg", "Argentina"),
    ("AT", "aut", "Austria"),
    ("AU", "aus", "Australia"),
    ("BE", "bel", "Belgium"),
    ("BG", "bgr", "Bulgaria"),
    ("BR", "bra", "Brazil"),
    ("CA", "can", "Canada"),
    ("CH", "che", "Switzerland"),
    ("CL", "chl", "Chile"),
    ("CN", "chn", "China"),
    ("CO", "col", "Colombia"),
    ("CY", "cyp", "Cyprus"),
    ("CZ", "cze", "Czechia"),
    ("DE", "deu", "Germany"),
    ("DK", "dnk", "Denmark"),
    ("EE", "est", "Estonia"),
    ("EG", "egy", "Egypt"),
    ("ES", "esp", "Spain"),
    ("FI", "fin", "Finland"),
    ("FR", "fra", "France"),
    ("GB", "gbr", "United Kingdom"),
    ("GR", "grc", "Greece"),
    ("HK", "hkg", "Hong Kong"),
    ("HR", "hrv", "Croatia"),
    ("HU", "hun", "Hungary"),
    ("ID", "idn", "Indonesia"),
    ("IE", "irl", "Ireland"),
    ("IL", "isr", "Israel"),
    ("IN", "ind", "India"),
    ("IS", "isl", "Iceland"),
    ("IT", "ita", "Italy"),
    ("JP", "jpn", "Japan"),
    ("KE", "ken", "Kenya"),
    ("KR", "kor", "South Korea"),
    ("LT", "ltu", "Lithuania"),
    ("LU", "lux", "Luxembourg"),
    ("LV", "lva", "Latvia"),
    ("MT", "mlt", "Malta"),
    ("MX", "mex", "Mexico"),
    ("MY", "mys", "Malaysia"),
    ("NG", "nga", "Nigeria"),
    ("NL", "nld", "Netherlands"),
    ("NO", "nor", "Norway"),
    ("NZ", "nzl", "New Zealand"),
    ("PH", "phl", "Philippines"),
    ("PK", "pak", "Pakistan"),
    ("PL", "pol", "Poland"),
    ("PT", "prt", "Portugal"),
    ("RO", "rou", "Romania"),
    ("SA", "sau", "Saudi Arabia"),
    ("SE", "swe", "Sweden"),
    ("SG", "sgp", "Singapore"),
    ("SI", "svn", "Slovenia"),
    ("SK", "svk", "Slovakia"),
    ("TH", "tha", "Thailand"),
    ("TR", "tur", "Turkey"),
    ("TW", "twn", "Taiwan"),
    ("UA", "ukr", "Ukraine"),
    ("US", "usa", "United States"),
    ("VN", "vnm", "Vietnam"),
    ("ZA", "zaf", "South Africa"),
];

/// Resolve an alpha-2 code
#[must_use]
pub fn from_alpha2(code: &str) -> Option<Country> {
    let wanted = code.trim().to_uppercase();
    COUNTRIES
        .iter()
        .find(|(a2, _, _)| *a2 == wanted)
        .map(|(_, a3, _)| Country::new(*a3))
}

/// Resolve an English country name (case-insensitive)
#[must_use]
pub fn from_name(name: &str) -> Option<Country> {
    let wanted = name.trim().to_lowercase();
    COUNTRIES
        .iter()
        .find(|(_, _, n)| n.to_lowercase() == wanted)
        .map(|(_, a3, _)| Country::new(*a3))
}

/// Resolve any of alpha-2, alpha-3, or name; `None` when unrecognized
#[must_use]
pub fn resolve(input: &str) -> Option<Country> {
    let trimmed = input.trim();
    match trimmed.len() {
        2 => from_alpha2(trimmed),
        3 => {
            let wanted = trimmed.to_lowercase();
            COUNTRIES
                .iter()
                .find(|(_, a3, _)| *a3 == wanted)
                .map(|(_, a3, _)| Country::new(*a3))
        }
        _ => from_name(trimmed),
    }
}

/// Resolve like [`resolve`], falling back to the unknown country
#[must_use]
pub fn resolve_or_unknown(input: &str) -> Country {
    resolve(input).unwrap_or_else(Country::unknown)
}
