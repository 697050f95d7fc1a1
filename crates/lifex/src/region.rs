//! Catalog of region codes that can be requested from the dataset.
//!
//! The catalog is closed: it covers individual countries (plus a few
//! country-level variants such as `DE_TOT` and `FX`) and eight aggregate
//! groupings. Declaration order is significant; listings follow it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LifexError;

macro_rules! regions {
    ($($variant:ident => $code:literal),* $(,)?) => {
        /// A geographic code present in the life-expectancy dataset.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(into = "&'static str", try_from = "String")]
        pub enum Region {
            $($variant,)*
        }

        impl Region {
            /// Every code, in declaration order.
            pub const ALL: &'static [Region] = &[$(Region::$variant,)*];

            /// The code as it appears in source files.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Region::$variant => $code,)*
                }
            }
        }
    };
}

regions! {
    At => "AT",
    Be => "BE",
    Bg => "BG",
    Ch => "CH",
    Cy => "CY",
    Cz => "CZ",
    Dk => "DK",
    Ee => "EE",
    El => "EL",
    Es => "ES",
    Fi => "FI",
    Fr => "FR",
    Hr => "HR",
    Hu => "HU",
    Is => "IS",
    It => "IT",
    Li => "LI",
    Lt => "LT",
    Lu => "LU",
    Lv => "LV",
    Mt => "MT",
    Nl => "NL",
    No => "NO",
    Pl => "PL",
    Pt => "PT",
    Ro => "RO",
    Se => "SE",
    Si => "SI",
    Sk => "SK",
    De => "DE",
    DeTot => "DE_TOT",
    Al => "AL",
    Ie => "IE",
    Me => "ME",
    Mk => "MK",
    Rs => "RS",
    Am => "AM",
    Az => "AZ",
    Ge => "GE",
    Tr => "TR",
    Ua => "UA",
    By => "BY",
    Uk => "UK",
    Xk => "XK",
    Fx => "FX",
    Md => "MD",
    Sm => "SM",
    Ru => "RU",
    Eea30_2007 => "EEA30_2007",
    Eu27_2007 => "EU27_2007",
    Eu27_2020 => "EU27_2020",
    Eea31 => "EEA31",
    Efta => "EFTA",
    Ea18 => "EA18",
    Ea19 => "EA19",
    Eu28 => "EU28",
}

/// Aggregate codes that stand for a set of countries.
const GROUPINGS: [Region; 8] = [
    Region::Eea30_2007,
    Region::Eu27_2007,
    Region::Eu27_2020,
    Region::Eea31,
    Region::Efta,
    Region::Ea18,
    Region::Ea19,
    Region::Eu28,
];

impl Region {
    /// Look up a code (exact, case-sensitive).
    pub fn from_code(code: &str) -> Option<Region> {
        Self::ALL.iter().copied().find(|r| r.as_str() == code)
    }

    /// Returns true if `code` names a region in the catalog.
    pub fn is_valid(code: &str) -> bool {
        Self::from_code(code).is_some()
    }

    /// Returns true for aggregate groupings such as `EU28` or `EFTA`.
    pub fn is_grouping(&self) -> bool {
        GROUPINGS.contains(self)
    }

    /// All codes except the aggregate groupings, in declaration order.
    pub fn list_countries() -> Vec<Region> {
        Self::ALL
            .iter()
            .copied()
            .filter(|r| !r.is_grouping())
            .collect()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = LifexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::from_code(s).ok_or_else(|| LifexError::InvalidRegion(s.to_string()))
    }
}

impl From<Region> for &'static str {
    fn from(region: Region) -> Self {
        region.as_str()
    }
}

impl TryFrom<String> for Region {
    type Error = LifexError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size() {
        assert_eq!(Region::ALL.len(), 56);
        assert_eq!(Region::ALL[0], Region::At);
        assert_eq!(Region::ALL[55], Region::Eu28);
    }

    #[test]
    fn test_is_valid() {
        assert!(Region::is_valid("PT"));
        assert!(Region::is_valid("DE_TOT"));
        assert!(Region::is_valid("EU27_2020"));
        assert!(!Region::is_valid("pt"));
        assert!(!Region::is_valid("XX"));
        assert!(!Region::is_valid(""));
    }

    #[test]
    fn test_list_countries_excludes_groupings() {
        let countries = Region::list_countries();

        assert_eq!(countries.len(), 48);
        assert!(countries.iter().all(|r| !r.is_grouping()));
        assert_eq!(countries.first(), Some(&Region::At));
        assert_eq!(countries.last(), Some(&Region::Ru));
        assert!(countries.contains(&Region::DeTot));
        assert!(countries.contains(&Region::Fx));
        assert!(!countries.contains(&Region::Efta));
    }

    #[test]
    fn test_list_countries_keeps_declaration_order() {
        let codes: Vec<&str> = Region::list_countries().iter().map(|r| r.as_str()).collect();
        assert_eq!(&codes[..5], &["AT", "BE", "BG", "CH", "CY"]);
        assert_eq!(&codes[28..32], &["SK", "DE", "DE_TOT", "AL"]);
    }

    #[test]
    fn test_parse_and_display() {
        let region: Region = "PT".parse().unwrap();
        assert_eq!(region, Region::Pt);
        assert_eq!(region.to_string(), "PT");

        let err = "Portugal".parse::<Region>().unwrap_err();
        assert!(matches!(err, LifexError::InvalidRegion(ref code) if code == "Portugal"));
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&Region::Eea30_2007).unwrap();
        assert_eq!(json, "\"EEA30_2007\"");

        let parsed: Region = serde_json::from_str("\"UK\"").unwrap();
        assert_eq!(parsed, Region::Uk);
        assert!(serde_json::from_str::<Region>("\"ZZ\"").is_err());
    }
}
