use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Market cities known to the Albion Online Data Project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    Caerleon,
    Bridgewatch,
    FortSterling,
    Lymhurst,
    Martlock,
    Thetford,
    Brecilien,
}

impl City {
    /// Every market city, in the order price tables list them.
    pub const ALL: [City; 7] = [
        City::Caerleon,
        City::Bridgewatch,
        City::FortSterling,
        City::Lymhurst,
        City::Martlock,
        City::Thetford,
        City::Brecilien,
    ];

    /// Location name used by the upstream API.
    pub fn api_name(&self) -> &'static str {
        match self {
            City::Caerleon => "Caerleon",
            City::Bridgewatch => "Bridgewatch",
            City::FortSterling => "Fort Sterling",
            City::Lymhurst => "Lymhurst",
            City::Martlock => "Martlock",
            City::Thetford => "Thetford",
            City::Brecilien => "Brecilien",
        }
    }

    pub fn korean_name(&self) -> &'static str {
        match self {
            City::Caerleon => "카얼레온",
            City::Bridgewatch => "브릿지워치",
            City::FortSterling => "포트 스털링",
            City::Lymhurst => "림허스트",
            City::Martlock => "마트록",
            City::Thetford => "씨어드",
            City::Brecilien => "브레실리엔",
        }
    }

    /// API names of every city, for default price lookups.
    pub fn all_api_names() -> Vec<String> {
        Self::ALL.iter().map(|c| c.api_name().to_string()).collect()
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

impl FromStr for City {
    type Err = String;

    /// Accepts the API name (case and spacing insensitive) or the Korean name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.split_whitespace().collect::<String>().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|city| {
                let api: String = city.api_name().split_whitespace().collect();
                let korean: String = city.korean_name().split_whitespace().collect();
                api.to_lowercase() == wanted || korean == wanted
            })
            .ok_or_else(|| format!("Unknown city: {}", s))
    }
}
