//! Shared keyword lexicon
//!
//! Single source for every keyword table used by the title generator, the
//! department correction rules, and the keyword fallback classifier. The
//! tables are declared once here and referenced everywhere, so a vocabulary
//! change lands in one place.

use civic_common::labels::Department;

/// Issue keyword -> title table.
///
/// Ordered longest keyword first (ties keep table order), so a scan that
/// takes the first containment match resolves "street light" before "light".
pub const ISSUE_TITLES: &[(&str, &str)] = &[
    ("street light", "Streetlight Issue"),
    ("streetlight", "Streetlight Issue"),
    ("not working", "Malfunction"),
    ("mosquitoes", "Mosquito Problem"),
    ("overflow", "Overflow Issue"),
    ("mosquito", "Mosquito Problem"),
    ("bathroom", "Bathroom Problem"),
    ("pothole", "Pothole Issue"),
    ("garbage", "Garbage Problem"),
    ("damaged", "Damage Report"),
    ("blocked", "Blockage Issue"),
    ("insects", "Insect Problem"),
    ("rodents", "Rodent Problem"),
    ("broken", "Broken Item"),
    ("toilet", "Toilet Issue"),
    ("sewage", "Sewage Issue"),
    ("trash", "Waste Issue"),
    ("waste", "Waste Problem"),
    ("light", "Lighting Issue"),
    ("water", "Water Issue"),
    ("drain", "Drainage Issue"),
    ("dirty", "Cleanliness Issue"),
    ("noise", "Noise Problem"),
    ("smell", "Odor Issue"),
    ("crack", "Crack Issue"),
    ("flies", "Fly Problem"),
    ("sewer", "Sewer Problem"),
    ("leak", "Water Leak"),
    ("pipe", "Pipe Issue"),
    ("road", "Road Problem"),
    ("dust", "Dust Problem"),
    ("hole", "Hole Problem"),
    ("pest", "Pest Issue"),
    ("rats", "Rodent Problem"),
];

/// Action pattern -> title table, checked after issue keywords
pub const ACTION_TITLES: &[(&str, &str)] = &[
    ("everywhere", "Widespread Issue"),
    ("causing", "Problem Report"),
    ("need", "Repair Needed"),
    ("fix", "Fix Required"),
    ("repair", "Repair Needed"),
];

/// Generic title for a department when no keyword matched
pub fn department_title(department: Department) -> &'static str {
    match department {
        Department::Sanitation => "Sanitation Issue",
        Department::Roads => "Road Issue",
        Department::Electricity => "Electrical Issue",
        Department::Water => "Water Issue",
        Department::Health => "Health Issue",
        Department::Environment => "Environmental Issue",
        Department::Safety => "Safety Issue",
    }
}

/// Stop words dropped by the heuristic title extraction
pub const STOP_WORDS: &[&str] = &["the", "and", "are", "is", "on", "in", "at", "to", "of"];

/// Keywords that mark a severe issue in the keyword fallback classifier
pub const HIGH_SEVERITY_KEYWORDS: &[&str] = &[
    "emergency",
    "urgent",
    "dangerous",
    "severe",
    "critical",
    "major",
    "serious",
    "broken",
    "overflow",
    "blocked completely",
];

/// Keywords that mark a minor issue in the keyword fallback classifier
pub const LOW_SEVERITY_KEYWORDS: &[&str] = &["minor", "small", "little", "slight", "cosmetic"];

/// Per-department keyword sets for the fallback classifier
pub fn department_keywords(department: Department) -> &'static [&'static str] {
    match department {
        Department::Sanitation => &[
            "garbage", "trash", "waste", "dump", "litter", "dirty", "smell", "odor", "toilet",
            "bathroom", "sewage", "sewer", "mosquito", "mosquitoes", "pest", "insects", "flies",
            "rats", "rodents", "cleaning", "hygiene",
        ],
        Department::Roads => &[
            "road",
            "street",
            "pothole",
            "traffic",
            "vehicle",
            "parking",
            "signal",
            "zebra crossing",
            "footpath",
            "sidewalk",
            "pavement",
        ],
        Department::Electricity => &[
            "electricity",
            "power",
            "light",
            "streetlight",
            "street light",
            "bulb",
            "wire",
            "pole",
            "transformer",
        ],
        Department::Water => &[
            "water",
            "leak",
            "pipe",
            "drain",
            "drainage",
            "tap",
            "supply",
            "pressure",
            "quality",
            "contaminated",
            "shortage",
        ],
        Department::Health => &[
            "health",
            "medical",
            "hospital",
            "clinic",
            "disease",
            "illness",
            "contamination",
        ],
        Department::Environment => &[
            "environment",
            "pollution",
            "air",
            "noise",
            "dust",
            "tree",
            "park",
            "green",
        ],
        Department::Safety => &[
            "safety",
            "security",
            "crime",
            "theft",
            "violence",
            "accident",
            "emergency",
        ],
    }
}

/// Keywords that pull a misclassified report toward Sanitation
pub const SANITATION_CORRECTION_KEYWORDS: &[&str] = &[
    "mosquito",
    "mosquitoes",
    "pest",
    "insects",
    "flies",
    "rats",
    "rodents",
    "garbage",
    "trash",
    "waste",
    "dump",
    "litter",
    "dirty",
    "smell",
    "odor",
    "toilet",
    "bathroom",
    "sewage",
    "sewer",
    "cleaning",
    "hygiene",
];

/// Keywords that pull a misclassified report toward Water Supply
pub const WATER_CORRECTION_KEYWORDS: &[&str] = &[
    "water supply",
    "tap water",
    "drinking water",
    "water shortage",
    "no water",
    "water pressure",
    "water quality",
    "contaminated water",
];

/// Keywords that pull a misclassified report toward Roads
pub const ROADS_CORRECTION_KEYWORDS: &[&str] = &[
    "traffic",
    "vehicle",
    "parking",
    "signal",
    "zebra crossing",
    "footpath",
    "sidewalk",
    "pavement",
];
