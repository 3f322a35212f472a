//! Static query-term tables and endpoint selection.
//!
//! The API exposes three query axes. A term is matched against the fixed
//! body-part and target-muscle tables; anything else is a free-text name
//! search.

/// Body-part categories, in the order `export_all` iterates them.
pub const BODY_PARTS: &[&str] = &[
    "back",
    "cardio",
    "chest",
    "lower arms",
    "lower legs",
    "neck",
    "shoulders",
    "upper arms",
    "upper legs",
    "waist",
];

pub const TARGET_MUSCLES: &[&str] = &[
    "abductors",
    "abs",
    "adductors",
    "biceps",
    "calves",
    "cardiovascular system",
    "delts",
    "forearms",
    "glutes",
    "hamstrings",
    "lats",
    "levator scapulae",
    "pectorals",
    "quads",
    "serratus anterior",
    "spine",
    "traps",
    "triceps",
    "upper back",
];

pub const EQUIPMENT: &[&str] = &[
    "ez barbell",
    "dumbbell",
    "weighted",
    "smith machine",
    "medicine ball",
    "barbell",
];

/// Which endpoint a query term resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryKind {
    BodyPart,
    Target,
    Name,
}

impl QueryKind {
    pub fn classify(term: &str) -> Self {
        if BODY_PARTS.contains(&term) {
            Self::BodyPart
        } else if TARGET_MUSCLES.contains(&term) {
            Self::Target
        } else {
            Self::Name
        }
    }
}

/// Endpoint path for a term, with spaces percent-encoded.
pub fn url_path(term: &str) -> String {
    let encoded = term.trim().replace(' ', "%20");
    match QueryKind::classify(term) {
        QueryKind::BodyPart => format!("/exercises/bodyPart/{encoded}"),
        QueryKind::Target => format!("/exercises/target/{encoded}"),
        QueryKind::Name => format!("/exercises/name/{encoded}"),
    }
}

/// Cache file name for a term: `exercises_<term_with_underscores>.json`.
pub fn cache_file_name(term: &str) -> String {
    format!("exercises_{}.json", term.replace(' ', "_"))
}
