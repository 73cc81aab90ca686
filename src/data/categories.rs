use crate::types::internal::Category;

/// Static category reference list, in display order
pub const CATEGORIES: [Category; 5] = [
    Category {
        id: "finance_crypto",
        name: "Finance & Crypto",
        style: Some("amber"),
    },
    Category {
        id: "technology_ai",
        name: "Technology & AI",
        style: Some("blue"),
    },
    Category {
        id: "health_wellness",
        name: "Health & Wellness",
        style: Some("emerald"),
    },
    Category {
        id: "green_tech",
        name: "Green Tech",
        style: Some("green"),
    },
    Category {
        id: "regional",
        name: "Regional News",
        style: Some("purple"),
    },
];

pub fn is_known_category(id: &str) -> bool {
    CATEGORIES.iter().any(|c| c.id == id)
}

/// Display name for a category id; blank for unknown ids
pub fn category_name(id: &str) -> &'static str {
    CATEGORIES
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name)
        .unwrap_or("")
}

/// Comma separated ids, as quoted in validation messages
pub fn category_ids() -> String {
    CATEGORIES.iter().map(|c| c.id).collect::<Vec<_>>().join(", ")
}
