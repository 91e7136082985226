use serde::{Deserialize, Serialize};

/// A page section surfaced by search assist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Section {
    /// True when any non-empty keyword occurs in the (already normalized) query.
    pub fn matches(&self, normalized_query: &str) -> bool {
        self.keywords.iter().any(|keyword| {
            let keyword = keyword.trim().to_lowercase();
            !keyword.is_empty() && normalized_query.contains(&keyword)
        })
    }
}

/// The whole site content document. Replaced wholesale on every admin update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl SiteContent {
    /// Document written on first start when no content file exists.
    pub fn starter() -> Self {
        let section = |id: &str, title: &str, summary: &str, keywords: &[&str]| Section {
            id: id.to_string(),
            title: title.to_string(),
            summary: summary.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        };
        Self {
            sections: vec![
                section(
                    "services",
                    "Services",
                    "Skin fades, beard sculpting and hot towel shaves.",
                    &["services", "cut", "fade", "trim", "shave", "hot towel"],
                ),
                section(
                    "book",
                    "Book a chair",
                    "Reserve a slot at your nearest shop.",
                    &["book", "booking", "appointment", "slot"],
                ),
                section(
                    "shop",
                    "Shop",
                    "Razor, shaving cream, beard oil and pomade.",
                    &["shop", "buy", "razor", "cream", "oil", "pomade", "price"],
                ),
                section(
                    "rewards",
                    "Blade Rewards",
                    "Join free and collect points on every visit.",
                    &["rewards", "points", "member", "loyalty"],
                ),
                section(
                    "franchise",
                    "Franchise",
                    "Open a Blade shop with our setup and growth support.",
                    &["franchise", "partner", "invest"],
                ),
                section(
                    "locations",
                    "Locations",
                    "Morriston, Gorseinon and Skewen.",
                    &["location", "where", "address", "morriston", "gorseinon", "skewen"],
                ),
            ],
        }
    }

    pub fn matching_sections(&self, normalized_query: &str) -> Vec<Section> {
        self.sections
            .iter()
            .filter(|s| s.matches(normalized_query))
            .cloned()
            .collect()
    }
}
