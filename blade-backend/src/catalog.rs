//! Hard-coded product catalog.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    /// Whole US dollars
    pub price: u32,
    pub description: &'static str,
    pub highlight: &'static str,
    pub image: &'static str,
}

impl Product {
    /// Price in the smallest currency unit, as payment providers expect.
    pub fn unit_amount_cents(&self) -> u64 {
        u64::from(self.price) * 100
    }
}

pub const PRODUCTS: &[Product] = &[
    Product {
        id: "precision-razor",
        name: "Precision Razor",
        price: 24,
        description: "Weighted, steady, and clean. Every stroke feels controlled and smooth.",
        highlight: "Premium steel blades, balanced grip, zero drag finish.",
        image: "/images/product-razor.svg",
    },
    Product {
        id: "rich-shaving-cream",
        name: "Rich Shaving Cream",
        price: 18,
        description: "Dense, hot-towel lather that lifts the hair and protects your skin.",
        highlight: "Hydration-first formula for a barbershop-smooth finish.",
        image: "/images/product-cream.svg",
    },
    Product {
        id: "beard-oil",
        name: "Beard Oil",
        price: 22,
        description: "Softens, conditions, and keeps every line razor sharp.",
        highlight: "Light citrus-cedar scent with a clean, non-greasy feel.",
        image: "/images/product-oil.svg",
    },
    Product {
        id: "styling-pomade",
        name: "Styling Pomade",
        price: 20,
        description: "Controlled hold that looks natural and stays sharp all day.",
        highlight: "No crunch, no residue, easy rework.",
        image: "/images/product-pomade.svg",
    },
];

pub fn find_product(id: &str) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.id == id)
}
