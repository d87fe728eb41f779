//! The seeded in-process product catalog.
//!
//! There is no product backend; the catalog ships with the app and backs
//! the browse, search, and detail screens. Six products across four
//! categories, matching the seed data of the mobile client.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use rust_decimal::Decimal;

use pocket_bazaar_core::{Category, ProductId};

use crate::models::Product;

static PRODUCTS: LazyLock<Vec<Product>> = LazyLock::new(seed);

/// All catalog products, in display order.
#[must_use]
pub fn all() -> &'static [Product] {
    &PRODUCTS
}

/// Look up a product by id.
#[must_use]
pub fn get(id: &ProductId) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| &p.id == id)
}

/// Products in a category, in display order.
#[must_use]
pub fn by_category(category: Category) -> Vec<&'static Product> {
    PRODUCTS.iter().filter(|p| p.category == category).collect()
}

/// Case-insensitive substring search over name and brand.
#[must_use]
pub fn search(query: &str) -> Vec<&'static Product> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    PRODUCTS
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&query) || p.brand.to_lowercase().contains(&query)
        })
        .collect()
}

fn specs(rows: &[(&str, &str)]) -> BTreeMap<String, String> {
    rows.iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

#[allow(clippy::too_many_lines)]
fn seed() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new("1"),
            name: "APPLE MACBOOK PRO 16 TOUCHBAR".to_owned(),
            description: "The most powerful MacBook Pro ever. Features the new M3 Max chip \
                          for extreme performance."
                .to_owned(),
            price: Decimal::new(5_937_00, 2),
            discount_price: Some(Decimal::new(6_500_00, 2)),
            category: Category::Laptops,
            subcategory: "Professional".to_owned(),
            brand: "Apple".to_owned(),
            rating: 4.8,
            reviews: 245,
            stock: 5,
            recent_sales: "12 bought in last hour".to_owned(),
            image: "assets/MacBook.webp".to_owned(),
            images: vec!["assets/Mac1.webp".to_owned(), "assets/Mac2.webp".to_owned()],
            specs: specs(&[
                ("Display", "16-inch Liquid Retina XDR"),
                ("Processor", "Apple M3 Max"),
                ("RAM", "36GB"),
                ("Storage", "1TB SSD"),
            ]),
        },
        Product {
            id: ProductId::new("2"),
            name: "Apple iPhone 15 Pro Max 6.7".to_owned(),
            description: "Apple iPhone 15 Pro Max 6.7\" Unlocked 512GB - (Blue Titanium) \
                          A2849 w/Warranty."
                .to_owned(),
            price: Decimal::new(8_900_00, 2),
            discount_price: None,
            category: Category::Phones,
            subcategory: "Flagship".to_owned(),
            brand: "Apple".to_owned(),
            rating: 4.9,
            reviews: 890,
            stock: 120,
            recent_sales: "1k+ sold".to_owned(),
            image: "assets/iPhone-15-Pro-Max.webp".to_owned(),
            images: vec!["assets/iPhone-15.webp".to_owned()],
            specs: specs(&[
                ("Display", "6.7-inch Super Retina XDR"),
                ("Processor", "A17 Pro"),
                ("Camera", "48MP Main | Ultra Wide | Telephoto"),
                ("Battery", "Up to 29 hours video playback"),
            ]),
        },
        Product {
            id: ProductId::new("3"),
            name: "Sony WH-1000XM5".to_owned(),
            description: "Sony WH-1000XM5 Wireless Noise Canceling Headphones - Black."
                .to_owned(),
            price: Decimal::new(398_00, 2),
            discount_price: Some(Decimal::new(250_00, 2)),
            category: Category::Accessories,
            subcategory: "Headphones".to_owned(),
            brand: "Sony".to_owned(),
            rating: 4.7,
            reviews: 120,
            stock: 8,
            recent_sales: "Almost sold out".to_owned(),
            image: "assets/Sony-WH-1000XM5.webp".to_owned(),
            images: vec!["assets/Sony-WH-1000XM5.webp".to_owned()],
            specs: specs(&[
                ("Type", "Over-ear"),
                ("BatteryLife", "30 hours"),
                ("Features", "Noise Canceling, Multipoint"),
            ]),
        },
        Product {
            id: ProductId::new("4"),
            name: "Dior Sauvage Elixir".to_owned(),
            description: "Dior Sauvage Men's 3.4 fl oz Parfum Spray.".to_owned(),
            price: Decimal::new(100_00, 2),
            discount_price: Some(Decimal::new(85_00, 2)),
            category: Category::Perfumes,
            subcategory: "Mens".to_owned(),
            brand: "Dior".to_owned(),
            rating: 4.9,
            reviews: 56,
            stock: 45,
            recent_sales: "High demand".to_owned(),
            image: "assets/Dior-Sauvage-Elixir.webp".to_owned(),
            images: vec!["assets/Dior-Sauvage-Elixir.webp".to_owned()],
            specs: specs(&[
                ("Size", "60ml"),
                ("Type", "Parfum"),
                ("Notes", "Grapefruit, Spices, Organic AOP Lavender, Woods"),
            ]),
        },
        Product {
            id: ProductId::new("5"),
            name: "Dell XPS 15".to_owned(),
            description: "Dell XPS 15 9530 - 15.6\" FHD+ - i9-13700H - 16GB RAM - Arc A370M \
                          - 512GB SSD - Silver."
                .to_owned(),
            price: Decimal::new(9_500_00, 2),
            discount_price: None,
            category: Category::Laptops,
            subcategory: "Business".to_owned(),
            brand: "Dell".to_owned(),
            rating: 4.6,
            reviews: 88,
            stock: 2,
            recent_sales: "Last 2 left!".to_owned(),
            image: "assets/Dell.webp".to_owned(),
            images: vec!["assets/Dell2.webp".to_owned()],
            specs: specs(&[
                ("Display", "15.6\" OLED 3.5K"),
                ("Processor", "Intel Core i9"),
                ("RAM", "16GB"),
                ("Storage", "512GB SSD"),
            ]),
        },
        Product {
            id: ProductId::new("6"),
            name: "Samsung Galaxy S24 Ultra".to_owned(),
            description: "Samsung Galaxy S24 Ultra 512GB S-928U1 Titanium Gray factory \
                          unlocked."
                .to_owned(),
            price: Decimal::new(8_800_00, 2),
            discount_price: None,
            category: Category::Phones,
            subcategory: "Flagship".to_owned(),
            brand: "Samsung".to_owned(),
            rating: 4.8,
            reviews: 312,
            stock: 200,
            recent_sales: "Popular".to_owned(),
            image: "assets/Samsung-Galaxy-S24-Ultra.webp".to_owned(),
            images: vec!["assets/Samsung-Galaxy-S24-Ultra.webp".to_owned()],
            specs: specs(&[
                ("Display", "6.8\" QHD+"),
                ("Processor", "Snapdragon 8 Gen 3"),
                ("Camera", "200MP Main"),
                ("Battery", "5000mAh"),
            ]),
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_six_products() {
        assert_eq!(all().len(), 6);
    }

    #[test]
    fn test_product_ids_are_unique() {
        let mut ids: Vec<_> = all().iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), all().len());
    }

    #[test]
    fn test_get_by_id() {
        let product = get(&ProductId::new("3")).unwrap();
        assert_eq!(product.name, "Sony WH-1000XM5");
        assert!(get(&ProductId::new("404")).is_none());
    }

    #[test]
    fn test_by_category() {
        let laptops = by_category(Category::Laptops);
        assert_eq!(laptops.len(), 2);
        assert!(laptops.iter().all(|p| p.category == Category::Laptops));
    }

    #[test]
    fn test_search_matches_name_and_brand() {
        assert_eq!(search("macbook").len(), 1);
        assert_eq!(search("APPLE").len(), 2);
        assert!(search("").is_empty());
        assert!(search("widget").is_empty());
    }
}
