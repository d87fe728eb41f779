//! Catalog browsing commands.
//!
//! The catalog ships with the binary; these commands never touch the data
//! directory.

use pocket_bazaar_core::{Category, ProductId};
use pocket_bazaar_storefront::catalog;
use pocket_bazaar_storefront::models::Product;

use super::CliError;

fn print_line(product: &Product) {
    println!(
        "{:>3}  {:<28} {:<10} ${:>9}  {} ({} reviews)",
        product.id, product.name, product.brand, product.price, product.rating, product.reviews
    );
}

pub fn list(category: Option<&str>) -> Result<(), CliError> {
    let products: Vec<&Product> = match category {
        Some(raw) => {
            let category: Category = raw
                .parse()
                .map_err(|_| CliError::InvalidArgument(format!("unknown category `{raw}`")))?;
            catalog::by_category(category)
        }
        None => catalog::all().iter().collect(),
    };

    for product in products {
        print_line(product);
    }
    Ok(())
}

pub fn show(id: &str) -> Result<(), CliError> {
    let product = catalog::get(&ProductId::new(id))
        .ok_or_else(|| CliError::ProductNotFound(id.to_owned()))?;

    println!("{} - {}", product.name, product.brand);
    println!("  {}", product.description);
    println!("  category: {} / {}", product.category, product.subcategory);
    match product.discount_price {
        Some(was) => println!("  price: ${} (was ${was})", product.price),
        None => println!("  price: ${}", product.price),
    }
    println!(
        "  rating: {} ({} reviews), stock: {}, {}",
        product.rating, product.reviews, product.stock, product.recent_sales
    );
    for (label, value) in &product.specs {
        println!("  {label}: {value}");
    }
    Ok(())
}

pub fn search(query: &str) {
    let hits = catalog::search(query);
    if hits.is_empty() {
        println!("No products match `{query}`");
        return;
    }
    for product in hits {
        print_line(product);
    }
}
