//! Cart commands.
//!
//! All cart commands act on the signed-in user's cart; run
//! `pb-cli auth login` first.

use pocket_bazaar_core::ProductId;
use pocket_bazaar_storefront::catalog;
use pocket_bazaar_storefront::models::{Cart, User};
use pocket_bazaar_storefront::AuthError;

use super::{CliError, Env};

async fn require_user(store_env: &Env) -> Result<User, CliError> {
    store_env
        .auth()
        .current_user()
        .await?
        .ok_or(CliError::Auth(AuthError::NotSignedIn))
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }
    for item in &cart.items {
        println!(
            "{:>3}  {:<28} {} x ${} = ${}",
            item.id,
            item.name,
            item.qty,
            item.price,
            item.total()
        );
    }
    println!(
        "{} items, subtotal ${}",
        cart.total_items(),
        cart.subtotal()
    );
}

pub async fn show() -> Result<(), CliError> {
    let env = Env::load().await?;
    let user = require_user(&env).await?;

    let cart = env.cart().cart(&user.id).await?;
    print_cart(&cart);
    Ok(())
}

pub async fn add(id: &str, qty: u32) -> Result<(), CliError> {
    let env = Env::load().await?;
    let user = require_user(&env).await?;

    let product = catalog::get(&ProductId::new(id))
        .ok_or_else(|| CliError::ProductNotFound(id.to_owned()))?;

    let cart = env
        .cart()
        .add_item(&user.id, product.to_cart_item(qty))
        .await?;
    print_cart(&cart);
    Ok(())
}

pub async fn remove(id: &str) -> Result<(), CliError> {
    let env = Env::load().await?;
    let user = require_user(&env).await?;

    let cart = env.cart().remove_item(&user.id, &ProductId::new(id)).await?;
    print_cart(&cart);
    Ok(())
}

pub async fn set_qty(id: &str, qty: u32) -> Result<(), CliError> {
    let env = Env::load().await?;
    let user = require_user(&env).await?;

    let cart = env
        .cart()
        .set_quantity(&user.id, &ProductId::new(id), qty)
        .await?;
    print_cart(&cart);
    Ok(())
}

pub async fn clear() -> Result<(), CliError> {
    let env = Env::load().await?;
    let user = require_user(&env).await?;

    env.cart().clear(&user.id).await?;
    println!("Cart cleared");
    Ok(())
}
