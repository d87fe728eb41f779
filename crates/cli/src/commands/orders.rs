//! Checkout and order-history commands.
//!
//! # Usage
//!
//! ```bash
//! # Pay by card, deliver to the default address
//! pb-cli checkout --payment card
//!
//! # Pay cash, deliver to a specific saved address
//! pb-cli checkout --payment cash --address <address-id>
//!
//! # History
//! pb-cli orders list
//! pb-cli orders show <order-id>
//! ```

use pocket_bazaar_core::{AddressId, OrderId, PaymentMethod};
use pocket_bazaar_storefront::AuthError;
use pocket_bazaar_storefront::models::{Order, User};

use super::{CliError, Env};

async fn require_user(env: &Env) -> Result<User, CliError> {
    env.auth()
        .current_user()
        .await?
        .ok_or(CliError::Auth(AuthError::NotSignedIn))
}

fn print_order(order: &Order) {
    println!(
        "{}  {}  {}  {} items, total ${}",
        order.id,
        order.created_at.format("%Y-%m-%d %H:%M"),
        order.status,
        order.total_items(),
        order.total
    );
}

fn print_receipt(order: &Order) {
    println!("Receipt {}", order.receipt.receipt_number);
    for item in &order.items {
        println!(
            "  {:<28} {} x ${} = ${}",
            item.name,
            item.qty,
            item.price,
            item.total()
        );
    }
    println!("  subtotal: ${}", order.subtotal);
    println!("  tax (5%): ${}", order.tax);
    println!("  total:    ${}", order.total);
    println!("  paid by {} ", order.payment_method);
    println!(
        "  deliver to: {}, {}, {} {}",
        order.delivery_address.street,
        order.delivery_address.city,
        order.delivery_address.zip,
        order.delivery_address.country
    );
}

pub async fn checkout(payment: &str, address_id: Option<&str>) -> Result<(), CliError> {
    let env = Env::load().await?;
    let user = require_user(&env).await?;

    let payment: PaymentMethod = payment
        .parse()
        .map_err(|_| CliError::InvalidArgument(format!("unknown payment method `{payment}`")))?;

    let delivery_address = match address_id {
        Some(raw) => {
            let wanted = AddressId::new(raw);
            user.addresses
                .iter()
                .find(|a| a.id == wanted)
                .cloned()
                .ok_or_else(|| {
                    CliError::InvalidArgument(format!("no saved address with id {raw}"))
                })?
        }
        None => user.default_address().cloned().ok_or(CliError::NoAddress)?,
    };

    let order = env.cart().create_order(payment, delivery_address).await?;

    println!("Order {} placed ({})", order.id, order.status);
    print_receipt(&order);
    Ok(())
}

pub async fn list() -> Result<(), CliError> {
    let env = Env::load().await?;
    let user = require_user(&env).await?;

    let orders = env.cart().orders(&user.id).await?;
    if orders.is_empty() {
        println!("No orders yet");
        return Ok(());
    }
    for order in &orders {
        print_order(order);
    }
    Ok(())
}

pub async fn show(id: &str) -> Result<(), CliError> {
    let env = Env::load().await?;
    let user = require_user(&env).await?;

    let order = env.cart().order(&user.id, &OrderId::new(id)).await?;
    print_order(&order);
    print_receipt(&order);
    Ok(())
}
