//! Pocket Bazaar CLI - shop from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Create an account and sign in
//! pb-cli auth signup -f Jane -l Mensah -e jane@example.com -p correct-horse
//!
//! # Browse the catalog
//! pb-cli catalog list --category Laptops
//! pb-cli catalog search macbook
//!
//! # Build a cart and check out
//! pb-cli cart add 1 --qty 2
//! pb-cli checkout --payment card
//!
//! # Review order history
//! pb-cli orders list
//! ```
//!
//! # Commands
//!
//! - `auth` - Sign up, sign in (email or phone + OTP), reset passwords
//! - `catalog` - List, show, and search the seeded product catalog
//! - `cart` - Inspect and mutate the signed-in user's cart
//! - `checkout` - Place an order from the current cart
//! - `orders` - Browse order history and receipts
//!
//! # Environment Variables
//!
//! - `PB_DATA_DIR` - Directory holding the JSON key-value store
//! - `PB_SIMULATED_LATENCY_MS` - Artificial delay before each service call

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pb-cli")]
#[command(author, version, about = "Pocket Bazaar storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage accounts and sessions
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Inspect and mutate the signed-in user's cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order from the current cart
    Checkout {
        /// Payment method (`card` or `cash`)
        #[arg(short, long, default_value = "card")]
        payment: String,

        /// Deliver to a specific saved address instead of the default
        #[arg(short, long)]
        address: Option<String>,
    },
    /// Browse order history
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Create an account and sign in
    Signup {
        /// First name
        #[arg(short, long)]
        first_name: String,

        /// Last name
        #[arg(short, long)]
        last_name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (minimum 8 characters)
        #[arg(short, long)]
        password: String,

        /// Phone number, enables OTP sign-in
        #[arg(long)]
        phone: Option<String>,
    },
    /// Sign in with email and password
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Sign in with a phone number and OTP code
    LoginPhone {
        /// Phone number on the account
        #[arg(short, long)]
        phone: String,

        /// OTP code
        #[arg(short, long)]
        otp: String,
    },
    /// End the current session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Issue a password-reset OTP for an email
    SendOtp {
        /// Email address
        #[arg(short, long)]
        email: String,
    },
    /// Reset a password with a previously issued OTP
    ResetPassword {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// OTP code from `send-otp`
        #[arg(short, long)]
        otp: String,

        /// New password
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products, optionally filtered by category
    List {
        /// Category filter (`Laptops`, `Phones`, `Accessories`, `Perfumes`)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show one product in detail
    Show {
        /// Product id
        id: String,
    },
    /// Search products by name or brand
    Search {
        /// Search query
        query: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart with line totals and subtotal
    Show,
    /// Add a catalog product to the cart
    Add {
        /// Product id
        id: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Remove a product's line from the cart
    Remove {
        /// Product id
        id: String,
    },
    /// Set a line's quantity (zero removes it)
    SetQty {
        /// Product id
        id: String,

        /// New quantity
        qty: u32,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List the signed-in user's orders
    List,
    /// Show one order with its receipt
    Show {
        /// Order id
        id: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Auth { action } => match action {
            AuthAction::Signup {
                first_name,
                last_name,
                email,
                password,
                phone,
            } => {
                commands::auth::signup(&first_name, &last_name, &email, &password, phone.as_deref())
                    .await?;
            }
            AuthAction::Login { email, password } => {
                commands::auth::login(&email, &password).await?;
            }
            AuthAction::LoginPhone { phone, otp } => {
                commands::auth::login_phone(&phone, &otp).await?;
            }
            AuthAction::Logout => commands::auth::logout().await?,
            AuthAction::Whoami => commands::auth::whoami().await?,
            AuthAction::SendOtp { email } => commands::auth::send_otp(&email).await?,
            AuthAction::ResetPassword {
                email,
                otp,
                password,
            } => {
                commands::auth::reset_password(&email, &otp, &password).await?;
            }
        },
        Commands::Catalog { action } => match action {
            CatalogAction::List { category } => {
                commands::catalog::list(category.as_deref())?;
            }
            CatalogAction::Show { id } => commands::catalog::show(&id)?,
            CatalogAction::Search { query } => commands::catalog::search(&query),
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show().await?,
            CartAction::Add { id, qty } => commands::cart::add(&id, qty).await?,
            CartAction::Remove { id } => commands::cart::remove(&id).await?,
            CartAction::SetQty { id, qty } => commands::cart::set_qty(&id, qty).await?,
            CartAction::Clear => commands::cart::clear().await?,
        },
        Commands::Checkout { payment, address } => {
            commands::orders::checkout(&payment, address.as_deref()).await?;
        }
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::orders::list().await?,
            OrdersAction::Show { id } => commands::orders::show(&id).await?,
        },
    }
    Ok(())
}
