//! Status and method enums for orders.

use serde::{Deserialize, Serialize};

/// Order fulfillment status.
///
/// Serialized forms match the display strings the mobile screens render
/// ("Processing", "In Transit", ...). Orders are created `Processing` and
/// the status never transitions at runtime; there is no fulfillment
/// pipeline behind this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Processing,
    #[serde(rename = "In Transit")]
    InTransit,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Processing => write!(f, "Processing"),
            Self::InTransit => write!(f, "In Transit"),
            Self::Delivered => write!(f, "Delivered"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Payment method chosen at checkout.
///
/// Payment is simulated; the method is recorded on the order and receipt
/// but nothing is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    Card,
    Cash,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Card => write!(f, "Card"),
            Self::Cash => write!(f, "Cash"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "card" => Ok(Self::Card),
            "cash" => Ok(Self::Cash),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

/// Product category in the seeded catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Laptops,
    Phones,
    Accessories,
    Perfumes,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Laptops => write!(f, "Laptops"),
            Self::Phones => write!(f, "Phones"),
            Self::Accessories => write!(f, "Accessories"),
            Self::Perfumes => write!(f, "Perfumes"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "laptops" => Ok(Self::Laptops),
            "phones" => Ok(Self::Phones),
            "accessories" => Ok(Self::Accessories),
            "perfumes" => Ok(Self::Perfumes),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_serializes_as_display_string() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InTransit).unwrap(),
            "\"In Transit\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Processing).unwrap(),
            "\"Processing\""
        );
    }

    #[test]
    fn test_order_status_default_is_processing() {
        assert_eq!(OrderStatus::default(), OrderStatus::Processing);
    }

    #[test]
    fn test_payment_method_from_str() {
        assert_eq!("card".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert_eq!("Cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("phones".parse::<Category>().unwrap(), Category::Phones);
        assert!("toys".parse::<Category>().is_err());
    }
}
