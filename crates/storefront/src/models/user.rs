//! User and address records.

use serde::{Deserialize, Serialize};

use pocket_bazaar_core::{AddressId, Email, Phone, UserId};

/// A registered user.
///
/// Created at sign-up, mutated by profile updates, never deleted. The
/// whole registered-users list persists as one JSON array under the
/// `users` key; the signed-in user's copy is additionally mirrored under
/// `userData`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    /// Optional phone number, used for phone + OTP sign-in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<Phone>,
    /// Argon2 PHC-format password hash.
    pub password_hash: String,
    #[serde(default)]
    pub addresses: Vec<Address>,
}

impl User {
    /// The user's default shipping address, if any.
    #[must_use]
    pub fn default_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.is_default)
    }

    /// Full display name.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A shipping address embedded in a user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    pub street: String,
    pub city: String,
    pub zip: String,
    pub country: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Input for adding an address to the signed-in user's book.
#[derive(Debug, Clone)]
pub struct NewAddress {
    pub street: String,
    pub city: String,
    pub zip: String,
    pub country: String,
    /// Request this address become the default.
    pub make_default: bool,
}

/// Partial profile fields merged into the current user.
///
/// `None` leaves the corresponding field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<Email>,
    pub phone_number: Option<Phone>,
}

impl ProfileUpdate {
    /// Apply the update in place.
    pub fn apply(self, user: &mut User) {
        if let Some(first_name) = self.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(phone_number) = self.phone_number {
            user.phone_number = Some(phone_number);
        }
    }
}

/// Re-establish the exactly-one-default invariant over an address list.
///
/// A non-empty list always ends with exactly one default. When `prefer`
/// names an address in the list it wins; otherwise the first currently
/// flagged address is kept, falling back to the first entry.
pub fn normalize_default(addresses: &mut [Address], prefer: Option<&AddressId>) {
    if addresses.is_empty() {
        return;
    }

    let target = prefer
        .and_then(|id| addresses.iter().position(|a| &a.id == id))
        .or_else(|| addresses.iter().position(|a| a.is_default))
        .unwrap_or(0);

    for (i, address) in addresses.iter_mut().enumerate() {
        address.is_default = i == target;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn addr(id: &str, is_default: bool) -> Address {
        Address {
            id: AddressId::new(id),
            street: "1 Market St".to_owned(),
            city: "Accra".to_owned(),
            zip: "00233".to_owned(),
            country: "Ghana".to_owned(),
            is_default,
        }
    }

    fn defaults(addresses: &[Address]) -> Vec<&str> {
        addresses
            .iter()
            .filter(|a| a.is_default)
            .map(|a| a.id.as_str())
            .collect()
    }

    #[test]
    fn test_normalize_empty_list_is_noop() {
        let mut addresses: Vec<Address> = vec![];
        normalize_default(&mut addresses, None);
        assert!(addresses.is_empty());
    }

    #[test]
    fn test_normalize_no_default_promotes_first() {
        let mut addresses = vec![addr("a", false), addr("b", false)];
        normalize_default(&mut addresses, None);
        assert_eq!(defaults(&addresses), vec!["a"]);
    }

    #[test]
    fn test_normalize_multiple_defaults_keeps_first_flagged() {
        let mut addresses = vec![addr("a", false), addr("b", true), addr("c", true)];
        normalize_default(&mut addresses, None);
        assert_eq!(defaults(&addresses), vec!["b"]);
    }

    #[test]
    fn test_normalize_prefer_wins() {
        let mut addresses = vec![addr("a", true), addr("b", false)];
        let prefer = AddressId::new("b");
        normalize_default(&mut addresses, Some(&prefer));
        assert_eq!(defaults(&addresses), vec!["b"]);
    }

    #[test]
    fn test_normalize_prefer_missing_falls_back() {
        let mut addresses = vec![addr("a", true), addr("b", false)];
        let prefer = AddressId::new("zzz");
        normalize_default(&mut addresses, Some(&prefer));
        assert_eq!(defaults(&addresses), vec!["a"]);
    }

    #[test]
    fn test_profile_update_merges_partial_fields() {
        let mut user = User {
            id: UserId::new("u1"),
            first_name: "Jane".to_owned(),
            last_name: "Doe".to_owned(),
            email: Email::parse("jane@example.com").unwrap(),
            phone_number: None,
            password_hash: "$argon2id$stub".to_owned(),
            addresses: vec![],
        };

        ProfileUpdate {
            last_name: Some("Mensah".to_owned()),
            phone_number: Some(Phone::parse("5550102345").unwrap()),
            ..ProfileUpdate::default()
        }
        .apply(&mut user);

        assert_eq!(user.first_name, "Jane");
        assert_eq!(user.last_name, "Mensah");
        assert_eq!(user.phone_number.unwrap().as_str(), "5550102345");
    }
}
