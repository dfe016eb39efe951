use serde::{Deserialize, Serialize};

/// A merchant (venue operator) the signed-in user can check tickets for.
///
/// Only `id` and `name` are required. Keys the app does not use are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    /// Server-assigned identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Street address.
    #[serde(default)]
    pub address: Option<String>,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// IANA timezone of the venue, e.g. `Australia/Sydney`.
    #[serde(default)]
    pub timezone: Option<String>,
    /// Logo image URL.
    #[serde(default)]
    pub logo_url: Option<String>,
}
