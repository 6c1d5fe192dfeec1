//! Wire types for the rental-management REST API.
//!
//! The remote API wraps every response in a `{status, message, data, ...}`
//! envelope and uses Indonesian field names for the inventory and rental
//! resources. Field renames keep the Rust side readable while staying
//! byte-compatible with the server.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// IDENTITY
// =============================================================================

/// An authenticated account as the server reports it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Account role. `Warehouse` keeps the server's `gudang` wire name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Member,
    #[serde(rename = "gudang")]
    Warehouse,
    Manager,
}

impl Role {
    /// Human-readable label for display.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Role::Member => "Member",
            Role::Warehouse => "Warehouse",
            Role::Manager => "Manager",
        }
    }
}

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Success/error discriminator carried by every response envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Success,
    Error,
}

/// The envelope every API response arrives in.
///
/// The credential pair issued by login/register travels in the top-level
/// `token` and `user` fields; resource payloads travel in `data`.
#[derive(Clone, Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub status: ApiStatus,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<Identity>,
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

impl<T> ApiEnvelope<T> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ApiStatus::Success
    }

    /// The server's message, or `fallback` when it sent none.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        self.message.clone().unwrap_or_else(|| fallback.to_owned())
    }
}

// =============================================================================
// AUTH PAYLOADS
// =============================================================================

#[derive(Clone, Debug, Serialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

// =============================================================================
// INVENTORY ITEMS
// =============================================================================

/// A rentable inventory item (`barang` on the wire).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    #[serde(rename = "kode_barang")]
    pub code: String,
    #[serde(rename = "nama_barang")]
    pub name: String,
    #[serde(rename = "deskripsi", default)]
    pub description: Option<String>,
    #[serde(rename = "kategori")]
    pub category: String,
    #[serde(rename = "stok")]
    pub stock: u32,
    #[serde(rename = "stok_minimum")]
    pub minimum_stock: u32,
    #[serde(rename = "kondisi")]
    pub condition: String,
    #[serde(rename = "lokasi_penyimpanan")]
    pub storage_location: String,
    #[serde(rename = "harga_sewa_per_hari")]
    pub daily_rate: f64,
    pub status: ItemStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Item availability status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemStatus {
    #[serde(rename = "tersedia")]
    Available,
    #[serde(rename = "tidak_tersedia")]
    Unavailable,
    #[serde(rename = "maintenance")]
    Maintenance,
}

/// Partial item payload for create/update requests.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ItemDraft {
    #[serde(rename = "kode_barang", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "nama_barang", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "deskripsi", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "kategori", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "stok", skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(rename = "stok_minimum", skip_serializing_if = "Option::is_none")]
    pub minimum_stock: Option<u32>,
    #[serde(rename = "kondisi", skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(rename = "lokasi_penyimpanan", skip_serializing_if = "Option::is_none")]
    pub storage_location: Option<String>,
    #[serde(rename = "harga_sewa_per_hari", skip_serializing_if = "Option::is_none")]
    pub daily_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,
}

// =============================================================================
// RENTALS
// =============================================================================

/// A rental request with its lifecycle status. Dates are `YYYY-MM-DD`
/// strings as the server renders them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rental {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "barang_id")]
    pub item_id: i64,
    #[serde(rename = "jumlah")]
    pub quantity: u32,
    #[serde(rename = "tanggal_pinjam")]
    pub start_date: String,
    #[serde(rename = "tanggal_kembali_rencana")]
    pub due_date: String,
    #[serde(rename = "tanggal_kembali_aktual", default)]
    pub returned_date: Option<String>,
    #[serde(rename = "keperluan")]
    pub purpose: String,
    pub status: RentalStatus,
    #[serde(rename = "catatan", default)]
    pub note: Option<String>,
    #[serde(rename = "total_biaya", default)]
    pub total_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Identity>,
    #[serde(rename = "barang", default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Rental lifecycle status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Pending,
    Approved,
    Rejected,
    Ongoing,
    Returned,
}

/// Payload for creating a rental request.
#[derive(Clone, Debug, Serialize)]
pub struct NewRental {
    #[serde(rename = "barang_id")]
    pub item_id: i64,
    #[serde(rename = "jumlah")]
    pub quantity: u32,
    #[serde(rename = "tanggal_pinjam")]
    pub start_date: String,
    #[serde(rename = "tanggal_kembali_rencana")]
    pub due_date: String,
    #[serde(rename = "keperluan")]
    pub purpose: String,
}

/// Partial rental payload for updates.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RentalDraft {
    #[serde(rename = "jumlah", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(rename = "tanggal_pinjam", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(rename = "tanggal_kembali_rencana", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(rename = "keperluan", skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

/// Status transition applied by warehouse/manager roles.
#[derive(Clone, Debug, Serialize)]
pub struct RentalStatusChange {
    pub status: RentalStatus,
    #[serde(rename = "catatan", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// =============================================================================
// USER ADMINISTRATION
// =============================================================================

/// Payload for creating an account through user administration.
#[derive(Clone, Debug, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Partial account payload for updates.
#[derive(Clone, Debug, Default, Serialize)]
pub struct UserDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
