//! Domain records produced by the seeding tools.
//!
//! Every record is a flat, denormalized value with no behavior of its own.
//! Records are created once, written in bulk, and never updated.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Enumerations
// ============================================================================

/// Kind of projection room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomCategory {
    Standard,
    Vip,
    Imax,
    #[serde(rename = "4dx")]
    FourDx,
    Dolby,
    Premium,
}

impl RoomCategory {
    pub const ALL: [RoomCategory; 6] = [
        RoomCategory::Standard,
        RoomCategory::Vip,
        RoomCategory::Imax,
        RoomCategory::FourDx,
        RoomCategory::Dolby,
        RoomCategory::Premium,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomCategory::Standard => "standard",
            RoomCategory::Vip => "vip",
            RoomCategory::Imax => "imax",
            RoomCategory::FourDx => "4dx",
            RoomCategory::Dolby => "dolby",
            RoomCategory::Premium => "premium",
        }
    }

    /// Seat kind assigned to every seat of a room of this category.
    pub fn seat_kind(&self) -> SeatKind {
        match self {
            RoomCategory::Vip => SeatKind::Vip,
            _ => SeatKind::Standard,
        }
    }

    /// Equipment installed in a room of this category.
    pub fn equipment(&self) -> Vec<String> {
        let items: &[&str] = match self {
            RoomCategory::Imax => &["IMAX", "Dolby Atmos"],
            RoomCategory::Vip => &["Reclining seats", "In-seat service"],
            _ => &["Digital sound", "HD projection"],
        };
        items.iter().map(|s| s.to_string()).collect()
    }
}

impl fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatKind {
    Standard,
    Vip,
}

impl SeatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatKind::Standard => "standard",
            SeatKind::Vip => "vip",
        }
    }
}

/// Loyalty tier of a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerTier {
    Regular,
    Frequent,
    Premium,
}

impl CustomerTier {
    pub const ALL: [CustomerTier; 3] = [
        CustomerTier::Regular,
        CustomerTier::Frequent,
        CustomerTier::Premium,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerTier::Regular => "regular",
            CustomerTier::Frequent => "frequent",
            CustomerTier::Premium => "premium",
        }
    }
}

/// Sales status of a showtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowtimeStatus {
    Scheduled,
    OnSale,
    AlmostSoldOut,
    SoldOut,
    Cancelled,
}

impl ShowtimeStatus {
    pub const ALL: [ShowtimeStatus; 5] = [
        ShowtimeStatus::Scheduled,
        ShowtimeStatus::OnSale,
        ShowtimeStatus::AlmostSoldOut,
        ShowtimeStatus::SoldOut,
        ShowtimeStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShowtimeStatus::Scheduled => "scheduled",
            ShowtimeStatus::OnSale => "on_sale",
            ShowtimeStatus::AlmostSoldOut => "almost_sold_out",
            ShowtimeStatus::SoldOut => "sold_out",
            ShowtimeStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Cash,
    Transfer,
    Paypal,
    Crypto,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Card,
        PaymentMethod::Cash,
        PaymentMethod::Transfer,
        PaymentMethod::Paypal,
        PaymentMethod::Crypto,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::Crypto => "crypto",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Confirmed,
    Pending,
    Cancelled,
    Refunded,
}

impl TransactionStatus {
    pub const ALL: [TransactionStatus; 4] = [
        TransactionStatus::Confirmed,
        TransactionStatus::Pending,
        TransactionStatus::Cancelled,
        TransactionStatus::Refunded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Confirmed => "confirmed",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Cancelled => "cancelled",
            TransactionStatus::Refunded => "refunded",
        }
    }
}

// ============================================================================
// Records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub row: String,
    pub number: u32,
    pub kind: SeatKind,
    pub surcharge: i64,
}

impl Seat {
    /// Label used on tickets, e.g. `C7`.
    pub fn label(&self) -> String {
        format!("{}{}", self.row, self.number)
    }
}

/// A projection room with its fully expanded seat map.
///
/// `seats.len()` always equals `rows * seats_per_row`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub category: RoomCategory,
    pub capacity: u32,
    pub rows: u32,
    pub seats_per_row: u32,
    pub equipment: Vec<String>,
    pub seats: Vec<Seat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub original_title: String,
    pub synopsis: String,
    pub director: String,
    pub cast: Vec<String>,
    pub genres: Vec<String>,
    pub duration_minutes: u32,
    pub rating: String,
    pub language: String,
    pub subtitles: Vec<String>,
    pub release_date: DateTime<Utc>,
    pub available_from: DateTime<Utc>,
    pub available_until: DateTime<Utc>,
    pub poster_url: String,
    pub trailer_url: String,
    pub base_price: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub tier: CustomerTier,
    pub registered_at: DateTime<Utc>,
    pub purchase_history: Vec<String>,
    pub loyalty_points: u32,
    pub active: bool,
}

/// A scheduled screening. The room is an embedded snapshot, not a reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Showtime {
    pub id: String,
    pub movie_id: String,
    pub room: Room,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub base_price: i64,
    pub vip_price: i64,
    pub status: ShowtimeStatus,
    pub subtitled: bool,
    pub audio_language: String,
    pub occupied_seats: Vec<String>,
    pub reserved_seats: Vec<String>,
    pub tickets_sold: u32,
    pub revenue: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Breakdown of the amount charged for a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

impl PaymentDetails {
    /// Build the breakdown for `subtotal` taxed at `tax_rate` with no discount.
    pub fn taxed(subtotal: i64, tax_rate: Decimal) -> Self {
        let subtotal = Decimal::from(subtotal);
        Self {
            subtotal,
            tax: subtotal * tax_rate,
            discount: Decimal::ZERO,
            total: subtotal * (Decimal::ONE + tax_rate),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub customer_id: String,
    pub movie_id: String,
    pub showtime_id: String,
    pub seats: Vec<String>,
    pub payment_method: PaymentMethod,
    pub total_amount: i64,
    pub status: TransactionStatus,
    pub invoice_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub qr_code: String,
    pub payment: PaymentDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vip_rooms_get_vip_seats() {
        assert_eq!(RoomCategory::Vip.seat_kind(), SeatKind::Vip);
        for category in RoomCategory::ALL {
            if category != RoomCategory::Vip {
                assert_eq!(category.seat_kind(), SeatKind::Standard);
            }
        }
    }

    #[test]
    fn test_room_category_serde_names() {
        let yaml = serde_yaml::to_string(&RoomCategory::FourDx).unwrap();
        assert_eq!(yaml.trim(), "4dx");
        assert_eq!(RoomCategory::FourDx.to_string(), "4dx");
    }

    #[test]
    fn test_payment_details_taxed() {
        let details = PaymentDetails::taxed(30_000, Decimal::new(19, 2));

        assert_eq!(details.subtotal, Decimal::from(30_000));
        assert_eq!(details.tax, Decimal::from(5_700));
        assert_eq!(details.discount, Decimal::ZERO);
        assert_eq!(details.total, Decimal::from(35_700));
        assert_eq!(details.total, details.subtotal + details.tax);
    }

    #[test]
    fn test_seat_label() {
        let seat = Seat {
            row: "AB".to_string(),
            number: 12,
            kind: SeatKind::Standard,
            surcharge: 0,
        };
        assert_eq!(seat.label(), "AB12");
    }
}
