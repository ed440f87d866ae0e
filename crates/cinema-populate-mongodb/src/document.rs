//! Conversion of cinema records to BSON documents.
//!
//! Top-level records store their identifier as `_id`. The room embedded in a
//! showtime keeps a plain `id` field so `room.id` can be indexed.

use bson::{doc, Bson, DateTime as BsonDateTime, Document};
use chrono::{DateTime, Utc};
use cinema_core::{Customer, Movie, PaymentDetails, Room, Seat, Showtime, Transaction};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// A record that can be written to a document store.
pub trait ToDocument {
    fn to_document(&self) -> Document;
}

impl<T: ToDocument + ?Sized> ToDocument for &T {
    fn to_document(&self) -> Document {
        (**self).to_document()
    }
}

fn datetime(value: DateTime<Utc>) -> Bson {
    Bson::DateTime(BsonDateTime::from_chrono(value))
}

fn money(value: Decimal) -> Bson {
    Bson::Double(value.to_f64().unwrap_or_default())
}

fn seat_document(seat: &Seat) -> Document {
    doc! {
        "row": &seat.row,
        "number": i64::from(seat.number),
        "kind": seat.kind.as_str(),
        "surcharge": seat.surcharge,
    }
}

/// Room fields without the identifier key.
fn room_body(room: &Room) -> Document {
    doc! {
        "name": &room.name,
        "category": room.category.as_str(),
        "capacity": i64::from(room.capacity),
        "rows": i64::from(room.rows),
        "seats_per_row": i64::from(room.seats_per_row),
        "equipment": room.equipment.clone(),
        "seats": room.seats.iter().map(seat_document).collect::<Vec<_>>(),
    }
}

/// Room snapshot embedded in a showtime.
pub fn embedded_room(room: &Room) -> Document {
    let mut document = doc! { "id": &room.id };
    document.extend(room_body(room));
    document
}

fn payment_document(payment: &PaymentDetails) -> Document {
    doc! {
        "subtotal": money(payment.subtotal),
        "tax": money(payment.tax),
        "discount": money(payment.discount),
        "total": money(payment.total),
    }
}

impl ToDocument for Room {
    fn to_document(&self) -> Document {
        let mut document = doc! { "_id": &self.id };
        document.extend(room_body(self));
        document
    }
}

impl ToDocument for Movie {
    fn to_document(&self) -> Document {
        doc! {
            "_id": &self.id,
            "title": &self.title,
            "original_title": &self.original_title,
            "synopsis": &self.synopsis,
            "director": &self.director,
            "cast": self.cast.clone(),
            "genres": self.genres.clone(),
            "duration_minutes": i64::from(self.duration_minutes),
            "rating": &self.rating,
            "language": &self.language,
            "subtitles": self.subtitles.clone(),
            "release_date": datetime(self.release_date),
            "available_from": datetime(self.available_from),
            "available_until": datetime(self.available_until),
            "poster_url": &self.poster_url,
            "trailer_url": &self.trailer_url,
            "base_price": self.base_price,
            "active": self.active,
            "created_at": datetime(self.created_at),
            "updated_at": datetime(self.updated_at),
        }
    }
}

impl ToDocument for Customer {
    fn to_document(&self) -> Document {
        doc! {
            "_id": &self.id,
            "name": &self.name,
            "email": &self.email,
            "phone": &self.phone,
            "tier": self.tier.as_str(),
            "registered_at": datetime(self.registered_at),
            "purchase_history": self.purchase_history.clone(),
            "loyalty_points": i64::from(self.loyalty_points),
            "active": self.active,
        }
    }
}

impl ToDocument for Showtime {
    fn to_document(&self) -> Document {
        doc! {
            "_id": &self.id,
            "movie_id": &self.movie_id,
            "room": embedded_room(&self.room),
            "starts_at": datetime(self.starts_at),
            "ends_at": datetime(self.ends_at),
            "base_price": self.base_price,
            "vip_price": self.vip_price,
            "status": self.status.as_str(),
            "subtitled": self.subtitled,
            "audio_language": &self.audio_language,
            "occupied_seats": self.occupied_seats.clone(),
            "reserved_seats": self.reserved_seats.clone(),
            "tickets_sold": i64::from(self.tickets_sold),
            "revenue": self.revenue,
            "created_at": datetime(self.created_at),
            "updated_at": datetime(self.updated_at),
        }
    }
}

impl ToDocument for Transaction {
    fn to_document(&self) -> Document {
        doc! {
            "_id": &self.id,
            "customer_id": &self.customer_id,
            "movie_id": &self.movie_id,
            "showtime_id": &self.showtime_id,
            "seats": self.seats.clone(),
            "payment_method": self.payment_method.as_str(),
            "total_amount": self.total_amount,
            "status": self.status.as_str(),
            "invoice_number": &self.invoice_number,
            "created_at": datetime(self.created_at),
            "updated_at": datetime(self.updated_at),
            "qr_code": &self.qr_code,
            "payment": payment_document(&self.payment),
        }
    }
}
