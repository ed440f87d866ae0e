//! Room layout and seat expansion.
//!
//! Rows are labelled from an ordered alphabet. Rows past the end of the
//! alphabet continue with bijective multi-letter labels over the same
//! alphabet, spreadsheet style: with `A..=T` the 21st row is `AA`, the 22nd
//! `AB`, and so on. Labels are therefore unique for any row count.

use cinema_core::{RoomCategory, Seat};

/// Seats per row a room is designed around.
const SEATS_PER_ROW_TARGET: u32 = 20;

/// Label of the row at zero-based `index`.
pub fn row_label(index: usize, alphabet: &[String]) -> String {
    let base = alphabet.len();
    if base == 0 {
        return (index + 1).to_string();
    }

    let mut parts = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        parts.push(alphabet[n % base].as_str());
        n /= base;
    }
    parts.reverse();
    parts.concat()
}

/// Label of the seat at zero-based row-major `position`, e.g. `C7`.
pub fn seat_label(position: usize, seats_per_row: u32, alphabet: &[String]) -> String {
    let per_row = seats_per_row.max(1) as usize;
    let row = row_label(position / per_row, alphabet);
    format!("{}{}", row, position % per_row + 1)
}

/// Rows and seats per row for a room of the given capacity.
///
/// `rows * seats_per_row` may exceed `capacity` by less than one row.
pub fn room_dimensions(capacity: u32) -> (u32, u32) {
    let rows = capacity / SEATS_PER_ROW_TARGET + 1;
    let seats_per_row = capacity.div_ceil(rows);
    (rows, seats_per_row)
}

/// Enumerate every seat of a room, row by row, seat numbers starting at 1.
pub fn expand_seats(
    rows: u32,
    seats_per_row: u32,
    category: RoomCategory,
    alphabet: &[String],
    vip_surcharge: i64,
) -> Vec<Seat> {
    let kind = category.seat_kind();
    let surcharge = if category == RoomCategory::Vip {
        vip_surcharge
    } else {
        0
    };

    let mut seats = Vec::with_capacity((rows * seats_per_row) as usize);
    for row in 0..rows {
        let label = row_label(row as usize, alphabet);
        for number in 1..=seats_per_row {
            seats.push(Seat {
                row: label.clone(),
                number,
                kind,
                surcharge,
            });
        }
    }
    seats
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinema_core::{SeatKind, Vocabulary};
    use std::collections::HashSet;

    fn alphabet() -> Vec<String> {
        Vocabulary::default().seat_rows
    }

    #[test]
    fn test_row_labels_within_alphabet() {
        let alphabet = alphabet();
        assert_eq!(row_label(0, &alphabet), "A");
        assert_eq!(row_label(19, &alphabet), "T");
    }

    #[test]
    fn test_row_labels_past_alphabet() {
        let alphabet = alphabet();
        assert_eq!(row_label(20, &alphabet), "AA");
        assert_eq!(row_label(21, &alphabet), "AB");
        assert_eq!(row_label(39, &alphabet), "AT");
        assert_eq!(row_label(40, &alphabet), "BA");
        assert_eq!(row_label(20 + 400, &alphabet), "AAA");
    }

    #[test]
    fn test_row_labels_unique() {
        let alphabet = alphabet();
        let labels: HashSet<String> = (0..1000).map(|i| row_label(i, &alphabet)).collect();
        assert_eq!(labels.len(), 1000);
    }

    #[test]
    fn test_room_dimensions() {
        assert_eq!(room_dimensions(200), (11, 19));
        assert_eq!(room_dimensions(100), (6, 17));
        assert_eq!(room_dimensions(50), (3, 17));
        assert_eq!(room_dimensions(19), (1, 19));

        for capacity in 50..200 {
            let (rows, per_row) = room_dimensions(capacity);
            assert!(rows * per_row >= capacity);
            assert!(rows * per_row < capacity + rows);
        }
    }

    #[test]
    fn test_expand_vip_seats() {
        let seats = expand_seats(3, 4, RoomCategory::Vip, &alphabet(), 5_000);

        assert_eq!(seats.len(), 12);
        assert!(seats.iter().all(|s| s.kind == SeatKind::Vip && s.surcharge == 5_000));
        assert_eq!(seats[0].label(), "A1");
        assert_eq!(seats[4].label(), "B1");
        assert_eq!(seats[11].label(), "C4");
    }

    #[test]
    fn test_expand_standard_seats() {
        let seats = expand_seats(2, 3, RoomCategory::Imax, &alphabet(), 5_000);

        assert_eq!(seats.len(), 6);
        assert!(seats
            .iter()
            .all(|s| s.kind == SeatKind::Standard && s.surcharge == 0));
    }

    #[test]
    fn test_expand_more_rows_than_alphabet() {
        let short: Vec<String> = vec!["A".into(), "B".into()];
        let seats = expand_seats(5, 2, RoomCategory::Standard, &short, 0);

        assert_eq!(seats.len(), 10);
        let rows: Vec<&str> = seats.iter().step_by(2).map(|s| s.row.as_str()).collect();
        assert_eq!(rows, vec!["A", "B", "AA", "AB", "BA"]);
    }

    #[test]
    fn test_seat_label_matches_expansion() {
        let alphabet = alphabet();
        let seats = expand_seats(4, 7, RoomCategory::Dolby, &alphabet, 0);
        for (position, seat) in seats.iter().enumerate() {
            assert_eq!(seat_label(position, 7, &alphabet), seat.label());
        }
    }
}
