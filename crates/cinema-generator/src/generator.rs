//! Main generator producing cinema records.

use crate::generators::id::{
    invoice_number, record_id, CUSTOMER_PREFIX, MOVIE_PREFIX, ROOM_PREFIX, SHOWTIME_PREFIX,
    TRANSACTION_PREFIX,
};
use crate::generators::names::{
    director_name, distinct_sample, movie_title, person_name, phone_number, pick_word,
};
use crate::generators::pick_variant;
use crate::generators::seats::{expand_seats, room_dimensions, seat_label};
use crate::generators::timestamp::timestamp_between;
use chrono::{DateTime, Duration, Utc};
use cinema_core::{
    Customer, CustomerTier, Movie, PaymentDetails, PaymentMethod, ProfileError, Room,
    RoomCategory, SeedProfile, Showtime, ShowtimeStatus, Transaction, TransactionStatus,
};
use rand::rngs::StdRng;
use rand::seq::index::sample as sample_indices;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

/// Most genres a movie can carry.
pub const MAX_GENRES: usize = 3;
/// Most seats bought in one transaction.
pub const MAX_SEATS_PER_TRANSACTION: usize = 4;

const IMAX_CAPACITY: u32 = 200;
const VIP_CAPACITY: u32 = 100;
const SECONDS_PER_YEAR: i64 = 365 * 24 * 60 * 60;

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// A referential field was requested before its parent category existed
    #[error("Cannot sample from empty parent collection: {0}")]
    EmptyParent(&'static str),

    /// A recorded showtime points at a movie missing from the given movie set
    #[error("Showtime {showtime} references movie #{movie_index} which is not in the movie set")]
    MissingMovie { showtime: String, movie_index: usize },

    /// Showtimes starting after the anchor would leave the representable date range
    #[error("Anchor {0} leaves no room for the showtime horizon")]
    AnchorOutOfRange(DateTime<Utc>),

    /// Profile error
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),
}

/// Compact record of a generated showtime, kept so transactions can sample
/// showtimes after the full documents have been flushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowtimeRef {
    pub index: u64,
    pub movie_index: usize,
    pub base_price: i64,
    pub rows: u32,
    pub seats_per_row: u32,
}

impl ShowtimeRef {
    pub fn id(&self) -> String {
        record_id(SHOWTIME_PREFIX, self.index)
    }
}

/// Per-category index of the last generated record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub rooms: u64,
    pub movies: u64,
    pub customers: u64,
    pub showtimes: u64,
    pub transactions: u64,
}

/// Generator that produces deterministic cinema records.
///
/// The same profile, seed and anchor always yield the same records, provided
/// the categories are generated in the same order.
pub struct CinemaGenerator {
    profile: SeedProfile,
    rng: StdRng,
    /// Instant treated as "now": creation timestamps and showtime windows
    anchor: DateTime<Utc>,
    counters: Counters,
    showtimes: Vec<ShowtimeRef>,
}

impl CinemaGenerator {
    /// Create a generator for a validated profile.
    pub fn new(
        profile: SeedProfile,
        seed: u64,
        anchor: DateTime<Utc>,
    ) -> Result<Self, GeneratorError> {
        profile.validate()?;
        // Latest start, plus the longest movie and turnaround.
        let reach = Duration::days(profile.schedule.showtime_horizon_days + 2);
        if anchor.checked_add_signed(reach).is_none() {
            return Err(GeneratorError::AnchorOutOfRange(anchor));
        }
        Ok(Self {
            profile,
            rng: StdRng::seed_from_u64(seed),
            anchor,
            counters: Counters::default(),
            showtimes: Vec::new(),
        })
    }

    pub fn profile(&self) -> &SeedProfile {
        &self.profile
    }

    pub fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Showtimes generated so far, in generation order.
    pub fn showtime_refs(&self) -> &[ShowtimeRef] {
        &self.showtimes
    }

    pub fn next_room(&mut self) -> Room {
        self.counters.rooms += 1;
        let index = self.counters.rooms;

        let category = pick_variant(&mut self.rng, &RoomCategory::ALL);
        let capacity = match category {
            RoomCategory::Imax => IMAX_CAPACITY,
            RoomCategory::Vip => VIP_CAPACITY,
            _ => self.rng.random_range(50..200),
        };
        let (rows, seats_per_row) = room_dimensions(capacity);
        let seats = expand_seats(
            rows,
            seats_per_row,
            category,
            &self.profile.vocabulary.seat_rows,
            self.profile.pricing.vip_surcharge,
        );

        Room {
            id: record_id(ROOM_PREFIX, index),
            name: format!("Room {} {}", category.as_str().to_uppercase(), index),
            category,
            capacity,
            rows,
            seats_per_row,
            equipment: category.equipment(),
            seats,
        }
    }

    pub fn next_movie(&mut self) -> Movie {
        self.counters.movies += 1;
        let index = self.counters.movies;
        let vocab = &self.profile.vocabulary;
        let rng = &mut self.rng;

        let genres = distinct_sample(rng, &vocab.genres, MAX_GENRES);
        let release_date = timestamp_between(
            rng,
            self.profile.schedule.release_from,
            self.profile.schedule.release_until,
        );
        let available_until =
            release_date + Duration::seconds(rng.random_range(1..=SECONDS_PER_YEAR));
        let pricing = &self.profile.pricing;

        Movie {
            id: record_id(MOVIE_PREFIX, index),
            title: movie_title(rng, vocab),
            original_title: movie_title(rng, vocab),
            synopsis: format!(
                "Synopsis of movie {index}. A thrilling story that will captivate the audience."
            ),
            director: director_name(rng, vocab),
            cast: (0..3).map(|_| person_name(rng, vocab)).collect(),
            genres,
            duration_minutes: rng.random_range(90..270),
            rating: pick_word(rng, &vocab.ratings),
            language: pick_word(rng, &vocab.languages),
            subtitles: vec![pick_word(rng, &vocab.languages)],
            release_date,
            available_from: release_date,
            available_until,
            poster_url: format!("https://example.com/posters/movie-{index}.jpg"),
            trailer_url: format!("https://example.com/trailers/movie-{index}.mp4"),
            base_price: rng.random_range(pricing.movie_price_min..pricing.movie_price_max),
            active: rng.random_bool(0.9),
            created_at: self.anchor,
            updated_at: self.anchor,
        }
    }

    pub fn next_customer(&mut self) -> Customer {
        self.counters.customers += 1;
        let index = self.counters.customers;
        let rng = &mut self.rng;

        Customer {
            id: record_id(CUSTOMER_PREFIX, index),
            name: person_name(rng, &self.profile.vocabulary),
            email: format!("customer{index}@email.com"),
            phone: phone_number(rng),
            tier: pick_variant(rng, &CustomerTier::ALL),
            registered_at: timestamp_between(
                rng,
                self.profile.schedule.registration_from,
                self.anchor,
            ),
            purchase_history: Vec::new(),
            loyalty_points: rng.random_range(0..1000),
            active: rng.random_bool(0.95),
        }
    }

    /// Generate a showtime for a random movie in a random room.
    ///
    /// The showtime is also recorded as a [`ShowtimeRef`] for later
    /// transaction sampling.
    pub fn next_showtime(
        &mut self,
        movies: &[Movie],
        rooms: &[Room],
    ) -> Result<Showtime, GeneratorError> {
        if movies.is_empty() {
            return Err(GeneratorError::EmptyParent("movies"));
        }
        let room = rooms
            .choose(&mut self.rng)
            .ok_or(GeneratorError::EmptyParent("rooms"))?;
        let movie_index = self.rng.random_range(0..movies.len());
        let movie = &movies[movie_index];

        self.counters.showtimes += 1;
        let index = self.counters.showtimes;
        let schedule = &self.profile.schedule;
        let rng = &mut self.rng;

        let horizon = self.anchor + Duration::days(schedule.showtime_horizon_days);
        let starts_at = timestamp_between(rng, self.anchor, horizon);
        let ends_at = starts_at
            + Duration::minutes(i64::from(movie.duration_minutes) + schedule.turnaround_minutes);

        let base_price = movie.base_price + rng.random_range(0..5_000);
        let vip_price = movie.base_price + rng.random_range(0..10_000) + 5_000;
        let sellable = room.capacity * 4 / 5;
        let tickets_sold = if sellable == 0 {
            0
        } else {
            rng.random_range(0..sellable)
        };

        let showtime = Showtime {
            id: record_id(SHOWTIME_PREFIX, index),
            movie_id: movie.id.clone(),
            room: room.clone(),
            starts_at,
            ends_at,
            base_price,
            vip_price,
            status: pick_variant(rng, &ShowtimeStatus::ALL),
            subtitled: rng.random_bool(0.7),
            audio_language: pick_word(rng, &self.profile.vocabulary.languages),
            occupied_seats: Vec::new(),
            reserved_seats: Vec::new(),
            tickets_sold,
            revenue: 0,
            created_at: self.anchor,
            updated_at: self.anchor,
        };

        self.showtimes.push(ShowtimeRef {
            index,
            movie_index,
            base_price,
            rows: room.rows,
            seats_per_row: room.seats_per_row,
        });

        Ok(showtime)
    }

    /// Generate a transaction for a random customer on a random recorded showtime.
    ///
    /// `movies` must be the movie set the showtimes were generated from.
    pub fn next_transaction(
        &mut self,
        customers: &[Customer],
        movies: &[Movie],
    ) -> Result<Transaction, GeneratorError> {
        let customer = customers
            .choose(&mut self.rng)
            .ok_or(GeneratorError::EmptyParent("customers"))?;
        let showtime = *self
            .showtimes
            .choose(&mut self.rng)
            .ok_or(GeneratorError::EmptyParent("showtimes"))?;
        let movie = movies
            .get(showtime.movie_index)
            .ok_or_else(|| GeneratorError::MissingMovie {
                showtime: showtime.id(),
                movie_index: showtime.movie_index,
            })?;

        self.counters.transactions += 1;
        let index = self.counters.transactions;
        let rng = &mut self.rng;

        let seat_total = (showtime.rows * showtime.seats_per_row) as usize;
        let seat_count = rng
            .random_range(1..=MAX_SEATS_PER_TRANSACTION)
            .min(seat_total);
        let seats: Vec<String> = sample_indices(rng, seat_total, seat_count)
            .iter()
            .map(|position| {
                seat_label(
                    position,
                    showtime.seats_per_row,
                    &self.profile.vocabulary.seat_rows,
                )
            })
            .collect();

        let total_amount = showtime.base_price * seats.len() as i64;

        Ok(Transaction {
            id: record_id(TRANSACTION_PREFIX, index),
            customer_id: customer.id.clone(),
            movie_id: movie.id.clone(),
            showtime_id: showtime.id(),
            seats,
            payment_method: pick_variant(rng, &PaymentMethod::ALL),
            total_amount,
            status: pick_variant(rng, &TransactionStatus::ALL),
            invoice_number: invoice_number(index),
            created_at: timestamp_between(
                rng,
                self.profile.schedule.transactions_from,
                self.anchor,
            ),
            updated_at: self.anchor,
            qr_code: format!("data:image/png;base64,QR_{index}"),
            payment: PaymentDetails::taxed(total_amount, self.profile.pricing.tax_rate),
        })
    }

    /// Generate `count` rooms.
    pub fn rooms(&mut self, count: u64) -> impl Iterator<Item = Room> + '_ {
        (0..count).map(move |_| self.next_room())
    }

    /// Generate `count` movies.
    pub fn movies(&mut self, count: u64) -> impl Iterator<Item = Movie> + '_ {
        (0..count).map(move |_| self.next_movie())
    }

    /// Generate `count` customers.
    pub fn customers(&mut self, count: u64) -> impl Iterator<Item = Customer> + '_ {
        (0..count).map(move |_| self.next_customer())
    }
}
