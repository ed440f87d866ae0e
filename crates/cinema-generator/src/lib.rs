//! Synthetic data generator for the cinema-seed tools.
//!
//! This crate provides the [`CinemaGenerator`] which produces deterministic
//! cinema records from a [`cinema_core::SeedProfile`]. The generator uses a
//! seeded RNG and an explicit anchor instant, so two runs with the same seed,
//! anchor and call order produce identical records.
//!
//! # Architecture
//!
//! ```text
//! SeedProfile (YAML or defaults)
//!        │
//!        ▼
//! ┌──────────────────────┐
//! │   CinemaGenerator    │
//! │                      │
//! │  - rng (StdRng)      │
//! │  - anchor ("now")    │
//! │  - counters          │
//! │  - showtime refs     │
//! └──────────┬───────────┘
//!            │
//!            ▼
//!  Room, Movie, Customer  (materialized by the caller)
//!  Showtime, Transaction  (streamed by the caller)
//! ```
//!
//! Parents must exist before children: showtimes sample the movie and room
//! sets, transactions sample customers and the showtimes this generator has
//! recorded.
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use cinema_core::SeedProfile;
//! use cinema_generator::CinemaGenerator;
//!
//! let mut generator = CinemaGenerator::new(SeedProfile::default(), 42, Utc::now()).unwrap();
//! let rooms: Vec<_> = generator.rooms(2).collect();
//! let movies: Vec<_> = generator.movies(3).collect();
//! let showtime = generator.next_showtime(&movies, &rooms).unwrap();
//! assert_eq!(showtime.id, "showtime_000001");
//! ```

pub mod generator;
pub mod generators;

// Re-exports for convenience
pub use generator::{CinemaGenerator, Counters, GeneratorError, ShowtimeRef};
pub use generators::seats::{expand_seats, room_dimensions, row_label};
