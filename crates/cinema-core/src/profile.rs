//! Seed profile: volumes, vocabularies and constants shared by `init` and `generate`.
//!
//! A profile can be loaded from YAML. Every field is optional and falls back
//! to the built-in default, so an empty document is a valid profile:
//!
//! ```yaml
//! volumes:
//!   rooms: 10
//!   movies: 100
//!   showtimes: 2000
//! batch_size: 500
//! vocabulary:
//!   seat_rows: [A, B, C, D, E, F]
//! ```

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default number of records per bulk write.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Longest accepted showtime horizon, about a century.
pub const MAX_SHOWTIME_HORIZON_DAYS: i64 = 36_500;

/// Longest accepted cleaning time after a screening.
pub const MAX_TURNAROUND_MINUTES: i64 = 1_440;

/// Upper bound for any price or surcharge, in minor units.
pub const MAX_PRICE: i64 = 1_000_000_000_000;

/// Schedule dates must fall within these years.
pub const SCHEDULE_YEARS: std::ops::RangeInclusive<i32> = 1900..=9999;

/// Error type for profile operations.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// Error reading profile file
    #[error("Failed to read profile file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Profile parsed but holds unusable values
    #[error("Invalid profile: {0}")]
    Invalid(String),
}

/// Number of records generated per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Volumes {
    pub rooms: u64,
    pub movies: u64,
    pub customers: u64,
    pub showtimes: u64,
    pub transactions: u64,
}

impl Default for Volumes {
    fn default() -> Self {
        Self {
            rooms: 1_000,
            movies: 50_000,
            customers: 100_000,
            showtimes: 1_000_000,
            transactions: 500_000,
        }
    }
}

impl Volumes {
    pub fn total(&self) -> u64 {
        [self.movies, self.customers, self.showtimes, self.transactions]
            .into_iter()
            .fold(self.rooms, u64::saturating_add)
    }
}

/// Fixed vocabularies sampled by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Vocabulary {
    pub genres: Vec<String>,
    pub ratings: Vec<String>,
    pub languages: Vec<String>,
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
    pub director_first_names: Vec<String>,
    pub director_last_names: Vec<String>,
    pub title_words: Vec<String>,
    /// Ordered row labels. Rows past the end continue as `AA`, `AB`, ...
    pub seat_rows: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            genres: strings(&[
                "action",
                "adventure",
                "comedy",
                "drama",
                "horror",
                "science_fiction",
                "romance",
                "thriller",
                "documentary",
                "animation",
                "family",
                "musical",
                "western",
                "fantasy",
                "mystery",
                "biography",
                "war",
                "sports",
            ]),
            ratings: strings(&["G", "PG", "PG-13", "R", "NC-17"]),
            languages: strings(&[
                "spanish",
                "english",
                "french",
                "german",
                "italian",
                "portuguese",
            ]),
            first_names: strings(&[
                "Juan", "Maria", "Carlos", "Ana", "Luis", "Sofia", "Pedro", "Elena", "Miguel",
                "Carmen",
            ]),
            last_names: strings(&[
                "Garcia",
                "Rodriguez",
                "Lopez",
                "Martinez",
                "Gonzalez",
                "Perez",
                "Sanchez",
                "Ramirez",
                "Torres",
                "Flores",
            ]),
            director_first_names: strings(&[
                "James",
                "John",
                "Robert",
                "Michael",
                "William",
                "David",
                "Richard",
                "Joseph",
                "Thomas",
                "Christopher",
                "Charles",
                "Daniel",
                "Matthew",
                "Anthony",
                "Mark",
                "Donald",
                "Steven",
                "Paul",
                "Andrew",
                "Joshua",
            ]),
            director_last_names: strings(&[
                "Smith",
                "Johnson",
                "Williams",
                "Brown",
                "Jones",
                "Garcia",
                "Miller",
                "Davis",
                "Rodriguez",
                "Martinez",
                "Hernandez",
                "Lopez",
                "Gonzalez",
                "Wilson",
                "Anderson",
                "Thomas",
                "Taylor",
                "Moore",
                "Jackson",
                "Martin",
            ]),
            title_words: strings(&[
                "The", "A", "Adventure", "Mystery", "Destiny", "Road", "Journey", "Dream",
                "Reality", "Future", "Past", "Present", "World", "Life", "Death", "Love", "Hate",
                "War", "Peace", "Freedom", "Bondage", "Victory", "Defeat",
            ]),
            seat_rows: ('A'..='T').map(|c| c.to_string()).collect(),
        }
    }
}

/// Prices and money-related constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Pricing {
    /// Extra charge on every seat of a VIP room.
    pub vip_surcharge: i64,
    /// Tax applied on top of a transaction subtotal.
    pub tax_rate: Decimal,
    /// Lower bound (inclusive) of a movie's base price.
    pub movie_price_min: i64,
    /// Upper bound (exclusive) of a movie's base price.
    pub movie_price_max: i64,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            vip_surcharge: 5_000,
            tax_rate: Decimal::new(19, 2),
            movie_price_min: 8_000,
            movie_price_max: 18_000,
        }
    }
}

/// Time windows used when sampling timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Schedule {
    pub release_from: DateTime<Utc>,
    pub release_until: DateTime<Utc>,
    /// Customers register between this instant and the generation anchor.
    pub registration_from: DateTime<Utc>,
    /// Transactions are created between this instant and the generation anchor.
    pub transactions_from: DateTime<Utc>,
    /// Showtimes start within this many days after the generation anchor.
    pub showtime_horizon_days: i64,
    /// Cleaning time added after each screening.
    pub turnaround_minutes: i64,
}

fn utc_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            release_from: utc_date(2020, 1, 1),
            release_until: utc_date(2024, 12, 31),
            registration_from: utc_date(2020, 1, 1),
            transactions_from: utc_date(2023, 1, 1),
            showtime_horizon_days: 180,
            turnaround_minutes: 30,
        }
    }
}

/// Everything the seeding tools need to know besides the store connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedProfile {
    pub volumes: Volumes,
    pub batch_size: usize,
    pub vocabulary: Vocabulary,
    pub pricing: Pricing,
    pub schedule: Schedule,
}

impl Default for SeedProfile {
    fn default() -> Self {
        Self {
            volumes: Volumes::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            vocabulary: Vocabulary::default(),
            pricing: Pricing::default(),
            schedule: Schedule::default(),
        }
    }
}

impl SeedProfile {
    /// Load a profile from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ProfileError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a profile from a YAML string and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self, ProfileError> {
        let profile: SeedProfile = if yaml.trim().is_empty() {
            SeedProfile::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Check the profile for values the generator cannot work with.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.batch_size == 0 {
            return Err(ProfileError::Invalid(
                "batch_size must be greater than zero".to_string(),
            ));
        }

        let vocab = &self.vocabulary;
        let lists: [(&str, &Vec<String>); 9] = [
            ("genres", &vocab.genres),
            ("ratings", &vocab.ratings),
            ("languages", &vocab.languages),
            ("first_names", &vocab.first_names),
            ("last_names", &vocab.last_names),
            ("director_first_names", &vocab.director_first_names),
            ("director_last_names", &vocab.director_last_names),
            ("title_words", &vocab.title_words),
            ("seat_rows", &vocab.seat_rows),
        ];
        for (name, list) in lists {
            if list.is_empty() {
                return Err(ProfileError::Invalid(format!(
                    "vocabulary.{name} must not be empty"
                )));
            }
        }
        if vocab.seat_rows.iter().any(|row| row.is_empty()) {
            return Err(ProfileError::Invalid(
                "vocabulary.seat_rows must not contain empty labels".to_string(),
            ));
        }
        // Seat labels are the row label followed by the seat number.
        if let Some(row) = vocab
            .seat_rows
            .iter()
            .find(|row| row.chars().any(|c| c.is_ascii_digit()))
        {
            return Err(ProfileError::Invalid(format!(
                "vocabulary.seat_rows label '{row}' must not contain digits"
            )));
        }
        for (i, a) in vocab.seat_rows.iter().enumerate() {
            for b in &vocab.seat_rows[i + 1..] {
                if a.starts_with(b.as_str()) || b.starts_with(a.as_str()) {
                    return Err(ProfileError::Invalid(format!(
                        "vocabulary.seat_rows labels '{a}' and '{b}' are ambiguous: \
                         labels must be distinct and none may prefix another"
                    )));
                }
            }
        }

        let pricing = &self.pricing;
        if pricing.tax_rate < Decimal::ZERO || pricing.tax_rate > Decimal::ONE {
            return Err(ProfileError::Invalid(format!(
                "pricing.tax_rate must be within [0, 1], got {}",
                pricing.tax_rate
            )));
        }
        if pricing.movie_price_min < 0 || pricing.movie_price_min >= pricing.movie_price_max {
            return Err(ProfileError::Invalid(format!(
                "pricing.movie_price_min ({}) must be non-negative and below movie_price_max ({})",
                pricing.movie_price_min, pricing.movie_price_max
            )));
        }
        if pricing.movie_price_max > MAX_PRICE {
            return Err(ProfileError::Invalid(format!(
                "pricing.movie_price_max must not exceed {MAX_PRICE}, got {}",
                pricing.movie_price_max
            )));
        }
        if pricing.vip_surcharge < 0 || pricing.vip_surcharge > MAX_PRICE {
            return Err(ProfileError::Invalid(format!(
                "pricing.vip_surcharge must be within [0, {MAX_PRICE}], got {}",
                pricing.vip_surcharge
            )));
        }

        let schedule = &self.schedule;
        let dates = [
            ("release_from", schedule.release_from),
            ("release_until", schedule.release_until),
            ("registration_from", schedule.registration_from),
            ("transactions_from", schedule.transactions_from),
        ];
        for (name, date) in dates {
            if !SCHEDULE_YEARS.contains(&date.year()) {
                return Err(ProfileError::Invalid(format!(
                    "schedule.{name} must fall within years {}..={}, got {date}",
                    SCHEDULE_YEARS.start(),
                    SCHEDULE_YEARS.end()
                )));
            }
        }
        if schedule.release_from >= schedule.release_until {
            return Err(ProfileError::Invalid(
                "schedule.release_from must be before schedule.release_until".to_string(),
            ));
        }
        if schedule.showtime_horizon_days <= 0
            || schedule.showtime_horizon_days > MAX_SHOWTIME_HORIZON_DAYS
        {
            return Err(ProfileError::Invalid(format!(
                "schedule.showtime_horizon_days must be within [1, {MAX_SHOWTIME_HORIZON_DAYS}], got {}",
                schedule.showtime_horizon_days
            )));
        }
        if schedule.turnaround_minutes < 0 || schedule.turnaround_minutes > MAX_TURNAROUND_MINUTES
        {
            return Err(ProfileError::Invalid(format!(
                "schedule.turnaround_minutes must be within [0, {MAX_TURNAROUND_MINUTES}], got {}",
                schedule.turnaround_minutes
            )));
        }

        let volumes = &self.volumes;
        if volumes.showtimes > 0 && (volumes.movies == 0 || volumes.rooms == 0) {
            return Err(ProfileError::Invalid(
                "showtimes need at least one movie and one room".to_string(),
            ));
        }
        if volumes.transactions > 0 && (volumes.customers == 0 || volumes.showtimes == 0) {
            return Err(ProfileError::Invalid(
                "transactions need at least one customer and one showtime".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_empty_yaml_is_default_profile() {
        let profile = SeedProfile::from_yaml("").unwrap();
        assert_eq!(profile, SeedProfile::default());
        assert_eq!(profile.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(profile.volumes.showtimes, 1_000_000);
        assert_eq!(profile.vocabulary.seat_rows.len(), 20);
        assert_eq!(profile.vocabulary.seat_rows.last().unwrap(), "T");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
volumes:
  rooms: 5
  movies: 20
batch_size: 250
pricing:
  tax_rate: "0.16"
"#;
        let profile = SeedProfile::from_yaml(yaml).unwrap();

        assert_eq!(profile.volumes.rooms, 5);
        assert_eq!(profile.volumes.movies, 20);
        assert_eq!(profile.volumes.customers, 100_000);
        assert_eq!(profile.batch_size, 250);
        assert_eq!(profile.pricing.tax_rate, Decimal::new(16, 2));
        assert_eq!(profile.pricing.vip_surcharge, 5_000);
        assert_eq!(profile.schedule.release_from.year(), 2020);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = SeedProfile::from_yaml("volumes:\n  screens: 3\n");
        assert!(matches!(result, Err(ProfileError::YamlError(_))));
    }

    #[test]
    fn test_empty_vocabulary_rejected() {
        let result = SeedProfile::from_yaml("vocabulary:\n  genres: []\n");
        match result {
            Err(ProfileError::Invalid(msg)) => assert!(msg.contains("genres")),
            other => panic!("Expected Invalid error, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let result = SeedProfile::from_yaml("batch_size: 0\n");
        assert!(matches!(result, Err(ProfileError::Invalid(_))));
    }

    #[test]
    fn test_tax_rate_out_of_range_rejected() {
        let mut profile = SeedProfile::default();
        profile.pricing.tax_rate = Decimal::new(15, 1);
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::Invalid(_))
        ));
    }

    #[test]
    fn test_orphan_transactions_rejected() {
        let mut profile = SeedProfile::default();
        profile.volumes.showtimes = 0;
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::Invalid(_))
        ));

        profile.volumes.transactions = 0;
        assert!(profile.validate().is_ok());
    }

    fn invalid(profile: &SeedProfile) -> String {
        match profile.validate() {
            Err(ProfileError::Invalid(msg)) => msg,
            other => panic!("Expected Invalid error, got {other:?}"),
        }
    }

    #[test]
    fn test_huge_horizon_rejected() {
        let mut profile = SeedProfile::default();
        profile.schedule.showtime_horizon_days = 10_000_000_000_000;
        assert!(invalid(&profile).contains("showtime_horizon_days"));

        profile.schedule.showtime_horizon_days = MAX_SHOWTIME_HORIZON_DAYS;
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_huge_turnaround_rejected() {
        let mut profile = SeedProfile::default();
        profile.schedule.turnaround_minutes = i64::MAX;
        assert!(invalid(&profile).contains("turnaround_minutes"));

        profile.schedule.turnaround_minutes = MAX_TURNAROUND_MINUTES;
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_huge_prices_rejected() {
        let mut profile = SeedProfile::default();
        profile.pricing.movie_price_min = i64::MAX - 10;
        profile.pricing.movie_price_max = i64::MAX;
        assert!(invalid(&profile).contains("movie_price_max"));

        let mut profile = SeedProfile::default();
        profile.pricing.vip_surcharge = i64::MAX;
        assert!(invalid(&profile).contains("vip_surcharge"));
    }

    #[test]
    fn test_far_schedule_dates_rejected() {
        let mut profile = SeedProfile::default();
        profile.schedule.release_until = DateTime::<Utc>::MAX_UTC;
        assert!(invalid(&profile).contains("release_until"));
    }

    #[test]
    fn test_ambiguous_seat_rows_rejected() {
        let mut profile = SeedProfile::default();
        profile.vocabulary.seat_rows = strings(&["A", "B", "A"]);
        assert!(invalid(&profile).contains("seat_rows"));

        profile.vocabulary.seat_rows = strings(&["A", "AA"]);
        assert!(invalid(&profile).contains("seat_rows"));

        profile.vocabulary.seat_rows = strings(&["R1", "R2"]);
        assert!(invalid(&profile).contains("digits"));

        profile.vocabulary.seat_rows = strings(&["AA", "AB", "B"]);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_volume_total_saturates() {
        let volumes = Volumes {
            rooms: u64::MAX,
            movies: u64::MAX,
            customers: 1,
            showtimes: 1,
            transactions: 1,
        };
        assert_eq!(volumes.total(), u64::MAX);
        assert_eq!(Volumes::default().total(), 1_651_000);
    }

    #[test]
    fn test_from_file_missing() {
        let result = SeedProfile::from_file("/nonexistent/profile.yaml");
        assert!(matches!(result, Err(ProfileError::IoError(_))));
    }
}
