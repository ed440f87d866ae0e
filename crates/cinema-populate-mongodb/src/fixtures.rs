//! Example records inserted by `init`.
//!
//! Fixture identifiers use three-digit suffixes (`movie_001`) so they never
//! collide with generated records (`movie_000001`).

use chrono::{DateTime, Duration, NaiveDate, Utc};
use cinema_core::{
    Customer, CustomerTier, Movie, Room, RoomCategory, SeedProfile, Showtime, ShowtimeStatus,
    Vocabulary,
};
use cinema_generator::expand_seats;

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
        .unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Example customers, one per tier.
pub fn customers(anchor: DateTime<Utc>) -> Vec<Customer> {
    vec![
        Customer {
            id: "customer_001".to_string(),
            name: "John Carter".to_string(),
            email: "john.carter@example.com".to_string(),
            phone: "+1555010001".to_string(),
            tier: CustomerTier::Premium,
            registered_at: anchor - Duration::days(540),
            purchase_history: Vec::new(),
            loyalty_points: 1_250,
            active: true,
        },
        Customer {
            id: "customer_002".to_string(),
            name: "Mary Lopez".to_string(),
            email: "mary.lopez@example.com".to_string(),
            phone: "+1555010002".to_string(),
            tier: CustomerTier::Frequent,
            registered_at: anchor - Duration::days(300),
            purchase_history: Vec::new(),
            loyalty_points: 480,
            active: true,
        },
        Customer {
            id: "customer_003".to_string(),
            name: "Charles Reed".to_string(),
            email: "charles.reed@example.com".to_string(),
            phone: "+1555010003".to_string(),
            tier: CustomerTier::Regular,
            registered_at: anchor - Duration::days(45),
            purchase_history: Vec::new(),
            loyalty_points: 0,
            active: true,
        },
    ]
}

/// The wanted words present in `words`, or the first word when none is.
fn known_words(words: &[String], wanted: &[&str]) -> Vec<String> {
    let found: Vec<String> = wanted
        .iter()
        .filter(|w| words.iter().any(|v| v.as_str() == **w))
        .map(|w| w.to_string())
        .collect();
    if found.is_empty() {
        words.iter().take(1).cloned().collect()
    } else {
        found
    }
}

fn known_word(words: &[String], wanted: &str) -> String {
    known_words(words, &[wanted])
        .into_iter()
        .next()
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn movie(
    vocab: &Vocabulary,
    index: u32,
    title: &str,
    synopsis: &str,
    director: &str,
    cast: &[&str],
    genres: &[&str],
    duration_minutes: u32,
    release_date: DateTime<Utc>,
    base_price: i64,
    anchor: DateTime<Utc>,
) -> Movie {
    Movie {
        id: format!("movie_{index:03}"),
        title: title.to_string(),
        original_title: title.to_string(),
        synopsis: synopsis.to_string(),
        director: director.to_string(),
        cast: strings(cast),
        genres: known_words(&vocab.genres, genres),
        duration_minutes,
        rating: known_word(&vocab.ratings, "PG-13"),
        language: known_word(&vocab.languages, "english"),
        subtitles: known_words(&vocab.languages, &["spanish", "english"]),
        release_date,
        available_from: release_date,
        available_until: anchor + Duration::days(180),
        poster_url: format!("https://images.example.com/posters/movie_{index:03}.jpg"),
        trailer_url: format!("https://videos.example.com/trailers/movie_{index:03}"),
        base_price,
        active: true,
        created_at: anchor,
        updated_at: anchor,
    }
}

/// Example catalog of three movies, labelled with the profile vocabulary.
pub fn movies(profile: &SeedProfile, anchor: DateTime<Utc>) -> Vec<Movie> {
    let vocab = &profile.vocabulary;
    vec![
        movie(
            vocab,
            1,
            "Avengers: Endgame",
            "The surviving heroes assemble once more to undo the damage done to the universe.",
            "Anthony Russo",
            &["Robert Downey Jr.", "Chris Evans", "Scarlett Johansson"],
            &["action", "adventure", "science_fiction"],
            181,
            date(2019, 4, 26),
            15_000,
            anchor,
        ),
        movie(
            vocab,
            2,
            "Spider-Man: No Way Home",
            "With his identity revealed, Peter Parker asks for help and opens the multiverse.",
            "Jon Watts",
            &["Tom Holland", "Zendaya", "Benedict Cumberbatch"],
            &["action", "adventure"],
            148,
            date(2021, 12, 17),
            14_000,
            anchor,
        ),
        movie(
            vocab,
            3,
            "The Batman",
            "In his second year fighting crime, Batman uncovers corruption in Gotham City.",
            "Matt Reeves",
            &["Robert Pattinson", "Zoe Kravitz", "Paul Dano"],
            &["action", "thriller", "drama"],
            176,
            date(2022, 3, 4),
            13_000,
            anchor,
        ),
    ]
}

/// An IMAX room of 10 rows by 20 seats and a VIP room of 8 rows by 12 seats.
pub fn rooms(profile: &SeedProfile) -> Vec<Room> {
    let alphabet = &profile.vocabulary.seat_rows;
    let surcharge = profile.pricing.vip_surcharge;

    let room = |id: &str, name: &str, category: RoomCategory, capacity, rows, seats_per_row| Room {
        id: id.to_string(),
        name: name.to_string(),
        category,
        capacity,
        rows,
        seats_per_row,
        equipment: category.equipment(),
        seats: expand_seats(rows, seats_per_row, category, alphabet, surcharge),
    };

    vec![
        room("room_001", "IMAX Room 1", RoomCategory::Imax, 200, 10, 20),
        room("room_002", "VIP Room 1", RoomCategory::Vip, 100, 8, 12),
    ]
}

/// Showtimes pairing the fixture movies with the fixture rooms.
pub fn showtimes(
    movies: &[Movie],
    rooms: &[Room],
    profile: &SeedProfile,
    anchor: DateTime<Utc>,
) -> Vec<Showtime> {
    let turnaround = profile.schedule.turnaround_minutes;
    let plan: [(usize, usize, i64, i64, bool); 3] = [
        (0, 0, 15 * 60 + 30, 3_000, true),
        (1, 1, 19 * 60, 10_000, false),
        (2, 0, 21 * 60 + 30, 2_000, true),
    ];
    let day = anchor + Duration::days(1);

    plan.iter()
        .enumerate()
        .filter_map(|(i, &(movie_index, room_index, minute_of_day, markup, subtitled))| {
            let movie = movies.get(movie_index)?;
            let room = rooms.get(room_index)?;
            let starts_at = day + Duration::minutes(minute_of_day);
            let ends_at =
                starts_at + Duration::minutes(i64::from(movie.duration_minutes) + turnaround);
            let base_price = movie.base_price + markup;

            Some(Showtime {
                id: format!("showtime_{:03}", i + 1),
                movie_id: movie.id.clone(),
                room: room.clone(),
                starts_at,
                ends_at,
                base_price,
                vip_price: base_price + profile.pricing.vip_surcharge + 5_000,
                status: ShowtimeStatus::Scheduled,
                subtitled,
                audio_language: known_word(&profile.vocabulary.languages, "english"),
                occupied_seats: Vec::new(),
                reserved_seats: Vec::new(),
                tickets_sold: 0,
                revenue: 0,
                created_at: anchor,
                updated_at: anchor,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use cinema_core::SeatKind;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_fixture_rooms_have_full_seat_maps() {
        let rooms = rooms(&SeedProfile::default());

        assert_eq!(rooms.len(), 2);
        let imax = &rooms[0];
        assert_eq!(imax.seats.len(), 200);
        assert_eq!(imax.seats.last().unwrap().label(), "J20");
        assert!(imax.seats.iter().all(|s| s.kind == SeatKind::Standard));

        let vip = &rooms[1];
        assert_eq!(vip.seats.len(), 96);
        assert_eq!(vip.seats.last().unwrap().label(), "H12");
        assert!(vip.seats.iter().all(|s| s.surcharge == 5_000));
    }

    #[test]
    fn test_fixture_showtimes_reference_fixtures() {
        let profile = SeedProfile::default();
        let movies = movies(&profile, anchor());
        let rooms = rooms(&profile);
        let showtimes = showtimes(&movies, &rooms, &profile, anchor());

        assert_eq!(showtimes.len(), 3);
        for showtime in &showtimes {
            let movie = movies.iter().find(|m| m.id == showtime.movie_id).unwrap();
            assert!(rooms.iter().any(|r| r.id == showtime.room.id));
            assert_eq!(
                showtime.ends_at - showtime.starts_at,
                Duration::minutes(i64::from(movie.duration_minutes) + 30)
            );
            assert!(showtime.starts_at > anchor());
        }
    }

    #[test]
    fn test_fixture_movies_use_profile_vocabulary() {
        let profile = SeedProfile::default();
        let vocab = &profile.vocabulary;
        let movies = movies(&profile, anchor());

        for movie in &movies {
            assert!(!movie.genres.is_empty());
            for genre in &movie.genres {
                assert!(vocab.genres.contains(genre), "unknown genre {genre}");
            }
            assert!(vocab.languages.contains(&movie.language));
            assert!(vocab.ratings.contains(&movie.rating));
            assert!(movie.subtitles.iter().all(|l| vocab.languages.contains(l)));
        }
        assert_eq!(movies[0].genres, vec!["action", "adventure", "science_fiction"]);

        let rooms = rooms(&profile);
        for showtime in showtimes(&movies, &rooms, &profile, anchor()) {
            assert!(vocab.languages.contains(&showtime.audio_language));
        }
    }

    #[test]
    fn test_fixture_movies_fall_back_to_custom_vocabulary() {
        let mut profile = SeedProfile::default();
        profile.vocabulary.genres = vec!["noir".to_string()];
        profile.vocabulary.languages = vec!["klingon".to_string()];

        for movie in movies(&profile, anchor()) {
            assert_eq!(movie.genres, vec!["noir"]);
            assert_eq!(movie.language, "klingon");
            assert_eq!(movie.subtitles, vec!["klingon"]);
        }
    }

    #[test]
    fn test_fixture_ids_do_not_collide_with_generated() {
        let customers = customers(anchor());
        let emails: std::collections::HashSet<_> = customers.iter().map(|c| &c.email).collect();

        assert_eq!(emails.len(), customers.len());
        assert!(customers.iter().all(|c| c.id.len() == "customer_001".len()));
    }
}
