//! Command runners behind the `cinema-seed` subcommands.
//!
//! Each runner receives the store it works on, so the same code drives a
//! MongoDB database in production and a [`MemoryStore`] in tests.
//!
//! [`MemoryStore`]: cinema_populate_mongodb::MemoryStore

use anyhow::Context;
use chrono::{DateTime, Utc};
use cinema_core::{IndexCatalog, SeedProfile};
use cinema_populate_mongodb::{
    clean_database, initialize_database, CinemaPopulator, CleanupReport, DocumentStore,
    GenerateArgs, GenerationReport, InitReport,
};

/// Drop every cinema collection.
pub async fn run_clean<S>(store: &S) -> anyhow::Result<CleanupReport>
where
    S: DocumentStore + ?Sized,
{
    let report = clean_database(store, &IndexCatalog::default())
        .await
        .context("Failed to clean database")?;

    if !report.is_clean() {
        tracing::warn!("Some collections still hold documents after cleanup");
    }
    Ok(report)
}

/// Provision collections and indexes, then insert the example fixtures.
pub async fn run_init<S>(store: &S, anchor: DateTime<Utc>) -> anyhow::Result<InitReport>
where
    S: DocumentStore + ?Sized,
{
    initialize_database(
        store,
        &IndexCatalog::default(),
        &SeedProfile::default(),
        anchor,
    )
    .await
    .context("Failed to initialize database")
}

/// Resolve the profile for `generate` and log what would be written.
pub fn plan_generation(args: &GenerateArgs) -> anyhow::Result<SeedProfile> {
    let profile = args.resolve_profile().with_context(|| match &args.profile {
        Some(path) => format!("Failed to load seed profile from {path:?}"),
        None => "Invalid generation settings".to_string(),
    })?;

    let volumes = &profile.volumes;
    tracing::info!(
        "Plan: {} rooms, {} movies, {} customers, {} showtimes, {} transactions (batch size {}, seed {})",
        volumes.rooms,
        volumes.movies,
        volumes.customers,
        volumes.showtimes,
        volumes.transactions,
        profile.batch_size,
        args.seed
    );
    Ok(profile)
}

/// Generate the synthetic dataset into `store`.
pub async fn run_generate<S>(
    store: &S,
    profile: SeedProfile,
    seed: u64,
    anchor: DateTime<Utc>,
) -> anyhow::Result<GenerationReport>
where
    S: DocumentStore + ?Sized,
{
    let mut populator = CinemaPopulator::new(store, profile, seed, anchor)
        .context("Failed to create populator")?;

    populator
        .populate_all()
        .await
        .context("Failed to generate cinema data")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use cinema_populate_mongodb::MemoryStore;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        generate: GenerateArgs,
    }

    #[test]
    fn test_plan_applies_overrides() {
        let cli = Cli::try_parse_from(["cinema-seed", "--rooms", "3", "--seed", "5"]).unwrap();
        let profile = plan_generation(&cli.generate).unwrap();

        assert_eq!(profile.volumes.rooms, 3);
        assert_eq!(cli.generate.seed, 5);
    }

    #[test]
    fn test_plan_reports_missing_profile_file() {
        let cli = Cli::try_parse_from(["cinema-seed", "--profile", "/nonexistent/profile.yaml"])
            .unwrap();
        let err = plan_generation(&cli.generate).unwrap_err();

        assert!(format!("{err:#}").contains("Failed to load seed profile"));
    }

    #[tokio::test]
    async fn test_clean_after_init() {
        let store = MemoryStore::new();
        let anchor = Utc.with_ymd_and_hms(2024, 12, 19, 12, 0, 0).unwrap();

        let init = run_init(&store, anchor).await.unwrap();
        assert_eq!(init.fixtures_inserted(), 11);

        let report = run_clean(&store).await.unwrap();
        assert_eq!(report.total_removed(), 11);
        assert!(report.is_clean());
    }
}
