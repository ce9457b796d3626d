use anyhow::Result;
use lambda_runtime::tracing;
use serde::Serialize;

use crate::appwrite::{DatabasesClient, MovieRecord};
use crate::config::Config;
use crate::tmdb::{Movie, TmdbClient};

#[derive(Default, Debug)]
pub struct SyncReport {
    pub inserted: u64,
    pub skipped: u64,
}

impl SyncReport {
    pub fn into_response(self) -> SyncResponse {
        SyncResponse {
            success: true,
            message: Some(format!(
                "Inserted {} movies, skipped {} duplicates",
                self.inserted, self.skipped
            )),
            inserted_count: Some(self.inserted),
            skipped_count: Some(self.skipped),
            error: None,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inserted_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncResponse {
    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            message: None,
            inserted_count: None,
            skipped_count: None,
            error: Some(error),
        }
    }
}

enum Outcome {
    Inserted,
    Skipped,
}

pub async fn run(config: &Config) -> Result<SyncReport> {
    let tmdb = TmdbClient::new(config.tmdb_api_key.clone());
    let databases = DatabasesClient::new(config);

    tracing::info!("starting to fetch movies from TMDB");
    let movies = tmdb.popular_movies().await?;

    let mut report = SyncReport::default();
    for movie in &movies {
        match sync_movie(&tmdb, &databases, movie).await {
            Ok(Outcome::Inserted) => {
                tracing::info!("inserted: {}", movie.title);
                report.inserted += 1;
            }
            Ok(Outcome::Skipped) => {
                tracing::info!("\"{}\" already exists, skipping", movie.title);
                report.skipped += 1;
            }
            // A failed movie counts toward neither total; the batch goes on
            Err(err) => tracing::error!("error inserting {}: {err}", movie.title),
        }
    }

    Ok(report)
}

async fn sync_movie(
    tmdb: &TmdbClient,
    databases: &DatabasesClient,
    movie: &Movie,
) -> Result<Outcome> {
    if databases.movie_exists(movie.id).await? {
        return Ok(Outcome::Skipped);
    }

    let details = tmdb.movie_details(movie.id).await?;
    let record = MovieRecord::new(movie, details.genre_names());
    databases.insert_movie(&record).await?;

    Ok(Outcome::Inserted)
}
