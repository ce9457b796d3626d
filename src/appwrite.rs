use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::Config;
use crate::tmdb::Movie;

pub struct DatabasesClient {
    client: Client,
    endpoint: String,
    project_id: String,
    api_key: String,
    database_id: String,
    collection_id: String,
}

/// Document payload for the movies collection. One document per TMDB id,
/// created once and never updated by this function.
#[derive(Serialize, Debug)]
pub struct MovieRecord {
    pub tmdb_id: i64,
    pub title: String,
    pub overview: String,
    pub poster_path: String,
    pub release_date: String,
    pub vote_average: f64,
    pub genres: String,
}

impl MovieRecord {
    pub fn new(movie: &Movie, genres: String) -> Self {
        Self {
            tmdb_id: movie.id,
            title: movie.title.clone(),
            overview: movie.overview.clone(),
            poster_path: movie.poster_path.clone().unwrap_or_default(),
            release_date: movie.release_date.clone().unwrap_or_default(),
            vote_average: movie.vote_average,
            genres,
        }
    }
}

#[derive(Deserialize, Debug)]
struct DocumentList {
    total: u64,
}

impl DatabasesClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            project_id: config.project_id.clone(),
            api_key: config.api_key.clone(),
            database_id: config.database_id.clone(),
            collection_id: config.collection_id.clone(),
        }
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.database_id, self.collection_id
        )
    }

    /// True when a document with this tmdb_id is already in the collection.
    pub async fn movie_exists(&self, tmdb_id: i64) -> Result<bool> {
        let response = self
            .client
            .get(self.documents_url())
            .header("X-Appwrite-Project", &self.project_id)
            .header("X-Appwrite-Key", &self.api_key)
            .query(&[("queries[]", equal_query("tmdb_id", tmdb_id))])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(anyhow!(
                "Appwrite list documents failed ({}): {body}",
                status.as_u16()
            ));
        }

        let list: DocumentList = response.json().await?;
        Ok(list.total > 0)
    }

    /// Creates the document with an auto-generated id.
    pub async fn insert_movie(&self, record: &MovieRecord) -> Result<()> {
        let body = json!({
            "documentId": "unique()",
            "data": record,
        });

        let response = self
            .client
            .post(self.documents_url())
            .header("X-Appwrite-Project", &self.project_id)
            .header("X-Appwrite-Key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(anyhow!(
                "Appwrite create document failed ({}): {body}",
                status.as_u16()
            ));
        }

        Ok(())
    }
}

fn equal_query(attribute: &str, value: i64) -> String {
    json!({
        "method": "equal",
        "attribute": attribute,
        "values": [value],
    })
    .to_string()
}
