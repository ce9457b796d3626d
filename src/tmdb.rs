use anyhow::{anyhow, Result};
use lambda_runtime::tracing;
use reqwest::Client;
use serde::Deserialize;

const BASE_URL: &str = "https://api.themoviedb.org/3";

pub struct TmdbClient {
    client: Client,
    api_key: String,
}

#[derive(Deserialize, Debug)]
struct PopularPage {
    #[serde(default)]
    results: Vec<Movie>,
}

#[derive(Deserialize, Debug)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
}

#[derive(Deserialize, Debug)]
pub struct MovieDetails {
    pub genres: Vec<Genre>,
}

#[derive(Deserialize, Debug)]
pub struct Genre {
    pub name: String,
}

impl MovieDetails {
    /// Genre names joined in listing order, e.g. "Action, Adventure".
    pub fn genre_names(&self) -> String {
        self.genres
            .iter()
            .map(|genre| genre.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl TmdbClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    /// GET /movie/popular, first page only.
    pub async fn popular_movies(&self) -> Result<Vec<Movie>> {
        let url = format!("{BASE_URL}/movie/popular");
        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", "en-US"),
                ("page", "1"),
            ])
            .send()
            .await?;

        let page: PopularPage = check(response, "TMDB fetch failed").await?;
        tracing::info!("fetched {} movies from TMDB", page.results.len());

        Ok(page.results)
    }

    /// GET /movie/{id} - the listing endpoint only carries genre ids,
    /// the detail record resolves them to names.
    pub async fn movie_details(&self, id: i64) -> Result<MovieDetails> {
        let url = format!("{BASE_URL}/movie/{id}");
        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        check(response, "TMDB details fetch failed").await
    }
}

async fn check<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    context: &str,
) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await?;
        return Err(anyhow!("{context} ({}): {body}", status.as_u16()));
    }

    Ok(response.json().await?)
}
