use anyhow::{anyhow, bail, Result};

const DEFAULT_ENDPOINT: &str = "https://cloud.appwrite.io/v1";

const REQUIRED: &[&str] = &[
    "TMDB_API_KEY",
    "APPWRITE_DATABASE_ID",
    "APPWRITE_COLLECTION_ID",
    "APPWRITE_FUNCTION_PROJECT_ID",
    "APPWRITE_API_KEY",
];

#[derive(Debug)]
pub struct Config {
    pub endpoint: String,
    pub project_id: String,
    pub api_key: String,
    pub database_id: String,
    pub collection_id: String,
    pub tmdb_api_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // An empty value is as useless as an unset one
        let lookup = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let missing: Vec<&str> = REQUIRED
            .iter()
            .copied()
            .filter(|name| lookup(name).is_none())
            .collect();

        if !missing.is_empty() {
            bail!(
                "Missing required environment variables: {}",
                missing.join(", ")
            );
        }

        let require =
            |name: &str| lookup(name).ok_or_else(|| anyhow!("missing environment variable {name}"));

        Ok(Self {
            endpoint: lookup("APPWRITE_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            project_id: require("APPWRITE_FUNCTION_PROJECT_ID")?,
            api_key: require("APPWRITE_API_KEY")?,
            database_id: require("APPWRITE_DATABASE_ID")?,
            collection_id: require("APPWRITE_COLLECTION_ID")?,
            tmdb_api_key: require("TMDB_API_KEY")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_env(name: &str) -> Option<String> {
        match name {
            "APPWRITE_FUNCTION_PROJECT_ID" => Some("project".to_string()),
            "APPWRITE_API_KEY" => Some("key".to_string()),
            "APPWRITE_DATABASE_ID" => Some("db".to_string()),
            "APPWRITE_COLLECTION_ID" => Some("movies".to_string()),
            "TMDB_API_KEY" => Some("tmdb".to_string()),
            _ => None,
        }
    }

    #[test]
    fn endpoint_defaults_to_appwrite_cloud() {
        let config = Config::from_lookup(full_env).unwrap();
        assert_eq!(config.endpoint, "https://cloud.appwrite.io/v1");
        assert_eq!(config.project_id, "project");
        assert_eq!(config.collection_id, "movies");
    }

    #[test]
    fn explicit_endpoint_wins() {
        let config = Config::from_lookup(|name| {
            if name == "APPWRITE_ENDPOINT" {
                Some("https://appwrite.internal/v1".to_string())
            } else {
                full_env(name)
            }
        })
        .unwrap();
        assert_eq!(config.endpoint, "https://appwrite.internal/v1");
    }

    #[test]
    fn all_missing_variables_are_reported_together() {
        let err = Config::from_lookup(|name| match name {
            "TMDB_API_KEY" | "APPWRITE_API_KEY" => None,
            other => full_env(other),
        })
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: TMDB_API_KEY, APPWRITE_API_KEY"
        );
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let err = Config::from_lookup(|name| match name {
            "APPWRITE_DATABASE_ID" => Some(String::new()),
            other => full_env(other),
        })
        .unwrap_err();
        assert!(err.to_string().contains("APPWRITE_DATABASE_ID"));
    }
}
