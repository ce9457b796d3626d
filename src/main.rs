use std::collections::HashMap;

use lambda_runtime::{run, service_fn, tracing, Error, LambdaEvent};

mod appwrite;
mod config;
mod sync;
mod tmdb;

use sync::SyncResponse;

async fn handler(_event: LambdaEvent<HashMap<String, String>>) -> Result<SyncResponse, Error> {
    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{err}");
            return Ok(SyncResponse::failure(err.to_string()));
        }
    };

    match sync::run(&config).await {
        Ok(report) => Ok(report.into_response()),
        Err(err) => {
            tracing::error!("function error :: {err}");
            Ok(SyncResponse::failure(err.to_string()))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    run(service_fn(handler)).await?;

    Ok(())
}
