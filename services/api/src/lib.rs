mod catalog;
mod cli;
mod infra;
mod routes;
mod server;

use driving_school::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
