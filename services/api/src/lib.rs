mod cli;
mod infra;
mod pages;
mod routes;
mod server;

use mentoria::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
