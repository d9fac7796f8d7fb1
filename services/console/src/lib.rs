mod cli;
mod commands;
mod infra;
mod render;

use hrms_dashboard::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
