mod admin;
mod cli;
mod desk;
mod infra;
mod render;

use bvb_registration::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
