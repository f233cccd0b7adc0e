mod cli;
mod infra;
mod routes;
mod server;
mod summary;

use cpa_intake::error::AppError;

pub use infra::InMemorySessionStore;
pub use routes::with_wizard_routes;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
