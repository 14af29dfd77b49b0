//! Migrate command - Database migration management.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;

    match args.action {
        MigrateAction::Up => {
            db.migrate_up().await?;
            tracing::info!("Migrations applied");
        }
        MigrateAction::Down => {
            db.migrate_down().await?;
            tracing::info!("Last migration rolled back");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migrate_status().await? {
                println!("{}: {}", name, if applied { "applied" } else { "pending" });
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Resetting database and re-running all migrations");
            db.migrate_fresh().await?;
            tracing::info!("Fresh migrations completed");
        }
    }

    Ok(())
}
