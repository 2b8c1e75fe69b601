//! Playbook - database seeding tool
//!
//! Populates a database with test data:
//!
//! ```text
//! playbook-seed --clean-database --users-count 50 --categories-count 5 \
//!     --assignment-targets-count 3 --assignments-count 20 --generate-playbook-assignments
//! ```

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use playbook::{
    config::DatabaseConfig,
    db,
    services::seed_service::{Batch, SeedPlan, SeedService},
};

#[derive(Debug, Parser)]
#[command(name = "playbook-seed", about = "Populates a database with test data")]
struct Args {
    /// Delete assignments, targets, playbooks, categories and non-admin users first
    #[arg(long)]
    clean_database: bool,

    /// Number of users to generate
    #[arg(long)]
    users_count: Option<u32>,
    #[arg(long, default_value_t = 1)]
    users_starting_number: u32,
    /// Email template; must contain a `{}` placeholder
    #[arg(long, default_value = "playbook-user-{}@example.com")]
    users_email_template: String,

    /// Number of categories to generate
    #[arg(long)]
    categories_count: Option<u32>,
    #[arg(long, default_value_t = 1)]
    categories_starting_number: u32,
    #[arg(long, default_value = "Category #{}")]
    categories_name_template: String,

    /// Number of assignment targets to generate
    #[arg(long)]
    assignment_targets_count: Option<u32>,
    #[arg(long, default_value_t = 1)]
    assignment_targets_starting_number: u32,
    #[arg(long, default_value = "Assignment target #{}")]
    assignment_targets_name_template: String,

    /// Number of assignments to generate
    #[arg(long)]
    assignments_count: Option<u32>,
    #[arg(long, default_value_t = 1)]
    assignments_starting_number: u32,
    #[arg(long, default_value = "Assignment #{}")]
    assignments_name_template: String,

    /// Give every non-admin user a random playbook history
    #[arg(long)]
    generate_playbook_assignments: bool,
}

impl Args {
    fn into_plan(self) -> SeedPlan {
        let batch = |count: Option<u32>, starting_number: u32, template: String| {
            count.map(|count| Batch {
                count,
                starting_number,
                template,
            })
        };

        SeedPlan {
            clean_database: self.clean_database,
            users: batch(
                self.users_count,
                self.users_starting_number,
                self.users_email_template,
            ),
            categories: batch(
                self.categories_count,
                self.categories_starting_number,
                self.categories_name_template,
            ),
            targets: batch(
                self.assignment_targets_count,
                self.assignment_targets_starting_number,
                self.assignment_targets_name_template,
            ),
            assignments: batch(
                self.assignments_count,
                self.assignments_starting_number,
                self.assignments_name_template,
            ),
            playbook_assignments: self.generate_playbook_assignments,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "playbook=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    dotenvy::dotenv().ok();
    let database = DatabaseConfig::from_env()?;

    let pool = db::create_pool(&database).await?;
    db::run_migrations(&pool).await?;

    SeedService::run(&pool, &args.into_plan()).await?;

    tracing::info!("Seeding finished");
    Ok(())
}
