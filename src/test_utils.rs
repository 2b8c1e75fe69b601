//! Database test support
//!
//! One PostgreSQL container is started lazily and shared by every test;
//! each test gets its own freshly migrated database inside it.

use sqlx::{postgres::PgPoolOptions, Connection, PgConnection, PgPool};
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    models::{AssignmentFields, Category, Gender, Target, TargetRules, User, UserFields},
    services::{AssignmentService, CategoryService, TargetService, UserService},
};

const USER: &str = "playbook";
const PASSWORD: &str = "playbook_test";

static POSTGRES: OnceCell<(ContainerAsync<Postgres>, String)> = OnceCell::const_new();

/// Server URL without a database name
async fn server_url() -> &'static str {
    let (_, url) = POSTGRES
        .get_or_init(|| async {
            let container = Postgres::default()
                .with_user(USER)
                .with_password(PASSWORD)
                .with_db_name("postgres")
                .start()
                .await
                .expect("Failed to start PostgreSQL container");

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();
            let url = format!("postgres://{USER}:{PASSWORD}@{host}:{port}");

            (container, url)
        })
        .await;
    url
}

/// A migrated database private to the calling test
pub async fn test_pool() -> PgPool {
    let server = server_url().await;
    let name = format!("test_{}", Uuid::new_v4().simple());

    let mut admin = PgConnection::connect(&format!("{server}/postgres"))
        .await
        .expect("Failed to connect to test server");
    sqlx::query(&format!(r#"CREATE DATABASE "{name}""#))
        .execute(&mut admin)
        .await
        .expect("Failed to create test database");
    admin.close().await.ok();

    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect(&format!("{server}/{name}"))
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub async fn category(pool: &PgPool) -> Category {
    CategoryService::create(pool, &format!("Category {}", Uuid::new_v4().simple()))
        .await
        .unwrap()
}

/// A target matching every gender between the given ages
pub async fn target(pool: &PgPool, min_age: i16, max_age: i16) -> Target {
    TargetService::create(pool, &target_rules(min_age, max_age)).await.unwrap()
}

pub fn target_rules(min_age: i16, max_age: i16) -> TargetRules {
    TargetRules {
        name: format!("Target {}", Uuid::new_v4().simple()),
        min_age,
        max_age,
        male: true,
        female: true,
        non_binary: true,
        transgender: true,
        other: true,
        law_explorer: false,
    }
}

pub fn assignment_fields(name: &str, category_id: Uuid, target_id: Uuid) -> AssignmentFields {
    AssignmentFields {
        name: name.to_string(),
        description: Some(format!("About {name}")),
        image: None,
        points: 50,
        time: None,
        category_id,
        target_id: Some(target_id),
        priority: 1,
        dependent_on_id: None,
    }
}

pub async fn user(pool: &PgPool, age: i16) -> User {
    let fields = UserFields {
        email: format!("{}@example.com", Uuid::new_v4().simple()),
        first_name: Some("Test".to_string()),
        last_name: Some("User".to_string()),
        age,
        gender: Some(Gender::Female),
        guardian_email: None,
        activity: None,
        team_id: None,
        is_admin: false,
    };
    UserService::create(pool, &fields, "correct-horse-battery").await.unwrap()
}

pub async fn assignment(pool: &PgPool, fields: &AssignmentFields) -> Uuid {
    AssignmentService::create(pool, fields).await.unwrap().id
}
