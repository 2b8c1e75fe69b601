//! Test data generation
//!
//! Used by the `playbook-seed` binary to reset a database and fill it with
//! users, categories, targets, assignments and playbook history.

use std::future::Future;

use rand::{seq::IndexedRandom, Rng};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    constants::{
        genders, DEFAULT_ASSIGNMENT_IMAGE, MAX_USER_AGE, MIN_USER_AGE, SEED_MAX_FAILURES,
        SEED_USER_PASSWORD, SEED_VIDEO_PATH,
    },
    db::repositories::{
        AssignmentRepository, BlockRepository, CategoryRepository, PlaybookRepository,
        TargetRepository, UserRepository,
    },
    engine::{
        snapshot::{PlaybookBlockDraft, PlaybookOptionDraft},
        PlaybookDraft, Trigger,
    },
    error::{AppError, AppResult},
    models::{
        Activity, AssignmentFields, BlockContent, BlockOrigin, Gender, OptionFields, TargetRules,
        UserFields,
    },
    services::{AuthService, ReassignmentService},
};

const WORDS: &[&str] = &[
    "law", "rights", "court", "contract", "justice", "evidence", "vote", "council", "privacy",
    "citizen", "judge", "jury", "appeal", "policy", "debate", "witness", "trial", "duty",
];

/// How many records of one kind to generate
#[derive(Debug, Clone)]
pub struct Batch {
    pub count: u32,
    pub starting_number: u32,
    /// Name or email template; `{}` is replaced by the running number
    pub template: String,
}

impl Batch {
    fn render(&self, number: u32) -> String {
        self.template.replacen("{}", &number.to_string(), 1)
    }

    fn check(&self) -> AppResult<()> {
        if self.template.contains("{}") {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "Template '{}' must contain a {{}} placeholder",
                self.template
            )))
        }
    }
}

/// Everything a seed run should do, in execution order
#[derive(Debug, Clone, Default)]
pub struct SeedPlan {
    pub clean_database: bool,
    pub users: Option<Batch>,
    pub categories: Option<Batch>,
    pub targets: Option<Batch>,
    pub assignments: Option<Batch>,
    pub playbook_assignments: bool,
}

/// A generated block with its options
#[derive(Debug, Clone)]
struct SeedBlock {
    content: BlockContent,
    options: Vec<OptionFields>,
}

/// Seed service
pub struct SeedService;

impl SeedService {
    pub async fn run(pool: &PgPool, plan: &SeedPlan) -> AppResult<()> {
        for batch in [&plan.users, &plan.categories, &plan.targets, &plan.assignments]
            .into_iter()
            .flatten()
        {
            batch.check()?;
        }

        if plan.clean_database {
            Self::clean(pool).await?;
            info!("Database was cleaned");
        } else {
            info!("Database cleaning was skipped");
        }

        match &plan.users {
            Some(batch) if batch.count > 0 => {
                let generated = Self::users(pool, batch).await?;
                info!(generated, "Users generated");
            }
            _ => info!("Users generating was skipped"),
        }

        match &plan.categories {
            Some(batch) if batch.count > 0 => {
                let generated = generate(batch, |name| async move {
                    CategoryRepository::create(pool, &name).await.map(|_| ())
                })
                .await?;
                info!(generated, "Categories generated");
            }
            _ => info!("Categories generating was skipped"),
        }

        match &plan.targets {
            Some(batch) if batch.count > 0 => {
                let generated = generate(batch, |name| async move {
                    TargetRepository::create(pool, &random_rules(name)).await.map(|_| ())
                })
                .await?;
                info!(generated, "Assignment targets generated");
            }
            _ => info!("Assignment targets generating was skipped"),
        }

        match &plan.assignments {
            Some(batch) if batch.count > 0 => {
                let generated = Self::assignments(pool, batch).await?;
                info!(generated, "Assignments generated");
            }
            _ => info!("Assignments generating was skipped"),
        }

        if plan.playbook_assignments {
            let generated = Self::playbook_assignments(pool).await?;
            info!(generated, "Playbook assignments generated");
        } else {
            info!("Playbook assignments generating was skipped");
        }

        Ok(())
    }

    /// Delete assignments, targets, playbooks, categories and non-admin users
    pub async fn clean(pool: &PgPool) -> AppResult<()> {
        let mut tx = pool.begin().await?;

        for statement in [
            r#"DELETE FROM assignments"#,
            r#"DELETE FROM targets"#,
            r#"DELETE FROM playbook_assignments"#,
            r#"DELETE FROM categories"#,
            r#"DELETE FROM users WHERE NOT is_admin"#,
        ] {
            sqlx::query(statement).execute(&mut *tx).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn users(pool: &PgPool, batch: &Batch) -> AppResult<u32> {
        let password_hash = AuthService::hash_password(SEED_USER_PASSWORD)?;
        let password_hash = password_hash.as_str();

        generate(batch, |email| async move {
            let fields = random_user(email);
            let mut tx = pool.begin().await?;
            let user = UserRepository::create(&mut *tx, &fields, password_hash).await?;
            ReassignmentService::reevaluate(&mut tx, Trigger::UserSaved(user.id)).await?;
            tx.commit().await?;
            Ok(())
        })
        .await
    }

    async fn assignments(pool: &PgPool, batch: &Batch) -> AppResult<u32> {
        let categories: Vec<Uuid> = CategoryRepository::list(pool, 0, i64::MAX)
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();
        let targets: Vec<Uuid> = TargetRepository::list(pool, 0, i64::MAX)
            .await?
            .into_iter()
            .map(|t| t.id)
            .collect();

        if categories.is_empty() || targets.is_empty() {
            warn!("Assignments need at least one category and one target");
            return Ok(0);
        }

        let (categories, targets) = (&categories, &targets);
        generate(batch, |name| async move {
            let (fields, blocks) = random_assignment(name, categories, targets);

            let mut tx = pool.begin().await?;
            let assignment = AssignmentRepository::create(&mut *tx, &fields).await?;
            for SeedBlock { content, options } in &blocks {
                let block = BlockRepository::create(
                    &mut *tx,
                    &assignment.id,
                    content.kind(),
                    BlockOrigin::Manual,
                    None,
                    Some(content),
                )
                .await?;
                for option in options {
                    BlockRepository::create_option(&mut *tx, &block.id, option).await?;
                }
            }
            ReassignmentService::reevaluate(&mut tx, Trigger::AssignmentSaved(assignment.id))
                .await?;
            tx.commit().await?;
            Ok(())
        })
        .await
    }

    /// Random playbook history for every non-admin user.
    ///
    /// Rows are written directly and do not add to the users' points.
    async fn playbook_assignments(pool: &PgPool) -> AppResult<u32> {
        let categories: Vec<Uuid> = CategoryRepository::list(pool, 0, i64::MAX)
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();
        if categories.is_empty() {
            warn!("Playbook assignments need at least one category");
            return Ok(0);
        }

        let users = UserRepository::list_all(pool).await?;
        let mut generated = 0;

        for user in users.iter().filter(|u| !u.is_admin) {
            let drafts = random_playbook(&categories);

            let mut tx = pool.begin().await?;
            for draft in &drafts {
                PlaybookRepository::insert_draft(&mut tx, Some(&user.id), draft, None).await?;
            }
            tx.commit().await?;

            generated += drafts.len() as u32;
            info!(user_id = %user.id, entries = drafts.len(), "Playbook generated");
        }

        Ok(generated)
    }
}

/// Run `create` for consecutive numbers until `batch.count` records exist.
///
/// Unique conflicts skip the number; after `SEED_MAX_FAILURES` of them the
/// generator gives up and reports how many records it made.
async fn generate<F, Fut>(batch: &Batch, mut create: F) -> AppResult<u32>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = AppResult<()>>,
{
    let mut generated = 0;
    let mut failures = 0;
    let mut number = batch.starting_number;

    while generated < batch.count && failures < SEED_MAX_FAILURES {
        let name = batch.render(number);
        match create(name.clone()).await {
            Ok(()) => {
                generated += 1;
                info!(name = %name, "Record generated");
            }
            Err(AppError::AlreadyExists(_)) => {
                failures += 1;
                warn!(name = %name, "Record already exists, skipping");
            }
            Err(e) => return Err(e),
        }
        number += 1;
    }

    Ok(generated)
}

fn sentence(rng: &mut impl Rng, words: usize) -> String {
    let mut sentence = (0..words)
        .filter_map(|_| WORDS.choose(rng).copied())
        .collect::<Vec<_>>()
        .join(" ");
    if let Some(first) = sentence.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    sentence
}

fn random_user(email: String) -> UserFields {
    let mut rng = rand::rng();
    let gender = genders::ALL.choose(&mut rng).and_then(|g| Gender::from_str(g));

    UserFields {
        email,
        first_name: Some(sentence(&mut rng, 1)),
        last_name: Some(sentence(&mut rng, 1)),
        age: rng.random_range(MIN_USER_AGE..=MAX_USER_AGE),
        gender,
        guardian_email: None,
        activity: rng.random_bool(0.3).then_some(Activity::LawExplorers),
        team_id: None,
        is_admin: false,
    }
}

fn random_rules(name: String) -> TargetRules {
    let mut rng = rand::rng();
    let min_age = rng.random_range(MIN_USER_AGE..=40);

    TargetRules {
        name,
        min_age,
        max_age: rng.random_range(min_age..=MAX_USER_AGE),
        male: rng.random_bool(0.8),
        female: rng.random_bool(0.8),
        non_binary: rng.random_bool(0.8),
        transgender: rng.random_bool(0.8),
        other: rng.random_bool(0.8),
        law_explorer: rng.random_bool(0.5),
    }
}

fn random_assignment(
    name: String,
    categories: &[Uuid],
    targets: &[Uuid],
) -> (AssignmentFields, Vec<SeedBlock>) {
    let mut rng = rand::rng();

    let fields = AssignmentFields {
        name,
        description: Some(sentence(&mut rng, 12)),
        image: Some(DEFAULT_ASSIGNMENT_IMAGE.to_string()),
        points: rng.random_range(1..=20) * 5,
        time: Some(rng.random_range(1..=15) * 60),
        category_id: categories.choose(&mut rng).copied().unwrap_or_default(),
        target_id: targets.choose(&mut rng).copied(),
        priority: rng.random_range(0..=10),
        dependent_on_id: None,
    };

    (fields, random_blocks(&mut rng))
}

/// 2 to 5 blocks of random kinds; questions get 3 to 6 options with exactly
/// one correct
fn random_blocks(rng: &mut impl Rng) -> Vec<SeedBlock> {
    let count = rng.random_range(2..=5);

    (0..count)
        .map(|_| match rng.random_range(0..4) {
            0 => SeedBlock {
                content: BlockContent::Text(sentence(rng, 30)),
                options: Vec::new(),
            },
            1 => SeedBlock {
                content: BlockContent::Image(DEFAULT_ASSIGNMENT_IMAGE.to_string()),
                options: Vec::new(),
            },
            2 => SeedBlock {
                content: BlockContent::Video(SEED_VIDEO_PATH.to_string()),
                options: Vec::new(),
            },
            _ => {
                let option_count = rng.random_range(3..=6);
                let correct = rng.random_range(0..option_count);
                SeedBlock {
                    content: BlockContent::Question(format!("{}?", sentence(rng, 6))),
                    options: (0..option_count)
                        .map(|index| OptionFields {
                            text: sentence(rng, 3),
                            tip: sentence(rng, 5),
                            is_correct: index == correct,
                        })
                        .collect(),
                }
            }
        })
        .collect()
}

/// 5 to 50 random playbook entries
fn random_playbook(categories: &[Uuid]) -> Vec<PlaybookDraft> {
    let mut rng = rand::rng();
    let count = rng.random_range(5..=50);

    (0..count)
        .map(|_| PlaybookDraft {
            name: sentence(&mut rng, 3),
            description: Some(sentence(&mut rng, 12)),
            image: Some(DEFAULT_ASSIGNMENT_IMAGE.to_string()),
            points: rng.random_range(1..=20) * 5,
            time: Some(rng.random_range(1..=15) * 60),
            category_id: categories.choose(&mut rng).copied().unwrap_or_default(),
            priority: rng.random_range(0..=10),
            dependency_name: None,
            blocks: random_blocks(&mut rng)
                .into_iter()
                .enumerate()
                .map(|(position, block)| playbook_block(position as i32, block))
                .collect(),
        })
        .collect()
}

fn playbook_block(position: i32, block: SeedBlock) -> PlaybookBlockDraft {
    let kind = block.content.kind().to_string();
    let (text, image, video, question) = block.content.columns();

    PlaybookBlockDraft {
        position,
        kind,
        name: None,
        text: text.map(str::to_string),
        image: image.map(str::to_string),
        video: video.map(str::to_string),
        question: question.map(str::to_string),
        options: block
            .options
            .into_iter()
            .enumerate()
            .map(|(position, o)| PlaybookOptionDraft {
                position: position as i32,
                text: o.text,
                tip: o.tip,
                is_correct: o.is_correct,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_template() {
        let batch = Batch {
            count: 3,
            starting_number: 7,
            template: "seed-user-{}@example.com".to_string(),
        };
        assert!(batch.check().is_ok());
        assert_eq!(batch.render(7), "seed-user-7@example.com");

        let bad = Batch {
            template: "no placeholder".to_string(),
            ..batch
        };
        assert!(matches!(bad.check(), Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_generate_skips_conflicts_and_gives_up() {
        let batch = Batch {
            count: 3,
            starting_number: 1,
            template: "Category #{}".to_string(),
        };

        // Numbers 2 and 3 collide with existing rows.
        let made = generate(&batch, |name| async move {
            if name.ends_with('2') || name.ends_with('3') {
                Err(AppError::AlreadyExists(name))
            } else {
                Ok(())
            }
        })
        .await
        .unwrap();
        assert_eq!(made, 3);

        let made = generate(&batch, |name| async move { Err(AppError::AlreadyExists(name)) })
            .await
            .unwrap();
        assert_eq!(made, 0);
    }

    #[tokio::test]
    async fn test_generate_propagates_other_errors() {
        let batch = Batch {
            count: 2,
            starting_number: 1,
            template: "Target #{}".to_string(),
        };
        let result =
            generate(&batch, |_| async { Err(AppError::Database("down".to_string())) }).await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[test]
    fn test_random_blocks_shape() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let blocks = random_blocks(&mut rng);
            assert!((2..=5).contains(&blocks.len()));

            for block in &blocks {
                if matches!(block.content, BlockContent::Question(_)) {
                    assert!((3..=6).contains(&block.options.len()));
                    assert_eq!(block.options.iter().filter(|o| o.is_correct).count(), 1);
                } else {
                    assert!(block.options.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_playbook_block_keeps_option_order() {
        let block = SeedBlock {
            content: BlockContent::Question("Ready?".to_string()),
            options: vec![
                OptionFields { text: "a".into(), tip: String::new(), is_correct: false },
                OptionFields { text: "b".into(), tip: String::new(), is_correct: true },
            ],
        };
        let draft = playbook_block(2, block);
        assert_eq!(draft.position, 2);
        assert_eq!(draft.kind, "Question");
        assert_eq!(draft.question.as_deref(), Some("Ready?"));
        assert_eq!(draft.options[1].position, 1);
        assert!(draft.options[1].is_correct);
    }
}
