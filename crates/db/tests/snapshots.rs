//! Integration tests for the persistence guarantees of the readiness
//! history and roadmap snapshots, against a real database:
//! - Score and breakdown written as one atomic unit
//! - Item failure rolling back a roadmap header
//! - Re-generation appending instead of mutating
//! - Role-change invalidation deleting every snapshot (items cascade)

use skillgauge_db::models::readiness::{NewBreakdownLine, NewReadinessScore};
use skillgauge_db::models::roadmap::{NewRoadmap, NewRoadmapItem};
use skillgauge_db::repositories::{ReadinessRepo, RoadmapRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_category(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO categories (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn seed_skill(pool: &PgPool, category_id: i64, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO skills (category_id, name) VALUES ($1, $2) RETURNING id")
        .bind(category_id)
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

fn new_score(user_id: i64, category_id: i64) -> NewReadinessScore {
    NewReadinessScore {
        user_id,
        category_id,
        total_score: 10,
        max_possible_score: 15,
        trigger_source: "user_explicit".to_string(),
    }
}

fn met_line(skill_id: i64, name: &str) -> NewBreakdownLine {
    NewBreakdownLine {
        skill_id,
        skill_name: name.to_string(),
        required_weight: 10,
        achieved_weight: 10,
        status: "met".to_string(),
        skill_source: Some("self".to_string()),
        importance: "required".to_string(),
    }
}

fn missing_line(skill_id: i64, name: &str) -> NewBreakdownLine {
    NewBreakdownLine {
        skill_id,
        skill_name: name.to_string(),
        required_weight: 5,
        achieved_weight: 0,
        status: "missing".to_string(),
        skill_source: None,
        importance: "optional".to_string(),
    }
}

fn new_header(user_id: i64, category_id: i64, readiness_id: i64) -> NewRoadmap {
    NewRoadmap {
        user_id,
        category_id,
        readiness_id,
        readiness_percentage: 67,
        high_count: 1,
        medium_count: 0,
        low_count: 1,
    }
}

fn new_item(skill_id: i64, name: &str, rank: i32) -> NewRoadmapItem {
    NewRoadmapItem {
        skill_id,
        skill_name: name.to_string(),
        priority: "HIGH".to_string(),
        category: "required_gap".to_string(),
        confidence: "unvalidated".to_string(),
        reason: format!("'{name}' is required for this role and is missing"),
        priority_score: 100,
        rank,
        rule_applied: "required_gap".to_string(),
        current_level: "none".to_string(),
        target_level: "intermediate".to_string(),
        gap: "missing".to_string(),
        weight: 4,
        action: "Learn this skill and add it to your profile".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Test: Score and breakdown are one atomic unit
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn score_and_breakdown_are_written_together(pool: PgPool) {
    let category_id = seed_category(&pool, "Backend Engineer").await;
    let rust_id = seed_skill(&pool, category_id, "Rust").await;
    let sql_id = seed_skill(&pool, category_id, "SQL").await;

    let created = ReadinessRepo::insert_with_breakdown(
        &pool,
        &new_score(1, category_id),
        &[met_line(rust_id, "Rust"), missing_line(sql_id, "SQL")],
    )
    .await
    .unwrap();

    let found = ReadinessRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("score row must exist");
    assert_eq!(found.total_score, 10);
    assert_eq!(found.max_possible_score, 15);

    let breakdown = ReadinessRepo::list_breakdown(&pool, created.id).await.unwrap();
    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0].skill_id, rust_id);
    assert_eq!(breakdown[0].status, "met");
    assert_eq!(breakdown[1].skill_id, sql_id);
    assert_eq!(breakdown[1].skill_source, None);

    // The met set the guard compares against.
    let met = ReadinessRepo::met_skill_ids(&pool, created.id).await.unwrap();
    assert_eq!(met, vec![rust_id]);
}

#[sqlx::test(migrations = "./migrations")]
async fn history_is_append_only_newest_first(pool: PgPool) {
    let category_id = seed_category(&pool, "Backend Engineer").await;

    let first = ReadinessRepo::insert_with_breakdown(&pool, &new_score(1, category_id), &[])
        .await
        .unwrap();
    let second = ReadinessRepo::insert_with_breakdown(&pool, &new_score(1, category_id), &[])
        .await
        .unwrap();

    let history = ReadinessRepo::list_history(&pool, 1, category_id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, second.id);
    assert_eq!(history[1].id, first.id);

    let latest = ReadinessRepo::find_latest(&pool, 1, category_id)
        .await
        .unwrap()
        .expect("latest must exist");
    assert_eq!(latest.id, second.id);
}

// ---------------------------------------------------------------------------
// Test: Item failure rolls back the roadmap header
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_rank_rolls_back_roadmap_header(pool: PgPool) {
    let category_id = seed_category(&pool, "Backend Engineer").await;
    let rust_id = seed_skill(&pool, category_id, "Rust").await;
    let sql_id = seed_skill(&pool, category_id, "SQL").await;
    let score = ReadinessRepo::insert_with_breakdown(&pool, &new_score(1, category_id), &[])
        .await
        .unwrap();

    // Two items sharing a rank violate uq_roadmap_items_roadmap_rank.
    let result = RoadmapRepo::insert_snapshot(
        &pool,
        &new_header(1, category_id, score.id),
        &[new_item(rust_id, "Rust", 1), new_item(sql_id, "SQL", 1)],
    )
    .await;
    assert!(result.is_err());

    // The header must not survive the failed item insert.
    assert_eq!(RoadmapRepo::count_for_user(&pool, 1).await.unwrap(), 0);
    assert!(RoadmapRepo::find_latest_for_user(&pool, 1)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Test: Re-generation appends, never mutates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn regeneration_appends_a_new_snapshot(pool: PgPool) {
    let category_id = seed_category(&pool, "Backend Engineer").await;
    let rust_id = seed_skill(&pool, category_id, "Rust").await;
    let score = ReadinessRepo::insert_with_breakdown(&pool, &new_score(1, category_id), &[])
        .await
        .unwrap();

    let first = RoadmapRepo::insert_snapshot(
        &pool,
        &new_header(1, category_id, score.id),
        &[new_item(rust_id, "Rust", 1)],
    )
    .await
    .unwrap();
    let second = RoadmapRepo::insert_snapshot(
        &pool,
        &new_header(1, category_id, score.id),
        &[new_item(rust_id, "Rust", 1)],
    )
    .await
    .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(RoadmapRepo::count_for_user(&pool, 1).await.unwrap(), 2);

    // The earlier snapshot is untouched and still readable.
    let kept = RoadmapRepo::find_by_id(&pool, first.id)
        .await
        .unwrap()
        .expect("first snapshot must survive");
    assert_eq!(kept.readiness_id, score.id);

    let latest = RoadmapRepo::find_latest_for_user(&pool, 1)
        .await
        .unwrap()
        .expect("latest must exist");
    assert_eq!(latest.id, second.id);
}

// ---------------------------------------------------------------------------
// Test: Role change deletes every snapshot, items cascade
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn role_change_invalidation_deletes_all_snapshots(pool: PgPool) {
    let category_id = seed_category(&pool, "Backend Engineer").await;
    let rust_id = seed_skill(&pool, category_id, "Rust").await;
    let score = ReadinessRepo::insert_with_breakdown(&pool, &new_score(1, category_id), &[])
        .await
        .unwrap();

    let first = RoadmapRepo::insert_snapshot(
        &pool,
        &new_header(1, category_id, score.id),
        &[new_item(rust_id, "Rust", 1)],
    )
    .await
    .unwrap();
    RoadmapRepo::insert_snapshot(
        &pool,
        &new_header(1, category_id, score.id),
        &[new_item(rust_id, "Rust", 1)],
    )
    .await
    .unwrap();

    // Another user's snapshot must not be touched.
    let other = RoadmapRepo::insert_snapshot(
        &pool,
        &new_header(2, category_id, score.id),
        &[new_item(rust_id, "Rust", 1)],
    )
    .await
    .unwrap();

    let deleted = RoadmapRepo::delete_all_for_user(&pool, 1).await.unwrap();
    assert_eq!(deleted, 2);
    assert_eq!(RoadmapRepo::count_for_user(&pool, 1).await.unwrap(), 0);

    // Items of the deleted snapshots cascade away.
    let orphaned = RoadmapRepo::list_items(&pool, first.id).await.unwrap();
    assert!(orphaned.is_empty());

    assert_eq!(RoadmapRepo::count_for_user(&pool, 2).await.unwrap(), 1);
    let kept_items = RoadmapRepo::list_items(&pool, other.id).await.unwrap();
    assert_eq!(kept_items.len(), 1);
}
