// tests/grading_tests.rs

use scoreboard::cache::{Cache, LEADERBOARD_NS, MemoryCache};
use scoreboard::error::AppError;
use scoreboard::models::{Answer, Element, Score, User};
use scoreboard::repo::{MemoryRepo, Repo};
use scoreboard::services::grading;
use uuid::Uuid;

async fn seed_user(repo: &MemoryRepo, username: &str) -> String {
    let user_id = Uuid::new_v4().to_string();
    repo.insert_user(&User {
        user_id: user_id.clone(),
        username: username.to_string(),
        display_name: Some(username.to_string()),
        created_at: None,
    })
    .await
    .unwrap();
    user_id
}

async fn seed_element(repo: &MemoryRepo, points: i32) -> Element {
    let element = Element {
        element_id: Uuid::new_v4().to_string(),
        event_id: Uuid::new_v4().to_string(),
        project_id: Uuid::new_v4().to_string(),
        right_answer: None,
        points,
        created_at: None,
    };
    repo.insert_element(&element).await.unwrap();
    element
}

fn points_by_user(scores: &[Score]) -> std::collections::HashMap<String, i32> {
    scores
        .iter()
        .map(|s| (s.user_id.clone(), s.points))
        .collect()
}

/// points=10, right answer 5, answers {u1:5, u2:5, u3:3} must grade to
/// {u1:10, u2:10, u3:0}.
#[tokio::test]
async fn grading_awards_points_for_matching_answers() {
    let repo = MemoryRepo::new();
    let cache = MemoryCache::new();

    let u1 = seed_user(&repo, "u1").await;
    let u2 = seed_user(&repo, "u2").await;
    let u3 = seed_user(&repo, "u3").await;
    let element = seed_element(&repo, 10).await;

    repo.upsert_answer(&u1, &element.element_id, 5).await.unwrap();
    repo.upsert_answer(&u2, &element.element_id, 5).await.unwrap();
    repo.upsert_answer(&u3, &element.element_id, 3).await.unwrap();
    repo.set_right_answer(&element.element_id, 5).await.unwrap();

    let summary = grading::grade_element(&repo, &cache, &element.element_id)
        .await
        .unwrap();
    assert_eq!(summary.answers_graded, 3);
    assert_eq!(summary.correct_count, 2);

    let scores = repo.scores_for_element(&element.element_id).await.unwrap();
    let by_user = points_by_user(&scores);
    assert_eq!(by_user[&u1], 10);
    assert_eq!(by_user[&u2], 10);
    assert_eq!(by_user[&u3], 0);

    // Sum over the element equals correct_count * points.
    let total: i32 = scores.iter().map(|s| s.points).sum();
    assert_eq!(total, 20);
}

#[tokio::test]
async fn answers_are_keyed_per_user_element_pair() {
    let repo = MemoryRepo::new();

    let u1 = seed_user(&repo, "u1").await;
    let element = seed_element(&repo, 10).await;
    repo.upsert_answer(&u1, &element.element_id, 3).await.unwrap();
    repo.upsert_answer(&u1, &element.element_id, 5).await.unwrap();

    let answers: Vec<Answer> = repo.answers_for_element(&element.element_id).await.unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].user_id, u1);
    assert_eq!(answers[0].value, 5);
}

#[tokio::test]
async fn grading_twice_does_not_double_count() {
    let repo = MemoryRepo::new();
    let cache = MemoryCache::new();

    let u1 = seed_user(&repo, "u1").await;
    let element = seed_element(&repo, 7).await;
    repo.upsert_answer(&u1, &element.element_id, 1).await.unwrap();
    repo.set_right_answer(&element.element_id, 1).await.unwrap();

    grading::grade_element(&repo, &cache, &element.element_id)
        .await
        .unwrap();
    grading::grade_element(&repo, &cache, &element.element_id)
        .await
        .unwrap();

    let scores = repo.scores_for_element(&element.element_id).await.unwrap();
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].points, 7);
}

/// Correcting the right answer re-grades: previously correct users drop to
/// 0 and newly correct users are awarded, with the rows overwritten rather
/// than accumulated.
#[tokio::test]
async fn regrading_after_correction_overwrites_scores() {
    let repo = MemoryRepo::new();
    let cache = MemoryCache::new();

    let u1 = seed_user(&repo, "u1").await;
    let u2 = seed_user(&repo, "u2").await;
    let element = seed_element(&repo, 10).await;
    repo.upsert_answer(&u1, &element.element_id, 5).await.unwrap();
    repo.upsert_answer(&u2, &element.element_id, 3).await.unwrap();

    repo.set_right_answer(&element.element_id, 5).await.unwrap();
    grading::grade_element(&repo, &cache, &element.element_id)
        .await
        .unwrap();

    repo.set_right_answer(&element.element_id, 3).await.unwrap();
    grading::grade_element(&repo, &cache, &element.element_id)
        .await
        .unwrap();

    let by_user = points_by_user(&repo.scores_for_element(&element.element_id).await.unwrap());
    assert_eq!(by_user[&u1], 0);
    assert_eq!(by_user[&u2], 10);
}

#[tokio::test]
async fn grading_unknown_element_is_not_found() {
    let repo = MemoryRepo::new();
    let cache = MemoryCache::new();

    let err = grading::grade_element(&repo, &cache, &Uuid::new_v4().to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn grading_without_right_answer_mutates_nothing() {
    let repo = MemoryRepo::new();
    let cache = MemoryCache::new();

    let u1 = seed_user(&repo, "u1").await;
    let element = seed_element(&repo, 10).await;
    repo.upsert_answer(&u1, &element.element_id, 5).await.unwrap();

    let err = grading::grade_element(&repo, &cache, &element.element_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert!(
        repo.scores_for_element(&element.element_id)
            .await
            .unwrap()
            .is_empty()
    );
    // Failed pass must not invalidate the cache either.
    assert_eq!(cache.namespace_version(LEADERBOARD_NS).await, 0);
}

/// The accepted race: an answer submitted after a grading pass finished is
/// not retroactively scored, but the next pass over the element picks it up
/// (at-least-once, eventually consistent).
#[tokio::test]
async fn late_submission_is_graded_on_next_pass() {
    let repo = MemoryRepo::new();
    let cache = MemoryCache::new();

    let u1 = seed_user(&repo, "u1").await;
    let u2 = seed_user(&repo, "u2").await;
    let element = seed_element(&repo, 10).await;
    repo.upsert_answer(&u1, &element.element_id, 5).await.unwrap();
    repo.set_right_answer(&element.element_id, 5).await.unwrap();
    grading::grade_element(&repo, &cache, &element.element_id)
        .await
        .unwrap();

    // Late submission, after the pass completed.
    repo.upsert_answer(&u2, &element.element_id, 5).await.unwrap();
    let by_user = points_by_user(&repo.scores_for_element(&element.element_id).await.unwrap());
    assert!(!by_user.contains_key(&u2));

    // Next pass (same right answer) converges.
    grading::grade_element(&repo, &cache, &element.element_id)
        .await
        .unwrap();
    let by_user = points_by_user(&repo.scores_for_element(&element.element_id).await.unwrap());
    assert_eq!(by_user[&u1], 10);
    assert_eq!(by_user[&u2], 10);
}

#[tokio::test]
async fn grading_bumps_leaderboard_namespace_version() {
    let repo = MemoryRepo::new();
    let cache = MemoryCache::new();

    let u1 = seed_user(&repo, "u1").await;
    let element = seed_element(&repo, 10).await;
    repo.upsert_answer(&u1, &element.element_id, 5).await.unwrap();
    repo.set_right_answer(&element.element_id, 5).await.unwrap();

    assert_eq!(cache.namespace_version(LEADERBOARD_NS).await, 0);
    grading::grade_element(&repo, &cache, &element.element_id)
        .await
        .unwrap();
    assert_eq!(cache.namespace_version(LEADERBOARD_NS).await, 1);
}
