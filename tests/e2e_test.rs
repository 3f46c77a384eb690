mod helpers;

use helpers::*;
use raffler_backend::error::AppError;
use raffler_backend::models::*;
use std::collections::HashSet;

/// Minor draws complete atomically: winners inserted revealed, status
/// drawn, drawn_at stamped, all in one step.
#[tokio::test]
async fn test_minor_draw_atomicity() {
    let db = TestDatabase::new().await;

    for i in 0..5 {
        create_test_participant(&db, &format!("Guest {}", i + 1), false).await;
    }

    let draft = create_test_raffle(&db, "Door Prize", "Minor", 3, "everyone", false).await;
    assert_eq!(draft.raffle.status_enum(), RaffleStatus::Pending);
    assert!(draft.winners.is_empty());

    let drawn = db.raffle_service.draw(&draft.raffle.id).await.unwrap();

    assert_eq!(drawn.raffle.status_enum(), RaffleStatus::Drawn);
    assert!(drawn.raffle.drawn_at.is_some());
    assert_eq!(drawn.winners.len(), 3);
    assert!(drawn.winners.iter().all(|w| !w.is_pending));

    // Contiguous sort order and no duplicate participants
    let orders: Vec<i64> = drawn.winners.iter().map(|w| w.sort_order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
    let ids: HashSet<&str> = drawn
        .winners
        .iter()
        .map(|w| w.participant_id.as_str())
        .collect();
    assert_eq!(ids.len(), 3);

    // The stored winner set matches what the service reported
    let stored: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM raffle_winners WHERE raffle_id = ?")
            .bind(&draft.raffle.id)
            .fetch_one(&db.pool)
            .await
            .unwrap();
    assert_eq!(stored, 3);

    // A completed draw makes its winners previous winners
    let previous = db.raffle_repo.previous_winner_ids().await.unwrap();
    assert_eq!(previous.len(), 3);
}

/// Major draws stage all winners unrevealed, then reveal strictly in
/// sort order until the last reveal completes the raffle.
#[tokio::test]
async fn test_major_draw_staging_and_reveal() {
    let db = TestDatabase::new().await;

    for i in 0..5 {
        create_test_participant(&db, &format!("Guest {}", i + 1), false).await;
    }

    let draft = create_test_raffle(&db, "Grand Prize", "Major", 3, "everyone", false).await;
    let drawn = db.raffle_service.draw(&draft.raffle.id).await.unwrap();

    assert_eq!(drawn.raffle.status_enum(), RaffleStatus::Drawing);
    assert!(drawn.raffle.drawn_at.is_none());
    assert_eq!(drawn.winners.len(), 3);
    assert!(drawn.winners.iter().all(|w| w.is_pending));

    // First reveal: lowest sort order comes out first
    let first = db.raffle_service.reveal_next(&draft.raffle.id).await.unwrap();
    assert_eq!(first.revealed.sort_order, 0);
    assert_eq!(first.remaining, 2);
    assert_eq!(first.raffle.raffle.status_enum(), RaffleStatus::Drawing);

    let second = db.raffle_service.reveal_next(&draft.raffle.id).await.unwrap();
    assert_eq!(second.revealed.sort_order, 1);
    assert_eq!(second.remaining, 1);
    assert_eq!(second.raffle.raffle.status_enum(), RaffleStatus::Drawing);

    let revealed_count = second
        .raffle
        .winners
        .iter()
        .filter(|w| !w.is_pending)
        .count();
    assert_eq!(revealed_count, 2);

    // Last reveal transitions to drawn and stamps drawn_at
    let third = db.raffle_service.reveal_next(&draft.raffle.id).await.unwrap();
    assert_eq!(third.revealed.sort_order, 2);
    assert_eq!(third.remaining, 0);
    assert_eq!(third.raffle.raffle.status_enum(), RaffleStatus::Drawn);
    assert!(third.raffle.raffle.drawn_at.is_some());
}

/// Revealing with nothing pending is rejected and alters no winner rows
#[tokio::test]
async fn test_reveal_on_drawn_raffle_rejected() {
    let db = TestDatabase::new().await;

    for i in 0..3 {
        create_test_participant(&db, &format!("Guest {}", i + 1), false).await;
    }

    let draft = create_test_raffle(&db, "Quick Draw", "Minor", 2, "everyone", false).await;
    db.raffle_service.draw(&draft.raffle.id).await.unwrap();

    let before = db.raffle_service.details(&draft.raffle.id).await.unwrap();
    let result = db.raffle_service.reveal_next(&draft.raffle.id).await;
    assert!(matches!(result, Err(AppError::NothingToReveal(_))));

    let after = db.raffle_service.details(&draft.raffle.id).await.unwrap();
    assert_eq!(after.winners.len(), before.winners.len());
    assert!(after.winners.iter().all(|w| !w.is_pending));

    // Unknown raffle id behaves the same
    let result = db.raffle_service.reveal_next("no-such-raffle").await;
    assert!(matches!(result, Err(AppError::NothingToReveal(_))));
}

/// A draw with count above the eligible pool fails and leaves the
/// raffle untouched.
#[tokio::test]
async fn test_insufficient_pool_leaves_raffle_unchanged() {
    let db = TestDatabase::new().await;

    create_test_participant(&db, "Only Guest", false).await;
    create_test_participant(&db, "Second Guest", false).await;

    let draft = create_test_raffle(&db, "Too Ambitious", "Minor", 5, "everyone", false).await;
    let result = db.raffle_service.draw(&draft.raffle.id).await;
    assert!(matches!(result, Err(AppError::InsufficientPool(_))));

    let unchanged = db.raffle_service.details(&draft.raffle.id).await.unwrap();
    assert_eq!(unchanged.raffle.status_enum(), RaffleStatus::Pending);
    assert!(unchanged.winners.is_empty());

    // Eligibility is evaluated at draw time: registering enough
    // participants afterwards makes the same draft drawable.
    for i in 0..3 {
        create_test_participant(&db, &format!("Late Guest {}", i + 1), false).await;
    }
    let drawn = db.raffle_service.draw(&draft.raffle.id).await.unwrap();
    assert_eq!(drawn.winners.len(), 5);
}

/// Completed raffles reject re-draws
#[tokio::test]
async fn test_already_drawn_rejected() {
    let db = TestDatabase::new().await;

    create_test_participant(&db, "Guest", false).await;
    let draft = create_test_raffle(&db, "One Shot", "Minor", 1, "everyone", false).await;
    db.raffle_service.draw(&draft.raffle.id).await.unwrap();

    let result = db.raffle_service.draw(&draft.raffle.id).await;
    assert!(matches!(result, Err(AppError::AlreadyDrawn(_))));
}

/// Winners of completed raffles are excluded when the flag is set;
/// the audience filter steers who can win the first raffle.
#[tokio::test]
async fn test_exclude_previous_winners() {
    let db = TestDatabase::new().await;

    let a = create_test_participant(&db, "Alice", true).await;
    let b = create_test_participant(&db, "Bob", false).await;
    let c = create_test_participant(&db, "Carol", false).await;

    // Family-only raffle: Alice is the only candidate, so she wins
    let first = create_test_raffle(&db, "Family Raffle", "Minor", 1, "family", false).await;
    let first = db.raffle_service.draw(&first.raffle.id).await.unwrap();
    assert_eq!(first.winners[0].participant_id, a.id);

    // With exclusion on, only Bob and Carol remain eligible
    let second = create_test_raffle(&db, "Open Raffle", "Minor", 2, "everyone", true).await;
    let second = db.raffle_service.draw(&second.raffle.id).await.unwrap();
    let ids: HashSet<&str> = second
        .winners
        .iter()
        .map(|w| w.participant_id.as_str())
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(b.id.as_str()));
    assert!(ids.contains(c.id.as_str()));

    // Asking for three eligible winners is now impossible
    let third = create_test_raffle(&db, "Too Big", "Minor", 3, "everyone", true).await;
    let result = db.raffle_service.draw(&third.raffle.id).await;
    assert!(matches!(result, Err(AppError::InsufficientPool(_))));
}

/// Winners still pending reveal in a Major draw do not count as
/// previous winners for exclusion purposes.
#[tokio::test]
async fn test_pending_major_winners_not_excluded() {
    let db = TestDatabase::new().await;

    let a = create_test_participant(&db, "Alice", true).await;
    create_test_participant(&db, "Bob", false).await;
    create_test_participant(&db, "Carol", false).await;

    // Alice is selected but not yet revealed
    let staged = create_test_raffle(&db, "Staged", "Major", 1, "family", false).await;
    let staged = db.raffle_service.draw(&staged.raffle.id).await.unwrap();
    assert_eq!(staged.raffle.status_enum(), RaffleStatus::Drawing);
    assert_eq!(staged.winners[0].participant_id, a.id);

    // All three are still eligible for an exclusion-enabled draw
    let open = create_test_raffle(&db, "Open", "Minor", 3, "everyone", true).await;
    let open = db.raffle_service.draw(&open.raffle.id).await.unwrap();
    assert_eq!(open.winners.len(), 3);
}

/// Re-invoking draw on a raffle in drawing state discards the staged
/// winners and selects afresh.
#[tokio::test]
async fn test_redraw_resets_drawing_raffle() {
    let db = TestDatabase::new().await;

    for i in 0..6 {
        create_test_participant(&db, &format!("Guest {}", i + 1), false).await;
    }

    let draft = create_test_raffle(&db, "Restartable", "Major", 2, "everyone", false).await;
    db.raffle_service.draw(&draft.raffle.id).await.unwrap();
    db.raffle_service.reveal_next(&draft.raffle.id).await.unwrap();

    let partially_revealed = db.raffle_service.details(&draft.raffle.id).await.unwrap();
    assert_eq!(
        partially_revealed
            .winners
            .iter()
            .filter(|w| !w.is_pending)
            .count(),
        1
    );

    let redrawn = db.raffle_service.draw(&draft.raffle.id).await.unwrap();
    assert_eq!(redrawn.raffle.status_enum(), RaffleStatus::Drawing);
    assert_eq!(redrawn.winners.len(), 2);
    assert!(redrawn.winners.iter().all(|w| w.is_pending));
}

/// Winner rows are snapshots and survive deletion of the participant
#[tokio::test]
async fn test_winner_snapshot_survives_participant_deletion() {
    let db = TestDatabase::new().await;

    let winner = create_test_participant(&db, "Ephemeral Guest", false).await;
    let draft = create_test_raffle(&db, "Keepsake", "Minor", 1, "everyone", false).await;
    db.raffle_service.draw(&draft.raffle.id).await.unwrap();

    db.participant_service.remove(&winner.id).await.unwrap();
    assert!(db
        .participant_repo
        .find_by_id(&winner.id)
        .await
        .unwrap()
        .is_none());

    let details = db.raffle_service.details(&draft.raffle.id).await.unwrap();
    assert_eq!(details.winners.len(), 1);
    assert_eq!(details.winners[0].participant_name, "Ephemeral Guest");
    assert_eq!(details.winners[0].raffle_number, winner.raffle_number);
}

/// Draft creation is validation only
#[tokio::test]
async fn test_draft_validation() {
    let db = TestDatabase::new().await;

    let result = db
        .raffle_service
        .create_draft("  ", None, None, "Minor", 1, "everyone", false, None)
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let result = db
        .raffle_service
        .create_draft("No Winners", None, None, "Minor", 0, "everyone", false, None)
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let result = db
        .raffle_service
        .create_draft("Bad Audience", None, None, "Minor", 1, "friends", false, None)
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let result = db
        .raffle_service
        .create_draft("Bad Type", None, None, "Medium", 1, "everyone", false, None)
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

/// The event name stored on a raffle is a creation-time snapshot
#[tokio::test]
async fn test_raffle_keeps_denormalized_event_name() {
    let db = TestDatabase::new().await;

    let event = db
        .event_service
        .create("Summer Party", "2026-08-15", Some("18:00"), None, None)
        .await
        .unwrap();

    create_test_participant(&db, "Guest", false).await;

    let draft = db
        .raffle_service
        .create_draft(
            "Party Raffle",
            Some(event.id.as_str()),
            Some(event.name.as_str()),
            "Minor",
            1,
            "everyone",
            false,
            None,
        )
        .await
        .unwrap();

    db.event_service.remove(&event.id).await.unwrap();
    assert!(db.event_repo.find_by_id(&event.id).await.unwrap().is_none());

    let details = db.raffle_service.details(&draft.raffle.id).await.unwrap();
    assert_eq!(details.raffle.event_name.as_deref(), Some("Summer Party"));
}

/// Participant management: register, edit, delete, seed
#[tokio::test]
async fn test_participant_lifecycle() {
    let db = TestDatabase::new().await;

    let result = db.participant_service.register("   ", false).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let p1 = create_test_participant(&db, "First", false).await;
    let p2 = create_test_participant(&db, "Second", true).await;
    assert_eq!(p1.raffle_number, 1);
    assert_eq!(p2.raffle_number, 2);

    let edited = db
        .participant_service
        .update(&p1.id, "First Renamed", true)
        .await
        .unwrap();
    assert_eq!(edited.name, "First Renamed");
    assert!(edited.is_family);
    assert_eq!(edited.raffle_number, 1);

    db.participant_service.remove(&p2.id).await.unwrap();
    let result = db.participant_service.remove(&p2.id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let roster = db.participant_service.list().await.unwrap();
    assert_eq!(roster.participants.len(), 1);
    // Next number follows the highest remaining raffle number
    assert_eq!(roster.next_raffle_number, 2);
}

#[tokio::test]
async fn test_seed_participants() {
    let db = TestDatabase::new().await;

    let summary = db.participant_service.seed(50).await.unwrap();
    assert_eq!(summary.added, 50);
    assert_eq!(summary.next_raffle_number, 51);

    let roster = db.participant_service.list().await.unwrap();
    assert_eq!(roster.participants.len(), 50);

    let family_count = roster.participants.iter().filter(|p| p.is_family).count();
    assert_eq!(family_count, 40);

    let numbers: HashSet<i64> = roster.participants.iter().map(|p| p.raffle_number).collect();
    assert_eq!(numbers.len(), 50);
}
