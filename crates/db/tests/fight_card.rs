//! Store-level tests for card ordering, status compare-and-set and cascades.

use fms_core::discipline::DisciplineConfig;
use fms_core::fight_card;
use fms_core::status::{EventStatus, FightStatus};
use fms_core::types::{DbId, OrderNumber};
use fms_db::models::event::CreateEvent;
use fms_db::models::fight::CreateFight;
use fms_db::models::participant::CreateParticipant;
use fms_db::models::team::CreateTeam;
use fms_db::repositories::{EventRepo, FightRepo, ParticipantRepo, TeamRepo};
use sqlx::PgPool;

async fn seed_event(pool: &PgPool) -> DbId {
    EventRepo::create(
        pool,
        &CreateEvent {
            name: "Fight Night".to_string(),
            discipline: DisciplineConfig::default(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_participant(pool: &PgPool, event_id: DbId, name: &str) -> DbId {
    ParticipantRepo::create(
        pool,
        event_id,
        &CreateParticipant {
            name: name.to_string(),
            weight: Some(70.5),
            team_id: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_fight(
    pool: &PgPool,
    event_id: DbId,
    a: DbId,
    b: DbId,
    order_number: OrderNumber,
) -> DbId {
    FightRepo::create(
        pool,
        event_id,
        &CreateFight {
            participant_a_id: a,
            participant_b_id: b,
            order_number,
        },
    )
    .await
    .unwrap()
    .id
}

async fn card(pool: &PgPool, event_id: DbId) -> Vec<(DbId, OrderNumber)> {
    FightRepo::list_by_event(pool, event_id)
        .await
        .unwrap()
        .into_iter()
        .map(|f| (f.id, f.order_number))
        .collect()
}

fn constraint_of(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) => db.constraint().map(str::to_string),
        _ => None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_event_starts_in_draft(pool: PgPool) {
    let event_id = seed_event(&pool).await;
    let event = EventRepo::find_by_id(&pool, event_id).await.unwrap().unwrap();
    assert_eq!(event.status, EventStatus::Draft);
    assert_eq!(event.discipline.0, DisciplineConfig::default());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_order_number_hits_unique_index(pool: PgPool) {
    let event_id = seed_event(&pool).await;
    let p1 = seed_participant(&pool, event_id, "P1").await;
    let p2 = seed_participant(&pool, event_id, "P2").await;
    let p3 = seed_participant(&pool, event_id, "P3").await;
    seed_fight(&pool, event_id, p1, p2, 1).await;

    let err = FightRepo::create(
        &pool,
        event_id,
        &CreateFight {
            participant_a_id: p2,
            participant_b_id: p3,
            order_number: 1,
        },
    )
    .await
    .unwrap_err();

    assert_eq!(constraint_of(&err).as_deref(), Some("uq_fights_event_order"));
    assert_eq!(card(&pool, event_id).await.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_same_participant_twice_hits_check(pool: PgPool) {
    let event_id = seed_event(&pool).await;
    let p1 = seed_participant(&pool, event_id, "P1").await;

    let err = FightRepo::create(
        &pool,
        event_id,
        &CreateFight {
            participant_a_id: p1,
            participant_b_id: p1,
            order_number: 1,
        },
    )
    .await
    .unwrap_err();

    assert_eq!(
        constraint_of(&err).as_deref(),
        Some("ck_fights_distinct_participants")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_two_phase_rotation_keeps_card_unique(pool: PgPool) {
    let event_id = seed_event(&pool).await;
    let p1 = seed_participant(&pool, event_id, "P1").await;
    let p2 = seed_participant(&pool, event_id, "P2").await;
    let f1 = seed_fight(&pool, event_id, p1, p2, 1).await;
    let f2 = seed_fight(&pool, event_id, p2, p1, 2).await;
    let f3 = seed_fight(&pool, event_id, p1, p2, 3).await;

    let mut tx = pool.begin().await.unwrap();
    let slots: Vec<_> = FightRepo::lock_card(&mut *tx, event_id)
        .await
        .unwrap()
        .iter()
        .map(|f| f.slot())
        .collect();
    let plan = fight_card::plan_reorder(
        &slots,
        &[
            fight_card::ReorderAssignment { fight_id: f1, new_order_number: 3 },
            fight_card::ReorderAssignment { fight_id: f2, new_order_number: 1 },
            fight_card::ReorderAssignment { fight_id: f3, new_order_number: 2 },
        ],
    )
    .unwrap();
    let staged: Vec<_> = plan.staged().collect();
    assert_eq!(
        FightRepo::assign_order_numbers(&mut *tx, event_id, &staged).await.unwrap(),
        3
    );
    tx.commit().await.unwrap();

    // Between phases every affected fight holds a negative placeholder.
    assert!(card(&pool, event_id).await.iter().all(|(_, o)| *o < 0));

    let mut tx = pool.begin().await.unwrap();
    let targets: Vec<_> = plan.targets().collect();
    FightRepo::assign_order_numbers(&mut *tx, event_id, &targets)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    assert_eq!(card(&pool, event_id).await, vec![(f2, 1), (f3, 2), (f1, 3)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_staging_clears_leftover_positions_in_the_batch(pool: PgPool) {
    let event_id = seed_event(&pool).await;
    let p1 = seed_participant(&pool, event_id, "P1").await;
    let p2 = seed_participant(&pool, event_id, "P2").await;
    let f1 = seed_fight(&pool, event_id, p1, p2, 1).await;
    let f2 = seed_fight(&pool, event_id, p2, p1, 2).await;

    // f1 was left at -2 by a batch that never reached its second phase.
    sqlx::query("UPDATE fights SET order_number = -2 WHERE id = $1")
        .bind(f1)
        .execute(&pool)
        .await
        .unwrap();

    let mut tx = pool.begin().await.unwrap();
    let slots: Vec<_> = FightRepo::lock_card(&mut *tx, event_id)
        .await
        .unwrap()
        .iter()
        .map(|f| f.slot())
        .collect();
    let plan = fight_card::plan_reorder(
        &slots,
        &[
            fight_card::ReorderAssignment { fight_id: f2, new_order_number: 2 },
            fight_card::ReorderAssignment { fight_id: f1, new_order_number: 1 },
        ],
    )
    .unwrap();
    let staged: Vec<_> = plan.staged().collect();
    FightRepo::assign_order_numbers(&mut *tx, event_id, &staged)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let targets: Vec<_> = plan.targets().collect();
    let mut tx = pool.begin().await.unwrap();
    FightRepo::assign_order_numbers(&mut *tx, event_id, &targets)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    assert_eq!(card(&pool, event_id).await, vec![(f1, 1), (f2, 2)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_direct_swap_without_staging_is_rejected(pool: PgPool) {
    let event_id = seed_event(&pool).await;
    let p1 = seed_participant(&pool, event_id, "P1").await;
    let p2 = seed_participant(&pool, event_id, "P2").await;
    let f1 = seed_fight(&pool, event_id, p1, p2, 1).await;
    let f2 = seed_fight(&pool, event_id, p2, p1, 2).await;

    let mut tx = pool.begin().await.unwrap();
    let err = FightRepo::assign_order_numbers(&mut *tx, event_id, &[(f1, 2), (f2, 1)])
        .await
        .unwrap_err();
    assert_eq!(constraint_of(&err).as_deref(), Some("uq_fights_event_order"));
    drop(tx);

    assert_eq!(card(&pool, event_id).await, vec![(f1, 1), (f2, 2)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_compare_and_set(pool: PgPool) {
    let event_id = seed_event(&pool).await;
    let p1 = seed_participant(&pool, event_id, "P1").await;
    let p2 = seed_participant(&pool, event_id, "P2").await;
    let f1 = seed_fight(&pool, event_id, p1, p2, 1).await;

    fight_card::validate_transition(FightStatus::Scheduled, FightStatus::Announced).unwrap();
    let moved = FightRepo::compare_and_set_status(
        &pool,
        event_id,
        f1,
        FightStatus::Scheduled,
        FightStatus::Announced,
    )
    .await
    .unwrap();
    assert_eq!(moved.unwrap().status, FightStatus::Announced);

    // A second writer still expecting Scheduled loses.
    let stale = FightRepo::compare_and_set_status(
        &pool,
        event_id,
        f1,
        FightStatus::Scheduled,
        FightStatus::Cancelled,
    )
    .await
    .unwrap();
    assert!(stale.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_event_status_compare_and_set(pool: PgPool) {
    let event_id = seed_event(&pool).await;

    let active = EventRepo::set_status(&pool, event_id, EventStatus::Draft, EventStatus::Active)
        .await
        .unwrap();
    assert_eq!(active.unwrap().status, EventStatus::Active);

    let stale = EventRepo::set_status(&pool, event_id, EventStatus::Draft, EventStatus::Active)
        .await
        .unwrap();
    assert!(stale.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_moves_on_update(pool: PgPool) {
    let event_id = seed_event(&pool).await;
    let before = EventRepo::find_by_id(&pool, event_id).await.unwrap().unwrap();

    sqlx::query("UPDATE events SET name = 'Renamed' WHERE id = $1")
        .bind(event_id)
        .execute(&pool)
        .await
        .unwrap();

    let after = EventRepo::find_by_id(&pool, event_id).await.unwrap().unwrap();
    assert!(after.updated_at >= before.updated_at);
    assert_eq!(after.created_at, before.created_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_team_nulls_participant_team(pool: PgPool) {
    let event_id = seed_event(&pool).await;
    let team = TeamRepo::create(
        &pool,
        event_id,
        &CreateTeam {
            name: "Red".to_string(),
        },
    )
    .await
    .unwrap();
    let participant = ParticipantRepo::create(
        &pool,
        event_id,
        &CreateParticipant {
            name: "P1".to_string(),
            weight: None,
            team_id: Some(team.id),
        },
    )
    .await
    .unwrap();

    assert!(TeamRepo::delete(&pool, event_id, team.id).await.unwrap());

    let view = ParticipantRepo::find_in_event(&pool, event_id, participant.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(view.participant.team_id, None);
    assert_eq!(view.team_name, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_live_fight_blocks_participant_delete_at_store(pool: PgPool) {
    let event_id = seed_event(&pool).await;
    let p1 = seed_participant(&pool, event_id, "P1").await;
    let p2 = seed_participant(&pool, event_id, "P2").await;
    seed_fight(&pool, event_id, p1, p2, 1).await;

    let err = ParticipantRepo::delete(&pool, event_id, p1).await.unwrap_err();
    match &err {
        sqlx::Error::Database(db) => assert_eq!(db.code().as_deref(), Some("23503")),
        other => panic!("expected foreign key violation, got {other:?}"),
    }
    assert!(ParticipantRepo::exists_in_event(&pool, event_id, p1).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_event_cascades(pool: PgPool) {
    let event_id = seed_event(&pool).await;
    let p1 = seed_participant(&pool, event_id, "P1").await;
    let p2 = seed_participant(&pool, event_id, "P2").await;
    seed_fight(&pool, event_id, p1, p2, 1).await;

    assert!(EventRepo::delete(&pool, event_id).await.unwrap());

    let (fights,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM fights")
        .fetch_one(&pool)
        .await
        .unwrap();
    let (participants,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM participants")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!((fights, participants), (0, 0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_event_detail_counts(pool: PgPool) {
    let event_id = seed_event(&pool).await;
    TeamRepo::create(&pool, event_id, &CreateTeam { name: "Red".to_string() })
        .await
        .unwrap();
    let p1 = seed_participant(&pool, event_id, "P1").await;
    let p2 = seed_participant(&pool, event_id, "P2").await;
    seed_fight(&pool, event_id, p1, p2, 1).await;

    let detail = EventRepo::find_detail(&pool, event_id).await.unwrap().unwrap();
    assert_eq!(
        (detail.team_count, detail.participant_count, detail.fight_count),
        (1, 2, 1)
    );
}
