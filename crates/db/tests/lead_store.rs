//! PostgreSQL store round trips. Need a live database:
//! `DATABASE_URL=postgres://... cargo test -p leadbook-db -- --ignored`

use leadbook_core::choices::{Bhk, City, PropertyType, Purpose, Source, Status, Timeline};
use leadbook_core::history::{NewHistoryEntry, ACTION_CREATED};
use leadbook_core::identity::Identity;
use leadbook_core::lead::LeadFields;
use leadbook_core::listing::LeadQuery;
use leadbook_core::store::LeadStore;
use leadbook_db::PgLeadStore;
use sqlx::PgPool;

fn villa(name: &str) -> LeadFields {
    LeadFields {
        full_name: name.into(),
        email: "villa.buyer@example.com".into(),
        phone: "9876543210".into(),
        city: City::Hyderabad,
        property_type: PropertyType::Villa,
        bhk: Some(Bhk::Three),
        purpose: Purpose::Investment,
        budget_min: 10_000_000,
        budget_max: 15_000_000,
        timeline: Timeline::SixMonths,
        source: Source::Referral,
        status: Status::New,
        notes: None,
        tags: vec!["investor".into(), "high-budget".into()],
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn health_check_passes(pool: PgPool) {
    leadbook_db::health_check(&pool).await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn create_update_delete_round_trip(pool: PgPool) {
    let store = PgLeadStore::new(pool);
    let lead = store.create(&villa("Ravi Kumar"), &Identity::new("u1")).await.unwrap();
    assert_eq!(lead.owner_id, "u1");
    assert_eq!(lead.fields.tags, vec!["investor", "high-budget"]);

    let mut next = lead.fields.clone();
    next.status = Status::Contacted;
    let updated = store.update(lead.id, &next).await.unwrap().unwrap();
    assert_eq!(updated.fields.status, Status::Contacted);
    assert!(updated.updated_at >= lead.updated_at);

    assert!(store.delete(lead.id).await.unwrap());
    assert!(store.get(lead.id).await.unwrap().is_none());
    assert!(store.update(lead.id, &next).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn bhk_constraint_is_enforced(pool: PgPool) {
    let store = PgLeadStore::new(pool);
    let mut fields = villa("No Bhk");
    fields.bhk = None;
    assert!(store.create(&fields, &Identity::anonymous()).await.is_err());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn list_filters_searches_and_counts(pool: PgPool) {
    let store = PgLeadStore::new(pool);
    let who = Identity::anonymous();
    for name in ["Asha Rao", "Vikram Rao", "Neha Singh"] {
        store.create(&villa(name), &who).await.unwrap();
    }

    let page = store
        .list(&LeadQuery {
            search: Some("RAO".into()),
            ordering: "full_name".parse().unwrap(),
            limit: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].fields.full_name, "Asha Rao");

    let none = store
        .list(&LeadQuery { city: Some(City::Mumbai), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(none.total, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn history_outlives_the_lead(pool: PgPool) {
    let store = PgLeadStore::new(pool);
    let who = Identity::anonymous();
    let lead = store.create(&villa("Kept History"), &who).await.unwrap();
    store
        .append_history(&NewHistoryEntry::action(lead.id, &who, ACTION_CREATED))
        .await
        .unwrap();
    store.delete(lead.id).await.unwrap();

    let history = store.list_history(lead.id, 5).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].diff["action"], "created");
}
