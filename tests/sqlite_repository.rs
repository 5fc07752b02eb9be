mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use sea_orm_migration::MigratorTrait;

use common::{d, RecordingNotifier};
use registrar_migrator::config::DueDateAdjustConfig;
use registrar_migrator::domain::{
    DomainError, DomainQuery, DomainRecord, DomainStatus, DomainUpdate, RepositoryProvider,
};
use registrar_migrator::infrastructure::database::migrator::Migrator;
use registrar_migrator::{init_database, DatabaseConfig, DueDateBatchAdjuster, SeaOrmRepositoryProvider};

async fn provider() -> SeaOrmRepositoryProvider {
    let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    SeaOrmRepositoryProvider::new(db)
}

fn query(registrar: &str, today: &str) -> DomainQuery {
    DomainQuery {
        status: DomainStatus::Active,
        registrar: registrar.into(),
        due_after: d(today),
        due_on_or_before: None,
        allow_list: Vec::new(),
        deny_list: Vec::new(),
    }
}

#[tokio::test]
async fn insert_and_find_round_trip() {
    let repos = provider().await;
    let record = DomainRecord::new(42, "example.com", "cnic", DomainStatus::PendingTransfer)
        .with_due_date(d("2024-03-10"))
        .with_invoice_date(d("2024-02-24"));

    let id = repos.domains().insert(record.clone()).await.unwrap();
    assert_eq!(id, 42);

    let found = repos.domains().find_by_id(42).await.unwrap().unwrap();
    assert_eq!(found, record);
    assert!(repos.domains().find_by_id(7).await.unwrap().is_none());
}

#[tokio::test]
async fn query_filters_like_the_in_memory_store() {
    let repos = provider().await;
    let store = repos.domains();

    let rows = [
        DomainRecord::new(1, "Alpha.com", "CNIC", DomainStatus::Active).with_due_date(d("2024-04-01")),
        DomainRecord::new(2, "beta.net", "cnic", DomainStatus::Active).with_due_date(d("2024-03-10")),
        DomainRecord::new(3, "gamma.org", "enom", DomainStatus::Active).with_due_date(d("2024-03-10")),
        DomainRecord::new(4, "delta.io", "cnic", DomainStatus::Expired).with_due_date(d("2024-03-10")),
        DomainRecord::new(5, "eps.dev", "cnic", DomainStatus::Active).with_due_date(d("2024-03-01")),
        DomainRecord::new(6, "zeta.app", "cnic", DomainStatus::Active),
    ];
    for row in rows {
        store.insert(row).await.unwrap();
    }

    let ids = |found: Vec<DomainRecord>| found.into_iter().map(|r| r.id).collect::<Vec<_>>();

    let base = query("Cnic", "2024-03-01");
    assert_eq!(ids(store.query(&base).await.unwrap()), vec![2, 1]);

    let windowed = DomainQuery {
        due_on_or_before: Some(d("2024-03-31")),
        ..base.clone()
    };
    assert_eq!(ids(store.query(&windowed).await.unwrap()), vec![2]);

    let allowed = DomainQuery {
        allow_list: vec!["alpha.COM".into()],
        ..base.clone()
    };
    assert_eq!(ids(store.query(&allowed).await.unwrap()), vec![1]);

    let denied = DomainQuery {
        deny_list: vec!["BETA.net".into()],
        ..base
    };
    assert_eq!(ids(store.query(&denied).await.unwrap()), vec![1]);
}

#[tokio::test]
async fn update_touches_only_given_fields() {
    let repos = provider().await;
    let store = repos.domains();
    store
        .insert(
            DomainRecord::new(1, "example.com", "cnic", DomainStatus::Active)
                .with_due_date(d("2024-03-10")),
        )
        .await
        .unwrap();

    store
        .update(1, DomainUpdate::due_dates(d("2024-03-03"), None))
        .await
        .unwrap();
    let record = store.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(record.next_due_date, Some(d("2024-03-03")));
    assert_eq!(record.next_invoice_date, None);
    assert_eq!(record.registrar, "cnic");

    store
        .update(
            1,
            DomainUpdate::registrar_and_status("openprovider", DomainStatus::PendingTransfer),
        )
        .await
        .unwrap();
    let record = store.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(record.registrar, "openprovider");
    assert_eq!(record.status, DomainStatus::PendingTransfer);
    assert_eq!(record.next_due_date, Some(d("2024-03-03")));
}

#[tokio::test]
async fn update_of_missing_domain_is_not_found() {
    let repos = provider().await;
    let err = repos
        .domains()
        .update(99, DomainUpdate::due_dates(d("2024-03-03"), None))
        .await
        .unwrap_err();
    assert_matches!(err, DomainError::NotFound { .. });
}

#[tokio::test]
async fn notes_accumulate() {
    let repos = provider().await;
    let store = repos.domains();
    store
        .insert(DomainRecord::new(1, "example.com", "cnic", DomainStatus::Active))
        .await
        .unwrap();

    store.append_note(1, "first").await.unwrap();
    store.append_note(1, "second").await.unwrap();

    let record = store.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(record.notes, "first\nsecond");
}

#[tokio::test]
async fn activity_is_returned_newest_first() {
    let repos = provider().await;
    for message in ["one", "two", "three"] {
        repos.activity().append(message).await.unwrap();
    }

    let recent = repos.activity().recent(2).await.unwrap();
    let messages: Vec<&str> = recent.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["three", "two"]);
}

#[tokio::test]
async fn adjuster_runs_against_sqlite() {
    let repos = Arc::new(provider().await);
    repos
        .domains()
        .insert(
            DomainRecord::new(1, "example.com", "cnic", DomainStatus::Active)
                .with_due_date(d("2024-03-10"))
                .with_invoice_date(d("2024-02-24")),
        )
        .await
        .unwrap();

    let config = DueDateAdjustConfig {
        dry_run: false,
        registrar: "cnic".into(),
        notify_admin: false,
        ..DueDateAdjustConfig::default()
    };
    let report = DueDateBatchAdjuster::new(
        repos.clone(),
        Arc::new(RecordingNotifier::default()),
        config,
    )
    .run(d("2024-03-01"))
    .await
    .unwrap();
    assert_eq!(report.updated, 1);

    let record = repos.domains().find_by_id(1).await.unwrap().unwrap();
    assert_eq!(record.next_due_date, Some(d("2024-03-03")));
    assert_eq!(record.next_invoice_date, Some(d("2024-02-17")));

    let recent = repos.activity().recent(10).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(
        recent[0].message,
        "Domain Due Date Adjusted: example.com (ID 1) - Due date changed from 2024-03-10 to 2024-03-03"
    );
}
