//! Integration tests for `SqliteStore` against an in-memory database.

use depot_core::{
  artifact::{NewArtifact, SaveOutcome},
  event::{EventKind, NewEvent},
  store::{CatalogQuery, CatalogStore},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn artifact(owner: Uuid, path: &str, name: &str) -> NewArtifact {
  NewArtifact {
    owner_id:     owner,
    storage_path: path.to_owned(),
    filename:     name.to_owned(),
  }
}

// ─── Identity resolution ─────────────────────────────────────────────────────

#[tokio::test]
async fn first_resolve_creates_second_updates() {
  let s = store().await;
  let owner = Uuid::new_v4();

  let (first, outcome) = s
    .resolve(artifact(owner, "/vault/u1", "report.pdf"))
    .await
    .unwrap();
  assert_eq!(outcome, SaveOutcome::Created);
  assert_eq!(first.owner_id, owner);
  assert_eq!(first.created_by, owner);

  let (second, outcome) = s
    .resolve(artifact(owner, "/vault/u1", "report.pdf"))
    .await
    .unwrap();
  assert_eq!(outcome, SaveOutcome::Updated);
  assert_eq!(second.record_id, first.record_id);
  // The existing record is returned untouched.
  assert_eq!(second.created_at, first.created_at);
}

#[tokio::test]
async fn distinct_keys_get_distinct_records() {
  let s = store().await;
  let owner = Uuid::new_v4();

  let (a, _) = s
    .resolve(artifact(owner, "/vault/u1", "a.txt"))
    .await
    .unwrap();
  let (b, _) = s
    .resolve(artifact(owner, "/vault/u1", "b.txt"))
    .await
    .unwrap();
  // Same filename in a different owner directory is a different key.
  let (c, outcome) = s
    .resolve(artifact(owner, "/vault/u2", "a.txt"))
    .await
    .unwrap();

  assert_eq!(outcome, SaveOutcome::Created);
  assert_ne!(a.record_id, b.record_id);
  assert_ne!(a.record_id, c.record_id);
}

#[tokio::test]
async fn concurrent_first_saves_create_exactly_one_record() {
  let s = store().await;
  let owner = Uuid::new_v4();

  let handles: Vec<_> = (0..8)
    .map(|_| {
      let s = s.clone();
      tokio::spawn(async move {
        s.resolve(artifact(owner, "/vault/u1", "contested.bin"))
          .await
          .unwrap()
      })
    })
    .collect();

  let mut created = 0;
  let mut ids = Vec::new();
  for h in handles {
    let (record, outcome) = h.await.unwrap();
    if outcome.is_created() {
      created += 1;
    }
    ids.push(record.record_id);
  }

  assert_eq!(created, 1);
  assert!(ids.iter().all(|id| *id == ids[0]));
}

#[tokio::test]
async fn get_artifact_roundtrip_and_miss() {
  let s = store().await;
  let owner = Uuid::new_v4();

  let (record, _) = s
    .resolve(artifact(owner, "/vault/u1", "x.csv"))
    .await
    .unwrap();

  let fetched = s.get_artifact(record.record_id).await.unwrap().unwrap();
  assert_eq!(fetched.record_id, record.record_id);
  assert_eq!(fetched.storage_path, "/vault/u1");
  assert_eq!(fetched.filename, "x.csv");

  assert!(s.get_artifact(Uuid::new_v4()).await.unwrap().is_none());
}

// ─── Event log ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn append_builds_ref_and_lists_in_order() {
  let s = store().await;
  let owner = Uuid::new_v4();
  let record = Uuid::new_v4();

  let first = s
    .append_event(NewEvent { kind: EventKind::FileCreated, owner_id: owner, record_id: record })
    .await
    .unwrap();
  assert_eq!(first.event_ref, format!("/files/{owner}/{record}"));
  assert_eq!(first.created_by, owner);

  for _ in 0..3 {
    s.append_event(NewEvent { kind: EventKind::FileUpdated, owner_id: owner, record_id: record })
      .await
      .unwrap();
  }

  let events = s.events_for_owner(owner).await.unwrap();
  assert_eq!(events.len(), 4);
  assert_eq!(events[0].kind, EventKind::FileCreated);
  assert!(events[1..].iter().all(|e| e.kind == EventKind::FileUpdated));
  assert!(events.windows(2).all(|w| w[0].created_at <= w[1].created_at));
}

#[tokio::test]
async fn events_are_scoped_to_owner() {
  let s = store().await;
  let alice = Uuid::new_v4();
  let bob = Uuid::new_v4();

  s.append_event(NewEvent { kind: EventKind::FileCreated, owner_id: alice, record_id: Uuid::new_v4() })
    .await
    .unwrap();
  s.append_event(NewEvent { kind: EventKind::FileCreated, owner_id: bob, record_id: Uuid::new_v4() })
    .await
    .unwrap();

  let events = s.events_for_owner(alice).await.unwrap();
  assert_eq!(events.len(), 1);
  assert_eq!(events[0].created_by, alice);
}

// ─── Search ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn search_filters_case_insensitively_and_sorts() {
  let s = store().await;
  let owner = Uuid::new_v4();

  for name in ["Annual-REPORT.pdf", "notes.txt", "report-q2.csv", "zebra.png"] {
    s.resolve(artifact(owner, "/vault/u1", name)).await.unwrap();
  }

  let results = s
    .search(&CatalogQuery {
      owner_id:      owner,
      name_contains: Some("report".into()),
      limit:         None,
    })
    .await
    .unwrap();

  let names: Vec<_> = results.iter().map(|r| r.filename.as_str()).collect();
  assert_eq!(names, ["Annual-REPORT.pdf", "report-q2.csv"]);
}

#[tokio::test]
async fn search_without_filter_returns_all_sorted() {
  let s = store().await;
  let owner = Uuid::new_v4();

  for name in ["c.txt", "a.txt", "b.txt"] {
    s.resolve(artifact(owner, "/vault/u1", name)).await.unwrap();
  }

  let results = s.search(&CatalogQuery::all_for(owner)).await.unwrap();
  let names: Vec<_> = results.iter().map(|r| r.filename.as_str()).collect();
  assert_eq!(names, ["a.txt", "b.txt", "c.txt"]);

  // Empty string behaves the same as no filter.
  let results = s
    .search(&CatalogQuery {
      owner_id:      owner,
      name_contains: Some(String::new()),
      limit:         None,
    })
    .await
    .unwrap();
  assert_eq!(results.len(), 3);
}

#[tokio::test]
async fn search_never_crosses_owners() {
  let s = store().await;
  let alice = Uuid::new_v4();
  let bob = Uuid::new_v4();

  s.resolve(artifact(alice, "/vault/a", "report.pdf")).await.unwrap();
  s.resolve(artifact(bob, "/vault/b", "report.pdf")).await.unwrap();

  let results = s.search(&CatalogQuery::all_for(alice)).await.unwrap();
  assert_eq!(results.len(), 1);
  assert_eq!(results[0].owner_id, alice);
}

#[tokio::test]
async fn search_caps_results_at_limit() {
  let s = store().await;
  let owner = Uuid::new_v4();

  for i in 0..150 {
    s.resolve(artifact(owner, "/vault/u1", &format!("file-{i:03}.dat")))
      .await
      .unwrap();
  }

  let results = s.search(&CatalogQuery::all_for(owner)).await.unwrap();
  assert_eq!(results.len(), CatalogQuery::DEFAULT_LIMIT);
  // Cap applies after the sort: the first 100 in byte order.
  assert_eq!(results[0].filename, "file-000.dat");
  assert_eq!(results[99].filename, "file-099.dat");
}

#[tokio::test]
async fn search_limit_is_a_ceiling_not_a_request() {
  let s = store().await;
  let owner = Uuid::new_v4();

  for i in 0..150 {
    s.resolve(artifact(owner, "/vault/u1", &format!("file-{i:03}.dat")))
      .await
      .unwrap();
  }

  // Oversized limits clamp down to the cap, including ones that would wrap
  // a naive integer conversion into "unlimited".
  for big in [101, 5000, usize::MAX] {
    let query = CatalogQuery {
      owner_id:      owner,
      name_contains: None,
      limit:         Some(big),
    };
    let results = s.search(&query).await.unwrap();
    assert_eq!(results.len(), CatalogQuery::DEFAULT_LIMIT);
  }

  // Smaller limits still apply as given.
  let query = CatalogQuery {
    owner_id:      owner,
    name_contains: None,
    limit:         Some(5),
  };
  assert_eq!(s.search(&query).await.unwrap().len(), 5);
}

#[tokio::test]
async fn search_treats_wildcards_as_literal_text() {
  let s = store().await;
  let owner = Uuid::new_v4();

  s.resolve(artifact(owner, "/vault/u1", "100%.txt")).await.unwrap();
  s.resolve(artifact(owner, "/vault/u1", "100x.txt")).await.unwrap();
  s.resolve(artifact(owner, "/vault/u1", "a_b.txt")).await.unwrap();
  s.resolve(artifact(owner, "/vault/u1", "axb.txt")).await.unwrap();

  let results = s
    .search(&CatalogQuery {
      owner_id:      owner,
      name_contains: Some("0%".into()),
      limit:         None,
    })
    .await
    .unwrap();
  assert_eq!(results.len(), 1);
  assert_eq!(results[0].filename, "100%.txt");

  let results = s
    .search(&CatalogQuery {
      owner_id:      owner,
      name_contains: Some("a_b".into()),
      limit:         None,
    })
    .await
    .unwrap();
  assert_eq!(results.len(), 1);
  assert_eq!(results[0].filename, "a_b.txt");
}
