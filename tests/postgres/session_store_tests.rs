//! Session upsert against the `user_sessions` table.

use super::helpers::{CleanupGuard, connect, ensure_template, setup_pool, test_runtime};
use cohort::session::{
    adapters::postgres::PostgresSessionStore,
    domain::{Fingerprint, OwnerId, SessionRecord},
    ports::SessionStore,
};
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;

#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

fn record(owner: &str, fingerprint: &str) -> SessionRecord {
    SessionRecord::new(
        OwnerId::new(owner).expect("valid owner"),
        Fingerprint::new(fingerprint).expect("valid fingerprint"),
        &DefaultClock,
    )
}

#[rstest]
fn second_sign_in_overwrites_the_stored_fingerprint(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_session_overwrite_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let store = PostgresSessionStore::new(
        setup_pool(shared_test_cluster, &db_name).expect("pool setup"),
    );
    let rt = test_runtime();

    rt.block_on(store.put(&record("uid-1", "laptop")))
        .expect("first put");
    rt.block_on(store.put(&record("uid-1", "phone")))
        .expect("second put");

    let stored = rt
        .block_on(store.find(&OwnerId::new("uid-1").expect("valid owner")))
        .expect("find")
        .expect("record stored");
    assert_eq!(stored.fingerprint().as_str(), "phone");

    let rows = diesel::sql_query("SELECT COUNT(*) AS count FROM user_sessions")
        .get_result::<CountRow>(&mut connect(shared_test_cluster, &db_name))
        .expect("count rows");
    assert_eq!(rows.count, 1);
}

#[rstest]
fn owners_keep_separate_records(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_session_owners_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let store = PostgresSessionStore::new(
        setup_pool(shared_test_cluster, &db_name).expect("pool setup"),
    );
    let rt = test_runtime();

    rt.block_on(store.put(&record("uid-1", "laptop")))
        .expect("put uid-1");
    rt.block_on(store.put(&record("uid-2", "tablet")))
        .expect("put uid-2");

    let first = rt
        .block_on(store.find(&OwnerId::new("uid-1").expect("valid owner")))
        .expect("find")
        .expect("uid-1 stored");
    assert_eq!(first.fingerprint().as_str(), "laptop");

    let missing = rt
        .block_on(store.find(&OwnerId::new("uid-3").expect("valid owner")))
        .expect("find");
    assert!(missing.is_none());
}
