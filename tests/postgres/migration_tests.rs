//! Schema constraints and reversibility of the initial migration.

use super::helpers::{
    CleanupGuard, INIT_SQL, connect, ensure_template, execute_sql_statements, setup_pool,
};
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;

const INIT_DOWN_SQL: &str = include_str!("../../migrations/2026-01-01-000000_init/down.sql");

const SEED_PROJECT_SQL: &str = "INSERT INTO projects (title, description, owner_id, created_at) \
     VALUES ('Campus navigator', 'Semester project', 'cs21b001', now())";

#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

fn table_count(conn: &mut PgConnection) -> i64 {
    diesel::sql_query(
        "SELECT COUNT(*) AS count FROM information_schema.tables \
         WHERE table_schema = 'public'",
    )
    .get_result::<CountRow>(conn)
    .expect("count tables")
    .count
}

#[rstest]
fn down_migration_reverses_up(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_migration_reverse_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    setup_pool(shared_test_cluster, &db_name).expect("database setup");
    let mut conn = connect(shared_test_cluster, &db_name);

    assert_eq!(table_count(&mut conn), 9);
    execute_sql_statements(&mut conn, INIT_DOWN_SQL).expect("down migration");
    assert_eq!(table_count(&mut conn), 0);
    execute_sql_statements(&mut conn, INIT_SQL).expect("up migration again");
    assert_eq!(table_count(&mut conn), 9);
}

#[rstest]
#[case::score_above_five(
    "INSERT INTO project_ratings (project_id, user_id, score, created_at) \
     VALUES (1, 'ee21b010', 6, now())"
)]
#[case::self_rating(
    "INSERT INTO member_ratings (project_id, rated_by, rated_user, score, created_at) \
     VALUES (1, 'cs21b001', 'cs21b001', 4, now())"
)]
#[case::management_role_application(
    "INSERT INTO project_applications \
     (project_id, user_id, status, applied_at, updated_at, role) \
     VALUES (1, 'ee21b010', 'pending', now(), now(), 'owner')"
)]
#[case::unknown_origin(
    "INSERT INTO project_applications \
     (project_id, user_id, status, applied_at, updated_at, origin) \
     VALUES (1, 'ee21b010', 'pending', now(), now(), 'system')"
)]
#[case::duplicate_sprint_number(
    "INSERT INTO sprints (project_id, number, name, starts_on, ends_on, created_by, created_at) \
     VALUES (1, 1, 'Kickoff', '2026-03-02', '2026-03-15', 'cs21b001', now()), \
            (1, 1, 'Routing', '2026-03-16', '2026-03-29', 'cs21b001', now())"
)]
#[case::sprint_ending_before_start(
    "INSERT INTO sprints (project_id, number, name, starts_on, ends_on, created_by, created_at) \
     VALUES (1, 1, 'Kickoff', '2026-03-15', '2026-03-02', 'cs21b001', now())"
)]
fn schema_rejects_invalid_rows(
    shared_test_cluster: &'static TestCluster,
    #[case] statement: &str,
) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_migration_constraints_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    setup_pool(shared_test_cluster, &db_name).expect("database setup");
    let mut conn = connect(shared_test_cluster, &db_name);

    diesel::sql_query(SEED_PROJECT_SQL)
        .execute(&mut conn)
        .expect("seed project");
    assert!(diesel::sql_query(statement).execute(&mut conn).is_err());
}
