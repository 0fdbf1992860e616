//! Per-project sprint numbering in the `sprints` table.

use super::helpers::{CleanupGuard, ensure_template, setup_pool, test_runtime};
use chrono::NaiveDate;
use cohort::ids::{ProjectId, UserId};
use cohort::project::{
    adapters::postgres::PostgresProjectRepository, domain::NewProject, ports::ProjectRepository,
};
use cohort::sprint::{
    adapters::postgres::PostgresSprintBoard,
    domain::{NewSprint, SprintNumber, SprintPeriod},
    ports::SprintBoardRepository,
};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;
use tokio::runtime::Runtime;

fn new_sprint(project_id: ProjectId, name: &str) -> NewSprint {
    let period = SprintPeriod::new(
        NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date"),
        NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid date"),
    )
    .expect("valid period");
    NewSprint::new(
        project_id,
        name,
        period,
        UserId::new("cs21b001").expect("valid user"),
        &DefaultClock,
    )
    .expect("valid sprint")
}

fn create_project(rt: &Runtime, projects: &PostgresProjectRepository, title: &str) -> ProjectId {
    let project = NewProject::new(
        title,
        "Built during the semester",
        UserId::new("cs21b001").expect("valid user"),
        &DefaultClock,
    )
    .expect("valid project");
    rt.block_on(projects.create_project(&project))
        .expect("create project")
        .id()
}

#[rstest]
fn sprints_are_numbered_per_project(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_sprint_numbers_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let pool = setup_pool(shared_test_cluster, &db_name).expect("pool setup");
    let projects = PostgresProjectRepository::new(pool.clone());
    let board = PostgresSprintBoard::new(pool);
    let rt = test_runtime();

    let first_project = create_project(&rt, &projects, "Campus navigator");
    let second_project = create_project(&rt, &projects, "Library kiosk");

    let numbers: Vec<i32> = [
        (first_project, "Kickoff"),
        (first_project, "Routing"),
        (second_project, "Kickoff"),
        (first_project, "Polish"),
    ]
    .into_iter()
    .map(|(project_id, name)| {
        rt.block_on(board.create_sprint(&new_sprint(project_id, name)))
            .expect("create sprint")
            .number()
            .value()
    })
    .collect();
    assert_eq!(numbers, vec![1, 2, 1, 3]);

    let listed = rt
        .block_on(board.list_sprints(first_project))
        .expect("list sprints");
    let names: Vec<&str> = listed.iter().map(|sprint| sprint.name()).collect();
    assert_eq!(names, vec!["Kickoff", "Routing", "Polish"]);

    let second = rt
        .block_on(board.find_sprint_by_number(
            second_project,
            SprintNumber::new(1).expect("valid number"),
        ))
        .expect("find sprint")
        .expect("sprint exists");
    assert_eq!(second.project_id(), second_project);
    assert_eq!(second.name(), "Kickoff");
}

#[rstest]
fn sprint_for_missing_project_is_refused(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_sprint_orphan_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let board = PostgresSprintBoard::new(
        setup_pool(shared_test_cluster, &db_name).expect("pool setup"),
    );
    let rt = test_runtime();

    let orphan = new_sprint(ProjectId::new(404).expect("valid id"), "Kickoff");
    assert!(rt.block_on(board.create_sprint(&orphan)).is_err());
}
