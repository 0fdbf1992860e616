//! Diesel schema for sprint board persistence.

diesel::table! {
    /// Sprints, numbered from 1 within each project.
    sprints (id) {
        /// Store-assigned sprint identifier.
        id -> Int8,
        /// Owning project.
        project_id -> Int8,
        /// Position within the project, unique per project.
        number -> Int4,
        /// Sprint name.
        #[max_length = 255]
        name -> Varchar,
        /// First day of the sprint.
        starts_on -> Date,
        /// Last day of the sprint.
        ends_on -> Date,
        /// `open` or `closed`.
        #[max_length = 16]
        status -> Varchar,
        /// Roll number of the user who opened the sprint.
        #[max_length = 64]
        created_by -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks owned by a sprint.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Int8,
        /// Owning sprint.
        sprint_id -> Int8,
        /// Task description.
        description -> Text,
        /// Roll number of the assignee.
        #[max_length = 64]
        assignee -> Varchar,
        /// Story points, 1 to 100.
        points -> Int2,
        /// `pending`, `review` or `done`.
        #[max_length = 16]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last change timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> sprints (sprint_id));
diesel::allow_tables_to_appear_in_same_query!(sprints, tasks);
