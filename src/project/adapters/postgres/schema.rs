//! Diesel schema for project persistence.

diesel::table! {
    /// Projects.
    projects (id) {
        /// Store-assigned project identifier.
        id -> Int8,
        /// Title.
        #[max_length = 255]
        title -> Varchar,
        /// Description.
        description -> Text,
        /// Owner roll number.
        #[max_length = 64]
        owner_id -> Varchar,
        /// `active` or `completed`.
        #[max_length = 16]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Project membership with roles.
    project_members (project_id, user_id) {
        /// Project.
        project_id -> Int8,
        /// Member roll number.
        #[max_length = 64]
        user_id -> Varchar,
        /// `owner`, `moderator`, `mentor` or `member`.
        #[max_length = 16]
        role -> Varchar,
        /// Join timestamp.
        joined_at -> Timestamptz,
    }
}

diesel::table! {
    /// Applications to join a project.
    project_applications (id) {
        /// Store-assigned application identifier.
        id -> Int8,
        /// Project applied to.
        project_id -> Int8,
        /// Applicant roll number.
        #[max_length = 64]
        user_id -> Varchar,
        /// `pending`, `accepted`, `rejected` or `withdrawn`.
        #[max_length = 16]
        status -> Varchar,
        /// Submission timestamp.
        applied_at -> Timestamptz,
        /// Latest change timestamp.
        updated_at -> Timestamptz,
        /// `member` or `mentor`.
        #[max_length = 16]
        role -> Varchar,
        /// `user` or `admin`.
        #[max_length = 16]
        origin -> Varchar,
    }
}

diesel::table! {
    /// Ratings members give each other within a project.
    member_ratings (project_id, rated_by, rated_user) {
        /// Project.
        project_id -> Int8,
        /// Rater roll number.
        #[max_length = 64]
        rated_by -> Varchar,
        /// Rated member roll number.
        #[max_length = 64]
        rated_user -> Varchar,
        /// Score, 1 to 5.
        score -> Int2,
        /// Free-form comment.
        comment -> Text,
        /// Rating timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ratings outsiders give a project.
    project_ratings (project_id, user_id) {
        /// Project.
        project_id -> Int8,
        /// Rater roll number.
        #[max_length = 64]
        user_id -> Varchar,
        /// Score, 1 to 5.
        score -> Int2,
        /// Free-form comment.
        comment -> Text,
        /// Rating timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// User profiles keyed by roll number.
    users (user_id) {
        /// Roll number.
        #[max_length = 64]
        user_id -> Varchar,
        /// Identity-provider subject id.
        #[max_length = 128]
        external_id -> Nullable<Varchar>,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// E-mail address.
        #[max_length = 255]
        email -> Nullable<Varchar>,
        /// Biography.
        bio -> Nullable<Text>,
        /// Latest change timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(project_members -> projects (project_id));
diesel::joinable!(project_applications -> projects (project_id));
diesel::joinable!(project_ratings -> projects (project_id));
diesel::allow_tables_to_appear_in_same_query!(
    projects,
    project_members,
    project_applications,
    member_ratings,
    project_ratings,
    users,
);
