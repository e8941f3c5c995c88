//! Diesel schema for task persistence.

diesel::table! {
    /// Owner-scoped task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Identifier of the owning user.
        owner_id -> Uuid,
        /// Task name.
        #[max_length = 100]
        name -> Varchar,
        /// Optional description.
        #[max_length = 500]
        description -> Nullable<Varchar>,
        /// Scheduled date-time.
        scheduled_at -> Timestamptz,
        /// Task status.
        #[max_length = 20]
        status -> Varchar,
        /// Optional free-text location.
        location -> Nullable<Text>,
        /// Optional recurrence keyword.
        #[max_length = 10]
        recurrence -> Nullable<Varchar>,
        /// Task priority.
        #[max_length = 10]
        priority -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
