//! Diesel table definitions for the SQLite schema.
//!
//! Must match `migrations/*/up.sql` exactly.

diesel::table! {
    /// Registered accounts. `password` holds an Argon2id PHC string.
    users (id) {
        id -> Integer,
        /// Unique, at most 80 characters.
        username -> Text,
        password -> Text,
    }
}

diesel::table! {
    /// Contact form submissions, one row per submission.
    contact (id) {
        id -> Integer,
        /// Server-generated submission UUID; the only unique column.
        #[sql_name = "contact"]
        submission -> Text,
        email -> Text,
        message -> Text,
        name -> Text,
    }
}

diesel::table! {
    /// Snapshots of submitted patient features.
    stroke_inputs (id) {
        id -> Integer,
        user_id -> Integer,
        age -> Double,
        hypertension -> Bool,
        heart_disease -> Bool,
        avg_glucose_level -> Double,
        bmi -> Double,
        smoking_status -> Text,
        marital_status -> Text,
        work_type -> Text,
        recorded_at -> Timestamp,
    }
}

diesel::joinable!(stroke_inputs -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, contact, stroke_inputs);
