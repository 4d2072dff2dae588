//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; repositories convert them to
//! domain types.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::schema::{contact, stroke_inputs, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contact)]
pub(crate) struct NewContactRow<'a> {
    pub submission: String,
    pub email: &'a str,
    pub message: &'a str,
    pub name: &'a str,
}

/// Row struct for reading from the `stroke_inputs` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = stroke_inputs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct StrokeInputRow {
    pub id: i32,
    pub user_id: i32,
    pub age: f64,
    pub hypertension: bool,
    pub heart_disease: bool,
    pub avg_glucose_level: f64,
    pub bmi: f64,
    pub smoking_status: String,
    pub marital_status: String,
    pub work_type: String,
    pub recorded_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = stroke_inputs)]
pub(crate) struct NewStrokeInputRow<'a> {
    pub user_id: i32,
    pub age: f64,
    pub hypertension: bool,
    pub heart_disease: bool,
    pub avg_glucose_level: f64,
    pub bmi: f64,
    pub smoking_status: &'a str,
    pub marital_status: &'a str,
    pub work_type: &'a str,
    pub recorded_at: NaiveDateTime,
}
