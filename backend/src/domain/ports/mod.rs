//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod contact_command;
mod contact_repository;
mod login_service;
mod stroke_input_repository;
mod stroke_predictor;
mod user_repository;

pub use contact_command::{ContactCommand, FixtureContactCommand};
pub use contact_repository::{
    ContactPersistenceError, ContactRepository, FixtureContactRepository,
};
pub use login_service::{FixtureLoginService, FixtureSignupService, LoginService, SignupService};
pub use stroke_input_repository::{StrokeInputPersistenceError, StrokeInputRepository};
pub use stroke_predictor::{FixtureStrokePredictor, PredictionError, StrokePredictor};
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
