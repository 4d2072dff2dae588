//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and depend only on domain ports, so
//! they can be tested with fixtures and no I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ContactCommand, FixtureContactCommand, FixtureLoginService, FixtureSignupService,
    FixtureStrokePredictor, LoginService, SignupService, StrokePredictor,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub signup: Arc<dyn SignupService>,
    pub contact: Arc<dyn ContactCommand>,
    pub predictor: Arc<dyn StrokePredictor>,
}

impl HttpState {
    pub fn new(
        login: Arc<dyn LoginService>,
        signup: Arc<dyn SignupService>,
        contact: Arc<dyn ContactCommand>,
        predictor: Arc<dyn StrokePredictor>,
    ) -> Self {
        Self {
            login,
            signup,
            contact,
            predictor,
        }
    }

    /// State wired entirely to in-memory fixtures.
    pub fn fixtures() -> Self {
        Self::new(
            Arc::new(FixtureLoginService),
            Arc::new(FixtureSignupService),
            Arc::new(FixtureContactCommand::default()),
            Arc::new(FixtureStrokePredictor::default()),
        )
    }
}
