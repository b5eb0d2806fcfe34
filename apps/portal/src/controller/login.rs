use std::sync::Arc;

use client_core::{clear_session_user, store_session_user, SessionStore};
use shared::domain::SessionUser;
use tracing::info;

use crate::{controller::events::OnNavigate, error::PortalError, routes::Route};

pub struct LoginController {
    session: Arc<dyn SessionStore>,
    on_navigate: OnNavigate,
}

impl LoginController {
    pub fn new(session: Arc<dyn SessionStore>, on_navigate: OnNavigate) -> Self {
        Self {
            session,
            on_navigate,
        }
    }

    pub fn handle_submit_employee(&self, email: &str) -> Result<SessionUser, PortalError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(PortalError::InvalidForm("email is required".into()));
        }
        let user = SessionUser::employee(email);
        store_session_user(self.session.as_ref(), &user)?;
        info!(email = %user.email, "employee signed in");
        (self.on_navigate)(Route::Bills.path());
        Ok(user)
    }
}

/// Forgets the session user and returns to the login page.
pub fn logout(session: &dyn SessionStore, on_navigate: &OnNavigate) -> Result<(), PortalError> {
    clear_session_user(session)?;
    info!("signed out");
    on_navigate(Route::Login.path());
    Ok(())
}
