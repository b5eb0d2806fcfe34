//! Path-to-page dispatcher. Owns the document and the active page controller, gates
//! protected pages on the session user, and drains navigation requested by pages.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use client_core::{current_session_user, BillStore, SessionStore};
use shared::domain::SessionUser;
use tracing::{debug, info, warn};

use crate::{
    config::Settings,
    controller::{
        bills::BillsController,
        events::{OnNavigate, UiAction},
        login::{logout, LoginController},
        new_bill::NewBillController,
    },
    document::Document,
    error::PortalError,
    routes::Route,
    ui::Views,
};

const MAX_CHAINED_NAVIGATIONS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Rendered(Route),
    Redirected { requested: Route, to: Route },
    /// Unknown path: nothing was rendered.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Handled by the active page without leaving it.
    Handled,
    Navigated(RouteOutcome),
    /// No active page accepts this action.
    Ignored,
}

#[derive(Debug, Clone, Copy)]
pub struct RouterOptions {
    pub modal_width: u32,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self { modal_width: 800 }
    }
}

impl From<&Settings> for RouterOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            modal_width: settings.modal_width,
        }
    }
}

enum ActivePage {
    Blank,
    Login(LoginController),
    Bills(BillsController),
    NewBill(NewBillController),
}

pub struct Router {
    store: Arc<dyn BillStore>,
    session: Arc<dyn SessionStore>,
    views: Arc<Views>,
    options: RouterOptions,
    document: Document,
    page: ActivePage,
    pending: Arc<Mutex<VecDeque<String>>>,
}

impl Router {
    pub fn new(
        store: Arc<dyn BillStore>,
        session: Arc<dyn SessionStore>,
        views: Arc<Views>,
        options: RouterOptions,
    ) -> Self {
        Self {
            store,
            session,
            views,
            options,
            document: Document::new(),
            page: ActivePage::Blank,
            pending: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Drains the alerts raised so far.
    pub fn take_alerts(&mut self) -> Vec<String> {
        self.document.take_alerts()
    }

    pub fn active_route(&self) -> Option<Route> {
        match self.page {
            ActivePage::Blank => None,
            ActivePage::Login(_) => Some(Route::Login),
            ActivePage::Bills(_) => Some(Route::Bills),
            ActivePage::NewBill(_) => Some(Route::NewBill),
        }
    }

    pub fn new_bill_controller(&self) -> Option<&NewBillController> {
        match &self.page {
            ActivePage::NewBill(controller) => Some(controller),
            _ => None,
        }
    }

    /// Callback given to pages: queues the path for the router to visit next.
    pub fn on_navigate(&self) -> OnNavigate {
        let pending = Arc::clone(&self.pending);
        Arc::new(move |path: &str| match pending.lock() {
            Ok(mut queue) => queue.push_back(path.to_string()),
            Err(_) => warn!(path, "navigation queue poisoned; dropping request"),
        })
    }

    pub async fn navigate(&mut self, path: &str) -> Result<RouteOutcome, PortalError> {
        let outcome = self.visit(path).await?;
        self.drain_pending(outcome).await
    }

    pub async fn dispatch(&mut self, action: UiAction) -> Result<DispatchOutcome, PortalError> {
        let name = action.name();
        let on_navigate = self.on_navigate();
        let handled = match (&mut self.page, action) {
            (ActivePage::Login(page), UiAction::SubmitEmployeeLogin { email }) => {
                page.handle_submit_employee(&email)?;
                true
            }
            (ActivePage::Bills(page), UiAction::ClickNewBill) => {
                page.handle_click_new_bill();
                true
            }
            (ActivePage::Bills(page), UiAction::ClickIconEye(icon)) => {
                page.handle_click_icon_eye(&mut self.document, &icon)?;
                true
            }
            (ActivePage::Bills(_), UiAction::CloseModal) => {
                self.document.close_modal();
                true
            }
            (ActivePage::NewBill(page), UiAction::SelectFile(file)) => {
                page.handle_change_file(&mut self.document, file)?;
                true
            }
            (ActivePage::NewBill(page), UiAction::SubmitNewBill(form)) => {
                page.handle_submit(form).await?;
                true
            }
            (_, UiAction::Logout) => {
                logout(self.session.as_ref(), &on_navigate)?;
                true
            }
            _ => false,
        };

        if !handled {
            debug!(action = name, "no active page handles action");
            return Ok(DispatchOutcome::Ignored);
        }
        if self.has_pending() {
            let outcome = self.drain_pending(RouteOutcome::Ignored).await?;
            return Ok(DispatchOutcome::Navigated(outcome));
        }
        Ok(DispatchOutcome::Handled)
    }

    fn has_pending(&self) -> bool {
        self.pending
            .lock()
            .map(|queue| !queue.is_empty())
            .unwrap_or(false)
    }

    fn next_pending(&self) -> Option<String> {
        self.pending.lock().ok().and_then(|mut queue| queue.pop_front())
    }

    async fn drain_pending(&mut self, mut outcome: RouteOutcome) -> Result<RouteOutcome, PortalError> {
        let mut hops = 0;
        while let Some(path) = self.next_pending() {
            hops += 1;
            if hops > MAX_CHAINED_NAVIGATIONS {
                warn!(path = %path, "too many chained navigations; dropping the rest");
                if let Ok(mut queue) = self.pending.lock() {
                    queue.clear();
                }
                break;
            }
            outcome = self.visit(&path).await?;
        }
        Ok(outcome)
    }

    async fn visit(&mut self, path: &str) -> Result<RouteOutcome, PortalError> {
        let Some(route) = Route::from_path(path) else {
            debug!(path, "ignoring unknown route");
            return Ok(RouteOutcome::Ignored);
        };

        let user = if route.is_protected() {
            let Some(user) = self.session_user() else {
                info!(path, "no session user; redirecting to login");
                self.render_login()?;
                return Ok(RouteOutcome::Redirected {
                    requested: route,
                    to: Route::Login,
                });
            };
            Some(user)
        } else {
            None
        };

        match route {
            Route::Login => self.render_login()?,
            Route::Bills => {
                let user = user.ok_or(PortalError::NoSession)?;
                self.document
                    .mount(route.nav_icon(), self.views.loading(route.nav_icon())?);
                let page = BillsController::new(
                    Arc::clone(&self.store),
                    user,
                    self.on_navigate(),
                    Arc::clone(&self.views),
                    self.options.modal_width,
                );
                page.render(&mut self.document).await?;
                self.page = ActivePage::Bills(page);
            }
            Route::NewBill => {
                let page = NewBillController::new(
                    Arc::clone(&self.store),
                    Arc::clone(&self.session),
                    self.on_navigate(),
                );
                self.document.mount(route.nav_icon(), self.views.new_bill()?);
                self.page = ActivePage::NewBill(page);
            }
        }
        debug!(path, "rendered route");
        Ok(RouteOutcome::Rendered(route))
    }

    fn render_login(&mut self) -> Result<(), PortalError> {
        self.document.mount(None, self.views.login()?);
        self.page = ActivePage::Login(LoginController::new(
            Arc::clone(&self.session),
            self.on_navigate(),
        ));
        Ok(())
    }

    fn session_user(&self) -> Option<SessionUser> {
        match current_session_user(self.session.as_ref()) {
            Ok(user) => user,
            Err(err) => {
                warn!(error = %err, "unreadable session user; treating as signed out");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/router_tests.rs"]
mod tests;
