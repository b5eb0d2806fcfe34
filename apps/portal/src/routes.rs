//! Application paths and their access rules.

use crate::document::NavIcon;

pub mod paths {
    pub const LOGIN: &str = "/";
    pub const BILLS: &str = "#employee/bills";
    pub const NEW_BILL: &str = "#employee/bill/new";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Bills,
    NewBill,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => paths::LOGIN,
            Route::Bills => paths::BILLS,
            Route::NewBill => paths::NEW_BILL,
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim() {
            paths::LOGIN => Some(Route::Login),
            paths::BILLS => Some(Route::Bills),
            paths::NEW_BILL => Some(Route::NewBill),
            _ => None,
        }
    }

    /// Protected routes require a session user.
    pub fn is_protected(self) -> bool {
        !matches!(self, Route::Login)
    }

    pub fn nav_icon(self) -> Option<NavIcon> {
        match self {
            Route::Login => None,
            Route::Bills => Some(NavIcon::Window),
            Route::NewBill => Some(NavIcon::Mail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_paths_only() {
        assert_eq!(Route::from_path("#employee/bills"), Some(Route::Bills));
        assert_eq!(Route::from_path("#employee/bill/new"), Some(Route::NewBill));
        assert_eq!(Route::from_path("/"), Some(Route::Login));
        assert_eq!(Route::from_path("#admin/unknown"), None);
    }

    #[test]
    fn only_login_is_public() {
        assert!(!Route::Login.is_protected());
        assert!(Route::Bills.is_protected());
        assert!(Route::NewBill.is_protected());
    }
}
