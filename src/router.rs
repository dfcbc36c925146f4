//! Route parsing and role-keyed guards
//!
//! The original client shipped its dashboard routes without access control
//! and leaned on the API to reject unauthorized requests. Here the guard is
//! explicit: resolving a dashboard route without a matching session falls
//! back to the auth screen.

use std::fmt;

use crate::auth::{Role, Session};

/// The three screens of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Login / registration
    Auth,
    /// The consumer dashboard
    DashboardUser,
    /// The supplier dashboard
    DashboardSupplier,
}

impl Route {
    /// Parse one of the three static paths
    pub fn parse(path: &str) -> Option<Route> {
        match path.trim_end_matches('/') {
            "/auth" => Some(Route::Auth),
            "/dashboard/user" => Some(Route::DashboardUser),
            "/dashboard/supplier" => Some(Route::DashboardSupplier),
            _ => None,
        }
    }

    /// The dashboard a fresh login or registration lands on
    pub fn for_role(role: Role) -> Route {
        match role {
            Role::User => Route::DashboardUser,
            Role::Supplier => Route::DashboardSupplier,
        }
    }

    /// Apply the access guard: dashboards require a session with the right role
    pub fn resolve(self, session: Option<&Session>) -> Route {
        let required = match self {
            Route::Auth => return Route::Auth,
            Route::DashboardUser => Role::User,
            Route::DashboardSupplier => Role::Supplier,
        };

        match session {
            Some(s) if s.role == required => self,
            _ => Route::Auth,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = match self {
            Route::Auth => "/auth",
            Route::DashboardUser => "/dashboard/user",
            Route::DashboardSupplier => "/dashboard/supplier",
        };
        write!(f, "{}", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> Session {
        Session::partial("tok".into(), "1".into(), role)
    }

    #[test]
    fn parses_the_three_paths() {
        assert_eq!(Route::parse("/auth"), Some(Route::Auth));
        assert_eq!(Route::parse("/dashboard/user"), Some(Route::DashboardUser));
        assert_eq!(
            Route::parse("/dashboard/supplier/"),
            Some(Route::DashboardSupplier)
        );
        assert_eq!(Route::parse("/nope"), None);
    }

    #[test]
    fn display_round_trips() {
        for route in [Route::Auth, Route::DashboardUser, Route::DashboardSupplier] {
            assert_eq!(Route::parse(&route.to_string()), Some(route));
        }
    }

    #[test]
    fn login_lands_on_the_role_dashboard() {
        assert_eq!(Route::for_role(Role::User), Route::DashboardUser);
        assert_eq!(Route::for_role(Role::Supplier), Route::DashboardSupplier);
    }

    #[test]
    fn guard_sends_missing_or_wrong_role_sessions_to_auth() {
        assert_eq!(Route::DashboardUser.resolve(None), Route::Auth);
        assert_eq!(
            Route::DashboardUser.resolve(Some(&session(Role::Supplier))),
            Route::Auth
        );
        assert_eq!(
            Route::DashboardUser.resolve(Some(&session(Role::User))),
            Route::DashboardUser
        );
        assert_eq!(
            Route::DashboardSupplier.resolve(Some(&session(Role::Supplier))),
            Route::DashboardSupplier
        );
        assert_eq!(Route::Auth.resolve(None), Route::Auth);
    }
}
