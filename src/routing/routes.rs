//! Page tables for the two apps.

use crate::models::user::Role;
use crate::routing::guard::{guard, Guard};

/// Pages of the customer/worker app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Register,
    Client,
    Worker,
    Profile,
    Services,
    ServiceDetail(String),
    Admin,
}

impl Route {
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_end_matches('/');
        let route = match trimmed {
            "" => Route::Landing,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/client" => Route::Client,
            "/worker" => Route::Worker,
            "/profile" => Route::Profile,
            "/services" => Route::Services,
            "/admin" => Route::Admin,
            other => {
                let id = other.strip_prefix("/service/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                Route::ServiceDetail(id.to_string())
            }
        };
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Client => "/client".to_string(),
            Route::Worker => "/worker".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::Services => "/services".to_string(),
            Route::ServiceDetail(id) => format!("/service/{}", id),
            Route::Admin => "/admin".to_string(),
        }
    }

    pub fn required_roles(&self) -> &'static [Role] {
        match self {
            Route::Client => &[Role::Client, Role::Admin],
            Route::Worker => &[Role::Worker, Role::Admin],
            Route::Admin => &[Role::Admin],
            _ => &[],
        }
    }

    pub fn check(&self, current: Option<Role>) -> Guard {
        guard(current, self.required_roles())
    }
}

/// Pages of the admin panel. The whole panel sits behind the admin token;
/// without one only the login page is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminRoute {
    Login,
    Dashboard,
    Workers,
    Jobs,
    Users,
    Disputes,
    Categories,
}

impl AdminRoute {
    /// Resolves a path for the panel. Unknown paths land on the dashboard.
    pub fn resolve(path: &str, authenticated: bool) -> Self {
        if !authenticated {
            return AdminRoute::Login;
        }
        match path.trim().trim_end_matches('/') {
            "/workers" => AdminRoute::Workers,
            "/jobs" => AdminRoute::Jobs,
            "/users" => AdminRoute::Users,
            "/disputes" => AdminRoute::Disputes,
            "/categories" => AdminRoute::Categories,
            _ => AdminRoute::Dashboard,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            AdminRoute::Login => "/login",
            AdminRoute::Dashboard => "/",
            AdminRoute::Workers => "/workers",
            AdminRoute::Jobs => "/jobs",
            AdminRoute::Users => "/users",
            AdminRoute::Disputes => "/disputes",
            AdminRoute::Categories => "/categories",
        }
    }
}
