use crate::models::user::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Allow,
    RedirectTo(&'static str),
}

impl Guard {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Guard::Allow)
    }
}

/// Decides whether a user with `current` may open a page restricted to
/// `required`. Anonymous visitors go to the login page, users with the wrong
/// role go home. An empty `required` list means the page is public.
pub fn guard(current: Option<Role>, required: &[Role]) -> Guard {
    if required.is_empty() {
        return Guard::Allow;
    }
    match current {
        None => Guard::RedirectTo("/login"),
        Some(role) if required.contains(&role) => Guard::Allow,
        Some(_) => Guard::RedirectTo("/"),
    }
}
