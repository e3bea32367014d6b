pub mod guard;
pub mod routes;

pub use guard::{guard, Guard};
pub use routes::{AdminRoute, Route};
