pub mod auth;
pub mod cors;
pub mod guard;

pub use auth::{AuthContext, JwtAuth};
pub use cors::create_cors;
pub use guard::AdminOnly;
