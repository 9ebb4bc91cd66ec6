//! Auth module: three-layer architecture (domain, repository, service), plus
//! token verification and the role gate used on every protected route.

pub mod domain;
pub mod errors;
pub mod guard;
pub mod repo;
pub mod repository;
pub mod service;
pub mod token;

pub use guard::{require_role, RouteAccess};
pub use service::AuthService;
pub use token::{Claims, TokenAuthenticator};
