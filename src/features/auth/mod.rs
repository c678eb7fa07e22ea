pub mod clients;
pub mod dtos;
pub mod services;

pub use clients::{AuthClient, CurrentUser};
pub use services::AuthService;
