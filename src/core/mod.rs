pub mod services;
pub mod traits;
