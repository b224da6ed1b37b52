pub mod constants;
pub mod middleware;
pub mod response;
pub mod services;
