pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod multipart;
pub mod routes;
pub mod state;
