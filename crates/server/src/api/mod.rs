pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod vehicles;

pub use routes::create_router;
