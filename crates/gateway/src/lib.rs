pub mod routes;
pub mod state;
pub mod upstream;
