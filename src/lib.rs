pub mod app;
pub mod error;
pub mod generator;
pub mod history;
pub mod maze;
pub mod solvers;

pub use error::Error;
