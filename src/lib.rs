pub mod cli;
pub mod comparisons;
pub mod ctx;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod schema;
pub mod session;
pub mod symbols;
pub mod table;
