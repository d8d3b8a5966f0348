pub mod registry;
pub mod results;
