pub mod extract;
pub mod rules;
pub mod sections;

pub use extract::extract_all;
