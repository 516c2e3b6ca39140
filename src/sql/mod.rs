pub mod generator;
pub mod literal;

pub use generator::render;
pub use literal::{is_numeric_literal, render_literal};
