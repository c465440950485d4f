pub mod generate;
pub mod render;
pub mod solver;
pub mod timing;
