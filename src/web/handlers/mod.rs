pub mod check;
pub mod hello;
