pub mod optimizer;
mod probe;
pub mod satisfaction;
pub mod work;
