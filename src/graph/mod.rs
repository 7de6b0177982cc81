pub mod augmented;
pub mod link;
pub mod network;
pub mod node;
