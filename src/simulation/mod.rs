pub mod engine;
pub mod modifiers;
