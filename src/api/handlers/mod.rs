pub mod events;
pub mod members;
pub mod products;
pub mod root;
pub mod schools;
