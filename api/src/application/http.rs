pub mod food_safety;
pub mod health;
pub mod server;
