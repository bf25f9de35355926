pub mod entities;
pub mod lookup;
pub mod parsing;
pub mod ports;
pub mod prompt;
pub mod services;
pub mod source_url;
pub mod validation;
pub mod value_objects;

pub use entities::*;
pub use ports::*;
pub use value_objects::*;
