mod loader;
mod schema;
mod source;
mod topics;
pub use loader::*;
pub use schema::*;
pub use source::*;
pub use topics::*;
