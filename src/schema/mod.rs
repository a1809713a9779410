pub mod document;
pub mod model;
pub mod overrides;

pub use document::*;
pub use model::*;
pub use overrides::*;
