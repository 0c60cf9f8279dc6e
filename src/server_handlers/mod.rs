pub mod docs;
pub mod analithics;

pub use docs::*;
pub use analithics::*;
