pub mod month;
pub mod plant;
pub mod recommendation;
pub mod sow_result;
pub mod warning;

pub use month::*;
pub use plant::*;
pub use recommendation::*;
pub use sow_result::*;
pub use warning::*;
