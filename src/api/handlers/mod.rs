pub mod analyze;
pub mod fixtures;
pub mod history;
pub mod lookups;
pub mod system;

pub use analyze::*;
pub use fixtures::*;
pub use history::*;
pub use lookups::*;
pub use system::*;
