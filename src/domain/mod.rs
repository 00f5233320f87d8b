pub mod analysis;
pub mod dataset;
pub mod fixture;
pub mod history;
pub mod league;
pub mod request;

pub use analysis::*;
pub use dataset::*;
pub use fixture::*;
pub use history::*;
pub use league::*;
pub use request::*;
