pub mod browse;
pub mod cache;
pub mod display;
pub mod episode;
pub mod search;
pub mod session;
pub mod show;

pub use browse::*;
pub use cache::*;
pub use episode::*;
pub use search::*;
pub use session::*;
pub use show::*;
