mod author;
mod backend;
mod message;
mod session;
mod verdict;

pub use author::*;
pub use backend::*;
pub use message::*;
pub use session::*;
pub use verdict::*;
