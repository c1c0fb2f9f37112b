//! Shuffle sessions: seed selection, soft shuffle and block reverse in one step.

mod request;
mod session;

pub use request::ShuffleRequest;
pub use session::Generator;
