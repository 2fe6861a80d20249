mod session;
mod turn;
mod upstream;

pub use session::*;
pub use turn::*;
pub use upstream::*;
