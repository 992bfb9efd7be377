pub use lines::*;
pub use path::*;

mod lines;
mod path;
