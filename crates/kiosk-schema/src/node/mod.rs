mod binding;
mod component;
mod def;
mod page;
mod route;

pub use binding::*;
pub use component::*;
pub use def::*;
pub use page::*;
pub use route::*;
