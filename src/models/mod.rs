pub mod admin;
pub mod challenge;
pub mod event;
pub mod goal;
pub mod page;
pub mod profile;
pub mod token;
pub mod waste;

pub use admin::*;
pub use challenge::*;
pub use event::*;
pub use goal::*;
pub use page::Page;
pub use profile::*;
pub use token::*;
pub use waste::*;
