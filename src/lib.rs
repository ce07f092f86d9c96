mod busmap;
mod convert;
mod diag;
mod error;
mod format;
mod layout;
mod mpc;
mod opf;
mod reader;
mod savecase;
mod section;
mod source;

pub mod debug;
pub mod idx;
pub mod pf;


pub use busmap::*;
pub use convert::*;
pub use diag::*;
pub use error::{Error, Result};
pub use format::*;
pub use layout::*;
pub use mpc::*;
pub use opf::*;
pub use pf::pf2mpc;
pub use reader::*;
pub use savecase::*;
pub use section::*;
pub use source::*;
