#![doc = include_str!("../README.md")]

mod convert;
mod error;
mod ply;
mod splat;

pub use convert::*;
pub use error::*;
pub use ply::*;
pub use splat::*;

pub use glam;
