// Menu builder
// This crate turns a collection of keyed items into an ordered menu tree

mod collection;
mod error;
mod filter;
mod options;
mod pipeline;
mod reader;
pub mod render;

pub use collection::{Collection, Item, Metadata};
pub use error::MenuError;
pub use filter::Filter;
pub use options::{Options, OptionsBuilder};
pub use pipeline::{Menu, MenuBuild};
pub use reader::{AsIsKeyReader, DefaultKeyReader, KeyReader};
