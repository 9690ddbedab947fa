//! Dashboard over the loaded datasets
//!
//! [`view`] derives what is shown from a [`crate::LoadedDataset`];
//! [`render`] turns it into colored terminal tables.

pub mod render;
pub mod view;

pub use render::{render_dataset, render_overview};
pub use view::{select, DatasetView};
