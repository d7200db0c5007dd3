//! Reads OME-NGFF plate, well and image hierarchies from a [`zarr_store::Store`] and validates
//! their metadata.

pub mod error;
pub mod reader;

pub use error::{Error, Result};
pub use reader::{read_attributes, ImageReader, PlateReader, WellReader};
