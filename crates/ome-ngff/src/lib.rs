//! OME-NGFF Metadata
//! https://ngff.openmicroscopy.org/0.4/
//!
//! Typed plate, well and image attributes. Every document type implements [`Validate`], use
//! [`from_slice`] or [`from_value`] to get either a typed document or all of its
//! [`Violation`]s.

pub mod axis;
pub mod coordinate_transformations;
pub mod image;
pub mod multiscale;
pub mod omero;
pub mod plate;
mod util;
pub mod validation;
pub mod well;

pub use axis::{
    Axis,
    ChannelAxis,
    CustomAxis,
    SpaceAxis,
    SpaceUnit,
    TimeAxis,
    TimeUnit,
};
pub use coordinate_transformations::{
    CoordinateTransformation,
    Identity,
    Scale,
    Translation,
};
pub use image::ImageAttributes;
pub use multiscale::{
    Dataset,
    Multiscale,
};
pub use omero::{
    Channel,
    Omero,
    RDefs,
    Window,
};
pub use plate::{
    Acquisition,
    Column,
    Plate,
    PlateAttributes,
    Row,
};
pub use util::VERSION;
pub use validation::{
    from_slice,
    from_value,
    Validate,
    ValidationErrors,
    Violation,
};
pub use well::{
    Image,
    Well,
    WellAttributes,
};
