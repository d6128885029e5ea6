pub mod axis;
pub mod consts;
pub mod dataset;
pub mod error;
pub mod io;
pub mod ops;
pub mod pipeline;
pub mod probe;
pub mod restructure;
pub mod sample;
