//! Utility library for the field guidance software
//!
//! Provides the ambient services shared by the executables: sessions, logging, parameter loading,
//! CSV archiving and a handful of generic maths helpers.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod archive;
pub mod host;
pub mod logger;
pub mod maths;
pub mod params;
pub mod session;
pub mod time;
