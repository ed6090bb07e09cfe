//! # Field guidance library.
//!
//! This library contains the guidance core of the field guidance software: the steering control
//! loop, the field boundary geometry and the boundary recorder. It is shared between the replay
//! executable and any host application embedding the core.
//!
//! None of the operations in this library block or perform I/O, except for the parameter loading
//! helpers which read TOML files from the software root.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Boundary geometry - field polygons with holes, areas and containment
pub mod boundary;

/// Boundary recorder - captures driven points into a new boundary polygon
pub mod boundary_rec;

/// Field statistics - area bookkeeping derived from the boundary
pub mod field_stats;

/// Guidance control - converts line errors into steering commands
pub mod guidance;

/// Localisation data - the position samples delivered by the upstream position stream
pub mod loc;

/// Recorded track files used to replay a drive through the core
pub mod track;
