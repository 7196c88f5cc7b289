//! GRIB2 data unpacking algorithms.
//!
//! Implements various packing methods:
//! - Simple packing
//! - Complex packing  
//! - Complex packing with spatial differencing
//! - JPEG2000 compression
//! - PNG compression

// TODO: Implement unpacking algorithms
