//! sdfield-export: Pure output serializers (sans-IO)
//!
//! Converts distance-field grids into output byte formats. Currently
//! supports the raw `f32` dump. The quantized 8-bit image is handed
//! back to the caller's codec directly by `sdfield-pipeline` and needs
//! no serializer here.

pub mod raw;

pub use raw::to_raw_f32;
