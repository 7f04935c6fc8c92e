//! Converts MakeHuman MHX2 character assets (geometry, materials, bone
//! skeleton) into Babylon.js scene files.

pub mod convert;
pub mod document;
