// @generated
// This file wires up buf-generated protobuf code
// Note: The prost files already include!() the tonic files automatically

pub mod v1 {
    include!("v1.rs");
    // v1.tonic.rs is auto-included by v1.rs
}
