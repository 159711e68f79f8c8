//! Generated protobuf and tonic code for the todo service.
//!
//! Sources live in `proto/`; the Rust output under `src/gen/` is checked in so
//! building the workspace does not require `protoc`.

mod gen;

pub use gen::v1;
