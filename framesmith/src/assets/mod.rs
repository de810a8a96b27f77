/// Load/save/copy of opaque frame payloads.
pub mod codec;
