//! Request extractors shared by the handlers.

pub mod request_meta;
pub mod validated_json;
