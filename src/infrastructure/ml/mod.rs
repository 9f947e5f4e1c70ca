pub mod disabled_face_encoder;
pub mod encoding_comparator;
pub mod http_face_encoder;
pub mod traits;
