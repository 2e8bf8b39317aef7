mod image_source_port;
mod key_value_port;

pub use image_source_port::ImageSourcePort;
pub use key_value_port::KeyValuePort;

#[cfg(test)]
pub mod mocks {
    pub use super::image_source_port::mock::{MockImageSource, fox};
    pub use super::key_value_port::MockKeyValuePort;
}
