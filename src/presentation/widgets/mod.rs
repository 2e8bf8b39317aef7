mod footer_bar;
mod gallery_grid;
mod header_bar;
mod image_modal;
mod input;
mod status_bar;

pub use footer_bar::{FocusContext, FooterBar, FooterBarStyle};
pub use gallery_grid::{
    CardView, EMPTY_GALLERY_MESSAGE, GalleryGrid, GalleryPane, GalleryView, RenderTarget,
};
pub use header_bar::{HeaderBar, HeaderBarStyle};
pub use image_modal::{ImageModal, ImageModalView, PreviewStatus};
pub use input::TextInput;
pub use status_bar::{StatusBar, StatusLevel};
