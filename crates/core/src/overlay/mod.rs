pub mod font;
pub mod overlay_surface;
pub mod result_renderer;
pub mod summary;
