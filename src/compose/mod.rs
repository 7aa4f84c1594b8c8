//! Canvas compositing: bitmap preparation, alpha-aware pasting, anchored text and encoding.

pub mod canvas;
pub mod ops;
pub mod text;

pub use canvas::Compositor;
pub use ops::{make_circular_avatar, resize_keep_alpha};
pub use text::{Anchor, FontCache, HAlign, VAlign};
