/// Output frames and PNG encoding.
pub mod backend;
/// Photo, mask and caption compositing.
pub mod compositor;
pub(crate) mod cpu;
/// Drag indicator drawn over a committed frame.
pub mod overlay;
