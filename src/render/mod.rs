//! Rendering pipeline: strips, batches, raster capture, render cache,
//! compositor and terminal driver.

pub mod batch;
pub mod cache;
pub mod compositor;
pub mod driver;
pub mod raster;
pub mod strip;

pub use batch::Batch;
pub use cache::{CacheEntry, CacheStats, RenderCache};
pub use compositor::{CellUpdate, Compositor};
pub use driver::Driver;
pub use raster::Raster;
pub use strip::{CellStyle, Strip, StyledCell};
