//! Label geometry
//!
//! Maps a label size selector (`small`, `medium`, `large`, `dymo5xl`) to the
//! physical dimensions, grid, fonts and QR pixel size used when printing.
//! Resolution is pure and infallible: unknown selectors lay out as `medium`.
//!
//! ```
//! use qrlabel::layout::resolve;
//!
//! let large = resolve("large");
//! assert_eq!(large.grid_cols, 2);
//! assert_eq!(large.rows_for(3), 2);
//! assert_eq!(resolve("bogus"), resolve("medium"));
//! ```

mod descriptor;
mod sheet;

pub use descriptor::{FontSizes, LabelSize, LayoutDescriptor, resolve};
pub use sheet::{LabelCell, LabelSheet, qr_url};
