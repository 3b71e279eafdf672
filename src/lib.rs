//! # Getting Started
//! Add the following to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! xpsplot = "*"
//! ```
//!
//! ```rust,no_run
//! use xpsplot::plot::PanelOptionsBuilder;
//! use xpsplot::series::BACKGROUND;
//! use xpsplot::XpsData;
//!
//! // Load a CasaXPS report, give its components meaningful names, and draw
//! // them filled down to the background.
//! let mut data = XpsData::from_file("C1s.TXT").unwrap();
//! data.rename_all(&["", "", "C-C", "C-O"]).unwrap();
//! data.subtract_background(BACKGROUND).unwrap();
//! let options = PanelOptionsBuilder::default()
//!     .columns(vec!["Exp", "C-C", "C-O", "envelope"])
//!     .fill(true)
//!     .build()
//!     .unwrap();
//! data.save("C1s.svg", &options).unwrap();
//! print!("{}", data);
//! ```

#[macro_use]
extern crate derive_builder;
#[macro_use]
extern crate log;

pub mod error;
pub mod plot;
pub mod read;
pub mod series;
pub mod stack;
pub mod table;
#[cfg(test)]
mod testing;

pub use error::{Result, XpsError};
pub use series::XpsData;
pub use stack::XpsStack;
