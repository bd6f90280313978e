#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod codec;
pub mod error;
pub mod intercept;
pub mod location;
pub mod navigation;
pub mod navigator;
pub mod page;
pub mod route_definition;

mod router_cfg;
pub use router_cfg::NavigatorConfig;

#[cfg(feature = "web")]
pub mod web;

/// A collection of useful items most applications might need.
pub mod prelude {
    pub use crate::codec::*;
    pub use crate::error::*;
    pub use crate::intercept::*;
    pub use crate::location::*;
    pub use crate::navigation::*;
    pub use crate::navigator::*;
    pub use crate::page::*;
    pub use crate::route_definition::*;
    pub use crate::router_cfg::NavigatorConfig;

    #[cfg(feature = "web")]
    pub use crate::web::*;

    pub use waypost_history::{History, MemoryHistory};
    #[cfg(feature = "web")]
    pub use waypost_history::WebHistory;
}
