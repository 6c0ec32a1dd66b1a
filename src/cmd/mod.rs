//! CLI command implementations.
//!
//! | Module     | Commands handled |
//! |------------|------------------|
//! | `serve`    | `Serve`          |
//! | `products` | `Products`, `Add`|
//! | `unfurl`   | `Unfurl`         |
//! | `config`   | `Config`         |

pub mod config;
pub mod products;
pub mod serve;
pub mod unfurl;

pub use config::cmd_config;
pub use products::{cmd_add, cmd_products};
pub use serve::cmd_serve;
pub use unfurl::cmd_unfurl;
