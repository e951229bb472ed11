// Forum service — boundary models, HTTP client, and subscriber traversal
// for the discussion backend.
//
// Each submodule handles one area of the forum API surface.

pub mod client;
pub mod models;
pub mod subscriptions;
pub mod traits;
