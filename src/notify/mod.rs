// Notification core — decision rules, envelope construction, and the
// fan-out orchestration that ties the forum service, course store, and
// event bus together behind trait seams.

pub mod context;
pub mod dispatch;
pub mod engine;
pub mod event;
pub mod rules;
pub mod types;
