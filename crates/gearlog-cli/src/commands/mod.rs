pub mod add;
pub mod common;
pub mod completions;
pub mod export;
pub mod inspect;
pub mod list;
pub mod queue;
pub mod refresh;
pub mod show;
pub mod status;
pub mod sync;
