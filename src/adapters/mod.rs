//! Adapters connecting the crew to the outside world.
//!
//! - `llm`: `ChatModel` implementations
//! - `http`: the browser/JSON front end
//! - `mock`: scripted providers for tests and offline runs

pub mod http;
pub mod llm;
pub mod mock;
