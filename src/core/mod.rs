// Core modules implementing library discovery, loading, binding, and error modeling.
pub mod error;
pub mod functions;
pub mod library;
pub mod locate;
pub mod session;
pub mod sys;
