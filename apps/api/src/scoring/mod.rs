// JD scoring and suggestion generation. Both are pure functions of their
// inputs; handlers.rs wires them to the HTTP surface.

pub mod handlers;
pub mod score;
pub mod suggest;
