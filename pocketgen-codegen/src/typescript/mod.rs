//! TypeScript code generation.

pub mod enums;
pub mod interfaces;
pub mod types;

pub use enums::render_enum;
pub use interfaces::InterfaceRenderer;
pub use types::{render_property, render_type};
