pub mod app;
pub mod lessons;
pub mod tools;

pub use app::{validate_production_config, AppConfig};
pub use lessons::{lesson_by_slug, lessons, Lesson};
pub use tools::{calculator_by_slug, calculators, tool_categories, Calculator};
