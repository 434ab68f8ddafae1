pub mod interactive;

pub use interactive::InputCollector;
