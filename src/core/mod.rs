pub mod compositor;
pub mod coords;
pub mod events;
pub mod inputs;
pub mod matcher;
pub mod resolver;
