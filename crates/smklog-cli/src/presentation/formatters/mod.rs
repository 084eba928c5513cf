pub mod level;
pub mod text;
pub mod time;
