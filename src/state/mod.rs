pub mod app;
pub mod command_state;
pub mod intent;
pub mod mode;
pub mod view;

pub use app::App;
