pub mod host;
pub mod icons;
pub mod plugin;
pub mod results;
pub mod services;

pub use host::{PluginHost, TerminalHost};
pub use plugin::WingetPlugin;
pub use results::ResultItem;
