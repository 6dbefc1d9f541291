/// The surface the surrounding launcher provides to the plugin: toast
/// notifications and programmatic control of the query box. Kept minimal so
/// tests can record calls and other hosts can be slotted in.
pub trait PluginHost: Send + Sync {
    fn show_message(&self, title: &str, message: &str, icon_path: &str);
    fn change_query(&self, query: &str);
}

/// Host used by the standalone binary: notifications go to the terminal and
/// there is no query box to rewrite.
pub struct TerminalHost;

impl TerminalHost {
    pub fn new() -> Self {
        Self
    }
}

impl PluginHost for TerminalHost {
    fn show_message(&self, title: &str, message: &str, _icon_path: &str) {
        println!("** {}: {}", title, message);
    }

    fn change_query(&self, query: &str) {
        tracing::debug!("change_query(\"{}\") ignored by terminal host", query);
    }
}

impl Default for TerminalHost {
    fn default() -> Self {
        Self::new()
    }
}
