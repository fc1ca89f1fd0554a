//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r#"# Cardview Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[bridge]
# Name of the handler under webkit.messageHandlers
# webkit_handler = "nativeBridge"
# Log outgoing messages when no native host is attached
# log_fallback = true

[loader]
# Simulated loading delay before cards appear
# delay_ms = 600         # 0-10000

[carousel]
# show_dots = true
# start_index = 0

[logging]
# level = "info"         # trace | debug | info | warn | error
"#
}
