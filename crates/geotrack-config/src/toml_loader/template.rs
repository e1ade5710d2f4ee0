//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# geotrack configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[broker]
# url = "ws://localhost:61614/stomp"
# login = "guest"
# passcode = "guest"
# destination = "jms.topic.trackers"

[rest]
# topic_url = "http://localhost:8080/topics/jms.topic.trackers"

[map]
# zoom = 14              # 0-21

[publisher]
# alias = "alice"        # prompted for when unset
# transport = "rest"     # rest, stomp
# interval_ms = 0        # pacing between replayed fixes

[logging]
# level = "INFO"         # TRACE, DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
