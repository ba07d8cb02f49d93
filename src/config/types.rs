// Configuration type definitions

use serde::Deserialize;

/// Record type used when a panel does not name one
pub const DEFAULT_RECORD_TYPE: &str = "wagtailcore.Page";

/// Path of the admin API (search, objects, create)
pub const ADMIN_API_PATH: &str = "/admin/autocomplete/";

/// Path of the public API (search and objects only)
pub const PUBLIC_API_PATH: &str = "/autocomplete/";

/// What to do with a search response that resolves after a newer one
///
/// Only successful responses move the fence: when a newer search fails, an
/// older one that succeeds afterwards is still applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StaleResponsePolicy {
    /// Drop responses older than the newest applied search
    #[default]
    Discard,
    /// Whichever response resolves last wins
    LastResolved,
}

/// Widget construction settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Form field name of the hidden input
    pub name: String,
    /// Record type passed to every API call
    #[serde(rename = "type")]
    pub record_type: String,
    pub can_create: bool,
    pub is_single: bool,
    pub fetch_initial_values: bool,
    /// Base URL, ending in a slash, that the endpoint paths are appended to
    pub api_base: String,
    /// Host owns the value and re-supplies it after each change
    pub controlled: bool,
    pub stale_responses: StaleResponsePolicy,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        WidgetConfig {
            name: "autocomplete".to_string(),
            record_type: DEFAULT_RECORD_TYPE.to_string(),
            can_create: false,
            is_single: false,
            fetch_initial_values: false,
            api_base: format!("http://127.0.0.1:8000{}", ADMIN_API_PATH),
            controlled: false,
            stale_responses: StaleResponsePolicy::Discard,
        }
    }
}

impl WidgetConfig {
    /// Multi-select field, e.g. a tag list
    pub fn field_panel(name: &str, record_type: &str, can_create: bool) -> Self {
        WidgetConfig {
            name: name.to_string(),
            record_type: record_type.to_string(),
            can_create,
            is_single: false,
            ..WidgetConfig::default()
        }
    }

    /// Single-select chooser, e.g. a parent page
    pub fn page_chooser(name: &str, record_type: &str, can_create: bool) -> Self {
        WidgetConfig {
            name: name.to_string(),
            record_type: record_type.to_string(),
            can_create,
            is_single: true,
            ..WidgetConfig::default()
        }
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.to_string();
        self
    }
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct HttpConfig {
    /// No timeout when unset
    pub timeout_ms: Option<u64>,
    pub user_agent: Option<String>,
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub widget: WidgetConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.widget.record_type, "wagtailcore.Page");
        assert!(config.widget.api_base.ends_with("/admin/autocomplete/"));
    }

    #[test]
    fn test_full_widget_section() {
        let config: Config = toml::from_str(
            r#"
[widget]
name = "tags"
type = "blog.BlogTag"
can_create = true
is_single = false
fetch_initial_values = true
api_base = "https://cms.example.org/admin/autocomplete/"
controlled = true
stale_responses = "last-resolved"

[http]
timeout_ms = 2500
user_agent = "cms-autocomplete-test"
"#,
        )
        .unwrap();

        assert_eq!(config.widget.name, "tags");
        assert_eq!(config.widget.record_type, "blog.BlogTag");
        assert!(config.widget.can_create);
        assert!(config.widget.fetch_initial_values);
        assert!(config.widget.controlled);
        assert_eq!(config.widget.stale_responses, StaleResponsePolicy::LastResolved);
        assert_eq!(config.http.timeout_ms, Some(2500));
        assert_eq!(config.http.user_agent.as_deref(), Some("cms-autocomplete-test"));
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[widget]\nstale_responses = \"newest\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_panel_presets() {
        let field = WidgetConfig::field_panel("tags", "blog.BlogTag", true);
        assert!(!field.is_single);
        assert!(field.can_create);

        let chooser = WidgetConfig::page_chooser("parent", DEFAULT_RECORD_TYPE, false);
        assert!(chooser.is_single);
        assert!(!chooser.can_create);
        assert_eq!(chooser.name, "parent");
    }

    // Any valid stale-response policy value parses to the matching variant.
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_valid_policy_parsing(policy in prop::sample::select(vec!["discard", "last-resolved"])) {
            let toml_content = format!("[widget]\nstale_responses = \"{}\"\n", policy);

            let config: Result<Config, _> = toml::from_str(&toml_content);
            prop_assert!(config.is_ok(), "Failed to parse valid policy: {}", policy);

            let expected = match policy {
                "discard" => StaleResponsePolicy::Discard,
                "last-resolved" => StaleResponsePolicy::LastResolved,
                _ => unreachable!(),
            };
            prop_assert_eq!(config.unwrap().widget.stale_responses, expected);
        }
    }

    // Missing sections and fields always fall back to defaults.
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_missing_fields_use_defaults(
            include_widget_section in prop::bool::ANY,
            include_single_field in prop::bool::ANY,
        ) {
            let toml_content = match (include_widget_section, include_single_field) {
                (false, _) => String::new(),
                (true, false) => "[widget]\nname = \"parent\"\n".to_string(),
                (true, true) => "[widget]\nname = \"parent\"\nis_single = true\n".to_string(),
            };

            let config: Result<Config, _> = toml::from_str(&toml_content);
            prop_assert!(config.is_ok(), "Failed to parse config with missing fields");
            let config = config.unwrap();

            prop_assert_eq!(config.widget.is_single, include_widget_section && include_single_field);
            prop_assert_eq!(config.widget.record_type, DEFAULT_RECORD_TYPE);
            prop_assert_eq!(config.http, HttpConfig::default());
        }
    }
}
