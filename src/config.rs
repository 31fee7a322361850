//! Persistent bench configuration model and defaults.

use crate::{comps::module_actions::ActionConfig, method_list::params::ParamSpec};

/// Root configuration persisted to `blockbench.toml`.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Config {
    #[serde(default)]
    /// Playground console preferences.
    pub playground: PlaygroundConfig,
    #[serde(default)]
    /// Window preferences.
    pub ui: UiConfig,
    #[serde(default)]
    /// Log filter preferences.
    pub logging: LoggingConfig,
    #[serde(default)]
    /// Methods the module component starts with.
    pub module: ModuleConfig,
    #[serde(default)]
    /// Select input component setup.
    pub select_input: SelectInputConfig,
}

/// Which component the playground mounts.
#[derive(Debug, Clone, Copy, serde::Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlaygroundSubject {
    #[default]
    Module,
    SelectInput,
}

impl PlaygroundSubject {
    pub fn to_code(self) -> i32 {
        match self {
            Self::Module => 0,
            Self::SelectInput => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PlaygroundConfig {
    #[serde(default)]
    pub subject: PlaygroundSubject,
    /// Depth below which the data panel folds objects and arrays.
    #[serde(default = "default_data_collapse_depth")]
    pub data_collapse_depth: usize,
    /// Number of console lines kept for display.
    #[serde(default = "default_console_history")]
    pub console_history: usize,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            subject: PlaygroundSubject::default(),
            data_collapse_depth: default_data_collapse_depth(),
            console_history: default_console_history(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct UiConfig {
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    #[serde(default = "default_window_height")]
    pub window_height: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

#[derive(Debug, Clone, Copy, serde::Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    #[default]
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ModuleConfig {
    #[serde(default)]
    pub methods: Vec<ModuleMethodConfig>,
}

/// Seed for one module method; names are made unique on load.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ModuleMethodConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub params: Vec<ParamSpec>,
    #[serde(default)]
    pub action: Option<ActionConfig>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct SelectInputConfig {
    #[serde(default = "default_select_options")]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub custom_rule: String,
}

impl Default for SelectInputConfig {
    fn default() -> Self {
        Self {
            options: default_select_options(),
            required: false,
            custom_rule: String::new(),
        }
    }
}

fn default_data_collapse_depth() -> usize {
    2
}

fn default_console_history() -> usize {
    100
}

fn default_window_width() -> u32 {
    1200
}

fn default_window_height() -> u32 {
    760
}

fn default_select_options() -> Vec<String> {
    vec!["option1".to_string(), "option2".to_string(), "option3".to_string()]
}

/// Clamps numeric preferences into ranges the window can honor.
pub fn sanitize_config(config: Config) -> Config {
    Config {
        playground: PlaygroundConfig {
            subject: config.playground.subject,
            data_collapse_depth: config.playground.data_collapse_depth.clamp(1, 16),
            console_history: config.playground.console_history.clamp(10, 1_000),
        },
        ui: UiConfig {
            window_width: config.ui.window_width.clamp(640, 7_680),
            window_height: config.ui.window_height.clamp(480, 4_320),
        },
        logging: config.logging,
        module: config.module,
        select_input: SelectInputConfig {
            options: config
                .select_input
                .options
                .into_iter()
                .map(|option| option.trim().to_string())
                .filter(|option| !option.is_empty())
                .collect(),
            required: config.select_input.required,
            custom_rule: config.select_input.custom_rule.trim().to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{sanitize_config, Config, LogLevel, PlaygroundSubject};
    use crate::comps::module_actions::ActionConfig;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config: Config = toml::from_str("").expect("empty toml parses");
        assert_eq!(config, Config::default());
        assert_eq!(config.playground.data_collapse_depth, 2);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.select_input.options.len(), 3);
    }

    #[test]
    fn test_module_methods_seed_parses() {
        let config: Config = toml::from_str(
            r#"
[playground]
subject = "select_input"

[[module.methods]]
name = "greet"
params = [{ key = "who", required = true }]
action = { type = "show_message", template = "hi {who}" }

[[module.methods]]
name = "reset"
"#,
        )
        .expect("valid toml");

        assert_eq!(config.playground.subject, PlaygroundSubject::SelectInput);
        assert_eq!(config.module.methods.len(), 2);
        assert!(config.module.methods[0].params[0].required);
        assert_eq!(
            config.module.methods[0].action,
            Some(ActionConfig::ShowMessage {
                template: "hi {who}".to_string()
            })
        );
        assert_eq!(config.module.methods[1].action, None);
    }

    #[test]
    fn test_sanitize_clamps_and_trims() {
        let mut config = Config::default();
        config.playground.data_collapse_depth = 0;
        config.playground.console_history = 1_000_000;
        config.ui.window_width = 10;
        config.select_input.options = vec![" a ".to_string(), "  ".to_string()];
        config.select_input.custom_rule = "  rule ".to_string();

        let sanitized = sanitize_config(config);
        assert_eq!(sanitized.playground.data_collapse_depth, 1);
        assert_eq!(sanitized.playground.console_history, 1_000);
        assert_eq!(sanitized.ui.window_width, 640);
        assert_eq!(sanitized.select_input.options, vec!["a"]);
        assert_eq!(sanitized.select_input.custom_rule, "rule");
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let serialized = toml::to_string(&Config::default()).expect("default serializes");
        let parsed: Config = toml::from_str(&serialized).expect("serialized parses");
        assert_eq!(parsed, Config::default());
    }
}
