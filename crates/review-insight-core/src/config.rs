use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub fetch: FetchConfig,
    pub report: ReportConfig,
}

/// Locations of the frozen classifier artifacts and the class names that
/// map onto the two sentiment labels.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    pub vectorizer_path: String,
    pub classifier_path: String,
    pub positive_class: String,
    pub negative_class: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    pub lang: String,
    pub country: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    pub default_count: u32,
    pub top_terms: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig {
                vectorizer_path: "models/vectorizer.json".to_string(),
                classifier_path: "models/classifier.json".to_string(),
                positive_class: "Positif".to_string(),
                negative_class: "Negatif".to_string(),
            },
            fetch: FetchConfig {
                lang: "id".to_string(),
                country: "id".to_string(),
                base_url: "https://play.google.com".to_string(),
                timeout_secs: 30,
            },
            report: ReportConfig {
                default_count: 50,
                top_terms: 15,
            },
        }
    }
}

/// Defaults, then an optional `Config.toml`, then `REVIEW_INSIGHT__*`
/// environment variables (`REVIEW_INSIGHT__FETCH__LANG=en`).
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    load_from(ConfigFile::with_name("Config").required(false))
}

pub fn load_configuration_from(path: &str) -> Result<AppConfig, ConfigError> {
    load_from(ConfigFile::with_name(path).required(true))
}

fn load_from(
    file: ConfigFile<config::FileSourceFile, config::FileFormat>,
) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::default();
    let builder = Config::builder()
        .set_default("model.vectorizer_path", defaults.model.vectorizer_path)?
        .set_default("model.classifier_path", defaults.model.classifier_path)?
        .set_default("model.positive_class", defaults.model.positive_class)?
        .set_default("model.negative_class", defaults.model.negative_class)?
        .set_default("fetch.lang", defaults.fetch.lang)?
        .set_default("fetch.country", defaults.fetch.country)?
        .set_default("fetch.base_url", defaults.fetch.base_url)?
        .set_default("fetch.timeout_secs", defaults.fetch.timeout_secs as i64)?
        .set_default("report.default_count", defaults.report.default_count as i64)?
        .set_default("report.top_terms", defaults.report.top_terms as i64)?
        .add_source(file)
        .add_source(
            Environment::with_prefix("REVIEW_INSIGHT")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;
    builder.try_deserialize::<AppConfig>()
}
