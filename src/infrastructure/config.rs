use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ChartConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub chart: ChartSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub temperature_path: String,
    pub accumulation_path: String,
    pub reset_path: String,
    pub timeout_secs: Option<u64>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            temperature_path: "/temperature/".to_string(),
            accumulation_path: "/accumulative_temperature/".to_string(),
            reset_path: "/temperature/reset/".to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ChartSettings {
    pub title: String,
    pub unit: String,
    pub width: u32,
    pub height: u32,
    pub summary_template: String,
    pub loading_text: String,
    pub failure_text: String,
    pub alert_threshold: Option<f64>,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            title: "Temperature".to_string(),
            unit: "℃".to_string(),
            width: 960,
            height: 480,
            summary_template: "Accumulated temperature: ${value} ${unit}".to_string(),
            loading_text: "Loading...".to_string(),
            failure_text: "Failed to fetch data".to_string(),
            alert_threshold: None,
        }
    }
}

impl ChartSettings {
    /// Summary line for the accumulated value, two decimal places.
    pub fn summary_text(&self, accumulated: f64) -> String {
        let mut vars = HashMap::new();
        vars.insert("value".to_string(), format!("{:.2}", accumulated));
        vars.insert("unit".to_string(), self.unit.clone());
        fill_template(&self.summary_template, &vars)
    }

    pub fn threshold_notice(&self, accumulated: f64) -> Option<String> {
        let threshold = self.alert_threshold?;
        (accumulated > threshold).then(|| {
            format!(
                "Accumulated temperature has exceeded {:.2} {}",
                threshold, self.unit
            )
        })
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Load `config/chart.*` (optional) with `THERMO__SECTION__KEY` overrides.
pub fn load_chart_config() -> anyhow::Result<ChartConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/chart").required(false))
        .add_source(
            config::Environment::with_prefix("THERMO")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Replace `${name}` placeholders in a template
pub fn fill_template(template: &str, vars: &HashMap<String, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}
