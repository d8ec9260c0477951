use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub trace_stages: bool,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_on")]
    pub cycle_records: bool,

    #[serde(default = "default_on")]
    pub final_report: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            cycle_records: true,
            final_report: true,
        }
    }
}

fn default_on() -> bool {
    true
}
