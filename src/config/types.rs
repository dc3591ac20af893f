use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Clue-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Which site to crawl and which category to follow
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Site root; category discovery starts here
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// The one category whose pagination chain is walked
    #[serde(rename = "target-category-url")]
    pub target_category_url: String,
}

/// Waits, delays and bounds applied during the crawl
#[derive(Debug, Clone, Deserialize)]
pub struct TimingConfig {
    /// Timeout for each wait-for-element (milliseconds)
    #[serde(rename = "element-wait-timeout", default = "default_element_wait")]
    pub element_wait_timeout: u64,

    /// Timeout for each navigation (milliseconds)
    #[serde(rename = "navigation-timeout", default = "default_navigation")]
    pub navigation_timeout: u64,

    /// Fixed delay after each "show more" click (milliseconds)
    #[serde(rename = "reveal-settle-delay", default = "default_settle_delay")]
    pub reveal_settle_delay: u64,

    /// Upper bound on "show more" clicks per clue
    #[serde(rename = "max-reveal-iterations", default = "default_reveal_iterations")]
    pub max_reveal_iterations: u32,

    /// Extra attempts for a failed clue or sub-clue node
    #[serde(rename = "node-retries", default)]
    pub node_retries: u32,

    /// Timebox for the whole crawl (seconds)
    #[serde(rename = "crawl-timeout", default)]
    pub crawl_timeout: Option<u64>,
}

impl TimingConfig {
    pub fn element_wait(&self) -> Duration {
        Duration::from_millis(self.element_wait_timeout)
    }

    pub fn navigation(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_settle_delay)
    }

    pub fn crawl_limit(&self) -> Option<Duration> {
        self.crawl_timeout.map(Duration::from_secs)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            element_wait_timeout: default_element_wait(),
            navigation_timeout: default_navigation(),
            reveal_settle_delay: default_settle_delay(),
            max_reveal_iterations: default_reveal_iterations(),
            node_retries: 0,
            crawl_timeout: None,
        }
    }
}

fn default_element_wait() -> u64 {
    20_000
}

fn default_navigation() -> u64 {
    60_000
}

fn default_settle_delay() -> u64 {
    2_000
}

fn default_reveal_iterations() -> u32 {
    50
}

/// Headless browser launch options
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    /// Path to a Chrome/Chromium binary; auto-detected when absent
    #[serde(default)]
    pub executable: Option<String>,

    #[serde(default = "default_true")]
    pub headless: bool,

    #[serde(rename = "no-sandbox", default = "default_true")]
    pub no_sandbox: bool,

    /// Extra command line switches passed to the browser
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            executable: None,
            headless: true,
            no_sandbox: true,
            args: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Where to write the JSON response; stdout when absent
    #[serde(rename = "json-path", default)]
    pub json_path: Option<String>,

    /// Where to write the markdown summary; skipped when absent
    #[serde(rename = "summary-path", default)]
    pub summary_path: Option<String>,
}
