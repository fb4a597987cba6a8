//! Page wiring constants. Element ids match `www/index.html`.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub endpoint: String,
    pub form_id: &'static str,
    pub l1_input_id: &'static str,
    pub l2_input_id: &'static str,
    pub count_input_id: &'static str,
    pub level_input_id: &'static str,
    pub auto_refresh_id: &'static str,
    pub results_id: &'static str,
    pub status_id: &'static str,
    pub timer_id: &'static str,
    /// Timer redraw cadence.
    pub tick_ms: i32,
    /// Pause between completion and the automatic resubmit.
    pub refresh_delay_ms: i32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: "/generate".to_string(),
            form_id: "language-pair-form",
            l1_input_id: "L1_language",
            l2_input_id: "L2_language",
            count_input_id: "n",
            level_input_id: "reading_level",
            auto_refresh_id: "auto-refresh",
            results_id: "results",
            status_id: "status-message",
            timer_id: "timer",
            tick_ms: 1_000,
            refresh_delay_ms: 1_000,
        }
    }
}

impl AppConfig {
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into(), ..Self::default() }
    }
}
