pub struct Config;

impl Config {
    /// Base URL for API calls.
    ///
    /// Empty by default: in development Trunk proxies `/api/` to the backend
    /// and in production nginx does, so relative URLs work for both. A build
    /// can bake in an absolute origin through `CONTEST_API_BASE_URL`.
    pub fn api_base_url() -> String {
        option_env!("CONTEST_API_BASE_URL").unwrap_or_default().to_string()
    }
}
