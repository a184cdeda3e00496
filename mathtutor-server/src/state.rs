use crate::config::Config;
use crate::logger::JsonlLog;
use crate::upstream::UpstreamClient;

/// Everything a request handler needs, built once at startup and shared
/// behind an `Arc`. No other cross-request state exists.
pub struct AppState {
    pub config: Config,
    pub upstream: UpstreamClient,
    pub chat_log: JsonlLog,
    pub feedback_log: JsonlLog,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let upstream = UpstreamClient::new(&config)?;
        let chat_log = JsonlLog::new(&config.chat_log);
        let feedback_log = JsonlLog::new(&config.feedback_log);
        Ok(Self {
            config,
            upstream,
            chat_log,
            feedback_log,
        })
    }
}
