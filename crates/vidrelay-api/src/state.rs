use std::sync::Arc;

use vidrelay_core::{Config, VideoHost};

use crate::services::upload::SpoolConfig;

/// Shared, credential-free application state.
///
/// The video host only holds a connection pool; every request builds its own
/// authorized session from the caller's token.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub video_host: Arc<dyn VideoHost>,
    pub spool: SpoolConfig,
}

impl AppState {
    pub fn new(config: Config, video_host: Arc<dyn VideoHost>) -> Self {
        let spool = SpoolConfig::from_config(&config);
        Self {
            config,
            video_host,
            spool,
        }
    }
}
