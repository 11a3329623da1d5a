use std::sync::Arc;

use inciscope_core::application::InciscopeService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: InciscopeService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: InciscopeService) -> Self {
        Self { args, service }
    }
}
