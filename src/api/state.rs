use crate::controller::SearchController;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub controller: SearchController,
}

impl AppState {
    pub fn new(controller: SearchController) -> Self {
        Self { controller }
    }
}
