use std::sync::Arc;

use crate::application::items::AdminItemService;
use crate::application::pagination::PageSize;
use crate::application::repos::HealthRepo;

#[derive(Clone)]
pub struct ApiState {
    pub items: Arc<AdminItemService>,
    pub health: Arc<dyn HealthRepo>,
    /// Page size applied when a list request omits `limit`.
    pub default_page_size: PageSize,
}
