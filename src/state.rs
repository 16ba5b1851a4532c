use crate::config::Config;
use crate::domain::guest_types::GuestTypeTable;
use crate::domain::ports::{
    ActivityLogRepository, Clock, ExhibitionRepository, GuestRepository, ReservationRepository,
    TermRepository,
};
use crate::domain::services::{admission::AdmissionService, bulk_update::BulkUpdateService};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub term_repo: Arc<dyn TermRepository>,
    pub reservation_repo: Arc<dyn ReservationRepository>,
    pub exhibition_repo: Arc<dyn ExhibitionRepository>,
    pub guest_repo: Arc<dyn GuestRepository>,
    pub activity_log_repo: Arc<dyn ActivityLogRepository>,
    pub admission: Arc<AdmissionService>,
    pub bulk: Arc<BulkUpdateService>,
    pub clock: Arc<dyn Clock>,
    pub guest_types: Arc<GuestTypeTable>,
}
