//! UI Components
//!
//! Reusable UI components for the desktop application.

mod equipment_card;
mod equipment_detail;
mod equipment_form;
mod equipment_list;
mod inspection_form;
mod sync_banner;
mod toolbar;

pub use equipment_card::EquipmentCard;
pub use equipment_detail::EquipmentDetail;
pub use equipment_form::EquipmentForm;
pub use equipment_list::EquipmentList;
pub use inspection_form::InspectionForm;
pub use sync_banner::SyncBanner;
pub use toolbar::Toolbar;
