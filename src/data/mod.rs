pub mod app_settings;
pub mod balance;
pub mod feed;
pub mod holiday;
pub mod leave_request;
pub mod persistence;

pub use app_settings::AppSettings;
pub use balance::LeaveBalance;
pub use holiday::{Holiday, HolidayData, Region, RegionSelector};
pub use leave_request::{
    LeaveCategory, LeaveRequest, LeaveRequestData, LeaveRequestDraft, LeaveType, RequestStatus,
};
pub use persistence::Persistable;
