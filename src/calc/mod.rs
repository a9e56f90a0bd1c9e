pub mod holiday_calc;
pub mod leave_stats;
pub mod validator;
pub mod workday;

pub use holiday_calc::{get_holidays, HolidayCalendar};
pub use leave_stats::LeaveStats;
pub use validator::{validate, Accepted, Rejection, ValidationRules};
pub use workday::working_days;
