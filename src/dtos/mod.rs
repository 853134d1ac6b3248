pub mod admindtos;
pub mod bookingdtos;
pub mod servicedtos;
pub mod userdtos;

pub use admindtos::*;
pub use bookingdtos::*;
pub use servicedtos::*;
pub use userdtos::*;
