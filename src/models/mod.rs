pub mod analyticsmodel;
pub mod bookingmodel;
pub mod servicemodel;
pub mod usermodel;
