pub mod contact;
pub mod lenient;
pub mod restaurant;
pub mod review;
