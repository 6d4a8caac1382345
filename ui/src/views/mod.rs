mod uploads;
pub use uploads::UploadsPage;
