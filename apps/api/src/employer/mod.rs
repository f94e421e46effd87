// Employer side: posting jobs (with optional AI auto-fill) and applicant counts.

pub mod handlers;
pub mod job_form;
pub mod stats;
