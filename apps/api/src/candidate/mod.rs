// Candidate side: profile editing, resume upload, job board and applications.

pub mod handlers;
pub mod resume;
