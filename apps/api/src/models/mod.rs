// Domain records shared by the store, the agent and the HTTP handlers.
// Everything here is plain data: no locking, no I/O.

pub mod application;
pub mod job;
pub mod profile;

pub use application::{Application, ApplicationPatch, ApplicationStatus, QuestionAnswer};
pub use job::{CustomQuestion, Job, JobType, NoticePeriod};
pub use profile::{ProfileUpdate, UserProfile};
