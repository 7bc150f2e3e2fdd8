// Business logic services

pub mod analysis_runner;
pub mod educational_content_service;
pub mod exercise_service;
pub mod feedback_service;
pub mod posture_scorer;
pub mod posture_session_service;
pub mod progress_service;
pub mod reminder_scheduler;
pub mod reminder_service;
pub mod user_exercise_service;

pub use analysis_runner::{
    AnalysisError, AnalysisRunner, AnalysisSnapshot, FeedState, SessionOutcome,
};
pub use educational_content_service::EducationalContentService;
pub use exercise_service::ExerciseService;
pub use feedback_service::FeedbackService;
pub use posture_scorer::{PostureFrame, PostureGrade, PostureScorer};
pub use posture_session_service::PostureSessionService;
pub use progress_service::ProgressService;
pub use reminder_scheduler::ReminderScheduler;
pub use reminder_service::ReminderService;
pub use user_exercise_service::UserExerciseService;
