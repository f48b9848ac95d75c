pub mod percentages;
pub mod poll;
pub mod repository;
pub mod validation;

pub use percentages::percentages;
pub use poll::PollService;
pub use repository::QuestionRepository;
pub use validation::{NewQuestion, QuestionId, VoteOption};
