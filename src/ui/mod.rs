pub mod logview;
pub mod messages;
