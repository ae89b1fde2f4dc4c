pub mod history;
pub mod outcome;
pub mod record;
