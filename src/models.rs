pub mod quotes;
pub mod votes;

pub use quotes::{AddOutcome, NewQuote, Quote, Rejection, ScoredQuote};
pub use votes::{Vote, VoteValue};
