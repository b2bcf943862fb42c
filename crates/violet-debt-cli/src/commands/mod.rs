pub mod payoff;
pub mod strategies;
