/// worked examples: reaction thermochemistry, TST rates with tunneling, molecular
/// geometry and a JSON reaction model
pub mod rate_examples;
