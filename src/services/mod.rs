pub mod dashboard;
pub mod formatting;

#[cfg(test)]
mod dashboard_tests;
