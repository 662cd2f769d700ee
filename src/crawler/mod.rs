pub mod dedupe;
pub mod extract;
pub mod fetch;
