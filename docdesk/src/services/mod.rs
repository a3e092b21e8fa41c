mod assistant;

pub use assistant::{Assistant, APOLOGY, GREETING, HELP, NO_DEPARTMENT_MATCH, NO_MATCH};
