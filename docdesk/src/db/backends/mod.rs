pub mod jsonl;
pub mod memory;
