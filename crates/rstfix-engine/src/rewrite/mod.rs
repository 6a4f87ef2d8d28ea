pub mod classify;
pub mod line;
pub mod literal_block;
pub mod pipeline;
pub mod rules;

pub use classify::{LineClass, LiteralMarker, is_table_line};
pub use literal_block::{LiteralBlockAssembler, assemble_literal_blocks};
pub use pipeline::{Pipeline, RunStats, Stage, StageStats};
pub use rules::{Edit, RULES, Rewrite, Rule, Trigger};
