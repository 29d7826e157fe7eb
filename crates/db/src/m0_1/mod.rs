mod formatting_job_create_status_idx;
mod formatting_job_create_table;
mod ingredient_create_name_idx;
mod ingredient_create_table;
mod queue_control_create_table;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "main",
    "m0_1",
    vec_box![],
    vec_box![
        ingredient_create_table::Operation,
        ingredient_create_name_idx::Operation,
        formatting_job_create_table::Operation,
        formatting_job_create_status_idx::Operation,
        queue_control_create_table::Operation,
    ]
);
