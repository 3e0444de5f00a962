pub mod board_state;
pub mod board_store;
pub mod id;
pub mod models;
pub mod seed;
pub mod storage;
pub mod task_edit;
pub mod task_list;
pub mod ui;
