pub mod learning_parameters;
pub mod value_table;
