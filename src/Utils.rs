/// JSON task files: parameters, time horizon, step and run options
pub mod task_loader;
