pub mod cargo_env {
    pub const CARGO_PKG_NAME: &str = env!("CARGO_PKG_NAME");
}

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const RUNNER_FAILURE: i32 = 2;
    pub const INTERRUPTED: i32 = 130;
    pub const MAX_FAILURES: usize = 255;
}
