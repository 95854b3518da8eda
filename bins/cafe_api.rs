#[path = "launch.rs"]
mod launch;

fn main() -> std::process::ExitCode {
    launch::launch("cafe_api", configs::CAFE_DEFAULTS, server::run_cafe_api)
}
