#[path = "launch.rs"]
mod launch;

fn main() -> std::process::ExitCode {
    launch::launch("todo_app", configs::TODO_DEFAULTS, server::run_todo_app)
}
