use std::process;

fn main() {
    let code = myshell::run_shell();
    process::exit(code);
}
