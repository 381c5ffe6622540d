pub mod builtins;
pub mod external;
pub mod registry;

pub use registry::{BuiltinCommand, BuiltinRegistry, BUILTINS};

use crate::pipeline::CommandStage;
use crate::redirection;
use crate::session::SessionState;

/// Run one stage outside a pipeline: builtins execute in-process with the
/// shell's fds temporarily redirected, everything else spawns a child.
pub fn run_stage(stage: &CommandStage, session: &mut SessionState) -> i32 {
    let name = &stage.argv[0];

    if BUILTINS.is_builtin(name) {
        let _guard = match redirection::redirect_current_process(&stage.redirs) {
            Ok(guard) => guard,
            Err(e) => {
                eprintln!("{}", e);
                return 1;
            }
        };
        match BUILTINS.execute(name, &stage.argv, session) {
            Some(Ok(status)) => status,
            Some(Err(e)) => {
                eprintln!("{}", e);
                e.status()
            }
            None => unreachable!("registry lookup after is_builtin"),
        }
    } else {
        external::run_external(stage)
    }
}
