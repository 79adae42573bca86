pub type CmdResult<T> = whitelabel::Result<(T, i32)>;

pub mod apply;
pub mod create;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args))
    };
}

pub(crate) fn run_json(command: crate::Commands) -> (whitelabel::Result<serde_json::Value>, i32) {
    crate::tty::status("whitelabel is working...");

    match command {
        crate::Commands::Apply(args) => dispatch!(args, apply),
        crate::Commands::Create(args) => dispatch!(args, create),
    }
}
