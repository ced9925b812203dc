//! The macros this board can play. Exactly one is selected in `main`.

use hidseq::steps::*;
use hidseq::{Macro, TimingConfig, host_macro};

pub(crate) const TIMING: TimingConfig = TimingConfig::new();

/// Run a command in a new terminal and close it
pub(crate) const COMMAND: Macro = host_macro!("command", [
    settle(TIMING),
    open_terminal(TIMING),
    run_command("echo \"hello from hidseq\" > /tmp/hidseq.txt", TIMING),
    close_terminal(TIMING),
]);

/// Same, after switching the input source to en-US
#[allow(dead_code)]
pub(crate) const COMMAND_WITH_LAYOUT: Macro = host_macro!("command_with_layout", [
    settle(TIMING),
    open_terminal(TIMING),
    switch_layout(TIMING),
    run_command("echo \"hello from hidseq\" > /tmp/hidseq.txt", TIMING),
    close_terminal(TIMING),
]);

/// Start a background job, restore the input source and leave the shell
#[allow(dead_code)]
pub(crate) const DETACHED: Macro = host_macro!("detached", [
    settle(TIMING),
    open_terminal(TIMING),
    switch_layout(TIMING),
    run_detached("nohup sleep 60 >/dev/null 2>&1 & disown", TIMING),
    restore_layout(TIMING),
    exit_shell(TIMING),
    close_terminal(TIMING),
]);
