use super::error::ToolError;
use super::tool::DynTool;
use crate::session::{format_modal_states, ModalState};

/// Decide whether `tool` may run given the session's current modal
/// states. Pure over the passed state; re-evaluated on every invocation.
///
/// A tool declaring a cleared modal-state kind may only run while a state
/// of that kind is present; every other tool may only run while no modal
/// state is present. This keeps unrelated operations from stalling on an
/// unresolved obstruction while leaving the one tool meant to resolve it
/// reachable.
pub fn check_modal_gate(tool: &dyn DynTool, states: &[ModalState]) -> Result<(), ToolError> {
    let name = tool.spec().name;
    match tool.clears_modal_state() {
        Some(kind) => {
            if !states.iter().any(|state| state.kind == kind) {
                return Err(ToolError::ModalState(format!(
                    "The tool \"{name}\" can only be used when there is related modal state present.\n{}",
                    format_modal_states(states)
                )));
            }
        }
        None => {
            if !states.is_empty() {
                return Err(ToolError::ModalState(format!(
                    "Tool \"{name}\" does not handle the modal state.\n{}",
                    format_modal_states(states)
                )));
            }
        }
    }
    Ok(())
}
